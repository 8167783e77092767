//! Great-circle distances between WGS84 coordinates.
//!
//! [`distance_km`] is a pure haversine calculation. [`DistanceMemo`] wraps it
//! with an explicit cache keyed by the exact bit patterns of the inputs, so a
//! memoised result is always identical to a fresh computation.

use std::collections::HashMap;
use std::sync::Mutex;

use geo::Coord;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two coordinates.
///
/// Coordinates use `x = longitude` and `y = latitude`, both in degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dishswipe_core::distance::distance_km;
///
/// let times_square = Coord { x: -73.9855, y: 40.7580 };
/// let brooklyn_bridge = Coord { x: -73.9969, y: 40.7061 };
/// let km = distance_km(times_square, brooklyn_bridge);
/// assert!((km - 5.85).abs() < 0.1);
/// assert_eq!(distance_km(times_square, times_square), 0.0);
/// ```
pub fn distance_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat_from = from.y.to_radians();
    let lat_to = to.y.to_radians();
    let d_lat = (to.y - from.y).to_radians();
    let d_lon = (to.x - from.x).to_radians();

    let half_chord = (d_lat / 2.0).sin().powi(2)
        + lat_from.cos() * lat_to.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push the chord fraction fractionally outside [0, 1].
    let a = half_chord.clamp(0.0, 1.0);
    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

type MemoKey = [u64; 4];

/// Memoised [`distance_km`].
///
/// The memo is `Send + Sync` so sessions sharing a process can share one
/// instance. A poisoned lock falls back to computing without caching.
#[derive(Debug, Default)]
pub struct DistanceMemo {
    entries: Mutex<HashMap<MemoKey, f64>>,
}

impl DistanceMemo {
    /// Create an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the distance between `from` and `to`, computing it at most once.
    pub fn distance_km(&self, from: Coord<f64>, to: Coord<f64>) -> f64 {
        let key = [
            from.x.to_bits(),
            from.y.to_bits(),
            to.x.to_bits(),
            to.y.to_bits(),
        ];
        let Ok(mut entries) = self.entries.lock() else {
            return distance_km(from, to);
        };
        *entries
            .entry(key)
            .or_insert_with(|| distance_km(from, to))
    }

    /// Number of memoised coordinate pairs.
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Report whether nothing has been memoised yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
