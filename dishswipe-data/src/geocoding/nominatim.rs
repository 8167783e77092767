//! Nominatim search response types.
//!
//! The `/search` endpoint with `format=json` answers with an array of places.
//! Coordinates arrive as decimal strings rather than numbers.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Search/>

use geo::Coord;
use serde::Deserialize;

/// A single place returned by the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchPlace {
    /// Latitude as a decimal string.
    pub lat: String,
    /// Longitude as a decimal string.
    pub lon: String,
    /// Human readable name of the match.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl SearchPlace {
    /// Parse the coordinate, returning `None` when either component is not a
    /// finite number.
    pub fn coord(&self) -> Option<Coord<f64>> {
        let lat: f64 = self.lat.trim().parse().ok()?;
        let lon: f64 = self.lon.trim().parse().ok()?;
        (lat.is_finite() && lon.is_finite()).then_some(Coord { x: lon, y: lat })
    }

    /// Name used when logging the match.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or("unnamed place")
    }
}
