//! Public configuration and output types for restaurant ranking.
#![forbid(unsafe_code)]

use dishswipe_core::Restaurant;
use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::RankerConfigError;

/// Times Square, the default reference point for distances.
pub const TIMES_SQUARE: Coord<f64> = Coord {
    x: -73.985_5_f64,
    y: 40.758_f64,
};

/// Default number of recommendations returned.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Tunable weights combining affinity, mood and distance into a score.
///
/// Lower scores rank first: `distance_km * distance_factor - affinity`, where
/// affinity is `likes_for_cuisine * affinity_per_like` plus `mood_bonus` when
/// the active mood's keyword appears in the restaurant's cuisine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankWeights {
    /// Affinity earned per liked dish of the restaurant's cuisine.
    pub affinity_per_like: f64,
    /// Affinity earned when the mood keyword matches the cuisine.
    pub mood_bonus: f64,
    /// Multiplier applied to the distance in kilometres.
    pub distance_factor: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            affinity_per_like: 2.0_f64,
            mood_bonus: 1.0_f64,
            distance_factor: 0.5_f64,
        }
    }
}

impl RankWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`RankerConfigError::InvalidWeight`] naming the first weight
    /// that is negative or not finite.
    pub fn validate(self) -> Result<Self, RankerConfigError> {
        let weights = [
            ("affinity_per_like", self.affinity_per_like),
            ("mood_bonus", self.mood_bonus),
            ("distance_factor", self.distance_factor),
        ];
        weights
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0_f64)
            .map_or(Ok(self), |(name, _)| {
                Err(RankerConfigError::InvalidWeight { name })
            })
    }
}

/// Ranker settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Score weights.
    pub weights: RankWeights,
    /// Point distances are measured from (`x = longitude`, `y = latitude`).
    pub reference: Coord<f64>,
    /// Upper bound on returned recommendations.
    pub max_results: usize,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            weights: RankWeights::default(),
            reference: TIMES_SQUARE,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl RankerConfig {
    /// Replace the weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: RankWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the reference point.
    #[must_use]
    pub const fn with_reference(mut self, reference: Coord<f64>) -> Self {
        self.reference = reference;
        self
    }

    /// Replace the result cap.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`RankerConfigError`] when a weight is unusable, the reference
    /// point is outside WGS84 bounds, or the cap is zero.
    pub fn validate(self) -> Result<Self, RankerConfigError> {
        self.weights.validate()?;
        let lon_ok = (-180.0_f64..=180.0_f64).contains(&self.reference.x);
        let lat_ok = (-90.0_f64..=90.0_f64).contains(&self.reference.y);
        if !(lon_ok && lat_ok) {
            return Err(RankerConfigError::InvalidReference);
        }
        if self.max_results == 0 {
            return Err(RankerConfigError::ZeroCap);
        }
        Ok(self)
    }
}

/// A ranked restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation<'c> {
    /// The recommended restaurant.
    pub restaurant: &'c Restaurant,
    /// Composite score; lower is better and `f64::INFINITY` marks a
    /// restaurant whose location could not be resolved.
    pub score: f64,
    /// Distance from the reference point, when the location resolved.
    pub distance_km: Option<f64>,
    /// Affinity credited to the restaurant.
    pub affinity: f64,
}

impl Recommendation<'_> {
    /// Report whether the restaurant could be located.
    #[must_use]
    pub const fn is_located(&self) -> bool {
        self.distance_km.is_some()
    }
}
