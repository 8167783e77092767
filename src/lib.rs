//! Facade crate for the dishswipe recommendation engine.
//!
//! This crate re-exports the core session and catalog types together with the
//! restaurant ranker so applications can depend on a single crate.

#![forbid(unsafe_code)]

pub use dishswipe_core::{
    BadgeStatus, BadgeTable, Catalog, CoordinateResolver, CuisineIndex, Dish, DishFilter,
    FavouriteSort, GeocodeError, Geocoder, LevelProgress, LevelTable, LikeOutcome, Mood,
    OfflineGeocoder, PreferenceState, ProfileSummary, Restaurant, Session, SessionError,
    SessionStore, distance_km,
};
pub use dishswipe_scorer::{RankerConfig, RankerConfigError, Recommendation, RecommendationRanker};

#[cfg(feature = "test-support")]
pub use dishswipe_core::test_support;
