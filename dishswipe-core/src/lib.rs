//! Core domain types for the dishswipe engine.
//!
//! The crate models the dish and restaurant catalog, the per-session swipe
//! state with its XP, badge and level progression, and the coordinate
//! resolution used when ranking restaurants. Recoverable problems such as a
//! failed geocoding lookup or an unknown dish name surface as `None` rather
//! than errors, so a session never aborts on bad data.

pub mod badge;
pub mod catalog;
pub mod dish;
pub mod distance;
pub mod geocode;
pub mod level;
pub mod preference;
pub mod profile;
pub mod resolver;
pub mod restaurant;
pub mod session;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use badge::{BadgeRule, BadgeStatus, BadgeTable, BadgeTableError};
pub use catalog::{Catalog, CuisineIndex};
pub use dish::{Dish, DishFilter, Mood};
pub use distance::{DistanceMemo, EARTH_RADIUS_KM, distance_km};
pub use geocode::{GeocodeError, Geocoder, OfflineGeocoder};
pub use level::{Level, LevelProgress, LevelTable, LevelTableError};
pub use preference::{LikeOutcome, PreferenceState, Review, ReviewError, XP_PER_LIKE};
pub use profile::{FavouriteSort, ProfileSummary};
pub use resolver::{
    CoordinateCache, CoordinateResolver, DEFAULT_REGION_SUFFIX, MemoryCoordinateCache,
    ResolverConfig,
};
pub use restaurant::Restaurant;
pub use session::{MatchProgress, Session, SessionError, SessionId, SessionStore};
