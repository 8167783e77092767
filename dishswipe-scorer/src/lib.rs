//! Restaurant ranking for dishswipe sessions.
//!
//! [`RecommendationRanker`] turns a session's liked dishes into a ranked list
//! of restaurants. Each restaurant earns affinity for every liked dish of its
//! cuisine, plus a bonus when the active [`Mood`](dishswipe_core::Mood)
//! keyword appears in its cuisine, and is penalised by its distance from a
//! reference point. Restaurants that cannot be located rank last but are
//! never dropped.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use dishswipe_core::{Catalog, CoordinateResolver, Dish, OfflineGeocoder, PreferenceState, Restaurant};
//! use dishswipe_scorer::{RankerConfig, RecommendationRanker};
//!
//! let catalog = Catalog::new(
//!     vec![Dish::new("Dumplings", "Chinese"), Dish::new("Dal", "Indian")],
//!     vec![
//!         Restaurant::new("Dhaba", "Indian", "108 Lexington Ave")
//!             .with_location(Coord { x: -73.9826, y: 40.7425 }),
//!         Restaurant::new("Joe's Shanghai", "Chinese", "46 Bowery")
//!             .with_location(Coord { x: -73.9967, y: 40.7155 }),
//!     ],
//! );
//! let mut state = PreferenceState::new();
//! state.like("Dumplings");
//! state.like("Dal");
//!
//! let ranker = RecommendationRanker::new(RankerConfig::default()).expect("valid config");
//! let resolver = CoordinateResolver::new(OfflineGeocoder);
//! let ranked = ranker.rank(&state, &catalog, &resolver, None);
//! assert_eq!(ranked.len(), 2);
//! ```

#![forbid(unsafe_code)]

mod error;
mod ranker;
mod types;

pub use error::RankerConfigError;
pub use ranker::RecommendationRanker;
pub use types::{DEFAULT_MAX_RESULTS, RankWeights, RankerConfig, Recommendation, TIMES_SQUARE};
