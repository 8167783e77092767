//! JSON report printed after a replay.

use std::collections::BTreeMap;

use dishswipe_core::{
    BadgeStatus, Catalog, FavouriteSort, LevelProgress, LevelTable, MatchProgress, ProfileSummary,
    Session, profile,
};
use dishswipe_scorer::Recommendation;
use serde::Serialize;

/// Summary of a replayed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    /// Liked dishes in like order.
    pub likes: Vec<String>,
    /// Disliked dishes in swipe order.
    pub dislikes: Vec<String>,
    /// Experience points.
    pub xp: u32,
    /// Level reached for `xp`.
    pub level: LevelProgress,
    /// Every badge with its unlock state.
    pub badges: Vec<BadgeStatus>,
    /// Cursor position among dishes passing the final filter.
    pub progress: MatchProgress,
    /// Profile headline statistics.
    pub profile: ProfileSummary,
    /// Liked dish names in favourites order.
    pub favourites: Vec<String>,
    /// Notes keyed by dish.
    pub notes: BTreeMap<String, String>,
    /// Review counts and averages keyed by restaurant.
    pub reviews: Vec<ReviewSummary>,
    /// A random restaurant serving the favourite cuisine.
    pub next_place: Option<String>,
    /// Ranked restaurant recommendations.
    pub recommendations: Vec<RecommendationReport>,
}

/// Review statistics for one restaurant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    /// Restaurant name.
    pub restaurant: String,
    /// Number of reviews.
    pub count: usize,
    /// Mean star rating.
    pub average: Option<f64>,
}

/// One ranked restaurant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationReport {
    /// Restaurant name.
    pub name: String,
    /// Cuisine served.
    pub cuisine: String,
    /// Street address.
    pub address: String,
    /// Ranking score; `None` when the restaurant could not be located.
    pub score: Option<f64>,
    /// Distance from the reference point in kilometres.
    pub distance_km: Option<f64>,
    /// Cuisine affinity contribution.
    pub affinity: f64,
}

impl From<&Recommendation<'_>> for RecommendationReport {
    fn from(ranked: &Recommendation<'_>) -> Self {
        Self {
            name: ranked.restaurant.name.clone(),
            cuisine: ranked.restaurant.cuisine.clone(),
            address: ranked.restaurant.address.clone(),
            score: Some(ranked.score).filter(|score| score.is_finite()),
            distance_km: ranked.distance_km,
            affinity: ranked.affinity,
        }
    }
}

impl SessionReport {
    /// Build the report for `session`.
    ///
    /// Takes the session mutably because picking the next place draws from
    /// its random generator.
    pub(crate) fn build(
        session: &mut Session,
        catalog: &Catalog,
        levels: &LevelTable,
        favourites: (&str, FavouriteSort),
        ranked: &[Recommendation<'_>],
    ) -> Self {
        let next_place = session.next_place(catalog).map(|r| r.name.clone());
        let state = session.state();
        let (query, sort) = favourites;
        let reviews = state
            .reviews()
            .iter()
            .map(|(restaurant, entries)| ReviewSummary {
                restaurant: restaurant.clone(),
                count: entries.len(),
                average: state.average_rating(restaurant),
            })
            .collect();
        Self {
            likes: state.likes().to_vec(),
            dislikes: state.dislikes().to_vec(),
            xp: state.xp(),
            level: levels.progress(state.xp()),
            badges: state
                .badge_table()
                .statuses(state.likes().len(), state.badges()),
            progress: session.match_progress(catalog),
            profile: ProfileSummary::from_state(state, catalog),
            favourites: profile::favourites(state, catalog, query, sort)
                .into_iter()
                .map(|dish| dish.name.clone())
                .collect(),
            notes: state.notes().clone(),
            reviews,
            next_place,
            recommendations: ranked.iter().map(RecommendationReport::from).collect(),
        }
    }
}
