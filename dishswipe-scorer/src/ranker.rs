//! Rank restaurants by cuisine affinity, mood and distance.
//!
//! Scores are `distance * distance_factor - affinity`, sorted ascending. A
//! restaurant whose location cannot be resolved scores `f64::INFINITY` and
//! therefore sorts after every located restaurant without being dropped. The
//! sort is stable, so equal scores keep the catalog's restaurant order; when
//! nothing resolves the ranking is exactly the input order.

#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::Arc;

use dishswipe_core::profile::liked_dishes;
use dishswipe_core::{
    Catalog, CoordinateCache, CoordinateResolver, DistanceMemo, Geocoder, Mood, PreferenceState,
    Restaurant,
};
use log::debug;

use crate::{RankWeights, RankerConfig, RankerConfigError, Recommendation};

/// Ranks a catalog's restaurants for one session's preferences.
///
/// The distance memo may be shared between rankers serving different
/// sessions.
#[derive(Debug, Clone)]
pub struct RecommendationRanker {
    config: RankerConfig,
    memo: Arc<DistanceMemo>,
}

impl Default for RecommendationRanker {
    fn default() -> Self {
        Self {
            config: RankerConfig::default(),
            memo: Arc::new(DistanceMemo::new()),
        }
    }
}

impl RecommendationRanker {
    /// Build a ranker from a validated configuration.
    ///
    /// # Errors
    /// Returns [`RankerConfigError`] when the configuration is unusable.
    pub fn new(config: RankerConfig) -> Result<Self, RankerConfigError> {
        Self::with_memo(config, Arc::new(DistanceMemo::new()))
    }

    /// Build a ranker that shares `memo` with other rankers.
    ///
    /// # Errors
    /// Returns [`RankerConfigError`] when the configuration is unusable.
    pub fn with_memo(
        config: RankerConfig,
        memo: Arc<DistanceMemo>,
    ) -> Result<Self, RankerConfigError> {
        Ok(Self {
            config: config.validate()?,
            memo,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// The distance memo.
    #[must_use]
    pub fn memo(&self) -> &DistanceMemo {
        &self.memo
    }

    /// Rank the catalog's restaurants for `state`.
    ///
    /// Returns at most `min(max_results, likes)` recommendations, best first.
    /// An empty like list yields no recommendations.
    ///
    /// # Examples
    /// ```
    /// use dishswipe_core::{Catalog, CoordinateResolver, Dish, OfflineGeocoder, PreferenceState, Restaurant};
    /// use dishswipe_scorer::RecommendationRanker;
    ///
    /// let catalog = Catalog::new(
    ///     vec![Dish::new("Pho", "Vietnamese")],
    ///     vec![Restaurant::new("Saigon", "Vietnamese", "1 Baxter St")],
    /// );
    /// let mut state = PreferenceState::new();
    /// state.like("Pho");
    /// let resolver = CoordinateResolver::new(OfflineGeocoder);
    ///
    /// let ranked = RecommendationRanker::default().rank(&state, &catalog, &resolver, None);
    /// assert_eq!(ranked.len(), 1);
    /// assert!(ranked.first().is_some_and(|r| r.score.is_infinite()));
    /// ```
    #[must_use]
    pub fn rank<'c, G, C>(
        &self,
        state: &PreferenceState,
        catalog: &'c Catalog,
        resolver: &CoordinateResolver<G, C>,
        mood: Option<Mood>,
    ) -> Vec<Recommendation<'c>>
    where
        G: Geocoder,
        C: CoordinateCache,
    {
        let likes = state.likes().len();
        if likes == 0 {
            return Vec::new();
        }
        let frequencies = cuisine_frequencies(state, catalog);

        let mut ranked: Vec<Recommendation<'c>> = catalog
            .restaurants()
            .iter()
            .map(|restaurant| self.score(restaurant, &frequencies, resolver, mood))
            .collect();
        // `sort_by` is stable; `total_cmp` orders the infinite sentinel last.
        ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
        ranked.truncate(self.config.max_results.min(likes));
        debug!(
            "ranked {} of {} restaurants for {likes} likes",
            ranked.len(),
            catalog.restaurants().len()
        );
        ranked
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "scores blend distance and affinity in floating point"
    )]
    fn score<'c, G, C>(
        &self,
        restaurant: &'c Restaurant,
        frequencies: &HashMap<String, u32>,
        resolver: &CoordinateResolver<G, C>,
        mood: Option<Mood>,
    ) -> Recommendation<'c>
    where
        G: Geocoder,
        C: CoordinateCache,
    {
        let weights = self.config.weights;
        let affinity = cuisine_affinity(restaurant, frequencies, mood, weights);
        let distance_km = resolver
            .resolve(restaurant)
            .map(|location| self.memo.distance_km(location, self.config.reference));
        let score = distance_km.map_or(f64::INFINITY, |km| {
            km * weights.distance_factor - affinity
        });
        Recommendation {
            restaurant,
            score,
            distance_km,
            affinity,
        }
    }
}

/// Count liked dishes per normalised cuisine.
///
/// Likes that do not name a catalog dish contribute nothing.
fn cuisine_frequencies(state: &PreferenceState, catalog: &Catalog) -> HashMap<String, u32> {
    let mut frequencies: HashMap<String, u32> = HashMap::new();
    for dish in liked_dishes(state, catalog) {
        let count = frequencies.entry(dish.cuisine_key()).or_insert(0);
        *count = count.saturating_add(1);
    }
    frequencies
}

#[expect(
    clippy::float_arithmetic,
    reason = "affinity is a weighted count plus an optional bonus"
)]
fn cuisine_affinity(
    restaurant: &Restaurant,
    frequencies: &HashMap<String, u32>,
    mood: Option<Mood>,
    weights: RankWeights,
) -> f64 {
    let cuisine = restaurant.cuisine_key();
    let liked = frequencies.get(&cuisine).copied().unwrap_or(0);
    let mood_bonus = if mood.is_some_and(|m| cuisine.contains(m.keyword())) {
        weights.mood_bonus
    } else {
        0.0_f64
    };
    f64::from(liked) * weights.affinity_per_like + mood_bonus
}
