//! Property tests for ranking invariants.

use dishswipe_core::{
    Catalog, CoordinateResolver, Dish, OfflineGeocoder, PreferenceState, Restaurant,
};
use dishswipe_scorer::{DEFAULT_MAX_RESULTS, RecommendationRanker};
use geo::Coord;
use proptest::prelude::*;

const CUISINES: [&str; 4] = ["Chinese", "Indian", "Mexican", "Spicy Thai"];

fn restaurant_strategy() -> impl Strategy<Value = (usize, Option<(f64, f64)>)> {
    (
        0..CUISINES.len(),
        prop::option::of((-74.05_f64..-73.90_f64, 40.60_f64..40.85_f64)),
    )
}

fn build_catalog(specs: &[(usize, Option<(f64, f64)>)]) -> Catalog {
    let dishes = CUISINES
        .iter()
        .flat_map(|name| (0..3).map(move |n| Dish::new(format!("{name} dish {n}"), *name)))
        .collect();
    let restaurants = specs
        .iter()
        .enumerate()
        .map(|(index, (cuisine, location))| {
            let base = Restaurant::new(
                format!("r{index}"),
                CUISINES.get(*cuisine).copied().unwrap_or("Chinese"),
                format!("{index} Broadway"),
            );
            match location {
                Some((x, y)) => base.with_location(Coord { x: *x, y: *y }),
                None => base,
            }
        })
        .collect();
    Catalog::new(dishes, restaurants)
}

fn input_position(name: &str) -> usize {
    name.trim_start_matches('r').parse().unwrap_or(usize::MAX)
}

proptest! {
    #[test]
    fn rank_respects_length_order_and_stability(
        specs in prop::collection::vec(restaurant_strategy(), 0..30),
        liked in prop::collection::btree_set(0_usize..12, 0..12),
    ) {
        let catalog = build_catalog(&specs);
        let mut state = PreferenceState::new();
        for dish in &liked {
            if let Some(found) = catalog.dish_at(*dish) {
                state.like(&found.name);
            }
        }
        let resolver = CoordinateResolver::new(OfflineGeocoder);

        let ranked = RecommendationRanker::default().rank(&state, &catalog, &resolver, None);

        let expected_len = DEFAULT_MAX_RESULTS
            .min(state.likes().len())
            .min(catalog.restaurants().len());
        prop_assert_eq!(ranked.len(), expected_len);

        let first_unlocated = ranked.iter().position(|r| !r.is_located());
        if let Some(boundary) = first_unlocated {
            prop_assert!(ranked.iter().skip(boundary).all(|r| !r.is_located()));
        }

        for pair in ranked.windows(2) {
            if let [a, b] = pair {
                prop_assert!(a.score <= b.score);
                if a.score.total_cmp(&b.score).is_eq() {
                    prop_assert!(
                        input_position(&a.restaurant.name) < input_position(&b.restaurant.name)
                    );
                }
            }
        }
    }
}
