//! Read-only catalog of dishes and restaurants with a cuisine index.
//!
//! The [`CuisineIndex`] groups restaurants by normalised cuisine so a dish can
//! be paired with somewhere that serves it, and so the ranker can look up
//! candidates per cuisine. Group order follows the restaurant input order.

use std::collections::HashMap;

use rand::Rng;

use crate::{Dish, Restaurant};

/// Normalise a cuisine name: trim surrounding whitespace and lowercase.
///
/// # Examples
/// ```
/// use dishswipe_core::catalog::normalise_cuisine;
///
/// assert_eq!(normalise_cuisine("  Chinese "), "chinese");
/// ```
pub fn normalise_cuisine(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Lookup from normalised cuisine to restaurant positions.
///
/// Positions index into the slice the index was built from and keep their
/// original relative order within each cuisine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CuisineIndex {
    groups: HashMap<String, Vec<usize>>,
}

impl CuisineIndex {
    /// Group `restaurants` by normalised cuisine.
    ///
    /// # Examples
    /// ```
    /// use dishswipe_core::{Restaurant, catalog::CuisineIndex};
    ///
    /// let restaurants = vec![
    ///     Restaurant::new("A", "Thai", "1 A St"),
    ///     Restaurant::new("B", "Italian", "2 B St"),
    ///     Restaurant::new("C", " thai", "3 C St"),
    /// ];
    /// let index = CuisineIndex::build(&restaurants);
    /// assert_eq!(index.positions("THAI"), &[0, 2]);
    /// assert!(index.positions("french").is_empty());
    /// ```
    pub fn build(restaurants: &[Restaurant]) -> Self {
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, restaurant) in restaurants.iter().enumerate() {
            groups
                .entry(restaurant.cuisine_key())
                .or_default()
                .push(position);
        }
        Self { groups }
    }

    /// Positions of restaurants serving `cuisine`; empty when none do.
    pub fn positions(&self, cuisine: &str) -> &[usize] {
        self.groups
            .get(&normalise_cuisine(cuisine))
            .map_or(&[], Vec::as_slice)
    }

    /// Number of distinct cuisines.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Report whether the index holds no cuisines.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Dishes and restaurants loaded for a session, plus their cuisine index.
///
/// The catalog is immutable after construction. Lookups by name return
/// `None` on a miss rather than failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    dishes: Vec<Dish>,
    restaurants: Vec<Restaurant>,
    index: CuisineIndex,
}

impl Catalog {
    /// Build a catalog and its cuisine index.
    pub fn new(dishes: Vec<Dish>, restaurants: Vec<Restaurant>) -> Self {
        let index = CuisineIndex::build(&restaurants);
        Self {
            dishes,
            restaurants,
            index,
        }
    }

    /// All dishes in swipe order.
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// All restaurants in input order.
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// The cuisine index.
    pub const fn index(&self) -> &CuisineIndex {
        &self.index
    }

    /// Dish at `position` in swipe order.
    pub fn dish_at(&self, position: usize) -> Option<&Dish> {
        self.dishes.get(position)
    }

    /// Find a dish by exact name.
    pub fn find_dish(&self, name: &str) -> Option<&Dish> {
        self.dishes.iter().find(|dish| dish.name == name)
    }

    /// Find a restaurant by exact name.
    pub fn find_restaurant(&self, name: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|r| r.name == name)
    }

    /// Restaurants serving `cuisine`, in input order.
    pub fn restaurants_for<'a>(
        &'a self,
        cuisine: &str,
    ) -> impl Iterator<Item = &'a Restaurant> + use<'a> {
        self.index
            .positions(cuisine)
            .iter()
            .filter_map(|&position| self.restaurants.get(position))
    }

    /// First restaurant serving `cuisine`.
    pub fn first_for(&self, cuisine: &str) -> Option<&Restaurant> {
        self.restaurants_for(cuisine).next()
    }

    /// Pick a restaurant serving `cuisine` uniformly at random.
    ///
    /// Returns `None` when no restaurant is recorded for the cuisine.
    pub fn pairing<R: Rng + ?Sized>(&self, cuisine: &str, rng: &mut R) -> Option<&Restaurant> {
        let positions = self.index.positions(cuisine);
        if positions.is_empty() {
            return None;
        }
        let pick = rng.gen_range(0..positions.len());
        positions
            .get(pick)
            .and_then(|&position| self.restaurants.get(position))
    }
}
