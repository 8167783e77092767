//! Profile summary and favourites derived from the liked dishes.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use crate::{Catalog, Dish, PreferenceState};

/// Liked dishes resolved against the catalog, in like order.
///
/// Likes that no longer name a catalog dish are skipped.
pub fn liked_dishes<'c>(state: &PreferenceState, catalog: &'c Catalog) -> Vec<&'c Dish> {
    state
        .likes()
        .iter()
        .filter_map(|name| catalog.find_dish(name))
        .collect()
}

/// Most liked cuisine, as written on the first dish liked from it.
///
/// Cuisines are compared after normalisation. Ties go to the cuisine that was
/// liked first.
///
/// # Examples
/// ```
/// use dishswipe_core::{Catalog, Dish, PreferenceState, profile::favourite_cuisine};
///
/// let catalog = Catalog::new(
///     vec![
///         Dish::new("Tacos", "Mexican"),
///         Dish::new("Ramen", "Japanese"),
///         Dish::new("Udon", "japanese"),
///     ],
///     vec![],
/// );
/// let mut state = PreferenceState::new();
/// for dish in ["Tacos", "Ramen", "Udon"] {
///     state.like(dish);
/// }
/// assert_eq!(favourite_cuisine(&state, &catalog).as_deref(), Some("Japanese"));
/// ```
pub fn favourite_cuisine(state: &PreferenceState, catalog: &Catalog) -> Option<String> {
    let mut counts: HashMap<String, (usize, usize, &str)> = HashMap::new();
    for (order, dish) in liked_dishes(state, catalog).into_iter().enumerate() {
        let entry = counts
            .entry(dish.cuisine_key())
            .or_insert((0, order, dish.culture.as_str()));
        entry.0 += 1;
    }
    counts
        .into_values()
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)))
        .map(|(_, _, culture)| culture.to_owned())
}

/// Headline statistics for a profile view.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProfileSummary {
    /// Number of liked dishes.
    pub total_likes: usize,
    /// Most liked cuisine.
    pub favourite_cuisine: Option<String>,
    /// Mean price of liked dishes found in the catalog.
    pub average_price: Option<f64>,
}

impl ProfileSummary {
    /// Summarise `state` against `catalog`.
    pub fn from_state(state: &PreferenceState, catalog: &Catalog) -> Self {
        let dishes = liked_dishes(state, catalog);
        let average_price = u32::try_from(dishes.len())
            .ok()
            .filter(|count| *count > 0)
            .map(|count| {
                let total: f64 = dishes.iter().map(|dish| dish.average_price).sum();
                total / f64::from(count)
            });
        Self {
            total_likes: state.likes().len(),
            favourite_cuisine: favourite_cuisine(state, catalog),
            average_price,
        }
    }
}

/// Ordering for the favourites list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FavouriteSort {
    /// Alphabetical by dish name.
    #[default]
    Name,
    /// Cheapest first.
    Price,
    /// Alphabetical by cuisine.
    Cuisine,
}

impl FromStr for FavouriteSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "cuisine" => Ok(Self::Cuisine),
            _ => Err(format!("unknown favourite sort '{s}'")),
        }
    }
}

impl FavouriteSort {
    fn compare(self, a: &Dish, b: &Dish) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Price => a.average_price.total_cmp(&b.average_price),
            Self::Cuisine => a.cuisine_key().cmp(&b.cuisine_key()),
        }
    }
}

/// Liked dishes whose names contain `query`, ignoring case, in `sort` order.
///
/// The sort is stable, so dishes that compare equal keep their like order.
pub fn favourites<'c>(
    state: &PreferenceState,
    catalog: &'c Catalog,
    query: &str,
    sort: FavouriteSort,
) -> Vec<&'c Dish> {
    let needle = query.trim().to_lowercase();
    let mut dishes: Vec<&Dish> = liked_dishes(state, catalog)
        .into_iter()
        .filter(|dish| needle.is_empty() || dish.name.to_lowercase().contains(&needle))
        .collect();
    dishes.sort_by(|a, b| sort.compare(a, b));
    dishes
}
