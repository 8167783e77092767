//! Deterministic test doubles and catalog fixtures used by unit and behaviour
//! tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use geo::Coord;

use crate::{Catalog, Dish, GeocodeError, Geocoder, Mood, Restaurant};

/// In-memory `Geocoder` answering from a fixed address table.
///
/// A query matches an entry when it starts with the entry's address, so the
/// region suffix added by the resolver does not need repeating. Every call is
/// counted and recorded.
#[derive(Debug, Default)]
pub struct StubGeocoder {
    entries: Vec<(String, Coord<f64>)>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl StubGeocoder {
    /// Create a geocoder that knows no addresses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries for `address` with `location`.
    #[must_use]
    pub fn with_location(mut self, address: impl Into<String>, location: Coord<f64>) -> Self {
        self.entries.push((address.into(), location));
        self
    }

    /// Number of lookups performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Queries received, oldest first.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, query: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_owned());
        }
        if query.trim().is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        Ok(self
            .entries
            .iter()
            .find(|(address, _)| query.starts_with(address.as_str()))
            .map(|(_, location)| *location))
    }
}

/// `Geocoder` that fails every lookup with the same error.
#[derive(Debug)]
pub struct FailingGeocoder {
    error: GeocodeError,
    calls: AtomicUsize,
}

impl FailingGeocoder {
    /// Fail every lookup with `error`.
    pub const fn new(error: GeocodeError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every lookup with a timeout.
    pub fn timing_out() -> Self {
        Self::new(GeocodeError::Timeout {
            url: "http://geocoder.invalid/search".to_owned(),
            timeout_secs: 8,
        })
    }

    /// Number of lookups attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for FailingGeocoder {
    fn geocode(&self, _query: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// Times Square, the default ranking reference point.
pub const TIMES_SQUARE: Coord<f64> = Coord {
    x: -73.9855,
    y: 40.7580,
};

/// Small Manhattan catalog with stored coordinates on every restaurant.
///
/// Dishes, in order: Dumplings (Chinese), Mapo Tofu (Chinese, vegan,
/// adventurous), Chana Masala (Indian, vegan, healthy), Mac and Cheese
/// (American, vegetarian, comforting), Falafel (Lebanese, vegan, halal,
/// healthy).
pub fn sample_catalog() -> Catalog {
    Catalog::new(sample_dishes(), sample_restaurants())
}

/// Dishes used by [`sample_catalog`].
pub fn sample_dishes() -> Vec<Dish> {
    vec![
        Dish::new("Dumplings", "Chinese")
            .with_main_ingredient("Pork")
            .with_price(9.0),
        Dish::new("Mapo Tofu", "Chinese")
            .with_main_ingredient("Tofu")
            .with_price(14.0)
            .with_tag("vegan")
            .with_mood(Mood::Adventurous),
        Dish::new("Chana Masala", "Indian")
            .with_main_ingredient("Chickpeas")
            .with_price(12.0)
            .with_tag("vegan")
            .with_tag("gluten-free")
            .with_mood(Mood::Healthy),
        Dish::new("Mac and Cheese", "American")
            .with_main_ingredient("Pasta")
            .with_price(11.0)
            .with_tag("vegetarian")
            .with_mood(Mood::Comforting),
        Dish::new("Falafel", "Lebanese")
            .with_main_ingredient("Chickpeas")
            .with_price(8.0)
            .with_tag("vegan")
            .with_tag("halal")
            .with_mood(Mood::Healthy),
    ]
}

/// Restaurants used by [`sample_catalog`].
pub fn sample_restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant::new("Joe's Shanghai", "Chinese", "46 Bowery")
            .with_price("$$")
            .with_location(Coord {
                x: -73.9967,
                y: 40.7155,
            }),
        Restaurant::new("Dhaba", "Indian", "108 Lexington Ave")
            .with_price("$$")
            .with_location(Coord {
                x: -73.9826,
                y: 40.7425,
            }),
        Restaurant::new("Shake Shack", "American Comfort", "691 8th Ave")
            .with_price("$")
            .with_location(Coord {
                x: -73.9887,
                y: 40.7588,
            }),
        Restaurant::new("Mamoun's", "Lebanese", "119 MacDougal St")
            .with_price("$")
            .with_location(Coord {
                x: -74.0003,
                y: 40.7301,
            }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn stub_matches_address_prefix() {
        let stub = StubGeocoder::new().with_location("46 Bowery", TIMES_SQUARE);
        assert_eq!(stub.geocode("46 Bowery, New York"), Ok(Some(TIMES_SQUARE)));
        assert_eq!(stub.geocode("1 Elsewhere"), Ok(None));
        assert_eq!(stub.geocode(" "), Err(GeocodeError::EmptyQuery));
        assert_eq!(stub.calls(), 3);
    }

    #[rstest]
    fn sample_catalog_indexes_every_cuisine() {
        let catalog = sample_catalog();
        assert_eq!(catalog.dishes().len(), 5);
        assert_eq!(catalog.index().len(), 4);
        assert!(catalog.restaurants().iter().all(|r| r.stored_location().is_some()));
    }
}
