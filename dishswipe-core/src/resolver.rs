//! Resolve restaurant coordinates from stored fields or by geocoding.
//!
//! Resolution never fails outward: a geocoding error or an empty answer both
//! come back as `None`, and the ranker treats that as "unscorable". Successful
//! lookups are written to an injected [`CoordinateCache`] keyed by the full
//! geocoder query (address plus region suffix), so each query reaches the
//! geocoder at most once per successful resolution and resolvers configured
//! for different regions can share one cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use geo::Coord;
use log::{debug, warn};

use crate::restaurant::is_valid_wgs84;
use crate::{Geocoder, Restaurant};

/// Suffix appended to addresses before geocoding.
pub const DEFAULT_REGION_SUFFIX: &str = ", New York";

/// Storage for resolved coordinates keyed by geocoder query.
///
/// Implementations must be safe to share between sessions.
pub trait CoordinateCache: Send + Sync {
    /// Return the cached location for `query`.
    fn get(&self, query: &str) -> Option<Coord<f64>>;

    /// Record the location resolved for `query`.
    fn insert(&self, query: &str, location: Coord<f64>);
}

impl<C: CoordinateCache + ?Sized> CoordinateCache for Arc<C> {
    fn get(&self, address: &str) -> Option<Coord<f64>> {
        (**self).get(address)
    }

    fn insert(&self, address: &str, location: Coord<f64>) {
        (**self).insert(address, location);
    }
}

/// In-memory [`CoordinateCache`] living for the process lifetime.
///
/// The first location recorded for an address wins; later inserts for the same
/// address are ignored so a resolved value never changes.
#[derive(Debug, Default)]
pub struct MemoryCoordinateCache {
    entries: Mutex<HashMap<String, Coord<f64>>>,
}

impl MemoryCoordinateCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached addresses.
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Report whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CoordinateCache for MemoryCoordinateCache {
    fn get(&self, address: &str) -> Option<Coord<f64>> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(address).copied())
    }

    fn insert(&self, address: &str, location: Coord<f64>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.entry(address.to_owned()).or_insert(location);
        }
    }
}

/// Settings for [`CoordinateResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Text appended to each address to disambiguate the lookup.
    pub region_suffix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            region_suffix: DEFAULT_REGION_SUFFIX.to_owned(),
        }
    }
}

impl ResolverConfig {
    /// Set the region suffix.
    #[must_use]
    pub fn with_region_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.region_suffix = suffix.into();
        self
    }
}

/// Find a restaurant's coordinates, geocoding its address when needed.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dishswipe_core::{CoordinateResolver, OfflineGeocoder, Restaurant};
///
/// let resolver = CoordinateResolver::new(OfflineGeocoder);
/// let stored = Restaurant::new("Katz's", "Deli", "205 E Houston St")
///     .with_location(Coord { x: -73.9874, y: 40.7223 });
/// let unknown = Restaurant::new("Nowhere", "Deli", "1 Lost Lane");
///
/// assert!(resolver.resolve(&stored).is_some());
/// assert!(resolver.resolve(&unknown).is_none());
/// ```
#[derive(Debug)]
pub struct CoordinateResolver<G, C = MemoryCoordinateCache> {
    geocoder: G,
    cache: C,
    config: ResolverConfig,
}

impl<G: Geocoder> CoordinateResolver<G> {
    /// Create a resolver with a fresh in-memory cache and default settings.
    pub fn new(geocoder: G) -> Self {
        Self::with_cache(geocoder, MemoryCoordinateCache::new(), ResolverConfig::default())
    }
}

impl<G: Geocoder, C: CoordinateCache> CoordinateResolver<G, C> {
    /// Create a resolver around an injected cache.
    pub const fn with_cache(geocoder: G, cache: C, config: ResolverConfig) -> Self {
        Self {
            geocoder,
            cache,
            config,
        }
    }

    /// The wrapped geocoder.
    pub const fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// The coordinate cache.
    pub const fn cache(&self) -> &C {
        &self.cache
    }

    /// The resolver settings.
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Return the restaurant's coordinates, or `None` when they cannot be found.
    ///
    /// Stored coordinates win. Otherwise the cache is consulted, then the
    /// geocoder. Geocoding failures are logged and reported as `None`.
    pub fn resolve(&self, restaurant: &Restaurant) -> Option<Coord<f64>> {
        if let Some(location) = restaurant.stored_location() {
            return Some(location);
        }
        let address = restaurant.address.trim();
        if address.is_empty() {
            debug!("restaurant {:?} has no address to geocode", restaurant.name);
            return None;
        }
        let query = format!("{address}{}", self.config.region_suffix);
        if let Some(location) = self.cache.get(&query) {
            return Some(location);
        }

        match self.geocoder.geocode(&query) {
            Ok(Some(location)) if is_valid_wgs84(location) => {
                self.cache.insert(&query, location);
                Some(location)
            }
            Ok(Some(location)) => {
                warn!("geocoder returned out-of-range location {location:?} for {query:?}");
                None
            }
            Ok(None) => {
                debug!("no geocoding match for {query:?}");
                None
            }
            Err(err) => {
                warn!("geocoding {query:?} failed: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    use crate::GeocodeError;
    use crate::test_support::{FailingGeocoder, StubGeocoder};

    const BOWERY: Coord<f64> = Coord {
        x: -73.9967,
        y: 40.7155,
    };

    #[fixture]
    fn unlocated() -> Restaurant {
        Restaurant::new("Joe's Shanghai", "Chinese", "46 Bowery")
    }

    #[rstest]
    fn stored_coordinates_skip_the_geocoder(unlocated: Restaurant) {
        let resolver = CoordinateResolver::new(StubGeocoder::new());
        let located = unlocated.with_location(BOWERY);
        assert_eq!(resolver.resolve(&located), Some(BOWERY));
        assert_eq!(resolver.geocoder().calls(), 0);
    }

    #[rstest]
    fn successful_lookups_are_cached(unlocated: Restaurant) {
        let resolver =
            CoordinateResolver::new(StubGeocoder::new().with_location("46 Bowery", BOWERY));
        assert_eq!(resolver.resolve(&unlocated), Some(BOWERY));
        assert_eq!(resolver.resolve(&unlocated), Some(BOWERY));
        assert_eq!(resolver.geocoder().calls(), 1);
        assert_eq!(resolver.cache().len(), 1);
    }

    #[rstest]
    fn query_carries_region_suffix(unlocated: Restaurant) {
        let resolver = CoordinateResolver::with_cache(
            StubGeocoder::new().with_location("46 Bowery", BOWERY),
            MemoryCoordinateCache::new(),
            ResolverConfig::default().with_region_suffix(", Manhattan"),
        );
        resolver.resolve(&unlocated);
        assert_eq!(
            resolver.geocoder().queries(),
            vec!["46 Bowery, Manhattan".to_owned()]
        );
    }

    #[rstest]
    #[case(GeocodeError::Timeout { url: "http://geo".into(), timeout_secs: 8 })]
    #[case(GeocodeError::ParseError { message: "bad json".into() })]
    fn failures_degrade_to_none(unlocated: Restaurant, #[case] error: GeocodeError) {
        let resolver = CoordinateResolver::new(FailingGeocoder::new(error));
        assert_eq!(resolver.resolve(&unlocated), None);
        assert!(resolver.cache().is_empty());
    }

    #[rstest]
    fn failures_are_retried(unlocated: Restaurant) {
        let resolver = CoordinateResolver::new(StubGeocoder::new());
        assert_eq!(resolver.resolve(&unlocated), None);
        assert_eq!(resolver.resolve(&unlocated), None);
        assert_eq!(resolver.geocoder().calls(), 2);
    }

    #[rstest]
    fn out_of_range_answers_are_rejected(unlocated: Restaurant) {
        let resolver = CoordinateResolver::new(
            StubGeocoder::new().with_location("46 Bowery", Coord { x: 500.0, y: 40.0 }),
        );
        assert_eq!(resolver.resolve(&unlocated), None);
        assert!(resolver.cache().is_empty());
    }

    #[rstest]
    fn blank_addresses_are_not_geocoded() {
        let resolver = CoordinateResolver::new(StubGeocoder::new());
        let restaurant = Restaurant::new("Ghost", "Thai", "   ");
        assert_eq!(resolver.resolve(&restaurant), None);
        assert_eq!(resolver.geocoder().calls(), 0);
    }

    #[rstest]
    fn shared_cache_serves_other_resolvers(unlocated: Restaurant) {
        let cache = Arc::new(MemoryCoordinateCache::new());
        let first = CoordinateResolver::with_cache(
            StubGeocoder::new().with_location("46 Bowery", BOWERY),
            Arc::clone(&cache),
            ResolverConfig::default(),
        );
        let second = CoordinateResolver::with_cache(
            StubGeocoder::new(),
            Arc::clone(&cache),
            ResolverConfig::default(),
        );
        first.resolve(&unlocated);
        assert_eq!(second.resolve(&unlocated), Some(BOWERY));
        assert_eq!(second.geocoder().calls(), 0);
    }

    #[rstest]
    fn cache_entries_are_scoped_to_the_region(unlocated: Restaurant) {
        let cache = Arc::new(MemoryCoordinateCache::new());
        let manhattan = CoordinateResolver::with_cache(
            StubGeocoder::new().with_location("46 Bowery", BOWERY),
            Arc::clone(&cache),
            ResolverConfig::default().with_region_suffix(", Manhattan"),
        );
        let brooklyn = CoordinateResolver::with_cache(
            StubGeocoder::new(),
            Arc::clone(&cache),
            ResolverConfig::default().with_region_suffix(", Brooklyn"),
        );
        assert_eq!(manhattan.resolve(&unlocated), Some(BOWERY));
        assert_eq!(brooklyn.resolve(&unlocated), None);
        assert_eq!(brooklyn.geocoder().queries(), vec!["46 Bowery, Brooklyn".to_owned()]);
        assert_eq!(cache.get("46 Bowery, Manhattan"), Some(BOWERY));
        assert_eq!(cache.len(), 1);
    }
}
