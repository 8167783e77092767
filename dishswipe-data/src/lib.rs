//! Data access for the dishswipe engine.
//!
//! Responsibilities:
//! - Load dish and restaurant catalogs from JSON files.
//! - Provide an HTTP geocoder backed by a Nominatim-compatible service.
//! - Wrap capability-based filesystem access behind small helpers.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `dishswipe-core`).
//! - Keep blocking I/O off async executors; prefer async-capable clients.
//!
//! Invariants:
//! - Malformed records are skipped with a warning rather than failing a load.
//! - No global mutable state.

pub mod catalog;
pub mod fs;
pub mod geocoding;

pub use catalog::{
    CatalogLoadError, load_catalog, load_dishes, load_restaurants, parse_dishes,
    parse_restaurants, read_dishes, read_restaurants,
};
pub use geocoding::{
    DEFAULT_USER_AGENT, GeocoderBuildError, NominatimGeocoder, NominatimGeocoderConfig,
};
