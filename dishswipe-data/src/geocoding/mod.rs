//! HTTP geocoding against a Nominatim-compatible search service.
//!
//! This module provides [`NominatimGeocoder`], an implementation of
//! [`dishswipe_core::Geocoder`] that resolves restaurant addresses through the
//! Nominatim `/search` endpoint.
//!
//! # Example
//!
//! ```no_run
//! use dishswipe_core::{CoordinateResolver, Geocoder};
//! use dishswipe_data::geocoding::{NominatimGeocoder, NominatimGeocoderConfig};
//! use std::time::Duration;
//!
//! let config = NominatimGeocoderConfig::new("https://nominatim.openstreetmap.org")
//!     .with_timeout(Duration::from_secs(4))
//!     .with_user_agent("my-app/1.0");
//! let geocoder = NominatimGeocoder::with_config(config)?;
//!
//! let location = geocoder.geocode("46 Bowery, New York")?;
//! println!("{location:?}");
//!
//! // Resolvers cache what the geocoder finds.
//! let resolver = CoordinateResolver::new(geocoder);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod nominatim;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, GeocoderBuildError, NominatimGeocoder,
    NominatimGeocoderConfig,
};
