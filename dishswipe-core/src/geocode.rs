//! Resolve free-text addresses to coordinates.
//!
//! The `Geocoder` trait abstracts the external lookup service. Callers supply
//! an address query and receive a coordinate, `None` when the service found no
//! match, or a [`GeocodeError`] when the lookup itself failed.

use std::sync::Arc;

use geo::Coord;
use thiserror::Error;

/// Errors from [`Geocoder::geocode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The query was empty after trimming.
    #[error("geocoding query must not be empty")]
    EmptyQuery,

    /// The request did not complete within the configured timeout.
    #[error("geocoding request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// URL that was requested.
        url: String,
        /// Timeout that elapsed, in seconds.
        timeout_secs: u64,
    },

    /// The service answered with a non-success HTTP status.
    #[error("geocoding request to {url} failed with HTTP {status}: {message}")]
    HttpError {
        /// URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail.
        message: String,
    },

    /// The request failed before a response arrived.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// URL that was requested.
        url: String,
        /// Error detail.
        message: String,
    },

    /// The response body could not be interpreted.
    #[error("failed to parse geocoding response: {message}")]
    ParseError {
        /// Error detail.
        message: String,
    },
}

/// Look up coordinates for an address.
///
/// Implementations must bound their own latency (for example with a request
/// timeout) and report failures through [`GeocodeError`] rather than
/// panicking. `Ok(None)` means the service answered but found no match.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use dishswipe_core::{GeocodeError, Geocoder};
///
/// struct FixedGeocoder;
///
/// impl Geocoder for FixedGeocoder {
///     fn geocode(&self, query: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
///         if query.trim().is_empty() {
///             return Err(GeocodeError::EmptyQuery);
///         }
///         Ok(Some(Coord { x: -73.9855, y: 40.7580 }))
///     }
/// }
///
/// let location = FixedGeocoder.geocode("Times Square, New York")?;
/// assert!(location.is_some());
/// # Ok::<(), GeocodeError>(())
/// ```
pub trait Geocoder: Send + Sync {
    /// Resolve `query` to a coordinate (`x = longitude`, `y = latitude`).
    fn geocode(&self, query: &str) -> Result<Option<Coord<f64>>, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for Arc<G> {
    fn geocode(&self, query: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        (**self).geocode(query)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, query: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        (**self).geocode(query)
    }
}

/// Geocoder for offline use that never finds a match.
///
/// Restaurants without stored coordinates then rank last.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGeocoder;

impl Geocoder for OfflineGeocoder {
    fn geocode(&self, _query: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        Ok(None)
    }
}
