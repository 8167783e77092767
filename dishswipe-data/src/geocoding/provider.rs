//! `Geocoder` backed by the Nominatim search API.
//!
//! The [`Geocoder`] trait is synchronous so the core crate stays free of any
//! async runtime. This geocoder bridges the async HTTP call to the sync
//! interface by blocking on a Tokio runtime it owns.

use std::time::Duration;

use dishswipe_core::{GeocodeError, Geocoder};
use geo::Coord;
use log::debug;
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::nominatim::SearchPlace;

/// Error type for [`NominatimGeocoder`] construction failures.
#[derive(Debug, Error)]
pub enum GeocoderBuildError {
    /// The configured base URL could not be parsed.
    #[error("invalid geocoder base URL {base_url:?}: {source}")]
    InvalidBaseUrl {
        /// The rejected URL.
        base_url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for geocoding requests.
///
/// Nominatim's usage policy requires an identifying user agent.
pub const DEFAULT_USER_AGENT: &str = "dishswipe/0.1";

/// Public Nominatim instance used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Configuration for [`NominatimGeocoder`].
#[derive(Debug, Clone)]
pub struct NominatimGeocoderConfig {
    /// Base URL of the service (e.g., `"https://nominatim.openstreetmap.org"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for NominatimGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl NominatimGeocoderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP geocoder using the Nominatim search API.
///
/// Each lookup issues `GET {base_url}/search?q=...&format=json&limit=1` and
/// takes the first place returned. An empty result list maps to `Ok(None)`.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the geocoder uses its own
/// stored runtime. When called from within a multi-threaded Tokio runtime it
/// uses that runtime's handle with [`tokio::task::block_in_place`] to avoid
/// nested runtime panics. Inside a `current_thread` runtime it falls back to
/// its own runtime, which may deadlock if the caller's runtime drives IO this
/// request depends on.
pub struct NominatimGeocoder {
    client: Client,
    config: NominatimGeocoderConfig,
    endpoint: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for NominatimGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimGeocoder")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("endpoint", &self.endpoint.as_str())
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl NominatimGeocoder {
    /// Create a geocoder for `base_url` with default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeocoderBuildError> {
        Self::with_config(NominatimGeocoderConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: NominatimGeocoderConfig) -> Result<Self, GeocoderBuildError> {
        let endpoint = search_endpoint(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(GeocoderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(GeocoderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            endpoint,
            runtime,
        })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &NominatimGeocoderConfig {
        &self.config
    }

    /// Build the search URL for `query`.
    fn build_search_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", "1");
        url
    }

    async fn search_async(&self, query: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        let url = self.build_search_url(query);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;

        let places: Vec<SearchPlace> =
            response
                .json()
                .await
                .map_err(|err| GeocodeError::ParseError {
                    message: err.to_string(),
                })?;

        convert_places(&places)
    }

    /// Convert a reqwest error to a `GeocodeError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> GeocodeError {
        if error.is_timeout() {
            return GeocodeError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return GeocodeError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        GeocodeError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

fn search_endpoint(base_url: &str) -> Result<Url, GeocoderBuildError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    Url::parse(&format!("{trimmed}/search")).map_err(|source| {
        GeocoderBuildError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            source,
        }
    })
}

/// Take the first place; an empty list means no match.
fn convert_places(places: &[SearchPlace]) -> Result<Option<Coord<f64>>, GeocodeError> {
    let Some(first) = places.first() else {
        return Ok(None);
    };
    let coord = first.coord().ok_or_else(|| GeocodeError::ParseError {
        message: format!(
            "geocoder returned non-numeric coordinates ({}, {})",
            first.lat, first.lon
        ),
    })?;
    debug!("geocoder matched {}", first.label());
    Ok(Some(coord))
}

impl Geocoder for NominatimGeocoder {
    /// Look up `query`.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime should
    /// be multi-threaded. See the type-level documentation.
    fn geocode(&self, query: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        debug!("geocoding {trimmed:?} via {}", self.endpoint);

        let future = self.search_async(trimmed);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }
}
