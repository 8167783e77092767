//! Error types emitted by the dishswipe CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use dishswipe_core::SessionError;
use dishswipe_data::GeocoderBuildError;
use dishswipe_scorer::RankerConfigError;
use thiserror::Error;

/// Errors emitted by the dishswipe CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the session script failed.
    #[error("failed to open session script at {path:?}: {source}")]
    OpenScript {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Session script JSON could not be decoded.
    #[error("failed to parse session script JSON at {path:?}: {source}")]
    ParseScript {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A scripted action was rejected by the session.
    #[error("action {index} ({action}) failed: {source}")]
    Action {
        index: usize,
        action: &'static str,
        #[source]
        source: SessionError,
    },
    /// Constructing the HTTP geocoder failed.
    #[error("failed to build geocoder for {base_url:?}: {source}")]
    BuildGeocoder {
        base_url: String,
        #[source]
        source: GeocoderBuildError,
    },
    /// The ranking configuration was rejected.
    #[error(transparent)]
    Ranker(#[from] RankerConfigError),
    /// Serializing the session report failed.
    #[error("failed to serialize session report: {0}")]
    SerializeReport(#[source] serde_json::Error),
    /// Writing the session report failed.
    #[error("failed to write session report: {0}")]
    WriteReport(#[source] std::io::Error),
}
