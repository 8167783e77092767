//! Replay command implementation for the dishswipe CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use dishswipe_core::{Catalog, CoordinateResolver, Geocoder, LevelTable, OfflineGeocoder};
use dishswipe_data::{NominatimGeocoder, fs, load_catalog};
use dishswipe_scorer::{RankerConfig, RecommendationRanker};
use log::debug;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::report::SessionReport;
use crate::script::SessionScript;
use crate::{
    ARG_DATA_DIR, ARG_DISHES, ARG_GEOCODER_URL, ARG_RESTAURANTS, ARG_SCRIPT, ARG_SEED, CliError,
    ENV_SCRIPT,
};

/// Seed used when neither the script nor the CLI provides one.
const DEFAULT_SEED: u64 = 0;

/// CLI arguments for the `replay` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Replay a swipe session described by a JSON script against \
                 a dish and restaurant catalog, then print a JSON report. \
                 Catalog paths default to dishes.json and restaurants.json \
                 inside the data directory. Restaurants without stored \
                 coordinates are geocoded only when a geocoder URL is set.",
    about = "Replay a scripted swipe session"
)]
#[ortho_config(prefix = "DISHSWIPE")]
pub(crate) struct ReplayArgs {
    /// Path to a JSON session script.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) script: Option<Utf8PathBuf>,
    /// Directory containing the default catalog filenames.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Override the path to the dish catalog (`dishes.json`).
    #[arg(long = ARG_DISHES, value_name = "path")]
    #[serde(default)]
    pub(crate) dishes: Option<Utf8PathBuf>,
    /// Override the path to the restaurant catalog (`restaurants.json`).
    #[arg(long = ARG_RESTAURANTS, value_name = "path")]
    #[serde(default)]
    pub(crate) restaurants: Option<Utf8PathBuf>,
    /// Base URL of a Nominatim-compatible geocoder.
    #[arg(long = ARG_GEOCODER_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) geocoder_url: Option<String>,
    /// Seed used when the script does not set one.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl ReplayArgs {
    pub(crate) fn into_config(self) -> Result<ReplayConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ReplayConfig::try_from(merged)
    }
}

/// Resolved `replay` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReplayConfig {
    /// Path to the session script.
    pub(crate) script: Utf8PathBuf,
    /// Path to the dish catalog.
    pub(crate) dishes: Utf8PathBuf,
    /// Path to the restaurant catalog.
    pub(crate) restaurants: Utf8PathBuf,
    /// Geocoder base URL; geocoding is disabled when absent.
    pub(crate) geocoder_url: Option<String>,
    /// Fallback session seed.
    pub(crate) seed: u64,
}

impl ReplayConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.script, ARG_SCRIPT)?;
        Self::require_existing(&self.dishes, ARG_DISHES)?;
        Self::require_existing(&self.restaurants, ARG_RESTAURANTS)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn geocoder(&self) -> Result<Box<dyn Geocoder>, CliError> {
        let Some(base_url) = &self.geocoder_url else {
            debug!("no geocoder configured; using stored coordinates only");
            return Ok(Box::new(OfflineGeocoder));
        };
        let geocoder =
            NominatimGeocoder::new(base_url.clone()).map_err(|source| CliError::BuildGeocoder {
                base_url: base_url.clone(),
                source,
            })?;
        Ok(Box::new(geocoder))
    }
}

impl TryFrom<ReplayArgs> for ReplayConfig {
    type Error = CliError;

    fn try_from(args: ReplayArgs) -> Result<Self, Self::Error> {
        let script = args.script.ok_or(CliError::MissingArgument {
            field: ARG_SCRIPT,
            env: ENV_SCRIPT,
        })?;

        let data_dir = args.data_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let dishes = args.dishes.unwrap_or_else(|| data_dir.join("dishes.json"));
        let restaurants = args
            .restaurants
            .unwrap_or_else(|| data_dir.join("restaurants.json"));

        Ok(Self {
            script,
            dishes,
            restaurants,
            geocoder_url: args.geocoder_url,
            seed: args.seed.unwrap_or(DEFAULT_SEED),
        })
    }
}

pub(crate) fn run_replay(args: ReplayArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_replay_with(args, &mut stdout)
}

pub(crate) fn run_replay_with(args: ReplayArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let catalog = load_catalog(&config.dishes, &config.restaurants);
    let script = load_script(&config.script)?;
    let resolver = CoordinateResolver::new(config.geocoder()?);
    let report = execute_replay(&script, &catalog, &resolver, config.seed)?;
    write_report(writer, &report)
}

/// Play `script` and rank restaurants for the resulting session.
pub(crate) fn execute_replay<G: Geocoder>(
    script: &SessionScript,
    catalog: &Catalog,
    resolver: &CoordinateResolver<G>,
    default_seed: u64,
) -> Result<SessionReport, CliError> {
    let mut session = script.replay(catalog, default_seed)?;
    let ranker = RecommendationRanker::new(RankerConfig::default())?;
    let mood = session.filter().mood;
    let ranked = ranker.rank(session.state(), catalog, resolver, mood);
    Ok(SessionReport::build(
        &mut session,
        catalog,
        &LevelTable::default(),
        (&script.favourites_query, script.favourites_sort),
        &ranked,
    ))
}

/// Loads a JSON-encoded [`SessionScript`] from disk.
pub(crate) fn load_script(path: &Utf8Path) -> Result<SessionScript, CliError> {
    let json = fs::read_to_string(path).map_err(|source| CliError::OpenScript {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| CliError::ParseScript {
        path: path.to_path_buf(),
        source,
    })
}

fn write_report(writer: &mut dyn Write, report: &SessionReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerializeReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ReplayConfig, CliError> {
    let merged = ReplayArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ReplayConfig::try_from(merged)
}
