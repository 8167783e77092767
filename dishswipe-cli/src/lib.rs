//! Command-line interface for replaying dishswipe sessions.
//!
//! The `replay` subcommand loads a dish and restaurant catalog, plays a JSON
//! session script against it and prints a JSON report of the resulting
//! likes, XP, level, badges, profile and restaurant recommendations.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod replay;
mod report;
mod script;

pub use error::CliError;
pub use report::{RecommendationReport, ReviewSummary, SessionReport};
pub use script::{Action, SessionScript};

pub(crate) const ARG_SCRIPT: &str = "script";
pub(crate) const ARG_DATA_DIR: &str = "data-dir";
pub(crate) const ARG_DISHES: &str = "dishes";
pub(crate) const ARG_RESTAURANTS: &str = "restaurants";
pub(crate) const ARG_GEOCODER_URL: &str = "geocoder-url";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ENV_SCRIPT: &str = "DISHSWIPE_CMDS_REPLAY_SCRIPT";

/// Run the dishswipe CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, an input
/// file is missing, a scripted action is rejected or the report cannot be
/// written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Replay(args) => replay::run_replay(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "dishswipe",
    about = "Replay food-swipe sessions and report recommendations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play a scripted swipe session and print the resulting report.
    Replay(replay::ReplayArgs),
}

#[cfg(test)]
mod tests;
