//! Shared test harness modules for the dishswipe CLI.

mod helpers;
mod replay_steps;
mod unit;
