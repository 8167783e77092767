//! Behaviour-driven step definitions driving the replay CLI scenarios.

use super::helpers::{DISHES_JSON, RESTAURANTS_JSON, ReplayWorkspace, write_utf8};
use crate::replay::run_replay_with;
use crate::{ARG_DATA_DIR, ARG_DISHES, ARG_SCRIPT, Cli, CliError, Command};
use clap::Parser;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;

struct ReplayWorld {
    workspace: ReplayWorkspace,
    include_script: RefCell<bool>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl ReplayWorld {
    fn new() -> Self {
        Self {
            workspace: ReplayWorkspace::new(),
            include_script: RefCell::new(true),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["dishswipe".to_string(), "replay".to_string()];
        if *self.include_script.borrow() {
            argv.push(self.workspace.script().as_str().to_string());
        }
        argv.extend([
            format!("--{ARG_DATA_DIR}"),
            self.workspace.root().as_str().to_string(),
        ]);
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |outcome| {
            outcome
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> ReplayWorld {
    ReplayWorld::new()
}

#[given("a catalog exists in the data directory")]
fn catalog_exists(#[from(world)] world: &ReplayWorld) {
    write_utf8(&world.workspace.dishes(), DISHES_JSON.as_bytes());
    write_utf8(&world.workspace.restaurants(), RESTAURANTS_JSON.as_bytes());
}

#[given("a script liking the first three dishes")]
fn script_liking_three(#[from(world)] world: &ReplayWorld) {
    world.workspace.write_script(
        r#"{"seed": 1, "actions": [{"action": "like"}, {"action": "like"}, {"action": "like"}]}"#,
    );
}

#[given("the script contains invalid JSON")]
fn script_invalid(#[from(world)] world: &ReplayWorld) {
    world.workspace.write_script("{ not valid json");
}

#[given("I omit the script path")]
fn omit_script(#[from(world)] world: &ReplayWorld) {
    *world.include_script.borrow_mut() = false;
}

#[when("I run the replay command")]
fn run_replay_command(#[from(world)] world: &ReplayWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Replay(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_replay_with(args, &mut *buffer)
        }
    });
    *world.result.borrow_mut() = Some(outcome);
}

#[then("the command succeeds and reports {xp} XP")]
fn command_succeeds(xp: u64, #[from(world)] world: &ReplayWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    assert!(result.is_ok(), "expected success, got {result:?}");

    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    let report: Value = serde_json::from_str(&stdout).expect("output should be JSON");
    assert_eq!(report.get("xp").and_then(Value::as_u64), Some(xp));
    assert!(report.get("badges").is_some_and(Value::is_array));
}

#[then("the report recommends Joe's Shanghai first")]
fn recommends_joes(#[from(world)] world: &ReplayWorld) {
    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    let report: Value = serde_json::from_str(&stdout).expect("output should be JSON");
    let first = report
        .pointer("/recommendations/0/name")
        .and_then(Value::as_str);
    assert_eq!(first, Some("Joe's Shanghai"));
}

#[then("the command fails because the script JSON is invalid")]
fn fails_invalid_json(#[from(world)] world: &ReplayWorld) {
    match &*world.error() {
        CliError::ParseScript { .. } => {}
        other => panic!("expected ParseScript, found {other:?}"),
    }
}

#[then("the command fails because the script path is missing")]
fn fails_missing_script(#[from(world)] world: &ReplayWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_SCRIPT),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because the dish catalog is missing")]
fn fails_missing_catalog(#[from(world)] world: &ReplayWorld) {
    match &*world.error() {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_DISHES),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

macro_rules! register_replay_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/replay_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: ReplayWorld) {
            let _ = world;
        }
    };
}

register_replay_scenario!(replay_happy_path, "replaying a script prints a JSON report");
register_replay_scenario!(replay_invalid_json, "rejecting invalid script JSON");
register_replay_scenario!(replay_missing_script, "rejecting missing script paths");
register_replay_scenario!(replay_missing_catalog, "rejecting a missing catalog");
