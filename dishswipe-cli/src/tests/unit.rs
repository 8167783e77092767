//! Focused unit tests covering replay configuration and script loading.

use super::helpers::{ReplayWorkspace, write_utf8};
use crate::replay::{ReplayArgs, ReplayConfig, config_from_layers_for_test, load_script};
use crate::{ARG_DISHES, ARG_RESTAURANTS, ARG_SCRIPT, CliError, ENV_SCRIPT};
use camino::Utf8PathBuf;
use rstest::rstest;
use std::fs;

#[rstest]
fn converting_without_script_errors() {
    let err = ReplayConfig::try_from(ReplayArgs::default()).expect_err("missing script");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_SCRIPT);
            assert_eq!(env, ENV_SCRIPT);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn config_derives_default_catalog_paths() {
    let args = ReplayArgs {
        script: Some(Utf8PathBuf::from("session.json")),
        data_dir: Some(Utf8PathBuf::from("catalog")),
        ..ReplayArgs::default()
    };

    let config = ReplayConfig::try_from(args).expect("config should build");

    assert_eq!(config.dishes, Utf8PathBuf::from("catalog/dishes.json"));
    assert_eq!(
        config.restaurants,
        Utf8PathBuf::from("catalog/restaurants.json")
    );
    assert_eq!(config.geocoder_url, None);
    assert_eq!(config.seed, 0);
}

#[rstest]
fn explicit_paths_override_data_dir() {
    let args = ReplayArgs {
        script: Some(Utf8PathBuf::from("session.json")),
        data_dir: Some(Utf8PathBuf::from("catalog")),
        dishes: Some(Utf8PathBuf::from("other/menu.json")),
        seed: Some(42),
        ..ReplayArgs::default()
    };

    let config = ReplayConfig::try_from(args).expect("config should build");

    assert_eq!(config.dishes, Utf8PathBuf::from("other/menu.json"));
    assert_eq!(
        config.restaurants,
        Utf8PathBuf::from("catalog/restaurants.json")
    );
    assert_eq!(config.seed, 42);
}

#[rstest]
#[case::missing_script(ARG_SCRIPT)]
#[case::missing_dishes(ARG_DISHES)]
#[case::missing_restaurants(ARG_RESTAURANTS)]
fn validate_sources_reports_missing_files(#[case] missing: &'static str) {
    let workspace = ReplayWorkspace::with_catalog();
    workspace.write_script("{}");
    let target = match missing {
        ARG_SCRIPT => workspace.script(),
        ARG_DISHES => workspace.dishes(),
        _ => workspace.restaurants(),
    };
    fs::remove_file(target.as_std_path()).expect("remove fixture");
    let config = ReplayConfig {
        script: workspace.script(),
        dishes: workspace.dishes(),
        restaurants: workspace.restaurants(),
        geocoder_url: None,
        seed: 0,
    };

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, missing);
            assert_eq!(path, target);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let workspace = ReplayWorkspace::with_catalog();
    let config = ReplayConfig {
        script: workspace.root().to_path_buf(),
        dishes: workspace.dishes(),
        restaurants: workspace.restaurants(),
        geocoder_url: None,
        seed: 0,
    };

    let err = config.validate_sources().expect_err("directory rejected");
    match err {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_SCRIPT),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn load_script_reports_open_and_parse_errors() {
    let workspace = ReplayWorkspace::new();

    let err = load_script(&workspace.script()).expect_err("missing script");
    assert!(matches!(err, CliError::OpenScript { .. }), "{err:?}");

    write_utf8(&workspace.script(), b"{ not valid json");
    let err = load_script(&workspace.script()).expect_err("invalid script");
    assert!(matches!(err, CliError::ParseScript { .. }), "{err:?}");

    write_utf8(&workspace.script(), br#"{"actions": [{"action": "teleport"}]}"#);
    let err = load_script(&workspace.script()).expect_err("unknown action");
    assert!(matches!(err, CliError::ParseScript { .. }), "{err:?}");
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "seed": "not a number" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence_and_defaults_paths() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let workspace = ReplayWorkspace::new();
    let root = workspace.root();
    let env_script = root.join("from-env-script.json");
    let cli_dir = root.join("from-cli");
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "data_dir": root.join("from-file").as_str(),
            "geocoder_url": "http://from-file:8080",
            "seed": 3,
        }),
        None,
    );
    composer.push_environment(json!({
        "script": env_script.as_str(),
        "data_dir": root.join("from-env").as_str(),
    }));
    composer.push_cli(json!({
        "data_dir": cli_dir.as_str(),
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.script, env_script);
    assert_eq!(config.dishes, cli_dir.join("dishes.json"));
    assert_eq!(config.restaurants, cli_dir.join("restaurants.json"));
    assert_eq!(config.geocoder_url.as_deref(), Some("http://from-file:8080"));
    assert_eq!(config.seed, 3);
}
