//! Behavioural tests for JSON catalog loading.

use camino::Utf8PathBuf;
use dishswipe_core::Catalog;
use dishswipe_data::load_catalog;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

#[fixture]
fn workdir() -> TempDir {
    TempDir::new().expect("create temp dir")
}

#[fixture]
fn catalog() -> RefCell<Catalog> {
    RefCell::new(Catalog::default())
}

fn file_in(dir: &TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf-8 temp path")
}

fn write_file(dir: &TempDir, name: &str, contents: &str) {
    std::fs::write(file_in(dir, name), contents).expect("write fixture");
}

#[given("a dish file with one valid and one malformed record")]
fn dish_file(#[from(workdir)] dir: &TempDir) {
    write_file(
        dir,
        "dishes.json",
        r#"[
            {"name": "Chana Masala", "culture": "Indian", "avg_price": 12,
             "Dietary_Restrictions": "Vegan, Gluten-Free", "mood": "Healthy"},
            {"name": "Mystery", "culture": "Unknown", "average_price": "free"}
        ]"#,
    );
}

#[given("no dish file")]
fn no_dish_file(#[from(workdir)] dir: &TempDir) {
    assert!(!file_in(dir, "dishes.json").exists());
}

#[given("a restaurant file with two spellings of Chinese and one Indian restaurant")]
fn restaurant_file(#[from(workdir)] dir: &TempDir) {
    write_file(
        dir,
        "restaurants.json",
        r#"[
            {"name": "Joe's Shanghai", "cuisine": "Chinese", "address": "46 Bowery",
             "lat": 40.7155, "lon": -73.9967},
            {"name": "Golden", "cuisine": " chinese", "address": "1 Mott St", "lat": 40.71},
            {"name": "Dhaba", "cuisine": "Indian", "address": "108 Lexington Ave"}
        ]"#,
    );
}

#[when("the catalog is loaded")]
fn load(#[from(workdir)] dir: &TempDir, #[from(catalog)] catalog: &RefCell<Catalog>) {
    *catalog.borrow_mut() = load_catalog(
        &file_in(dir, "dishes.json"),
        &file_in(dir, "restaurants.json"),
    );
}

#[then("{count} dishes are available")]
fn dish_count(count: usize, #[from(catalog)] catalog: &RefCell<Catalog>) {
    assert_eq!(catalog.borrow().dishes().len(), count);
}

#[then("the loaded dish keeps its gluten-free tag")]
fn dish_tagged(#[from(catalog)] catalog: &RefCell<Catalog>) {
    let loaded = catalog.borrow();
    let dish = loaded.find_dish("Chana Masala").expect("dish should be loaded");
    assert!(
        dish.dietary_tags.contains("gluten-free"),
        "tags: {:?}",
        dish.dietary_tags
    );
}

#[then("{count} restaurants serve Chinese food")]
fn cuisine_count(count: usize, #[from(catalog)] catalog: &RefCell<Catalog>) {
    assert_eq!(catalog.borrow().restaurants_for("CHINESE").count(), count);
}

#[then("only restaurants with both coordinates are located")]
fn located(#[from(catalog)] catalog: &RefCell<Catalog>) {
    let loaded = catalog.borrow();
    let located: Vec<&str> = loaded
        .restaurants()
        .iter()
        .filter(|r| r.stored_location().is_some())
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(located, vec!["Joe's Shanghai"]);
}

#[scenario(path = "tests/features/catalog_loading.feature", index = 0)]
fn malformed_records_skipped(workdir: TempDir, catalog: RefCell<Catalog>) {
    let _ = (workdir, catalog);
}

#[scenario(path = "tests/features/catalog_loading.feature", index = 1)]
fn missing_file_is_empty(workdir: TempDir, catalog: RefCell<Catalog>) {
    let _ = (workdir, catalog);
}

#[scenario(path = "tests/features/catalog_loading.feature", index = 2)]
fn restaurants_grouped(workdir: TempDir, catalog: RefCell<Catalog>) {
    let _ = (workdir, catalog);
}
