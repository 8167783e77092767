//! Test helpers for composing replay workspaces.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Dishes in swipe order: two Chinese, one Indian, one American, one Lebanese.
pub(super) const DISHES_JSON: &str = r#"[
    {"name": "Dumplings", "culture": "Chinese", "average_price": 9},
    {"name": "Mapo Tofu", "culture": "Chinese", "average_price": 14,
     "Dietary_Restrictions": "Vegan", "mood": "Adventurous"},
    {"name": "Chana Masala", "culture": "Indian", "avg_price": 12,
     "Dietary_Restrictions": "Vegan, Gluten-Free", "mood": "Healthy"},
    {"name": "Mac and Cheese", "culture": "American", "average_price": 11,
     "tags": ["vegetarian"], "mood": "Comforting"},
    {"name": "Falafel", "culture": "Lebanese", "average_price": 8,
     "Dietary_Restrictions": "Vegan / Halal", "mood": "Healthy"}
]"#;

/// Restaurants with stored coordinates around Manhattan.
pub(super) const RESTAURANTS_JSON: &str = r#"[
    {"name": "Joe's Shanghai", "cuisine": "Chinese", "price": "$$",
     "address": "46 Bowery", "lat": 40.7155, "lon": -73.9967},
    {"name": "Dhaba", "cuisine": "Indian", "price": "$$",
     "address": "108 Lexington Ave", "lat": 40.7425, "lon": -73.9826},
    {"name": "Mamoun's", "cuisine": "Lebanese", "price": "$",
     "address": "119 MacDougal St", "lat": 40.7301, "lon": -74.0003}
]"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// Temporary directory holding catalog files and a script.
pub(super) struct ReplayWorkspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ReplayWorkspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    /// Workspace with default-named catalog files.
    pub(super) fn with_catalog() -> Self {
        let workspace = Self::new();
        write_utf8(&workspace.dishes(), DISHES_JSON.as_bytes());
        write_utf8(&workspace.restaurants(), RESTAURANTS_JSON.as_bytes());
        workspace
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn dishes(&self) -> Utf8PathBuf {
        self.root.join("dishes.json")
    }

    pub(super) fn restaurants(&self) -> Utf8PathBuf {
        self.root.join("restaurants.json")
    }

    pub(super) fn script(&self) -> Utf8PathBuf {
        self.root.join("script.json")
    }

    pub(super) fn write_script(&self, json: &str) {
        write_utf8(&self.script(), json.as_bytes());
    }
}
