//! Load dish and restaurant catalogs from JSON.
//!
//! Catalog files hold a JSON array of records. Each record is decoded on its
//! own so one malformed entry never discards the rest of the file. Field
//! names follow the catalog spreadsheets the files are exported from, with
//! a few aliases for hand-written fixtures:
//!
//! - dishes: `name`, `culture`, `main_ingredient`, `average_price` (or
//!   `avg_price`), `image`, `Dietary_Restrictions` (free text) or `tags`
//!   (list), `mood`;
//! - restaurants: `name`, `cuisine`, `price`, `address`, `photo`, `rating`,
//!   `lat`, `lon`.
//!
//! The `load_*` functions never fail: unreadable or malformed files are
//! logged and yield an empty list. The `read_*` functions surface
//! [`CatalogLoadError`] for callers that want to react to a bad file.

use camino::{Utf8Path, Utf8PathBuf};
use dishswipe_core::{Catalog, Dish, Mood, Restaurant};
use geo::Coord;
use log::{debug, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::fs;

/// Errors raised while reading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The file could not be opened or read.
    #[error("failed to read catalog file {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a JSON array.
    #[error("failed to parse catalog file {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct DishRecord {
    name: String,
    #[serde(alias = "cuisine")]
    culture: String,
    #[serde(default)]
    main_ingredient: Option<String>,
    #[serde(default, alias = "avg_price")]
    average_price: Option<f64>,
    #[serde(default, alias = "image_url")]
    image: Option<String>,
    #[serde(default, rename = "Dietary_Restrictions", alias = "dietary_restrictions")]
    dietary_restrictions: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    mood: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RestaurantRecord {
    name: String,
    cuisine: String,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    photo: Option<String>,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default, alias = "latitude")]
    lat: Option<f64>,
    #[serde(default, alias = "longitude", alias = "lng")]
    lon: Option<f64>,
}

/// Split a free-text dietary restriction field into tags.
///
/// Commas, semicolons and slashes separate tags; blanks are dropped.
fn split_restrictions(raw: &str) -> impl Iterator<Item = &str> {
    raw.split([',', ';', '/'])
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl DishRecord {
    fn into_dish(self) -> Result<Dish, String> {
        if blank(&self.name) {
            return Err("dish name is blank".to_owned());
        }
        if blank(&self.culture) {
            return Err(format!("dish '{}' has no cuisine", self.name));
        }
        let price = self.average_price.unwrap_or(0.0);
        if !price.is_finite() || price < 0.0 {
            return Err(format!("dish '{}' has invalid price {price}", self.name));
        }

        let mut dish = Dish::new(self.name.trim(), self.culture.trim()).with_price(price);
        if let Some(ingredient) = self.main_ingredient {
            dish = dish.with_main_ingredient(ingredient);
        }
        if let Some(image) = self.image.filter(|url| !blank(url)) {
            dish = dish.with_image(image);
        }
        let free_text = self.dietary_restrictions.unwrap_or_default();
        for tag in split_restrictions(&free_text).chain(self.tags.iter().map(String::as_str)) {
            dish = dish.with_tag(tag);
        }
        if let Some(raw) = self.mood.as_deref().filter(|mood| !blank(mood)) {
            match raw.parse::<Mood>() {
                Ok(mood) => dish = dish.with_mood(mood),
                Err(reason) => debug!("dish '{}': {reason}; leaving mood unset", dish.name),
            }
        }
        Ok(dish)
    }
}

impl RestaurantRecord {
    fn into_restaurant(self) -> Result<Restaurant, String> {
        if blank(&self.name) {
            return Err("restaurant name is blank".to_owned());
        }
        if blank(&self.cuisine) {
            return Err(format!("restaurant '{}' has no cuisine", self.name));
        }

        let mut restaurant = Restaurant::new(
            self.name.trim(),
            self.cuisine.trim(),
            self.address.unwrap_or_default().trim(),
        );
        if let Some(price) = self.price {
            restaurant = restaurant.with_price(price);
        }
        if let Some(photo) = self.photo.filter(|url| !blank(url)) {
            restaurant = restaurant.with_photo(photo);
        }
        if let Some(rating) = self.rating {
            restaurant = restaurant.with_rating(rating);
        }
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            restaurant = restaurant.with_location(Coord { x: lon, y: lat });
        }
        Ok(restaurant)
    }
}

/// Decode each element of a JSON array, skipping elements that fail.
fn parse_records<R, T>(
    json: &str,
    kind: &str,
    convert: impl Fn(R) -> Result<T, String>,
) -> Result<Vec<T>, serde_json::Error>
where
    R: DeserializeOwned,
{
    let values: Vec<Value> = serde_json::from_str(json)?;
    let total = values.len();
    let records: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let record = serde_json::from_value::<R>(value)
                .map_err(|err| err.to_string())
                .and_then(&convert);
            match record {
                Ok(item) => Some(item),
                Err(reason) => {
                    warn!("skipping {kind} record {index}: {reason}");
                    None
                }
            }
        })
        .collect();
    debug!("parsed {} of {total} {kind} records", records.len());
    Ok(records)
}

/// Parse a JSON array of dish records, skipping malformed entries.
///
/// # Errors
///
/// Returns an error when the input is not a JSON array.
///
/// # Examples
/// ```
/// use dishswipe_data::parse_dishes;
///
/// let json = r#"[
///     {"name": "Falafel", "culture": "Lebanese", "avg_price": 8,
///      "Dietary_Restrictions": "Vegan; Halal"},
///     {"name": "", "culture": "Nowhere"}
/// ]"#;
/// let dishes = parse_dishes(json).expect("array");
/// assert_eq!(dishes.len(), 1);
/// assert!(dishes[0].dietary_tags.contains("halal"));
/// ```
pub fn parse_dishes(json: &str) -> Result<Vec<Dish>, serde_json::Error> {
    parse_records(json, "dish", DishRecord::into_dish)
}

/// Parse a JSON array of restaurant records, skipping malformed entries.
///
/// # Errors
///
/// Returns an error when the input is not a JSON array.
pub fn parse_restaurants(json: &str) -> Result<Vec<Restaurant>, serde_json::Error> {
    parse_records(json, "restaurant", RestaurantRecord::into_restaurant)
}

fn read_file(path: &Utf8Path) -> Result<String, CatalogLoadError> {
    fs::read_to_string(path).map_err(|source| CatalogLoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read dishes from `path`.
///
/// # Errors
///
/// Returns [`CatalogLoadError`] when the file cannot be read or is not a JSON
/// array.
pub fn read_dishes(path: &Utf8Path) -> Result<Vec<Dish>, CatalogLoadError> {
    let json = read_file(path)?;
    parse_dishes(&json).map_err(|source| CatalogLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read restaurants from `path`.
///
/// # Errors
///
/// Returns [`CatalogLoadError`] when the file cannot be read or is not a JSON
/// array.
pub fn read_restaurants(path: &Utf8Path) -> Result<Vec<Restaurant>, CatalogLoadError> {
    let json = read_file(path)?;
    parse_restaurants(&json).map_err(|source| CatalogLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load dishes from `path`, logging and returning an empty list on failure.
pub fn load_dishes(path: &Utf8Path) -> Vec<Dish> {
    read_dishes(path).unwrap_or_else(|err| {
        warn!("{err}; continuing without dishes");
        Vec::new()
    })
}

/// Load restaurants from `path`, logging and returning an empty list on failure.
pub fn load_restaurants(path: &Utf8Path) -> Vec<Restaurant> {
    read_restaurants(path).unwrap_or_else(|err| {
        warn!("{err}; continuing without restaurants");
        Vec::new()
    })
}

/// Load both catalog files and build the cuisine index.
pub fn load_catalog(dishes: &Utf8Path, restaurants: &Utf8Path) -> Catalog {
    Catalog::new(load_dishes(dishes), load_restaurants(restaurants))
}
