use geo::Coord;

use crate::catalog::normalise_cuisine;

/// A restaurant that may be recommended to the user.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Restaurants
/// without a stored location are resolved lazily by a
/// [`CoordinateResolver`](crate::CoordinateResolver).
///
/// # Examples
/// ```
/// use geo::Coord;
/// use dishswipe_core::Restaurant;
///
/// let restaurant = Restaurant::new("Joe's Shanghai", "Chinese", "46 Bowery")
///     .with_price("$$")
///     .with_location(Coord { x: -73.9967, y: 40.7155 });
///
/// assert_eq!(restaurant.cuisine_key(), "chinese");
/// assert!(restaurant.stored_location().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    /// Unique restaurant name.
    pub name: String,
    /// Cuisine served.
    pub cuisine: String,
    /// Symbolic price tier such as `$$`.
    pub price: String,
    /// Street address used for geocoding.
    pub address: String,
    /// Optional photo URL.
    pub photo: Option<String>,
    /// Optional numeric rating.
    pub rating: Option<f32>,
    /// Stored location, if the record carried one.
    pub location: Option<Coord<f64>>,
}

impl Restaurant {
    /// Construct a restaurant without price, photo, rating or location.
    pub fn new(
        name: impl Into<String>,
        cuisine: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cuisine: cuisine.into(),
            price: String::new(),
            address: address.into(),
            photo: None,
            rating: None,
            location: None,
        }
    }

    /// Set the price tier.
    #[must_use]
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    /// Set the photo URL.
    #[must_use]
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Set the rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the stored location.
    #[must_use]
    pub const fn with_location(mut self, location: Coord<f64>) -> Self {
        self.location = Some(location);
        self
    }

    /// Return the stored location when it is usable.
    ///
    /// A zero or non-finite component counts as missing, matching catalogs
    /// that write `0` for unknown coordinates. Locations outside WGS84 bounds
    /// are rejected the same way geocoded answers are.
    pub fn stored_location(&self) -> Option<Coord<f64>> {
        self.location.filter(|coord| is_usable(*coord))
    }

    /// Normalised cuisine used for grouping and affinity lookups.
    pub fn cuisine_key(&self) -> String {
        normalise_cuisine(&self.cuisine)
    }
}

fn is_usable(coord: Coord<f64>) -> bool {
    is_valid_wgs84(coord) && coord.x != 0.0 && coord.y != 0.0
}

/// Longitude within `[-180, 180]` and latitude within `[-90, 90]`.
///
/// `NaN` fails both range checks.
pub(crate) fn is_valid_wgs84(location: Coord<f64>) -> bool {
    (-180.0..=180.0).contains(&location.x) && (-90.0..=90.0).contains(&location.y)
}
