use std::collections::BTreeSet;

use crate::catalog::normalise_cuisine;

/// Mood a dish is classified under.
///
/// Each mood carries a keyword the ranker looks for in restaurant cuisines.
///
/// # Examples
/// ```
/// use dishswipe_core::Mood;
///
/// assert_eq!(Mood::Adventurous.keyword(), "spicy");
/// assert_eq!("healthy".parse::<Mood>(), Ok(Mood::Healthy));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mood {
    /// Warm, familiar food.
    Comforting,
    /// Light and nutritious food.
    Healthy,
    /// Bold or spicy food.
    Adventurous,
}

impl Mood {
    /// Every mood in display order.
    pub const ALL: [Self; 3] = [Self::Comforting, Self::Healthy, Self::Adventurous];

    /// Return the mood name as written in the catalog.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comforting => "Comforting",
            Self::Healthy => "Healthy",
            Self::Adventurous => "Adventurous",
        }
    }

    /// Keyword matched against normalised restaurant cuisines.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Comforting => "comfort",
            Self::Healthy => "healthy",
            Self::Adventurous => "spicy",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|mood| mood.as_str()).collect();
                format!("unknown mood '{s}'; expected one of {}", known.join(", "))
            })
    }
}

/// Normalise a dietary tag for set membership checks.
///
/// Tags are trimmed and lowercased so `" Vegan"` and `"vegan"` compare equal.
pub fn normalise_tag(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(feature = "serde")]
fn deserialize_tags<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = <Vec<String> as serde::Deserialize>::deserialize(deserializer)?;
    Ok(raw
        .iter()
        .map(|tag| normalise_tag(tag))
        .filter(|tag| !tag.is_empty())
        .collect())
}

/// A dish the user can swipe on.
///
/// The name is the dish identity within a catalog.
///
/// # Examples
/// ```
/// use dishswipe_core::{Dish, Mood};
///
/// let dish = Dish::new("Mapo Tofu", "Chinese")
///     .with_price(14.5)
///     .with_tag("Vegetarian")
///     .with_mood(Mood::Adventurous);
/// assert!(dish.dietary_tags.contains("vegetarian"));
/// assert_eq!(dish.cuisine_key(), "chinese");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dish {
    /// Unique dish name.
    pub name: String,
    /// Cuisine or culture the dish belongs to.
    pub culture: String,
    /// Short description of the main ingredient.
    pub main_ingredient: String,
    /// Typical price in dollars; never negative.
    pub average_price: f64,
    /// Optional image URL.
    pub image: Option<String>,
    /// Normalised dietary tags such as `vegan` or `halal`.
    pub dietary_tags: BTreeSet<String>,
    /// Mood classification, if any.
    pub mood: Option<Mood>,
}

impl Dish {
    /// Construct a dish with a name and cuisine and no other attributes.
    pub fn new(name: impl Into<String>, culture: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            culture: culture.into(),
            main_ingredient: String::new(),
            average_price: 0.0,
            image: None,
            dietary_tags: BTreeSet::new(),
            mood: None,
        }
    }

    /// Set the main ingredient description.
    #[must_use]
    pub fn with_main_ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.main_ingredient = ingredient.into();
        self
    }

    /// Set the average price. Negative or non-finite prices become `0.0`.
    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.average_price = if price.is_finite() { price.max(0.0) } else { 0.0 };
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Add a dietary tag; blank tags are ignored.
    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        let normalised = normalise_tag(tag);
        if !normalised.is_empty() {
            self.dietary_tags.insert(normalised);
        }
        self
    }

    /// Set the mood classification.
    #[must_use]
    pub const fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    /// Normalised cuisine used for grouping and frequency counts.
    pub fn cuisine_key(&self) -> String {
        normalise_cuisine(&self.culture)
    }
}

/// Filter applied while swiping through dishes.
///
/// A dish passes when it carries every requested dietary tag and, if a mood is
/// selected, has exactly that mood.
///
/// # Examples
/// ```
/// use dishswipe_core::{Dish, DishFilter, Mood};
///
/// let filter = DishFilter::new().with_tag("vegan");
/// let salad = Dish::new("Salad", "American").with_tag("vegan").with_tag("gluten-free");
/// assert!(filter.matches(&salad));
/// assert!(!filter.with_mood(Mood::Comforting).matches(&salad));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DishFilter {
    /// Tags every dish must carry.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "deserialize_tags")
    )]
    pub dietary: BTreeSet<String>,
    /// Required mood, or `None` for any mood.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mood: Option<Mood>,
}

impl DishFilter {
    /// Construct a filter that accepts every dish.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a dietary tag.
    #[must_use]
    pub fn with_tag(mut self, tag: &str) -> Self {
        let normalised = normalise_tag(tag);
        if !normalised.is_empty() {
            self.dietary.insert(normalised);
        }
        self
    }

    /// Require a mood.
    #[must_use]
    pub const fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    /// Report whether `dish` passes the filter.
    pub fn matches(&self, dish: &Dish) -> bool {
        let mood_ok = self.mood.is_none_or(|mood| dish.mood == Some(mood));
        mood_ok && self.dietary.is_subset(&dish.dietary_tags)
    }

    /// Report whether the filter accepts every dish.
    pub fn is_empty(&self) -> bool {
        self.dietary.is_empty() && self.mood.is_none()
    }
}
