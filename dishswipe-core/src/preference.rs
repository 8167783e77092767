//! Session-scoped preference state: likes, dislikes, notes, XP, badges and
//! restaurant reviews.
//!
//! Every liked dish earns [`XP_PER_LIKE`] exactly once, so `xp` always equals
//! `XP_PER_LIKE` times the number of likes. Badges only grow until
//! [`PreferenceState::reset_stats`] clears them.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::BadgeTable;

/// XP awarded for each newly liked dish.
pub const XP_PER_LIKE: u32 = 10;

/// Lowest accepted star rating.
pub const MIN_STARS: u8 = 1;
/// Highest accepted star rating.
pub const MAX_STARS: u8 = 5;

/// A star rating with a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Review {
    /// Stars in `1..=5`.
    pub stars: u8,
    /// Free-text comment; never blank.
    pub comment: String,
}

/// Errors returned by [`PreferenceState::submit_review`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    /// Stars were outside `1..=5`.
    #[error("star rating must be between {MIN_STARS} and {MAX_STARS}, got {stars}")]
    StarsOutOfRange {
        /// Rejected rating.
        stars: u8,
    },
    /// The comment was empty after trimming.
    #[error("review comment must not be blank")]
    BlankComment,
    /// The restaurant name was empty after trimming.
    #[error("review must name a restaurant")]
    BlankRestaurant,
}

/// Result of a like action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The dish was newly liked.
    Added {
        /// Badges unlocked by this like, in threshold order.
        unlocked: Vec<String>,
    },
    /// The dish was already liked; nothing changed.
    AlreadyLiked,
}

impl LikeOutcome {
    /// Badges unlocked by the action; empty for a repeat like.
    pub fn unlocked(&self) -> &[String] {
        match self {
            Self::Added { unlocked } => unlocked,
            Self::AlreadyLiked => &[],
        }
    }
}

/// Mutable preference record for one session.
///
/// # Examples
/// ```
/// use dishswipe_core::{LikeOutcome, PreferenceState};
///
/// let mut state = PreferenceState::new();
/// for dish in ["Ramen", "Pho", "Ramen", "Tacos"] {
///     state.like(dish);
/// }
/// assert_eq!(state.likes(), ["Ramen", "Pho", "Tacos"]);
/// assert_eq!(state.xp(), 30);
/// assert_eq!(state.badges(), ["Taster ×3"]);
/// assert_eq!(state.like("Pho"), LikeOutcome::AlreadyLiked);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceState {
    likes: Vec<String>,
    dislikes: Vec<String>,
    notes: BTreeMap<String, String>,
    badges: Vec<String>,
    xp: u32,
    reviews: BTreeMap<String, Vec<Review>>,
    badge_table: BadgeTable,
}

impl PreferenceState {
    /// Create an empty state using the default badge table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty state using `badge_table`.
    pub fn with_badge_table(badge_table: BadgeTable) -> Self {
        Self {
            badge_table,
            ..Self::default()
        }
    }

    /// Liked dish names in the order they were first liked.
    pub fn likes(&self) -> &[String] {
        &self.likes
    }

    /// Disliked dish names in swipe order, including repeats.
    pub fn dislikes(&self) -> &[String] {
        &self.dislikes
    }

    /// Notes keyed by dish name.
    pub const fn notes(&self) -> &BTreeMap<String, String> {
        &self.notes
    }

    /// Note for `dish`, if any.
    pub fn note(&self, dish: &str) -> Option<&str> {
        self.notes.get(dish).map(String::as_str)
    }

    /// Unlocked badges in unlock order.
    pub fn badges(&self) -> &[String] {
        &self.badges
    }

    /// Accumulated experience points.
    pub const fn xp(&self) -> u32 {
        self.xp
    }

    /// Reviews keyed by restaurant name.
    pub const fn reviews(&self) -> &BTreeMap<String, Vec<Review>> {
        &self.reviews
    }

    /// Badge table used to evaluate unlocks.
    pub const fn badge_table(&self) -> &BadgeTable {
        &self.badge_table
    }

    /// Report whether `dish` is liked.
    pub fn is_liked(&self, dish: &str) -> bool {
        self.likes.iter().any(|liked| liked == dish)
    }

    /// Like `dish`, awarding XP and evaluating badges when it is new.
    pub fn like(&mut self, dish: &str) -> LikeOutcome {
        if self.is_liked(dish) {
            return LikeOutcome::AlreadyLiked;
        }
        self.likes.push(dish.to_owned());
        self.xp = self.xp.saturating_add(XP_PER_LIKE);
        let unlocked = self.badge_table.evaluate(self.likes.len(), &self.badges);
        self.badges.extend(unlocked.iter().cloned());
        LikeOutcome::Added { unlocked }
    }

    /// Record a dislike. Repeats are kept.
    pub fn dislike(&mut self, dish: &str) {
        self.dislikes.push(dish.to_owned());
    }

    /// Store a note for `dish`, replacing any earlier note.
    ///
    /// Returns `false` and leaves the notes untouched when `text` is blank.
    pub fn set_note(&mut self, dish: &str, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.notes.insert(dish.to_owned(), text.to_owned());
        true
    }

    /// Remove `dish` from the likes and take back its XP.
    ///
    /// Badges already earned stay unlocked. Returns `false` when the dish was
    /// not liked.
    pub fn remove_like(&mut self, dish: &str) -> bool {
        let Some(position) = self.likes.iter().position(|liked| liked == dish) else {
            return false;
        };
        self.likes.remove(position);
        self.xp = self.xp.saturating_sub(XP_PER_LIKE);
        true
    }

    /// Clear likes, dislikes, badges and XP.
    ///
    /// Notes and reviews are kept.
    pub fn reset_stats(&mut self) {
        self.likes.clear();
        self.dislikes.clear();
        self.badges.clear();
        self.xp = 0;
    }

    /// Record a review for `restaurant`.
    pub fn submit_review(
        &mut self,
        restaurant: &str,
        stars: u8,
        comment: &str,
    ) -> Result<(), ReviewError> {
        if restaurant.trim().is_empty() {
            return Err(ReviewError::BlankRestaurant);
        }
        if !(MIN_STARS..=MAX_STARS).contains(&stars) {
            return Err(ReviewError::StarsOutOfRange { stars });
        }
        let comment = comment.trim();
        if comment.is_empty() {
            return Err(ReviewError::BlankComment);
        }
        self.reviews
            .entry(restaurant.to_owned())
            .or_default()
            .push(Review {
                stars,
                comment: comment.to_owned(),
            });
        Ok(())
    }

    /// Reviews submitted for `restaurant`, oldest first.
    pub fn reviews_for(&self, restaurant: &str) -> &[Review] {
        self.reviews.get(restaurant).map_or(&[], Vec::as_slice)
    }

    /// Mean star rating for `restaurant`, or `None` without reviews.
    pub fn average_rating(&self, restaurant: &str) -> Option<f64> {
        let reviews = self.reviews_for(restaurant);
        if reviews.is_empty() {
            return None;
        }
        let total: u32 = reviews.iter().map(|review| u32::from(review.stars)).sum();
        let count = u32::try_from(reviews.len()).ok()?;
        Some(f64::from(total) / f64::from(count))
    }
}
