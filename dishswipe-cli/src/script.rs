//! Scripted swipe sessions.
//!
//! A script is a JSON object with an optional `seed`, favourites settings and
//! a list of `actions`. Each action is tagged by its `action` field:
//!
//! ```json
//! {
//!   "seed": 7,
//!   "actions": [
//!     {"action": "filter", "dietary": ["vegan"]},
//!     {"action": "like"},
//!     {"action": "note", "text": "ask for extra chilli"},
//!     {"action": "review", "restaurant": "Dhaba", "stars": 5, "comment": "great"}
//!   ]
//! }
//! ```

use dishswipe_core::{Catalog, DishFilter, FavouriteSort, Mood, Session, SessionError};
use log::{debug, warn};
use serde::Deserialize;

use crate::CliError;

/// A session script read from disk.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionScript {
    /// Seed for the session's random choices; the CLI seed applies when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Case-insensitive name filter for the favourites list.
    #[serde(default)]
    pub favourites_query: String,
    /// Ordering for the favourites list.
    #[serde(default)]
    pub favourites_sort: FavouriteSort,
    /// Actions in the order they are applied.
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Like the current dish.
    Like,
    /// Dislike the current dish.
    Dislike,
    /// Jump to a random dish.
    Surprise,
    /// Go back to the first dish.
    Restart,
    /// Attach a note to the current dish.
    Note {
        /// Note text.
        text: String,
    },
    /// Review a restaurant.
    Review {
        /// Restaurant name.
        restaurant: String,
        /// Star rating from 1 to 5.
        stars: u8,
        /// Review text.
        comment: String,
    },
    /// Remove a dish from the likes.
    Remove {
        /// Dish name.
        dish: String,
    },
    /// Clear likes, dislikes, badges and XP.
    Reset,
    /// Replace the dish filter.
    Filter {
        /// Required dietary tags.
        #[serde(default)]
        dietary: Vec<String>,
        /// Required mood.
        #[serde(default)]
        mood: Option<Mood>,
    },
}

impl Action {
    /// Short name used in logs and errors.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
            Self::Surprise => "surprise",
            Self::Restart => "restart",
            Self::Note { .. } => "note",
            Self::Review { .. } => "review",
            Self::Remove { .. } => "remove",
            Self::Reset => "reset",
            Self::Filter { .. } => "filter",
        }
    }

    /// Apply the action to `session`.
    ///
    /// Swipes past the end of the deck are no-ops. Notes need a current dish
    /// and fail with [`SessionError::Exhausted`] otherwise.
    fn apply(&self, session: &mut Session, catalog: &Catalog) -> Result<(), SessionError> {
        match self {
            Self::Like => {
                if let Some(outcome) = session.like_current(catalog) {
                    for badge in outcome.unlocked() {
                        debug!("unlocked badge {badge}");
                    }
                } else {
                    debug!("like ignored: no dish left");
                }
            }
            Self::Dislike => {
                if session.dislike_current(catalog).is_none() {
                    debug!("dislike ignored: no dish left");
                }
            }
            Self::Surprise => {
                if let Some(dish) = session.surprise(catalog) {
                    debug!("surprise landed on {}", dish.name);
                }
            }
            Self::Restart => session.restart(),
            Self::Note { text } => {
                if !session.note_current(catalog, text)? {
                    debug!("blank note ignored");
                }
            }
            Self::Review {
                restaurant,
                stars,
                comment,
            } => session.review(restaurant, *stars, comment)?,
            Self::Remove { dish } => {
                if !session.state_mut().remove_like(dish) {
                    debug!("{dish} was not liked");
                }
            }
            Self::Reset => session.state_mut().reset_stats(),
            Self::Filter { dietary, mood } => {
                let mut filter = DishFilter::new();
                for tag in dietary {
                    filter = filter.with_tag(tag);
                }
                if let Some(required) = mood {
                    filter = filter.with_mood(*required);
                }
                session.set_filter(filter);
            }
        }
        Ok(())
    }
}

impl SessionScript {
    /// Play every action against a fresh session.
    ///
    /// Notes written after the deck is exhausted are skipped with a warning;
    /// any other rejected action aborts the replay.
    pub(crate) fn replay(&self, catalog: &Catalog, default_seed: u64) -> Result<Session, CliError> {
        let mut session = Session::new(self.seed.unwrap_or(default_seed));
        for (index, action) in self.actions.iter().enumerate() {
            match action.apply(&mut session, catalog) {
                Ok(()) => {}
                Err(SessionError::Exhausted) => {
                    warn!("action {index} ({}) skipped: no dish left", action.name());
                }
                Err(source) => {
                    return Err(CliError::Action {
                        index,
                        action: action.name(),
                        source,
                    });
                }
            }
        }
        Ok(session)
    }
}
