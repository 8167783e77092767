//! The swipe state machine.
//!
//! A [`Session`] walks a catalog's dishes with a cursor, skipping dishes the
//! active [`DishFilter`] rejects, and records swipes into its
//! [`PreferenceState`]. The cursor halts once it passes the last dish; only
//! [`Session::restart`] or [`Session::surprise`] move it back. All randomness
//! comes from a seeded [`ChaCha8Rng`] so runs are reproducible.

use std::collections::HashMap;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::profile::favourite_cuisine;
use crate::{Catalog, Dish, DishFilter, LikeOutcome, PreferenceState, Restaurant, ReviewError};

/// Errors raised by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Every matching dish has been swiped.
    #[error("no more matching dishes")]
    Exhausted,
    /// The session identifier is not registered.
    #[error("unknown session {id}")]
    UnknownSession {
        /// Missing identifier.
        id: SessionId,
    },
    /// A review was rejected.
    #[error(transparent)]
    Review(#[from] ReviewError),
}

/// Position within the dishes that pass the active filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MatchProgress {
    /// Matching dishes up to and including the current one.
    pub position: usize,
    /// Matching dishes in the whole catalog.
    pub total: usize,
}

impl MatchProgress {
    /// Fraction of matching dishes seen; `0.0` when nothing matches.
    pub fn fraction(self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let (Ok(position), Ok(total)) = (u32::try_from(self.position), u32::try_from(self.total))
        else {
            return 0.0;
        };
        (f64::from(position) / f64::from(total)).clamp(0.0, 1.0)
    }
}

/// One user's swipe session.
///
/// # Examples
/// ```
/// use dishswipe_core::{Catalog, Dish, Session};
///
/// let catalog = Catalog::new(
///     vec![Dish::new("Ramen", "Japanese"), Dish::new("Tacos", "Mexican")],
///     vec![],
/// );
/// let mut session = Session::new(7);
/// session.like_current(&catalog);
/// session.dislike_current(&catalog);
/// assert!(session.current_dish(&catalog).is_none());
/// assert_eq!(session.state().likes(), ["Ramen"]);
/// assert_eq!(session.state().dislikes(), ["Tacos"]);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    state: PreferenceState,
    cursor: usize,
    filter: DishFilter,
    pinned: bool,
    rng: ChaCha8Rng,
}

impl Session {
    /// Start an empty session whose random choices derive from `seed`.
    pub fn new(seed: u64) -> Self {
        Self::with_state(PreferenceState::new(), seed)
    }

    /// Start a session around an existing preference state.
    pub fn with_state(state: PreferenceState, seed: u64) -> Self {
        Self {
            state,
            cursor: 0,
            filter: DishFilter::default(),
            pinned: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// The preference record.
    pub const fn state(&self) -> &PreferenceState {
        &self.state
    }

    /// Mutable access to the preference record.
    pub const fn state_mut(&mut self) -> &mut PreferenceState {
        &mut self.state
    }

    /// Cursor into the catalog's dish list.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The active filter.
    pub const fn filter(&self) -> &DishFilter {
        &self.filter
    }

    /// Replace the active filter. The cursor stays where it is.
    pub fn set_filter(&mut self, filter: DishFilter) {
        self.filter = filter;
        self.pinned = false;
    }

    /// The dish under the cursor, skipping dishes the filter rejects.
    ///
    /// Returns `None` once no matching dish remains; the cursor then rests
    /// one past the last dish. A dish chosen by [`Session::surprise`] is
    /// returned even when the filter rejects it.
    pub fn current_dish<'c>(&mut self, catalog: &'c Catalog) -> Option<&'c Dish> {
        if self.pinned {
            if let Some(dish) = catalog.dish_at(self.cursor) {
                return Some(dish);
            }
            self.pinned = false;
        }
        while let Some(dish) = catalog.dish_at(self.cursor) {
            if self.filter.matches(dish) {
                return Some(dish);
            }
            self.cursor += 1;
        }
        self.cursor = self.cursor.min(catalog.dishes().len());
        None
    }

    fn advance(&mut self, catalog: &Catalog) {
        self.pinned = false;
        self.cursor = (self.cursor + 1).min(catalog.dishes().len());
    }

    /// Like the current dish and move on.
    ///
    /// Returns `None` when no dish remains.
    pub fn like_current(&mut self, catalog: &Catalog) -> Option<LikeOutcome> {
        let dish = self.current_dish(catalog)?;
        let outcome = self.state.like(&dish.name);
        self.advance(catalog);
        Some(outcome)
    }

    /// Dislike the current dish and move on, returning its name.
    pub fn dislike_current(&mut self, catalog: &Catalog) -> Option<String> {
        let dish = self.current_dish(catalog)?;
        self.state.dislike(&dish.name);
        self.advance(catalog);
        Some(dish.name.clone())
    }

    /// Attach a note to the current dish.
    ///
    /// Blank text is ignored and reported as `Ok(false)`.
    pub fn note_current(&mut self, catalog: &Catalog, text: &str) -> Result<bool, SessionError> {
        let dish = self.current_dish(catalog).ok_or(SessionError::Exhausted)?;
        Ok(self.state.set_note(&dish.name, text))
    }

    /// Jump to a uniformly random dish, ignoring the filter.
    pub fn surprise<'c>(&mut self, catalog: &'c Catalog) -> Option<&'c Dish> {
        let count = catalog.dishes().len();
        if count == 0 {
            return None;
        }
        self.cursor = self.rng.gen_range(0..count);
        self.pinned = true;
        catalog.dish_at(self.cursor)
    }

    /// Move the cursor back to the first dish.
    pub const fn restart(&mut self) {
        self.cursor = 0;
        self.pinned = false;
    }

    /// Where the cursor sits among the dishes passing the filter.
    pub fn match_progress(&self, catalog: &Catalog) -> MatchProgress {
        let mut position = 0;
        let mut total = 0;
        for (index, dish) in catalog.dishes().iter().enumerate() {
            if !self.filter.matches(dish) {
                continue;
            }
            total += 1;
            if index <= self.cursor {
                position += 1;
            }
        }
        MatchProgress { position, total }
    }

    /// A random restaurant serving the current dish's cuisine.
    ///
    /// `None` means no restaurant is recorded for the cuisine, or the deck is
    /// exhausted.
    pub fn pairing_for_current<'c>(&mut self, catalog: &'c Catalog) -> Option<&'c Restaurant> {
        let dish = self.current_dish(catalog)?;
        catalog.pairing(&dish.culture, &mut self.rng)
    }

    /// A random restaurant serving the favourite cuisine.
    ///
    /// Offered once the deck is exhausted; `None` without likes or when no
    /// restaurant serves the favourite cuisine.
    pub fn next_place<'c>(&mut self, catalog: &'c Catalog) -> Option<&'c Restaurant> {
        let cuisine = favourite_cuisine(&self.state, catalog)?;
        catalog.pairing(&cuisine, &mut self.rng)
    }

    /// Review `restaurant` on behalf of this session.
    pub fn review(&mut self, restaurant: &str, stars: u8, comment: &str) -> Result<(), SessionError> {
        self.state.submit_review(restaurant, stars, comment)?;
        Ok(())
    }
}

/// Identifier of a session held by a [`SessionStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionId(u64);

impl SessionId {
    /// Raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Isolated sessions hosted by one process.
///
/// Each session owns its preference state. Shared caches such as the
/// coordinate cache live outside the store.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, Session>,
    next_id: u64,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session seeded with `seed`.
    pub fn open(&mut self, seed: u64) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.sessions.insert(id, Session::new(seed));
        id
    }

    /// Borrow a session.
    pub fn get(&self, id: SessionId) -> Result<&Session, SessionError> {
        self.sessions
            .get(&id)
            .ok_or(SessionError::UnknownSession { id })
    }

    /// Borrow a session mutably.
    pub fn get_mut(&mut self, id: SessionId) -> Result<&mut Session, SessionError> {
        self.sessions
            .get_mut(&id)
            .ok_or(SessionError::UnknownSession { id })
    }

    /// Close a session, returning its final state.
    pub fn close(&mut self, id: SessionId) -> Result<Session, SessionError> {
        self.sessions
            .remove(&id)
            .ok_or(SessionError::UnknownSession { id })
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Report whether no session is open.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
