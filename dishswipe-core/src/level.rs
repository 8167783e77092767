//! Map accumulated XP to a named level.

use thiserror::Error;

/// A named level and the XP needed to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    /// Display name.
    pub name: String,
    /// Minimum XP for this level.
    pub threshold: u32,
}

impl Level {
    /// Construct a level.
    pub fn new(name: impl Into<String>, threshold: u32) -> Self {
        Self {
            name: name.into(),
            threshold,
        }
    }
}

/// Errors returned by [`LevelTable::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelTableError {
    /// No levels were supplied.
    #[error("level table must contain at least one level")]
    Empty,
    /// The first level did not start at zero XP.
    #[error("first level must start at 0 XP, found {threshold}")]
    FirstThresholdNotZero {
        /// Threshold of the first level.
        threshold: u32,
    },
    /// Thresholds were not strictly ascending.
    #[error("level {name:?} threshold {threshold} does not exceed the previous level")]
    NotAscending {
        /// Offending level.
        name: String,
        /// Offending threshold.
        threshold: u32,
    },
}

/// Where an XP total sits in the level table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LevelProgress {
    /// Current level name.
    pub level: String,
    /// Next level name, or `None` at the top level.
    pub next: Option<String>,
    /// Fraction of the way to the next level in `[0, 1]`; `None` at max level.
    pub fraction: Option<f64>,
}

impl LevelProgress {
    /// Report whether the top level has been reached.
    pub const fn is_max(&self) -> bool {
        self.next.is_none()
    }
}

/// Ascending, validated level table.
///
/// # Examples
/// ```
/// use dishswipe_core::LevelTable;
///
/// let progress = LevelTable::default().progress(160);
/// assert_eq!(progress.level, "Gourmet");
/// let fraction = progress.fraction.expect("not max level");
/// assert!((fraction - 10.0 / 150.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    levels: Vec<Level>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: vec![
                Level::new("Foodie", 0),
                Level::new("Gourmet", 150),
                Level::new("Epicurean", 300),
            ],
        }
    }
}

impl LevelTable {
    /// Validate and build a table.
    pub fn new(levels: Vec<Level>) -> Result<Self, LevelTableError> {
        let first = levels.first().ok_or(LevelTableError::Empty)?;
        if first.threshold != 0 {
            return Err(LevelTableError::FirstThresholdNotZero {
                threshold: first.threshold,
            });
        }
        for pair in levels.windows(2) {
            if let [previous, level] = pair
                && level.threshold <= previous.threshold
            {
                return Err(LevelTableError::NotAscending {
                    name: level.name.clone(),
                    threshold: level.threshold,
                });
            }
        }
        Ok(Self { levels })
    }

    /// Levels in ascending order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Locate `xp` in the table.
    pub fn progress(&self, xp: u32) -> LevelProgress {
        let current = self
            .levels
            .iter()
            .rposition(|level| level.threshold <= xp)
            .unwrap_or(0);
        let level = self.levels.get(current);
        let next = self.levels.get(current + 1);
        let base = level.map_or(0, |level| level.threshold);

        let fraction = next.map(|next| {
            let span = next.threshold.saturating_sub(base);
            if span == 0 {
                return 0.0;
            }
            let gained = xp.saturating_sub(base);
            (f64::from(gained) / f64::from(span)).clamp(0.0, 1.0)
        });

        LevelProgress {
            level: level.map(|level| level.name.clone()).unwrap_or_default(),
            next: next.map(|next| next.name.clone()),
            fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Foodie", Some(0.0))]
    #[case(75, "Foodie", Some(0.5))]
    #[case(150, "Gourmet", Some(0.0))]
    #[case(300, "Epicurean", None)]
    #[case(9_000, "Epicurean", None)]
    fn default_table_levels(
        #[case] xp: u32,
        #[case] level: &str,
        #[case] fraction: Option<f64>,
    ) {
        let progress = LevelTable::default().progress(xp);
        assert_eq!(progress.level, level);
        assert_eq!(progress.fraction, fraction);
    }

    #[rstest]
    fn xp_160_is_a_fifteenth_into_gourmet() {
        let progress = LevelTable::default().progress(160);
        assert_eq!(progress.level, "Gourmet");
        assert_eq!(progress.next.as_deref(), Some("Epicurean"));
        let fraction = progress.fraction.expect("fraction below max level");
        assert!((fraction - 0.0667).abs() < 1e-3);
    }

    #[rstest]
    #[case(vec![], LevelTableError::Empty)]
    #[case(vec![Level::new("Novice", 5)], LevelTableError::FirstThresholdNotZero { threshold: 5 })]
    #[case(
        vec![Level::new("A", 0), Level::new("B", 100), Level::new("C", 100)],
        LevelTableError::NotAscending { name: "C".into(), threshold: 100 }
    )]
    fn invalid_tables_are_rejected(#[case] levels: Vec<Level>, #[case] expected: LevelTableError) {
        assert_eq!(LevelTable::new(levels), Err(expected));
    }

    #[rstest]
    fn single_level_table_is_always_max() {
        let table = LevelTable::new(vec![Level::new("Only", 0)]).expect("valid table");
        assert!(table.progress(42).is_max());
    }
}
