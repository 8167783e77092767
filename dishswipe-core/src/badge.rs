//! Achievement badges unlocked by like counts.
//!
//! A [`BadgeTable`] holds ascending `(threshold, badge)` rules. Evaluation is
//! a pure function of the like count and the badges already held, so calling
//! it twice with the same inputs never unlocks anything twice.

use std::collections::BTreeSet;

use thiserror::Error;

/// A single unlock rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BadgeRule {
    /// Number of distinct likes needed to unlock the badge.
    pub threshold: usize,
    /// Badge identifier shown to the user.
    pub badge: String,
}

impl BadgeRule {
    /// Construct a rule.
    pub fn new(threshold: usize, badge: impl Into<String>) -> Self {
        Self {
            threshold,
            badge: badge.into(),
        }
    }
}

/// Errors returned by [`BadgeTable::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BadgeTableError {
    /// A rule required zero likes.
    #[error("badge {badge:?} must require at least one like")]
    ZeroThreshold {
        /// Offending badge.
        badge: String,
    },
    /// Thresholds were not strictly ascending.
    #[error("badge {badge:?} threshold {threshold} does not exceed the previous threshold")]
    NotAscending {
        /// Offending badge.
        badge: String,
        /// Offending threshold.
        threshold: usize,
    },
    /// A badge identifier was blank.
    #[error("badge identifiers must not be blank")]
    BlankBadge,
    /// Two rules shared an identifier.
    #[error("badge {badge:?} appears more than once")]
    DuplicateBadge {
        /// Repeated badge.
        badge: String,
    },
}

/// Progress towards one badge, for an achievements view.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BadgeStatus {
    /// Badge identifier.
    pub badge: String,
    /// Likes required.
    pub threshold: usize,
    /// Whether the badge is currently held.
    pub unlocked: bool,
    /// Likes still needed; zero once the threshold is met.
    pub remaining: usize,
}

/// Ordered, validated badge unlock table.
///
/// # Examples
/// ```
/// use dishswipe_core::BadgeTable;
///
/// let table = BadgeTable::default();
/// let unlocked = table.evaluate(7, &[]);
/// assert_eq!(unlocked, vec!["Taster ×3".to_owned(), "Foodie ×7".to_owned()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeTable {
    rules: Vec<BadgeRule>,
}

impl Default for BadgeTable {
    fn default() -> Self {
        Self {
            rules: vec![
                BadgeRule::new(3, "Taster ×3"),
                BadgeRule::new(7, "Foodie ×7"),
                BadgeRule::new(15, "Gourmand ×15"),
            ],
        }
    }
}

impl BadgeTable {
    /// Validate and build a table.
    ///
    /// Thresholds must be positive and strictly ascending, and badge
    /// identifiers non-blank and unique.
    pub fn new(rules: Vec<BadgeRule>) -> Result<Self, BadgeTableError> {
        let mut seen = BTreeSet::new();
        let mut previous = 0;
        for rule in &rules {
            if rule.badge.trim().is_empty() {
                return Err(BadgeTableError::BlankBadge);
            }
            if rule.threshold == 0 {
                return Err(BadgeTableError::ZeroThreshold {
                    badge: rule.badge.clone(),
                });
            }
            if rule.threshold <= previous {
                return Err(BadgeTableError::NotAscending {
                    badge: rule.badge.clone(),
                    threshold: rule.threshold,
                });
            }
            if !seen.insert(rule.badge.as_str()) {
                return Err(BadgeTableError::DuplicateBadge {
                    badge: rule.badge.clone(),
                });
            }
            previous = rule.threshold;
        }
        Ok(Self { rules })
    }

    /// Rules in ascending threshold order.
    pub fn rules(&self) -> &[BadgeRule] {
        &self.rules
    }

    /// Report whether `badge` is defined by this table.
    pub fn contains(&self, badge: &str) -> bool {
        self.rules.iter().any(|rule| rule.badge == badge)
    }

    /// Badges newly unlocked at `likes`, in threshold order.
    ///
    /// Badges already in `held` are never returned again.
    pub fn evaluate(&self, likes: usize, held: &[String]) -> Vec<String> {
        self.rules
            .iter()
            .take_while(|rule| rule.threshold <= likes)
            .filter(|rule| !held.contains(&rule.badge))
            .map(|rule| rule.badge.clone())
            .collect()
    }

    /// Per-badge progress for `likes` given the badges `held`.
    pub fn statuses(&self, likes: usize, held: &[String]) -> Vec<BadgeStatus> {
        self.rules
            .iter()
            .map(|rule| BadgeStatus {
                badge: rule.badge.clone(),
                threshold: rule.threshold,
                unlocked: held.contains(&rule.badge),
                remaining: rule.threshold.saturating_sub(likes),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn held(badges: &[&str]) -> Vec<String> {
        badges.iter().map(|badge| (*badge).to_owned()).collect()
    }

    #[rstest]
    #[case(2, &[])]
    #[case(3, &["Taster ×3"])]
    #[case(15, &["Taster ×3", "Foodie ×7", "Gourmand ×15"])]
    fn default_table_unlocks_by_count(#[case] likes: usize, #[case] expected: &[&str]) {
        let unlocked = BadgeTable::default().evaluate(likes, &[]);
        assert_eq!(unlocked, expected.to_vec());
    }

    #[rstest]
    fn held_badges_are_not_reissued() {
        let unlocked = BadgeTable::default().evaluate(8, &held(&["Taster ×3"]));
        assert_eq!(unlocked, vec!["Foodie ×7".to_owned()]);
    }

    #[rstest]
    #[case(vec![BadgeRule::new(0, "Zero")], BadgeTableError::ZeroThreshold { badge: "Zero".into() })]
    #[case(
        vec![BadgeRule::new(10, "Ten"), BadgeRule::new(10, "Also ten")],
        BadgeTableError::NotAscending { badge: "Also ten".into(), threshold: 10 }
    )]
    #[case(vec![BadgeRule::new(1, "  ")], BadgeTableError::BlankBadge)]
    #[case(
        vec![BadgeRule::new(1, "One"), BadgeRule::new(2, "One")],
        BadgeTableError::DuplicateBadge { badge: "One".into() }
    )]
    fn invalid_tables_are_rejected(#[case] rules: Vec<BadgeRule>, #[case] expected: BadgeTableError) {
        assert_eq!(BadgeTable::new(rules), Err(expected));
    }

    #[rstest]
    fn alternate_scale_is_configurable() {
        let table = BadgeTable::new(vec![
            BadgeRule::new(10, "Bronze"),
            BadgeRule::new(25, "Silver"),
            BadgeRule::new(50, "Gold"),
        ])
        .expect("valid table");
        assert_eq!(table.evaluate(30, &[]), vec!["Bronze", "Silver"]);
        assert!(table.contains("Gold"));
    }

    #[rstest]
    fn statuses_report_remaining_likes() {
        let statuses = BadgeTable::default().statuses(4, &held(&["Taster ×3"]));
        let summary: Vec<_> = statuses
            .iter()
            .map(|status| (status.badge.as_str(), status.unlocked, status.remaining))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Taster ×3", true, 0),
                ("Foodie ×7", false, 3),
                ("Gourmand ×15", false, 11),
            ]
        );
    }
}
