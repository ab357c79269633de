use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Append-only violation record for one user.
///
/// Nothing is ever removed; old violations lose weight through suspension decay.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[serde(default)]
#[ts(export)]
pub struct ViolationHistory {
    pub previous_violations: u32,
    pub last_violation_at: Option<DateTime<Utc>>,
}

impl ViolationHistory {
    /// Returns the history with one more violation appended at `at`.
    pub fn recorded(&self, at: DateTime<Utc>) -> Self {
        let last_violation_at = match self.last_violation_at {
            Some(previous) if previous > at => Some(previous),
            _ => Some(at),
        };

        Self {
            previous_violations: self.previous_violations.saturating_add(1),
            last_violation_at,
        }
    }

    pub fn has_violations(&self) -> bool {
        self.previous_violations > 0
    }

    /// Whole days elapsed since the most recent violation, if any.
    pub fn days_since_last(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_violation_at
            .map(|last| (now - last).num_days())
    }
}

/// Snapshot of the author consulted by the policy engine.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[serde(default)]
#[ts(export)]
pub struct UserHistory {
    pub violations: ViolationHistory,
    pub account_age_days: u32,
}

/// Author signals that raise the analyzer score.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[serde(default)]
#[ts(export)]
pub struct AuthorProfile {
    pub reported_comments: u32,
    pub account_age_days: u32,
}

/// Author track record consulted when picking content to feature.
#[derive(Debug, Clone, Serialize, Deserialize, TS, Default, PartialEq)]
#[serde(default)]
#[ts(export)]
pub struct AuthorStanding {
    pub total_comments: u32,
    /// Mean rating of the author's past reviews
    pub average_rating: f64,
}
