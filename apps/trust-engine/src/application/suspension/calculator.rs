use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::domain::user::history::ViolationHistory;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuspensionPolicy {
    /// Base days by ordinal violation number; the last entry covers every later ordinal.
    pub durations: Vec<u32>,
    /// Violations older than this many whole days halve the base duration.
    pub decay_after_days: i64,
}

impl Default for SuspensionPolicy {
    fn default() -> Self {
        Self {
            durations: vec![1, 3, 7, 30, 365],
            decay_after_days: 90,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct SuspensionDecision {
    pub days: u32,
    /// 1-based number of the violation being punished
    pub ordinal: u32,
    pub decayed: bool,
    pub reason_label: String,
}

impl SuspensionDecision {
    /// Clamped to the latest representable instant.
    pub fn expires_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_signed(Duration::days(i64::from(self.days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuspensionCalculator {
    policy: SuspensionPolicy,
}

impl SuspensionCalculator {
    pub fn new(policy: SuspensionPolicy) -> Self {
        Self { policy }
    }

    /// Suspension for the violation following `history`. Never shorter than one day.
    pub fn duration(&self, history: &ViolationHistory, now: DateTime<Utc>) -> SuspensionDecision {
        let ordinal = history.previous_violations.saturating_add(1);
        let index = usize::try_from(ordinal - 1).unwrap_or(usize::MAX);
        let base = self
            .policy
            .durations
            .get(index)
            .or_else(|| self.policy.durations.last())
            .copied()
            .unwrap_or(1);

        let decayed = history
            .days_since_last(now)
            .is_some_and(|days| days > self.policy.decay_after_days);
        let days = if decayed { base / 2 } else { base };

        SuspensionDecision {
            days: days.max(1),
            ordinal,
            decayed,
            reason_label: format!("Suspension for violation #{}", ordinal),
        }
    }
}
