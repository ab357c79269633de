use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

use crate::domain::shared::errors::ModerationError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    /// Buckets the number of distinct matched terms.
    pub fn from_match_count(count: usize) -> Self {
        match count {
            0 => Severity::Low,
            1 | 2 => Severity::Medium,
            _ => Severity::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ModerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(ModerationError::InvalidSeverityInput(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ModerationAction {
    #[default]
    None,
    Warn,
    Censor,
    Hide,
    DeleteContent,
    SuspendUser,
}

impl ModerationAction {
    /// Actions that leave new content publicly visible.
    pub fn keeps_visible(&self) -> bool {
        matches!(
            self,
            ModerationAction::None | ModerationAction::Warn | ModerationAction::Censor
        )
    }

    /// Actions that count as a policy violation against the author.
    pub fn is_violation(&self) -> bool {
        matches!(
            self,
            ModerationAction::DeleteContent | ModerationAction::SuspendUser
        )
    }
}

/// Outcome of one policy evaluation. Consumed once, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ModerationVerdict {
    pub action: ModerationAction,
    pub severity: Severity,
    pub reason: String,
}

impl ModerationVerdict {
    pub fn new(action: ModerationAction, severity: Severity, reason: impl Into<String>) -> Self {
        Self {
            action,
            severity,
            reason: reason.into(),
        }
    }
}

/// Content analyzer output for one submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Default)]
#[ts(export)]
pub struct ContentAnalysis {
    pub has_violation: bool,
    pub matched_terms: BTreeSet<String>,
    pub severity: Severity,
    pub score: u32,
    /// Machine-readable heuristic names, e.g. `bad_words`, `spam`, `all_caps`
    pub flags: Vec<String>,
    pub reasons: Vec<String>,
    /// Body with prohibited terms masked, present only when terms matched
    pub censored_text: Option<String>,
}
