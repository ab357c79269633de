use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::moderation::verdict::{ContentAnalysis, ModerationAction, ModerationVerdict, Severity};
use crate::domain::report::entity::{ReportAssessment, ReportPriority};
use crate::domain::user::history::UserHistory;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PolicyRules {
    /// Accounts younger than this get a warning for a first violation.
    pub new_account_days: u32,
    /// Turns `warn` on text with matched terms into `censor`.
    pub censor_warnings: bool,
}

impl Default for PolicyRules {
    fn default() -> Self {
        Self {
            new_account_days: 30,
            censor_warnings: false,
        }
    }
}

/// Priority-ordered decision table mapping an analysis to one action.
#[derive(Debug, Clone, Default)]
pub struct PolicyEngine {
    rules: PolicyRules,
}

impl PolicyEngine {
    pub fn new(rules: PolicyRules) -> Self {
        Self { rules }
    }

    /// First matching rule wins. The order is part of the contract: a new
    /// account without prior violations is warned even for high-severity text.
    pub fn decide(&self, analysis: &ContentAnalysis, history: &UserHistory) -> ModerationVerdict {
        let previous = history.violations.previous_violations;

        let verdict = if !analysis.has_violation {
            ModerationVerdict::new(ModerationAction::None, Severity::Low, "Content approved")
        } else if previous == 0 && history.account_age_days < self.rules.new_account_days {
            ModerationVerdict::new(
                ModerationAction::Warn,
                Severity::Low,
                "First violation from a new user",
            )
        } else if analysis.severity == Severity::High || previous > 0 {
            ModerationVerdict::new(
                ModerationAction::DeleteContent,
                Severity::High,
                "Offensive content removed automatically",
            )
        } else {
            ModerationVerdict::new(
                ModerationAction::Warn,
                Severity::Medium,
                "Inappropriate language warning",
            )
        };

        let verdict = if verdict.action == ModerationAction::Warn
            && self.rules.censor_warnings
            && !analysis.matched_terms.is_empty()
        {
            ModerationVerdict {
                action: ModerationAction::Censor,
                ..verdict
            }
        } else {
            verdict
        };

        debug!(
            action = ?verdict.action,
            severity = verdict.severity.as_str(),
            previous_violations = previous,
            account_age_days = history.account_age_days,
            "Policy decision"
        );

        verdict
    }

    /// Out-of-band verdict for the human-escalation path.
    pub fn decide_on_reports(&self, assessment: &ReportAssessment) -> ModerationVerdict {
        match assessment.priority {
            ReportPriority::High => ModerationVerdict::new(
                ModerationAction::Hide,
                Severity::High,
                format!("Hidden pending review after {} reports", assessment.intensity),
            ),
            ReportPriority::Medium | ReportPriority::Low => {
                ModerationVerdict::new(ModerationAction::None, Severity::Low, "Below escalation threshold")
            }
        }
    }
}
