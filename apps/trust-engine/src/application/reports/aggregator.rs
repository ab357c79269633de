use serde::{Deserialize, Serialize};

use crate::domain::report::entity::{ContentReport, ReportAssessment, ReportPriority};

/// Intensity levels at which a report bucket escalates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AggregatorThresholds {
    pub medium: u32,
    pub high: u32,
    pub immediate_action: u32,
}

impl Default for AggregatorThresholds {
    fn default() -> Self {
        Self {
            medium: 3,
            high: 5,
            immediate_action: 3,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportAggregator {
    thresholds: AggregatorThresholds,
}

impl ReportAggregator {
    pub fn new(thresholds: AggregatorThresholds) -> Self {
        Self { thresholds }
    }

    /// Folds `new_report` into its `(target type, target id, reason)` bucket.
    ///
    /// `existing` may hold reports for other targets or reasons; they are ignored.
    pub fn evaluate(&self, new_report: &ContentReport, existing: &[ContentReport]) -> ReportAssessment {
        let similar = existing
            .iter()
            .filter(|report| report.same_bucket(new_report))
            .count() as u32;
        let intensity = similar.saturating_add(1);

        let priority = if intensity >= self.thresholds.high {
            ReportPriority::High
        } else if intensity >= self.thresholds.medium {
            ReportPriority::Medium
        } else {
            ReportPriority::Low
        };

        ReportAssessment {
            intensity,
            priority,
            requires_immediate_action: intensity >= self.thresholds.immediate_action,
            similar_reports_count: similar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::entity::{ReportReason, ReportTarget, TargetType};
    use chrono::Utc;
    use uuid::Uuid;

    fn report(target: ReportTarget, reason: ReportReason) -> ContentReport {
        ContentReport {
            reporter_id: Uuid::now_v7(),
            target,
            reason,
            description: None,
            created_at: Utc::now(),
        }
    }

    fn thread() -> ReportTarget {
        ReportTarget {
            target_type: TargetType::Thread,
            id: Uuid::now_v7(),
        }
    }

    #[test]
    fn first_report_is_low_priority() {
        let assessment = ReportAggregator::default().evaluate(&report(thread(), ReportReason::Spam), &[]);
        assert_eq!(assessment.intensity, 1);
        assert_eq!(assessment.priority, ReportPriority::Low);
        assert!(!assessment.requires_immediate_action);
    }

    #[test]
    fn third_report_requires_immediate_action() {
        let target = thread();
        let existing = vec![
            report(target, ReportReason::Spam),
            report(target, ReportReason::Spam),
        ];
        let assessment =
            ReportAggregator::default().evaluate(&report(target, ReportReason::Spam), &existing);
        assert_eq!(assessment.intensity, 3);
        assert_eq!(assessment.similar_reports_count, 2);
        assert_eq!(assessment.priority, ReportPriority::Medium);
        assert!(assessment.requires_immediate_action);
    }

    #[test]
    fn fifth_report_is_high_priority() {
        let target = thread();
        let existing: Vec<_> = (0..4).map(|_| report(target, ReportReason::Spam)).collect();
        let assessment =
            ReportAggregator::default().evaluate(&report(target, ReportReason::Spam), &existing);
        assert_eq!(assessment.intensity, 5);
        assert_eq!(assessment.priority, ReportPriority::High);
    }

    #[test]
    fn reasons_and_targets_are_separate_buckets() {
        let target = thread();
        let mut existing: Vec<_> = (0..4).map(|_| report(target, ReportReason::Spam)).collect();
        existing.push(report(thread(), ReportReason::Harassment));
        let assessment =
            ReportAggregator::default().evaluate(&report(target, ReportReason::Harassment), &existing);
        assert_eq!(assessment.intensity, 1);
        assert_eq!(assessment.priority, ReportPriority::Low);
    }

    #[test]
    fn custom_thresholds_apply() {
        let aggregator = ReportAggregator::new(AggregatorThresholds {
            medium: 2,
            high: 3,
            immediate_action: 2,
        });
        let target = thread();
        let existing = vec![report(target, ReportReason::Other)];
        let assessment = aggregator.evaluate(&report(target, ReportReason::Other), &existing);
        assert_eq!(assessment.priority, ReportPriority::Medium);
        assert!(assessment.requires_immediate_action);
    }
}
