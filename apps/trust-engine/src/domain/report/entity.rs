use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportReason {
    Spam,
    Harassment,
    HateSpeech,
    Inappropriate,
    Violence,
    Misinformation,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TargetType {
    Thread,
    Comment,
    Review,
    User,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq, Hash)]
#[ts(export)]
pub struct ReportTarget {
    #[serde(rename = "type")]
    pub target_type: TargetType,
    pub id: Uuid,
}

/// A community report against a target, as stored in the report history.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ContentReport {
    pub reporter_id: Uuid,
    pub target: ReportTarget,
    pub reason: ReportReason,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ContentReport {
    /// Reports aggregate per `(target type, target id, reason)` bucket.
    pub fn same_bucket(&self, other: &ContentReport) -> bool {
        self.target == other.target && self.reason == other.reason
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ReportAssessment {
    pub intensity: u32,
    pub priority: ReportPriority,
    pub requires_immediate_action: bool,
    pub similar_reports_count: u32,
}
