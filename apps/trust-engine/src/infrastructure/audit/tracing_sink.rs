use async_trait::async_trait;
use tracing::info;

use super::traits::AuditSink;
use crate::domain::content::events::ContentEvent;
use crate::domain::moderation::log::ModerationLogEntry;

/// Writes audit records to the `audit` tracing target as JSON.
#[derive(Debug, Clone, Default)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record_log(&self, entry: &ModerationLogEntry) -> anyhow::Result<()> {
        let payload = serde_json::to_string(entry)?;
        info!(
            target: "audit",
            moderator_id = %entry.moderator.id,
            action = ?entry.action,
            target_id = %entry.target.id,
            entry = %payload,
            "Moderation action recorded"
        );
        Ok(())
    }

    async fn record_event(&self, event: &ContentEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(event)?;
        info!(target: "audit", event = %payload, "Content event");
        Ok(())
    }
}
