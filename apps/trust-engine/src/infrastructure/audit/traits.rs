use async_trait::async_trait;

use crate::domain::content::events::ContentEvent;
use crate::domain::moderation::log::ModerationLogEntry;

/// Destination for moderation log entries and content events.
///
/// The engine never reads back from a sink; persistence is up to the host.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record_log(&self, entry: &ModerationLogEntry) -> anyhow::Result<()>;

    async fn record_event(&self, event: &ContentEvent) -> anyhow::Result<()>;
}
