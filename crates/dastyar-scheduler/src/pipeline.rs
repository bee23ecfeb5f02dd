//! Execution pipeline — one firing, end to end.
//!
//! Generate, append history, notify. Failures are swallowed at the firing
//! granularity: a failed generation writes nothing, sends nothing, and is
//! not retried the same day (the trigger loop already recorded `last_run`
//! before calling in — at-most-once-per-day by design).

use std::sync::Arc;

use dastyar_core::traits::ContentGenerator;

use crate::history::{HistoryItem, HistorySink};
use crate::notify::{Notification, Notifier};

/// Orchestrates one firing for a (topic, slot) pair.
pub struct ExecutionPipeline {
    generator: Arc<dyn ContentGenerator>,
    history: Arc<dyn HistorySink>,
    notifier: Arc<dyn Notifier>,
    /// Icon reference forwarded with every notification.
    icon: String,
}

impl ExecutionPipeline {
    pub fn new(
        generator: Arc<dyn ContentGenerator>,
        history: Arc<dyn HistorySink>,
        notifier: Arc<dyn Notifier>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            generator,
            history,
            notifier,
            icon: icon.into(),
        }
    }

    /// Perform one firing. Never returns an error: the outcome is a history
    /// item plus a notification, or a warning in the log.
    pub async fn fire(&self, topic: &str, slot: &str) {
        tracing::info!("🔔 Slot {slot} fired, generating post for '{topic}'");

        match self.generator.generate(topic).await {
            Ok(post) => {
                let item = HistoryItem::scheduled_post(topic, slot, post.content);
                tracing::info!(
                    "✅ Post generated for '{topic}' ({} via {})",
                    item.id,
                    self.generator.name()
                );
                self.history.append(item);
                self.notifier.send(Notification::new(
                    "پست جدید آماده شد",
                    &format!("پست زمان‌بندی‌شده درباره «{topic}» تولید شد."),
                    &self.icon,
                ));
            }
            Err(e) => {
                // Deliberately no same-day retry: the slot is used up.
                tracing::warn!("⚠️ Generation failed for slot {slot} ('{topic}'): {e}");
            }
        }
    }
}
