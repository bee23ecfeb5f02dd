//! User notifications — fire-and-forget delivery of "your post is ready".
//! No queue, no retry; a missed notification is never an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification to show the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Icon reference for the delivery surface.
    pub icon: String,
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    pub fn new(title: &str, body: &str, icon: &str) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            icon: icon.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Notification collaborator. Best-effort: failures are logged, never raised.
pub trait Notifier: Send + Sync {
    fn send(&self, notification: Notification);
}

/// Log-only notifier — the default when no webhook is configured.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, notification: Notification) {
        tracing::info!("📢 {}: {}", notification.title, notification.body);
    }
}

/// POSTs notifications as JSON to a configured webhook.
/// Delivery runs on a spawned task so a slow endpoint never delays a firing.
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

impl Notifier for WebhookNotifier {
    fn send(&self, notification: Notification) {
        let url = self.url.clone();
        let client = self.client.clone();
        tokio::spawn(async move {
            let resp = client
                .post(&url)
                .json(&serde_json::json!({
                    "title": notification.title,
                    "body": notification.body,
                    "icon": notification.icon,
                    "timestamp": notification.timestamp.to_rfc3339(),
                }))
                .timeout(std::time::Duration::from_secs(10))
                .send()
                .await;
            match resp {
                Ok(resp) if resp.status().is_success() => {
                    tracing::info!("✅ Notification sent: {}", notification.title);
                }
                Ok(resp) => {
                    tracing::warn!("⚠️ Notification webhook returned {}", resp.status());
                }
                Err(e) => {
                    tracing::warn!("⚠️ Notification webhook failed: {e}");
                }
            }
        });
    }
}
