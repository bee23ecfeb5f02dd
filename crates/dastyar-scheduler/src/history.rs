//! Generation history — append-only record of successful firings.
//! The core appends; the history UI owns reading and rendering.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One generated result, created once per successful firing, then immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    /// Creation time, epoch milliseconds.
    pub timestamp: i64,
    /// Capability tag ("scheduled-post" for trigger-loop firings).
    pub tool: String,
    pub prompt: PromptRecord,
    /// Generated output payload.
    pub result: String,
}

/// Structured record of the inputs used for one firing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRecord {
    pub topic: String,
    /// Marks the item as scheduler-originated (vs. a manual generation).
    pub scheduled: bool,
    /// The `HH:MM` slot that triggered it.
    pub time: String,
}

impl HistoryItem {
    /// Build the item for one scheduled firing.
    pub fn scheduled_post(topic: &str, slot: &str, result: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            tool: "scheduled-post".to_string(),
            prompt: PromptRecord {
                topic: topic.to_string(),
                scheduled: true,
                time: slot.to_string(),
            },
            result,
        }
    }
}

/// History collaborator. Append never fails observably to the caller.
pub trait HistorySink: Send + Sync {
    fn append(&self, item: HistoryItem);
}

/// JSON-lines history file (~/.dastyar/scheduler/history.jsonl).
/// I/O problems are logged and swallowed; a firing never fails on history.
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default history path.
    pub fn default_path() -> PathBuf {
        dastyar_core::DastyarConfig::home_dir()
            .join("scheduler")
            .join("history.jsonl")
    }
}

impl HistorySink for HistoryFile {
    fn append(&self, item: HistoryItem) {
        use std::io::Write;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let line = match serde_json::to_string(&item) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("⚠️ Failed to serialize history item {}: {e}", item.id);
                return;
            }
        };
        let result = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| writeln!(f, "{line}"));
        match result {
            Ok(()) => tracing::debug!("💾 History item {} appended", item.id),
            Err(e) => tracing::warn!("⚠️ Failed to append history to {}: {e}", self.path.display()),
        }
    }
}

/// In-memory sink, used by tests and embedded shells.
#[derive(Default)]
pub struct MemoryHistory {
    items: Mutex<Vec<HistoryItem>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> Vec<HistoryItem> {
        self.items.lock().expect("history lock").clone()
    }
}

impl HistorySink for MemoryHistory {
    fn append(&self, item: HistoryItem) {
        self.items.lock().expect("history lock").push(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduled_post_item() {
        let item = HistoryItem::scheduled_post("قهوه", "09:00", "متن پست".into());
        assert_eq!(item.tool, "scheduled-post");
        assert!(item.prompt.scheduled);
        assert_eq!(item.prompt.time, "09:00");
        assert!(!item.id.is_empty());
    }

    #[test]
    fn test_history_file_appends_lines() {
        let dir = std::env::temp_dir().join("dastyar-test-history");
        std::fs::remove_dir_all(&dir).ok();
        let file = HistoryFile::new(dir.join("history.jsonl"));

        file.append(HistoryItem::scheduled_post("a", "09:00", "one".into()));
        file.append(HistoryItem::scheduled_post("b", "10:00", "two".into()));

        let content = std::fs::read_to_string(dir.join("history.jsonl")).unwrap();
        let items: Vec<HistoryItem> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].prompt.topic, "b");
        std::fs::remove_dir_all(&dir).ok();
    }
}
