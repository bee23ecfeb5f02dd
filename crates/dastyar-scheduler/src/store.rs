//! Schedule store — dumb persistence boundary for the one schedule record.
//! JSON file, human-readable. Exactly one trigger loop mutates it.

use std::path::{Path, PathBuf};

use dastyar_core::error::{DastyarError, Result};

use crate::schedule::Schedule;

/// File-backed schedule store.
pub struct ScheduleStore {
    path: PathBuf,
}

impl ScheduleStore {
    /// Create a store at the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default store path (~/.dastyar/scheduler/schedule.json).
    pub fn default_path() -> PathBuf {
        dastyar_core::DastyarConfig::home_dir()
            .join("scheduler")
            .join("schedule.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the schedule. Absent file is `None`; an unreadable or corrupt
    /// file is an error the caller treats as fatal to the current tick.
    pub fn load(&self) -> Result<Option<Schedule>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path).map_err(|e| {
            DastyarError::Persistence(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        let schedule = serde_json::from_str(&json).map_err(|e| {
            DastyarError::Persistence(format!("Failed to parse {}: {e}", self.path.display()))
        })?;
        Ok(Some(schedule))
    }

    /// Save the schedule, creating parent directories on demand.
    pub fn save(&self, schedule: &Schedule) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DastyarError::Persistence(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_string_pretty(schedule)
            .map_err(|e| DastyarError::Persistence(format!("Serialize error: {e}")))?;
        std::fs::write(&self.path, &json).map_err(|e| {
            DastyarError::Persistence(format!("Failed to write {}: {e}", self.path.display()))
        })?;
        tracing::debug!("💾 Saved schedule to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> (PathBuf, ScheduleStore) {
        let dir = std::env::temp_dir().join(format!("dastyar-test-{name}"));
        std::fs::remove_dir_all(&dir).ok();
        let store = ScheduleStore::new(dir.join("schedule.json"));
        (dir, store)
    }

    #[test]
    fn test_absent_is_none() {
        let (dir, store) = temp_store("store-absent");
        assert!(store.load().unwrap().is_none());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_load_round_trip() {
        let (dir, store) = temp_store("store-roundtrip");
        let mut schedule = Schedule::new("topic", vec!["09:00".into()]);
        schedule.last_run.insert("09:00".into(), 42);
        store.save(&schedule).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.topic, "topic");
        assert_eq!(loaded.last_run["09:00"], 42);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let (dir, store) = temp_store("store-corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_err());
        std::fs::remove_dir_all(&dir).ok();
    }
}
