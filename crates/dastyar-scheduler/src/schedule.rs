//! Schedule record — the single persisted scheduling entity.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The user's posting schedule. Created wholesale by the settings UI,
/// mutated in place by the trigger loop, persisted after every firing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Subject passed to content generation.
    pub topic: String,
    /// Time-of-day slots, `HH:MM` 24-hour. Order irrelevant.
    #[serde(default)]
    pub times: Vec<String>,
    /// Slot → epoch milliseconds of the last firing. Only slots present in
    /// `times` are ever written; stale entries for removed slots are unused.
    #[serde(default)]
    pub last_run: HashMap<String, i64>,
}

impl Schedule {
    pub fn new(topic: impl Into<String>, times: Vec<String>) -> Self {
        Self {
            topic: topic.into(),
            times,
            last_run: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_layout() {
        let mut schedule = Schedule::new("قهوه تخصصی", vec!["09:00".into(), "18:30".into()]);
        schedule.last_run.insert("09:00".into(), 1_760_000_000_000);

        let json = serde_json::to_value(&schedule).unwrap();
        assert_eq!(json["topic"], "قهوه تخصصی");
        assert_eq!(json["times"][1], "18:30");
        assert_eq!(json["lastRun"]["09:00"], 1_760_000_000_000_i64);
    }

    #[test]
    fn test_missing_fields_default() {
        let schedule: Schedule = serde_json::from_str(r#"{"topic":"t"}"#).unwrap();
        assert!(schedule.times.is_empty());
        assert!(schedule.last_run.is_empty());
    }
}
