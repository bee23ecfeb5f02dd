//! Dastyar configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{DastyarError, Result};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DastyarConfig {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

impl DastyarConfig {
    /// Load config from the default path (~/.dastyar/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DastyarError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| DastyarError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| DastyarError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the Dastyar home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".dastyar")
    }
}

/// Trigger-loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Seconds between trigger-loop ticks.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
    /// Schedule record path ("" = ~/.dastyar/scheduler/schedule.json).
    #[serde(default)]
    pub schedule_path: String,
    /// History log path ("" = ~/.dastyar/scheduler/history.jsonl).
    #[serde(default)]
    pub history_path: String,
}

fn default_tick_secs() -> u64 {
    60
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_secs: default_tick_secs(),
            schedule_path: String::new(),
            history_path: String::new(),
        }
    }
}

/// Generation provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    /// API key (falls back to provider env vars when empty).
    #[serde(default)]
    pub api_key: String,
    /// Endpoint override ("" = provider default).
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_provider() -> String {
    "gemini".into()
}
fn default_model() -> String {
    "gemini-2.0-flash".into()
}
fn default_temperature() -> f32 {
    0.7
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: String::new(),
            endpoint: String::new(),
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

/// Notification delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Outbound webhook URL ("" = log-only notifications).
    #[serde(default)]
    pub webhook_url: String,
    /// Icon reference attached to scheduler notifications.
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    "/icon.svg".into()
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            icon: default_icon(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DastyarConfig::default();
        assert_eq!(config.scheduler.tick_secs, 60);
        assert_eq!(config.llm.provider, "gemini");
        assert!(config.notify.webhook_url.is_empty());
    }

    #[test]
    fn test_partial_toml() {
        let config: DastyarConfig = toml::from_str(
            r#"
            [scheduler]
            tick_secs = 5

            [llm]
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();
        assert_eq!(config.scheduler.tick_secs, 5);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        // Untouched sections keep their defaults
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.notify.icon, "/icon.svg");
    }
}
