//! Unified OpenAI-compatible generator.
//!
//! One struct that produces social posts through ANY chat-completions API.
//! Providers differ only in endpoint URL and API-key env var.

use async_trait::async_trait;
use dastyar_core::config::DastyarConfig;
use dastyar_core::error::{DastyarError, Result};
use dastyar_core::traits::{ContentGenerator, GeneratedPost};
use serde_json::{Value, json};

/// Instruction sent as the system message with every topic.
const SYSTEM_PROMPT: &str = "شما یک تولیدکننده محتوای شبکه‌های اجتماعی هستید. \
برای موضوع داده‌شده یک پست جذاب و کوتاه به فارسی بنویس، همراه با چند هشتگ مرتبط.";

/// A generator that works with any OpenAI-compatible API.
pub struct OpenAiCompatibleGenerator {
    /// Provider name (e.g., "gemini", "openai").
    name: String,
    api_key: String,
    /// Base URL (e.g., "https://api.openai.com/v1").
    base_url: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl OpenAiCompatibleGenerator {
    /// Create for a known provider name.
    ///
    /// Resolution order:
    /// - API key: `config.llm.api_key` > provider env var > empty
    /// - Base URL: `config.llm.endpoint` > provider default
    pub fn known(name: &str, config: &DastyarConfig) -> Self {
        let (default_url, env_key) = match name {
            "gemini" => (
                "https://generativelanguage.googleapis.com/v1beta/openai",
                "GEMINI_API_KEY",
            ),
            "openrouter" => ("https://openrouter.ai/api/v1", "OPENROUTER_API_KEY"),
            _ => ("https://api.openai.com/v1", "OPENAI_API_KEY"),
        };

        let api_key = if !config.llm.api_key.is_empty() {
            config.llm.api_key.clone()
        } else {
            std::env::var(env_key).unwrap_or_default()
        };

        let base_url = if !config.llm.endpoint.is_empty() {
            config.llm.endpoint.trim_end_matches('/').to_string()
        } else {
            default_url.to_string()
        };

        Self {
            name: name.to_string(),
            api_key,
            base_url,
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            client: reqwest::Client::new(),
        }
    }

    /// Create for a custom endpoint.
    pub fn custom(endpoint: &str, config: &DastyarConfig) -> Self {
        let api_key = if !config.llm.api_key.is_empty() {
            config.llm.api_key.clone()
        } else {
            std::env::var("CUSTOM_API_KEY").unwrap_or_default()
        };

        Self {
            name: "custom".to_string(),
            api_key,
            base_url: endpoint.trim_end_matches('/').to_string(),
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_body(&self, topic: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": topic },
            ],
            "temperature": self.temperature,
        })
    }
}

/// Pull `choices[0].message.content` out of a chat-completions response.
fn extract_content(body: &Value) -> Result<String> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            DastyarError::Generation(format!(
                "Response has no message content: {}",
                serde_json::to_string(body).unwrap_or_default()
            ))
        })
}

#[async_trait]
impl ContentGenerator for OpenAiCompatibleGenerator {
    async fn generate(&self, topic: &str) -> Result<GeneratedPost> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("🌐 {} generate for topic '{topic}'", self.name);

        let mut req = self.client.post(&url).json(&self.request_body(topic));
        if !self.api_key.is_empty() {
            req = req.bearer_auth(&self.api_key);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DastyarError::Generation(format!(
                "{} API error {status}: {body}",
                self.name
            )));
        }

        let body: Value = resp.json().await?;
        let content = extract_content(&body)?;
        Ok(GeneratedPost {
            content,
            model: self.model.clone(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_resolution() {
        let mut config = DastyarConfig::default();
        let g = OpenAiCompatibleGenerator::known("gemini", &config);
        assert!(g.base_url().contains("generativelanguage"));

        config.llm.endpoint = "http://localhost:8080/v1/".into();
        let g = OpenAiCompatibleGenerator::known("gemini", &config);
        assert_eq!(g.base_url(), "http://localhost:8080/v1");

        let g = OpenAiCompatibleGenerator::custom("http://box:11434/v1", &config);
        assert_eq!(g.name(), "custom");
        assert_eq!(g.base_url(), "http://box:11434/v1");
    }

    #[test]
    fn test_request_body_shape() {
        let config = DastyarConfig::default();
        let g = OpenAiCompatibleGenerator::known("openai", &config);
        let body = g.request_body("قهوه");
        assert_eq!(body["model"], "gemini-2.0-flash");
        assert_eq!(body["messages"][1]["content"], "قهوه");
        assert_eq!(body["messages"][0]["role"], "system");
    }

    #[test]
    fn test_extract_content() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "پست آماده" } }]
        });
        assert_eq!(extract_content(&body).unwrap(), "پست آماده");

        assert!(extract_content(&json!({ "error": "quota" })).is_err());
    }
}
