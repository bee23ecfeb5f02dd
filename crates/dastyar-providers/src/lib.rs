//! # Dastyar Providers
//!
//! Production implementations of the `ContentGenerator` seam. All hosted
//! APIs Dastyar talks to (Gemini, OpenAI, OpenRouter, plus custom
//! endpoints) speak the OpenAI chat-completions dialect, so a single
//! `OpenAiCompatibleGenerator` covers them; they differ only in endpoint
//! URL and API-key environment variable.

pub mod openai_compatible;

use dastyar_core::config::DastyarConfig;
use dastyar_core::error::{DastyarError, Result};
use dastyar_core::traits::ContentGenerator;

use openai_compatible::OpenAiCompatibleGenerator;

/// Create a generator from configuration.
pub fn create_generator(config: &DastyarConfig) -> Result<Box<dyn ContentGenerator>> {
    let provider = config.llm.provider.as_str();

    // Custom endpoint: "custom:https://my-server.com/v1"
    if let Some(endpoint) = provider.strip_prefix("custom:") {
        return Ok(Box::new(OpenAiCompatibleGenerator::custom(
            endpoint, config,
        )));
    }

    match provider {
        "gemini" | "openai" | "openrouter" => Ok(Box::new(
            OpenAiCompatibleGenerator::known(provider, config),
        )),
        other => Err(DastyarError::Config(format!(
            "Unknown provider '{other}' (expected gemini, openai, openrouter, or custom:<url>)"
        ))),
    }
}

/// List all available provider names.
pub fn available_providers() -> Vec<&'static str> {
    vec!["gemini", "openai", "openrouter", "custom"]
}
