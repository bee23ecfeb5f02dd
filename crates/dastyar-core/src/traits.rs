//! Seams between the core and its collaborators.

use async_trait::async_trait;

use crate::error::Result;

/// Output of one content-generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPost {
    /// The generated text payload.
    pub content: String,
    /// Model that produced it (informational).
    pub model: String,
}

/// The external content-generation collaborator.
///
/// Asynchronous and fallible; the scheduler treats it as opaque. The
/// production implementation lives in `dastyar-providers`.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate a post for the given topic.
    async fn generate(&self, topic: &str) -> Result<GeneratedPost>;

    /// Provider name, for logging.
    fn name(&self) -> &str;
}
