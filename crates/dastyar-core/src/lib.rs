//! # Dastyar Core
//!
//! Shared foundation for the Dastyar assistant apps: configuration,
//! the error taxonomy, and the content-generation trait that the
//! scheduler consumes and the provider crate implements.

pub mod config;
pub mod error;
pub mod traits;

pub use config::DastyarConfig;
pub use error::{DastyarError, Result};
pub use traits::{ContentGenerator, GeneratedPost};
