//! Card generation provider seam.
//!
//! The orchestrator talks to the generative text source through this
//! trait so tests can substitute a stub and alternative backends can
//! be added without touching the pipeline.

use async_trait::async_trait;
use thiserror::Error;

use super::CardBatch;

/// Errors from the generation provider. All variants are fatal for the
/// current request; there is no retry at this layer.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// A black-box batch producer: takes a fully rendered prompt and
/// returns a parsed card batch.
#[async_trait]
pub trait CardProvider: Send + Sync {
    /// Issue one batch request. A short or empty batch is a valid
    /// outcome; unparseable output is an error.
    async fn generate_batch(&self, prompt: &str) -> Result<CardBatch>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
