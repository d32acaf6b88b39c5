//! Patent search providers.
//!
//! A `PatentProvider` turns a free-text query into a batch of reshaped
//! `PatentRecord`s. The API layer does not care where records come from; it
//! only scores, ranks and paginates what the provider returns.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{PatentRecord, ProviderInfo};

pub mod sample;
pub mod serpapi;

pub use sample::SampleProvider;
pub use serpapi::SerpApiProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request never completed (connect failure, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Response body was not in the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Records from one provider call plus whatever metadata the provider reports.
#[derive(Debug, Clone, Default)]
pub struct ProviderBatch {
    pub records: Vec<PatentRecord>,
    pub info: Option<ProviderInfo>,
    /// Human-readable note for the client (e.g. sample data in use)
    pub message: Option<String>,
}

#[async_trait]
pub trait PatentProvider: Send + Sync {
    /// Search for patents matching `query`, returning at most `limit` records.
    async fn search(&self, query: &str, limit: usize) -> ProviderResult<ProviderBatch>;

    /// Short identifier reported to clients as the result source.
    fn name(&self) -> &str;
}
