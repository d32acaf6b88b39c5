use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::provider::{PatentProvider, SampleProvider, SerpApiProvider};
use crate::store::Store;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<Store>,
    pub provider: Arc<dyn PatentProvider>,
}

impl AppState {
    /// Build state from config, picking SerpAPI when a key is configured and
    /// the offline sample provider otherwise.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::open(&config.data_dir)?;

        let provider: Arc<dyn PatentProvider> = if config.serpapi.api_key.is_some() {
            let http_client = reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .timeout(Duration::from_secs(config.serpapi.timeout_secs))
                .build()?;
            Arc::new(SerpApiProvider::new(http_client, &config.serpapi)?)
        } else {
            tracing::warn!("SERPAPI_API_KEY not set, serving sample search results");
            Arc::new(SampleProvider::new())
        };

        Ok(Self::with_provider(config, store, provider))
    }

    pub fn with_provider(config: Config, store: Store, provider: Arc<dyn PatentProvider>) -> Self {
        Self {
            config,
            store: Arc::new(store),
            provider,
        }
    }
}
