use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where users.json and per-user data files are stored
    pub data_dir: PathBuf,
    /// Server bind address
    pub bind_addr: String,
    /// Upper bound for the `limit` search parameter
    pub max_page_size: usize,
    /// External patent search configuration
    pub serpapi: SerpApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerpApiConfig {
    /// Search endpoint
    pub base_url: String,
    /// API key. When absent the sample provider is used instead.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Candidate pool fetched per search; ranking and pagination happen locally
    pub results_per_query: usize,
    /// Request timeout in seconds (capped at 60)
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            bind_addr: "127.0.0.1:10000".to_string(),
            max_page_size: 100,
            serpapi: SerpApiConfig::default(),
        }
    }
}

impl Default for SerpApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://serpapi.com/search.json".to_string(),
            api_key: None,
            results_per_query: 100,
            timeout_secs: 20,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("PATENT_SEARCH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(addr) = std::env::var("PATENT_SEARCH_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(val) = std::env::var("PATENT_SEARCH_MAX_PAGE_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.max_page_size = v.max(1);
            }
        }

        if let Ok(url) = std::env::var("SERPAPI_BASE_URL") {
            config.serpapi.base_url = url;
        }
        if let Ok(key) = std::env::var("SERPAPI_API_KEY") {
            if !key.trim().is_empty() {
                config.serpapi.api_key = Some(key);
            }
        }
        if let Ok(val) = std::env::var("SERPAPI_RESULTS_PER_QUERY") {
            if let Ok(v) = val.parse() {
                config.serpapi.results_per_query = v;
            }
        }
        if let Ok(val) = std::env::var("SERPAPI_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.serpapi.timeout_secs = v.min(60); // Cap at 60s
            }
        }

        config
    }
}
