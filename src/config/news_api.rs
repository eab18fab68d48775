// src/config/news_api.rs
use tracing::{info, warn};

pub const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_NEWS_API_BASE_URL: &str = "NEWS_API_BASE_URL";
pub const ENV_NEWS_API_TIMEOUT_MS: &str = "NEWS_API_TIMEOUT_MS";

pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_NEWS_API_TIMEOUT_MS: u64 = 8_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsApiConfig {
    /// `None` leaves the client usable but every upstream call fails,
    /// which sends the routes down their fallback paths.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_NEWS_API_BASE_URL.to_string(),
            timeout_ms: DEFAULT_NEWS_API_TIMEOUT_MS,
        }
    }
}

impl NewsApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |k: &str| {
            lookup(k)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(ENV_NEWS_API_KEY);
        if api_key.is_none() {
            warn!("{ENV_NEWS_API_KEY} not set; upstream news calls will fail");
        }

        let base_url = get(ENV_NEWS_API_BASE_URL)
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_NEWS_API_BASE_URL.to_string());

        let timeout_ms = match get(ENV_NEWS_API_TIMEOUT_MS) {
            Some(raw) => raw.parse::<u64>().unwrap_or_else(|e| {
                warn!("Invalid {ENV_NEWS_API_TIMEOUT_MS} value `{raw}`: {e}");
                DEFAULT_NEWS_API_TIMEOUT_MS
            }),
            None => {
                info!(
                    default = DEFAULT_NEWS_API_TIMEOUT_MS,
                    "{ENV_NEWS_API_TIMEOUT_MS} not set, using default"
                );
                DEFAULT_NEWS_API_TIMEOUT_MS
            }
        };

        Self {
            api_key,
            base_url,
            timeout_ms,
        }
    }
}
