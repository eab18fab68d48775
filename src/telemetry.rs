//! Dev-gated logging helpers shared by the handlers.

use sha2::{Digest, Sha256};

/// True for debug builds or when `SHUTTLE_ENV` is local/development/dev.
pub fn is_dev_env() -> bool {
    cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        )
}

/// Verbose per-article logging: `BIAS_DEV_LOG=1` AND a dev environment.
pub fn dev_logging_enabled() -> bool {
    std::env::var("BIAS_DEV_LOG").ok().as_deref() == Some("1") && is_dev_env()
}

/// Short, stable sha256 prefix. Used to log article text without exposing it
/// and as the id of saved articles.
pub fn anon_hash(text: &str) -> String {
    Sha256::digest(text.as_bytes())[..6]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
