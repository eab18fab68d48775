// src/lib.rs
// Public library surface for the Shuttle binary and integration tests.

pub mod api;
pub mod article;
pub mod bias;
pub mod config;
pub mod error;
pub mod metrics;
pub mod news;
pub mod sources;
pub mod store;
pub mod telemetry;

// `crate_root::api::router` and `crate_root::router` both work.
pub use crate::api::{router, AppState};
pub use crate::article::{Article, ScoredArticle};
pub use crate::bias::{score_bias, ScoreResult};
