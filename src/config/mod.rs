// src/config/mod.rs
//! Runtime configuration read from the environment (`.env` is loaded by the binary).

pub mod news_api;

pub use news_api::NewsApiConfig;
