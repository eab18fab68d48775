// src/news/mod.rs
pub mod activity;
pub mod newsapi;
pub mod provider;

pub use newsapi::NewsApiClient;
pub use provider::{EverythingQuery, HeadlinesQuery, NewsPage, NewsProvider, SortBy};
