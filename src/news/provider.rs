// src/news/provider.rs
use anyhow::Result;

use crate::article::Article;

/// One page of upstream results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsPage {
    pub total_results: u64,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlinesQuery {
    pub country: String,
    pub category: Option<String>,
    pub page_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    PublishedAt,
    Relevancy,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::PublishedAt => "publishedAt",
            SortBy::Relevancy => "relevancy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EverythingQuery {
    pub q: String,
    pub sort_by: SortBy,
    pub page_size: u32,
}

/// Upstream source of raw articles. The HTTP layer scores whatever comes back.
#[async_trait::async_trait]
pub trait NewsProvider: Send + Sync {
    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<NewsPage>;
    async fn everything(&self, query: &EverythingQuery) -> Result<NewsPage>;
    fn name(&self) -> &'static str;
}
