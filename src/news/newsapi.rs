// src/news/newsapi.rs
//! NewsAPI v2 client (`/top-headlines`, `/everything`).

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::article::Article;
use crate::config::NewsApiConfig;
use crate::news::provider::{EverythingQuery, HeadlinesQuery, NewsPage, NewsProvider};

/// Response envelope; error payloads carry `status: "error"` plus code/message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    total_results: u64,
    #[serde(default)]
    articles: Vec<Article>,
}

pub struct NewsApiClient {
    http: reqwest::Client,
    cfg: NewsApiConfig,
}

impl NewsApiClient {
    pub fn new(cfg: NewsApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .user_agent(concat!("news-bias-service/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building news api http client")?;
        Ok(Self { http, cfg })
    }

    async fn fetch(
        &self,
        route: &'static str,
        params: Vec<(&'static str, String)>,
    ) -> Result<NewsPage> {
        counter!("news_upstream_requests_total", "route" => route).increment(1);
        let res = self.fetch_inner(route, params).await;
        if res.is_err() {
            counter!("news_upstream_errors_total", "route" => route).increment(1);
        }
        res
    }

    async fn fetch_inner(
        &self,
        route: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<NewsPage> {
        let key = self
            .cfg
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("news api key is not configured"))?;
        params.push(("apiKey", key.to_string()));

        let url = format!("{}/{}", self.cfg.base_url, route);
        let t0 = Instant::now();
        let resp = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("requesting {route}"))?;
        let status = resp.status();
        let body: Envelope = resp
            .json()
            .await
            .with_context(|| format!("decoding {route} response (http {status})"))?;
        histogram!("news_upstream_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

        if !status.is_success() || body.status != "ok" {
            bail!(
                "news api {route} failed (http {status}, code {}): {}",
                body.code.as_deref().unwrap_or("unknown"),
                body.message.as_deref().unwrap_or("no message")
            );
        }

        debug!(
            target: "news",
            route,
            total = body.total_results,
            n = body.articles.len(),
            "upstream ok"
        );
        Ok(NewsPage {
            total_results: body.total_results,
            articles: body.articles,
        })
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<NewsPage> {
        let mut params = vec![
            ("country", query.country.clone()),
            ("pageSize", query.page_size.to_string()),
        ];
        if let Some(c) = &query.category {
            params.push(("category", c.clone()));
        }
        self.fetch("top-headlines", params).await
    }

    async fn everything(&self, query: &EverythingQuery) -> Result<NewsPage> {
        let params = vec![
            ("q", query.q.clone()),
            ("language", "en".to_string()),
            ("sortBy", query.sort_by.as_str().to_string()),
            ("pageSize", query.page_size.to_string()),
        ];
        self.fetch("everything", params).await
    }

    fn name(&self) -> &'static str {
        "NewsAPI"
    }
}
