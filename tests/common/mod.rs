// tests/common/mod.rs
//
// Shared helpers: an in-memory NewsProvider and a oneshot request helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use axum::{
    body::{self, Body},
    Router,
};
use http::{Request, StatusCode};
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use news_bias_service::api::{self, AppState};
use news_bias_service::article::{Article, ArticleSource};
use news_bias_service::bias::BiasLexicon;
use news_bias_service::news::{EverythingQuery, HeadlinesQuery, NewsPage, NewsProvider};
use news_bias_service::sources::SourceProfiles;

const BODY_LIMIT: usize = 1024 * 1024;

/// Canned provider. `page = None` makes every call fail like an unreachable API.
#[derive(Default)]
pub struct FakeNews {
    pub page: Option<NewsPage>,
    pub headlines: Mutex<Vec<HeadlinesQuery>>,
    pub searches: Mutex<Vec<EverythingQuery>>,
}

impl FakeNews {
    pub fn ok(page: NewsPage) -> Arc<Self> {
        Arc::new(Self {
            page: Some(page),
            ..Default::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn respond(&self) -> Result<NewsPage> {
        match &self.page {
            Some(p) => Ok(p.clone()),
            None => bail!("upstream unavailable"),
        }
    }
}

#[async_trait]
impl NewsProvider for FakeNews {
    async fn top_headlines(&self, query: &HeadlinesQuery) -> Result<NewsPage> {
        self.headlines.lock().unwrap().push(query.clone());
        self.respond()
    }

    async fn everything(&self, query: &EverythingQuery) -> Result<NewsPage> {
        self.searches.lock().unwrap().push(query.clone());
        self.respond()
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub fn article(source: &str, title: &str, description: &str, url: &str) -> Article {
    Article {
        source: ArticleSource {
            id: None,
            name: Some(source.to_string()),
        },
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        url: Some(url.to_string()),
        ..Default::default()
    }
}

pub fn page(total_results: u64, articles: Vec<Article>) -> NewsPage {
    NewsPage {
        total_results,
        articles,
    }
}

pub fn app_with(news: Arc<FakeNews>) -> Router {
    let state = AppState::new(news, BiasLexicon::default_seed(), SourceProfiles::default_seed());
    api::router(state)
}

/// Fire one request at the router and return status + body.
/// Non-JSON bodies come back as a JSON string.
pub async fn send(app: Router, method: &str, uri: &str, body: Option<Json>) -> (StatusCode, Json) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .oneshot(req.body(body).expect("build request"))
        .await
        .expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Json::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, v)
}
