//! # Article payloads
//! Articles as they arrive from the news provider or from API clients, and the
//! scored shape returned to clients.
//!
//! Text fields are lenient on input: absent, `null` and non-string values all
//! become `None`, so scoring never sees a malformed field. Fields we do not model
//! are kept in `extra` and echoed back untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::bias::ScoreResult;

/// Keys we attach on output; stripped from `extra` so they never appear twice.
const SCORE_KEYS: [&str; 4] = ["biasRating", "biasDescription", "category", "country"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "lenient_source")]
    pub source: ArticleSource,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url_to_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
    /// Provider fields we pass through as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    pub fn source_name(&self) -> &str {
        self.source.name.as_deref().unwrap_or_default()
    }

    /// Non-empty URL, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// An article with the score fields merged on top, as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: Article,
    pub bias_rating: i32,
    pub bias_description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ScoredArticle {
    pub fn new(mut article: Article, score: ScoreResult) -> Self {
        for key in SCORE_KEYS {
            article.extra.remove(key);
        }
        Self {
            article,
            bias_rating: score.bias_rating,
            bias_description: score.bias_description.to_string(),
            category: score.category.to_string(),
            country: None,
        }
    }

    /// Replace the computed category (routes that were asked for a specific one).
    pub fn with_category(mut self, category: Option<&str>) -> Self {
        if let Some(c) = category {
            self.category = c.to_string();
        }
        self
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = Some(country.to_string());
        self
    }
}

fn lenient_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn lenient_source<'de, D>(de: D) -> Result<ArticleSource, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        v @ Value::Object(_) => serde_json::from_value(v).unwrap_or_default(),
        _ => ArticleSource::default(),
    })
}
