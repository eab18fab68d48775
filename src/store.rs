//! In-memory saved-article store, keyed by URL.
//!
//! One record per URL; saving a URL twice is rejected. Ids are a short hash of
//! the URL so they stay stable across restarts and clients.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tracing::warn;

use crate::article::ScoredArticle;
use crate::telemetry::anon_hash;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedArticle {
    pub id: String,
    #[serde(flatten)]
    pub article: ScoredArticle,
    pub saved_at: DateTime<Utc>,
}

impl SavedArticle {
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.article
            .article
            .published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    MissingUrl,
    AlreadySaved,
    Full,
}

pub fn article_id(url: &str) -> String {
    anon_hash(url.trim())
}

#[derive(Debug)]
pub struct ArticleStore {
    inner: Mutex<Vec<SavedArticle>>,
    cap: usize,
}

impl Default for ArticleStore {
    fn default() -> Self {
        Self::with_capacity(10_000)
    }
}

impl ArticleStore {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(1_000))),
            cap: cap.max(1),
        }
    }

    /// Insert a scored article. Saves past capacity are rejected; existing
    /// records are never dropped.
    pub fn save(&self, article: ScoredArticle) -> Result<SavedArticle, SaveError> {
        let url = article.article.url().ok_or(SaveError::MissingUrl)?;
        let id = article_id(url);

        let mut v = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if v.iter().any(|s| s.id == id) {
            return Err(SaveError::AlreadySaved);
        }
        if v.len() >= self.cap {
            warn!(target: "news", cap = self.cap, "saved-article store full, rejecting save");
            return Err(SaveError::Full);
        }

        let saved = SavedArticle {
            id,
            article,
            saved_at: Utc::now(),
        };
        v.push(saved.clone());
        Ok(saved)
    }

    /// All saved articles in the order they were saved.
    pub fn list(&self) -> Vec<SavedArticle> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn by_category(&self, category: &str) -> Vec<SavedArticle> {
        let wanted = category.trim().to_lowercase();
        self.list()
            .into_iter()
            .filter(|s| s.article.category.to_lowercase() == wanted)
            .collect()
    }

    /// Articles published within `[start, end]` (either bound optional),
    /// newest first. Articles without a parsable `publishedAt` only appear
    /// when no bound is given.
    pub fn by_published_range(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Vec<SavedArticle> {
        let mut out: Vec<SavedArticle> = self
            .list()
            .into_iter()
            .filter(|s| {
                if start.is_none() && end.is_none() {
                    return true;
                }
                let Some(p) = s.published_at() else {
                    return false;
                };
                start.map_or(true, |st| p >= st) && end.map_or(true, |en| p <= en)
            })
            .collect();
        out.sort_by_key(|s| std::cmp::Reverse(s.published_at()));
        out
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut v = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let before = v.len();
        v.retain(|s| s.id != id);
        v.len() != before
    }
}

/// Parse a date filter: RFC 3339, or a bare `YYYY-MM-DD` which means the start
/// of that day (`end_of_day = false`) or its last second (`end_of_day = true`).
pub fn parse_date_bound(raw: &str, end_of_day: bool) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = if end_of_day {
        NaiveTime::from_hms_opt(23, 59, 59)?
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)?
    };
    Some(day.and_time(time).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;
    use crate::bias::score_bias;

    fn scored(url: &str, title: &str, published_at: Option<&str>) -> ScoredArticle {
        let a = Article {
            url: Some(url.into()),
            title: Some(title.into()),
            published_at: published_at.map(str::to_string),
            ..Default::default()
        };
        let s = score_bias(&a);
        ScoredArticle::new(a, s)
    }

    #[test]
    fn rejects_duplicate_url_and_missing_url() {
        let store = ArticleStore::default();
        assert!(store.save(scored("https://x/1", "a", None)).is_ok());
        assert_eq!(
            store.save(scored("https://x/1", "b", None)).unwrap_err(),
            SaveError::AlreadySaved
        );
        assert_eq!(
            store.save(scored("  ", "c", None)).unwrap_err(),
            SaveError::MissingUrl
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn category_filter_and_remove() {
        let store = ArticleStore::default();
        let s = store
            .save(scored("https://x/1", "Senate passes budget", None))
            .unwrap();
        store
            .save(scored("https://x/2", "NBA finals tonight", None))
            .unwrap();
        assert_eq!(store.by_category("Politics").len(), 1);
        assert_eq!(store.by_category("sports").len(), 1);
        assert!(store.remove(&s.id));
        assert!(!store.remove(&s.id));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn date_range_is_inclusive_and_newest_first() {
        let store = ArticleStore::default();
        store
            .save(scored("https://x/1", "a", Some("2024-03-01T10:00:00Z")))
            .unwrap();
        store
            .save(scored("https://x/2", "b", Some("2024-03-05T10:00:00Z")))
            .unwrap();
        store.save(scored("https://x/3", "c", None)).unwrap();

        let start = parse_date_bound("2024-03-01", false);
        let end = parse_date_bound("2024-03-05", true);
        let hits = store.by_published_range(start, end);
        let titles: Vec<&str> = hits.iter().map(|s| s.article.article.title()).collect();
        assert_eq!(titles, vec!["b", "a"]);

        assert_eq!(store.by_published_range(None, None).len(), 3);
        assert_eq!(store.by_published_range(end, None).len(), 0);
    }

    #[test]
    fn full_store_rejects_and_keeps_existing() {
        let store = ArticleStore::with_capacity(2);
        for i in 0..2 {
            store
                .save(scored(&format!("https://x/{i}"), "t", None))
                .unwrap();
        }
        assert_eq!(
            store.save(scored("https://x/2", "t", None)).unwrap_err(),
            SaveError::Full
        );
        // A duplicate is still reported as such, not as "full".
        assert_eq!(
            store.save(scored("https://x/0", "t", None)).unwrap_err(),
            SaveError::AlreadySaved
        );
        let ids: Vec<String> = store.list().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![article_id("https://x/0"), article_id("https://x/1")]);

        // Deleting frees a slot.
        assert!(store.remove(&article_id("https://x/0")));
        assert!(store.save(scored("https://x/2", "t", None)).is_ok());
    }

    #[test]
    fn date_bounds_parse() {
        assert!(parse_date_bound("2024-01-02T03:04:05+02:00", false).is_some());
        assert!(parse_date_bound("not a date", false).is_none());
        let eod = parse_date_bound("2024-01-02", true).unwrap();
        assert_eq!(eod.to_rfc3339(), "2024-01-02T23:59:59+00:00");
    }
}
