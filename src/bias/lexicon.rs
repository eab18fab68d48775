//! # Bias Lexicon
//!
//! The fixed tables behind the scorer: outlet → base rating, the liberal- and
//! conservative-coded keyword sets, and the ordered category keyword table.
//!
//! - `default_seed()` is the built-in table and what the service runs with when
//!   no config file is present.
//! - `config/bias_lexicon.toml` (or `$BIAS_LEXICON_PATH`) may replace it; a
//!   missing or malformed file falls back to the seed.
//! - `LexiconHandle` shares one lexicon across request handlers and can be
//!   hot-reloaded in dev/local.
//!
//! TOML shape:
//! ```toml
//! [sources]
//! "fox news" = 7
//!
//! [keywords]
//! liberal = ["progressive"]
//! conservative = ["conservative"]
//!
//! [[categories]]
//! category = "politics"
//! keywords = ["election"]
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

use super::scale::clamp_rating;
use super::Category;

pub const DEFAULT_BIAS_LEXICON_PATH: &str = "config/bias_lexicon.toml";
pub const ENV_BIAS_LEXICON_PATH: &str = "BIAS_LEXICON_PATH";
pub const ENV_BIAS_LEXICON_HOT_RELOAD: &str = "BIAS_LEXICON_HOT_RELOAD";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KeywordSets {
    #[serde(default)]
    pub liberal: Vec<String>,
    #[serde(default)]
    pub conservative: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryKeywords {
    pub category: Category,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BiasLexicon {
    /// Lower-cased outlet name → base rating in [-10, 10].
    #[serde(default)]
    pub sources: HashMap<String, i32>,
    #[serde(default)]
    pub keywords: KeywordSets,
    /// Scanned in order; the first category with any hit wins.
    #[serde(default)]
    pub categories: Vec<CategoryKeywords>,
}

impl BiasLexicon {
    /// Base rating for an outlet: exact match on the lower-cased name, 0 if unknown.
    pub fn source_rating(&self, source_name: &str) -> i32 {
        self.sources
            .get(&source_name.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let raw: BiasLexicon = toml::from_str(toml_str).context("parsing bias lexicon toml")?;
        Ok(raw.normalized())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading bias lexicon from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load from `path`, falling back to `default_seed()` on any error.
    pub fn load_or_seed<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!(target: "bias", path = %path.display(), "no lexicon file, using built-in seed");
            return Self::default_seed();
        }
        match Self::load_from_file(path) {
            Ok(lex) => {
                info!(
                    target: "bias",
                    path = %path.display(),
                    sources = lex.sources.len(),
                    categories = lex.categories.len(),
                    "bias lexicon loaded"
                );
                lex
            }
            Err(e) => {
                warn!(target: "bias", error = ?e, "invalid bias lexicon, using built-in seed");
                Self::default_seed()
            }
        }
    }

    /// Lower-case every key and keyword, clamp ratings, drop empty keywords
    /// (an empty needle would match every text).
    fn normalized(self) -> Self {
        fn clean(words: Vec<String>) -> Vec<String> {
            words
                .into_iter()
                .map(|w| w.to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        }

        Self {
            sources: self
                .sources
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), clamp_rating(v)))
                .collect(),
            keywords: KeywordSets {
                liberal: clean(self.keywords.liberal),
                conservative: clean(self.keywords.conservative),
            },
            categories: self
                .categories
                .into_iter()
                .map(|c| CategoryKeywords {
                    category: c.category,
                    keywords: clean(c.keywords),
                })
                .collect(),
        }
    }

    /// Built-in tables.
    pub fn default_seed() -> Self {
        let sources = [
            ("fox news", 7),
            ("breitbart", 9),
            ("cnn", -5),
            ("msnbc", -7),
            ("bbc", 0),
            ("reuters", 0),
            ("associated press", 0),
            ("the new york times", -3),
            ("the washington post", -3),
            ("the wall street journal", 3),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let keywords = KeywordSets {
            liberal: words(&["progressive", "liberal", "democrat", "left-wing"]),
            conservative: words(&["conservative", "republican", "right-wing", "trump"]),
        };

        let categories = [
            (
                Category::Politics,
                &[
                    "politics",
                    "government",
                    "election",
                    "president",
                    "congress",
                    "senate",
                    "democrat",
                    "republican",
                ][..],
            ),
            (
                Category::Technology,
                &[
                    "tech",
                    "technology",
                    "apple",
                    "google",
                    "microsoft",
                    "ai",
                    "artificial intelligence",
                    "software",
                    "app",
                ][..],
            ),
            (
                Category::Business,
                &[
                    "business", "economy", "stock", "market", "finance", "company", "ceo",
                    "startup",
                ][..],
            ),
            (
                Category::Health,
                &[
                    "health",
                    "covid",
                    "virus",
                    "medical",
                    "doctor",
                    "hospital",
                    "disease",
                    "treatment",
                ][..],
            ),
            (
                Category::Science,
                &[
                    "science",
                    "research",
                    "study",
                    "discovery",
                    "space",
                    "nasa",
                    "climate",
                ][..],
            ),
            (
                Category::Sports,
                &[
                    "sport",
                    "football",
                    "basketball",
                    "baseball",
                    "soccer",
                    "nfl",
                    "nba",
                    "mlb",
                ][..],
            ),
            (
                Category::Entertainment,
                &[
                    "entertainment",
                    "movie",
                    "film",
                    "tv",
                    "television",
                    "celebrity",
                    "music",
                    "actor",
                ][..],
            ),
            (
                Category::World,
                &[
                    "world",
                    "international",
                    "global",
                    "foreign",
                    "country",
                    "nation",
                    "europe",
                    "asia",
                ][..],
            ),
        ]
        .into_iter()
        .map(|(category, kws)| CategoryKeywords {
            category,
            keywords: words(kws),
        })
        .collect();

        Self {
            sources,
            keywords,
            categories,
        }
    }
}

impl Default for BiasLexicon {
    fn default() -> Self {
        Self::default_seed()
    }
}

fn words(ws: &[&str]) -> Vec<String> {
    ws.iter().map(|w| w.to_string()).collect()
}

/// Resolve the lexicon path from `$BIAS_LEXICON_PATH` or the default.
pub fn lexicon_path_from_env() -> PathBuf {
    std::env::var(ENV_BIAS_LEXICON_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_BIAS_LEXICON_PATH))
}

/* ----------------------------
Thread-safe handle + hot reload
---------------------------- */

/// Shared, swappable lexicon used by the request handlers.
#[derive(Clone, Debug)]
pub struct LexiconHandle {
    inner: Arc<RwLock<BiasLexicon>>,
}

impl LexiconHandle {
    pub fn new(lexicon: BiasLexicon) -> Self {
        Self {
            inner: Arc::new(RwLock::new(lexicon)),
        }
    }

    /// Run `f` against the current lexicon. A poisoned lock still holds a
    /// complete lexicon (writers only swap whole values), so we keep using it.
    pub fn with<R>(&self, f: impl FnOnce(&BiasLexicon) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn replace(&self, lexicon: BiasLexicon) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = lexicon;
    }
}

/// Hot reload is opt-in (`BIAS_LEXICON_HOT_RELOAD=1`) and dev/local only.
fn hot_reload_enabled() -> bool {
    let want = std::env::var(ENV_BIAS_LEXICON_HOT_RELOAD)
        .ok()
        .is_some_and(|v| v == "1");
    want && crate::telemetry::is_dev_env()
}

const RELOAD_POLL: Duration = Duration::from_secs(2);

/// Watch `path` and swap the lexicon in `handle` whenever the file changes.
pub fn start_hot_reload_thread(handle: LexiconHandle, path: PathBuf) {
    if !hot_reload_enabled() {
        return;
    }

    info!(target: "bias", path = %path.display(), "bias lexicon hot reload enabled");
    thread::spawn(move || {
        let mut last_seen = None;
        loop {
            reload_if_changed(&handle, &path, &mut last_seen);
            thread::sleep(RELOAD_POLL);
        }
    });
}

/// One poll step. The first sighting of the file only records its mtime; a
/// later, newer mtime triggers a reload. A file that fails to parse leaves the
/// current lexicon in place. Returns true when a new lexicon was installed.
fn reload_if_changed(
    handle: &LexiconHandle,
    path: &Path,
    last_seen: &mut Option<SystemTime>,
) -> bool {
    let Ok(mtime) = fs::metadata(path).and_then(|m| m.modified()) else {
        return false;
    };
    let newer = last_seen.replace(mtime).is_some_and(|prev| mtime > prev);
    if !newer {
        return false;
    }

    match BiasLexicon::load_from_file(path) {
        Ok(fresh) => {
            handle.replace(fresh);
            info!(target: "bias", path = %path.display(), "bias lexicon reloaded");
            true
        }
        Err(e) => {
            warn!(target: "bias", error = ?e, "lexicon reload skipped");
            false
        }
    }
}
