use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use metrics::{counter, gauge};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::article::{Article, ScoredArticle};
use crate::bias::{self, lexicon, BiasLexicon, Category, LexiconHandle};
use crate::config::NewsApiConfig;
use crate::error::ApiError;
use crate::metrics::Metrics;
use crate::news::activity::{self, ActivityLevel, CountryActivity, COUNTRIES};
use crate::news::{EverythingQuery, HeadlinesQuery, NewsApiClient, NewsProvider, SortBy};
use crate::sources::{SourceProfileView, SourceProfiles};
use crate::store::{self, ArticleStore, SaveError, SavedArticle};
use crate::telemetry::{anon_hash, dev_logging_enabled};

const HEADLINES_PAGE_SIZE: u32 = 20;
const SEARCH_PAGE_SIZE: u32 = 20;
const COUNTRY_PAGE_SIZE: u32 = 10;
const ACTIVITY_PAGE_SIZE: u32 = 3;
const MOCK_ARTICLES_PER_COUNTRY: usize = 10;

#[derive(Clone)]
pub struct AppState {
    pub lexicon: LexiconHandle,
    pub news: Arc<dyn NewsProvider>,
    pub profiles: Arc<SourceProfiles>,
    pub store: Arc<ArticleStore>,
}

impl AppState {
    pub fn new(
        news: Arc<dyn NewsProvider>,
        lexicon: BiasLexicon,
        profiles: SourceProfiles,
    ) -> Self {
        Self {
            lexicon: LexiconHandle::new(lexicon),
            news,
            profiles: Arc::new(profiles),
            store: Arc::new(ArticleStore::default()),
        }
    }

    /// Production wiring: env config, lexicon/profile files, NewsAPI client.
    pub fn from_env() -> anyhow::Result<Self> {
        let client = NewsApiClient::new(NewsApiConfig::from_env())?;
        let lexicon = BiasLexicon::load_or_seed(lexicon::lexicon_path_from_env());
        Ok(Self::new(
            Arc::new(client),
            lexicon,
            SourceProfiles::from_env(),
        ))
    }

    /// Score one article with the current lexicon.
    fn score(&self, article: Article) -> ScoredArticle {
        let result = self.lexicon.with(|lex| bias::score_with(lex, &article));
        counter!("bias_articles_scored_total", "bucket" => result.bucket().as_str()).increment(1);
        if dev_logging_enabled() {
            // Never log raw text. Only hashed id + outcome.
            info!(
                target: "bias",
                id = %anon_hash(article.title()),
                source = article.source_name(),
                rating = result.bias_rating,
                category = %result.category,
                "article scored"
            );
        }
        ScoredArticle::new(article, result)
    }

    fn score_all(&self, articles: Vec<Article>, category: Option<&str>) -> Vec<ScoredArticle> {
        articles
            .into_iter()
            .map(|a| self.score(a).with_category(category))
            .collect()
    }
}

pub fn router(state: AppState) -> Router {
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/news/headlines", get(top_headlines))
        .route("/api/news/search", get(search_news))
        .route("/api/news/interests", get(news_by_interests))
        .route("/api/news/country/{country}", get(news_by_country))
        .route("/api/news/global-activity", get(global_activity))
        .route("/api/bias/score", post(score_article))
        .route("/api/bias/score/batch", post(score_batch))
        .route("/api/bias/scale", get(bias_scale))
        .route("/api/bias-sources", get(list_source_profiles))
        .route("/api/bias-sources/{name}", get(source_profile))
        .route("/api/articles", get(list_saved).post(save_article))
        .route("/api/articles/category/{category}", get(saved_by_category))
        .route("/api/articles/date", get(saved_by_date))
        .route("/api/articles/{id}", delete(remove_saved))
        .layer(CorsLayer::very_permissive())
        .with_state(state);

    match Metrics::init() {
        Ok(m) => app.merge(m.router()),
        Err(e) => {
            warn!(error = ?e, "metrics disabled");
            app
        }
    }
}

/// Empty strings count as absent, matching how the UI sends unset filters.
fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/* ----------------------------
News routes
---------------------------- */

#[derive(Deserialize)]
struct HeadlinesParams {
    country: Option<String>,
    category: Option<String>,
}

async fn top_headlines(
    State(state): State<AppState>,
    Query(q): Query<HeadlinesParams>,
) -> Result<Json<Vec<ScoredArticle>>, ApiError> {
    let category = non_empty(q.category);
    let query = HeadlinesQuery {
        country: non_empty(q.country).unwrap_or_else(|| "us".to_string()),
        category: category.clone(),
        page_size: HEADLINES_PAGE_SIZE,
    };
    let page = state.news.top_headlines(&query).await?;
    Ok(Json(state.score_all(page.articles, category.as_deref())))
}

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn search_news(
    State(state): State<AppState>,
    Query(p): Query<SearchParams>,
) -> Result<Json<Vec<ScoredArticle>>, ApiError> {
    let q = non_empty(p.q).ok_or_else(|| ApiError::bad_request("Search query is required"))?;
    let page = state
        .news
        .everything(&EverythingQuery {
            q,
            sort_by: SortBy::Relevancy,
            page_size: SEARCH_PAGE_SIZE,
        })
        .await?;
    Ok(Json(state.score_all(page.articles, None)))
}

#[derive(Deserialize)]
struct InterestsParams {
    interests: Option<String>,
}

/// Interests travel with the request (`?interests=a,b`); nothing is kept per user.
async fn news_by_interests(
    State(state): State<AppState>,
    Query(p): Query<InterestsParams>,
) -> Result<Json<Vec<ScoredArticle>>, ApiError> {
    let interests: Vec<String> = p
        .interests
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if interests.is_empty() {
        return Err(ApiError::bad_request("At least one interest is required"));
    }

    let page = state
        .news
        .everything(&EverythingQuery {
            q: interests.join(" OR "),
            sort_by: SortBy::PublishedAt,
            page_size: SEARCH_PAGE_SIZE,
        })
        .await?;
    Ok(Json(state.score_all(page.articles, None)))
}

#[derive(Deserialize)]
struct CountryParams {
    category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryMetadata {
    pub country: String,
    pub activity_level: ActivityLevel,
    pub total_results: u64,
    pub summary: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_mock_data: bool,
}

#[derive(Debug, Serialize)]
pub struct CountryNews {
    pub articles: Vec<ScoredArticle>,
    pub metadata: CountryMetadata,
}

async fn news_by_country(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(p): Query<CountryParams>,
) -> Result<Json<CountryNews>, ApiError> {
    let country = country.trim().to_ascii_lowercase();
    let category = non_empty(p.category).filter(|c| c != "all");
    let canned = activity::mock_activity(&country);

    let query = HeadlinesQuery {
        country: country.clone(),
        category: category.clone(),
        page_size: COUNTRY_PAGE_SIZE,
    };

    match state.news.top_headlines(&query).await {
        Ok(page) => {
            let activity_level = canned
                .as_ref()
                .map(|c| c.activity_level)
                .unwrap_or_else(|| ActivityLevel::from_total(page.total_results));
            let summary = canned
                .as_ref()
                .map(|c| c.summary.clone())
                .unwrap_or_else(|| activity::summarize(&page.articles));
            let articles = state
                .score_all(page.articles, category.as_deref())
                .into_iter()
                .map(|a| a.with_country(&country))
                .collect();

            Ok(Json(CountryNews {
                articles,
                metadata: CountryMetadata {
                    country,
                    activity_level,
                    total_results: page.total_results,
                    summary,
                    is_mock_data: false,
                },
            }))
        }
        Err(e) => {
            let Some(canned) = canned else {
                return Err(e.into());
            };
            warn!(target: "news", %country, error = ?e, "upstream failed, serving mock articles");
            counter!("news_mock_fallback_total", "route" => "country").increment(1);

            let articles = state
                .score_all(
                    activity::mock_articles(&country, MOCK_ARTICLES_PER_COUNTRY),
                    category.as_deref(),
                )
                .into_iter()
                .map(|a| a.with_country(&country))
                .collect();

            Ok(Json(CountryNews {
                articles,
                metadata: CountryMetadata {
                    country,
                    activity_level: canned.activity_level,
                    total_results: canned.articles,
                    summary: canned.summary,
                    is_mock_data: true,
                },
            }))
        }
    }
}

#[derive(Deserialize)]
struct ActivityParams {
    #[serde(rename = "useRealData")]
    use_real_data: Option<String>,
}

async fn global_activity(
    State(state): State<AppState>,
    Query(p): Query<ActivityParams>,
) -> Json<BTreeMap<String, CountryActivity>> {
    if p.use_real_data.as_deref() != Some("true") {
        return Json(activity::mock_global_activity());
    }

    let mut out = BTreeMap::new();
    for country in COUNTRIES {
        let query = HeadlinesQuery {
            country: country.to_string(),
            category: None,
            page_size: ACTIVITY_PAGE_SIZE,
        };
        let entry = match state.news.top_headlines(&query).await {
            Ok(page) => Some(CountryActivity {
                activity_level: ActivityLevel::from_total(page.total_results),
                articles: page.total_results,
                summary: activity::summarize(&page.articles),
            }),
            Err(e) => {
                warn!(target: "news", country, error = ?e, "activity fetch failed, using mock");
                counter!("news_mock_fallback_total", "route" => "global-activity").increment(1);
                activity::mock_activity(country)
            }
        };
        if let Some(entry) = entry {
            out.insert(country.to_string(), entry);
        }
    }
    Json(out)
}

/* ----------------------------
Bias routes
---------------------------- */

async fn score_article(
    State(state): State<AppState>,
    Json(article): Json<Article>,
) -> Json<ScoredArticle> {
    Json(state.score(article))
}

async fn score_batch(
    State(state): State<AppState>,
    Json(articles): Json<Vec<Article>>,
) -> Json<Vec<ScoredArticle>> {
    Json(state.score_all(articles, None))
}

async fn bias_scale() -> Json<Vec<bias::scale::ScaleEntry>> {
    Json(bias::scale::scale())
}

async fn list_source_profiles(State(state): State<AppState>) -> Json<Vec<SourceProfileView>> {
    Json(state.profiles.all().iter().map(SourceProfileView::from).collect())
}

async fn source_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SourceProfileView>, ApiError> {
    state
        .profiles
        .find(&name)
        .map(|p| Json(SourceProfileView::from(p)))
        .ok_or_else(|| ApiError::not_found(format!("No bias data for source '{name}'")))
}

/* ----------------------------
Saved articles
---------------------------- */

/// Article as posted by the UI. A rating or category may be supplied; whatever
/// is missing is computed. The description always follows the stored rating.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveArticleReq {
    #[serde(flatten)]
    article: Article,
    #[serde(default)]
    bias_rating: Option<i32>,
    #[serde(default)]
    category: Option<String>,
}

impl SaveArticleReq {
    fn into_scored(self, state: &AppState) -> Result<ScoredArticle, ApiError> {
        let category = non_empty(self.category)
            .map(|c| {
                c.parse::<Category>()
                    .map_err(|_| ApiError::bad_request(format!("Unknown category '{c}'")))
            })
            .transpose()?;

        let mut scored = state.score(self.article);
        if let Some(r) = self.bias_rating {
            scored.bias_rating = bias::clamp_rating(r);
        }
        scored.bias_description = bias::describe(scored.bias_rating).to_string();
        if let Some(c) = category {
            scored.category = c.to_string();
        }
        Ok(scored)
    }
}

async fn save_article(
    State(state): State<AppState>,
    Json(req): Json<SaveArticleReq>,
) -> Result<Json<SavedArticle>, ApiError> {
    let scored = req.into_scored(&state)?;
    let saved = state.store.save(scored).map_err(|e| match e {
        SaveError::MissingUrl => ApiError::bad_request("Article url is required"),
        SaveError::AlreadySaved => ApiError::bad_request("Article already saved"),
        SaveError::Full => ApiError::bad_request("Saved article limit reached"),
    })?;
    gauge!("saved_articles").set(state.store.len() as f64);
    Ok(Json(saved))
}

async fn list_saved(State(state): State<AppState>) -> Json<Vec<SavedArticle>> {
    Json(state.store.list())
}

async fn saved_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<Vec<SavedArticle>> {
    Json(state.store.by_category(&category))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DateParams {
    start_date: Option<String>,
    end_date: Option<String>,
}

async fn saved_by_date(
    State(state): State<AppState>,
    Query(p): Query<DateParams>,
) -> Result<Json<Vec<SavedArticle>>, ApiError> {
    let parse = |raw: Option<String>, end_of_day: bool| match non_empty(raw) {
        None => Ok(None),
        Some(s) => store::parse_date_bound(&s, end_of_day)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid date '{s}'"))),
    };
    let start = parse(p.start_date, false)?;
    let end = parse(p.end_date, true)?;
    Ok(Json(state.store.by_published_range(start, end)))
}

#[derive(Serialize)]
struct Message {
    message: &'static str,
}

async fn remove_saved(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    if !state.store.remove(&id) {
        return Err(ApiError::not_found("Saved article not found"));
    }
    gauge!("saved_articles").set(state.store.len() as f64);
    Ok(Json(Message {
        message: "Article removed from saved list",
    }))
}
