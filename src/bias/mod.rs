// src/bias/mod.rs
//! # Bias Scorer
//! Pure, testable logic that maps an `Article` → `ScoreResult`.
//! No I/O and no shared mutable state; safe to call from any number of
//! request handlers at once.
//!
//! Policy:
//! 1) base rating from the outlet table (unknown outlet → 0)
//! 2) `+1` per conservative-coded keyword present, `-1` per liberal-coded one
//!    (presence, not frequency)
//! 3) clamp to [-10, 10]
//! 4) description from the bias scale
//! 5) category: first keyword-table hit over title + description, else `world`

pub mod category;
pub mod lexicon;
pub mod scale;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::article::Article;

pub use category::Category;
pub use lexicon::{BiasLexicon, LexiconHandle};
pub use scale::{clamp_rating, css_class_for, describe, BiasBucket, RATING_MAX, RATING_MIN};

static SEED: Lazy<BiasLexicon> = Lazy::new(BiasLexicon::default_seed);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub bias_rating: i32,
    pub bias_description: &'static str,
    pub category: Category,
}

impl ScoreResult {
    pub fn bucket(&self) -> BiasBucket {
        BiasBucket::for_rating(self.bias_rating)
    }
}

/// Score with the built-in lexicon.
pub fn score_bias(article: &Article) -> ScoreResult {
    score_with(&SEED, article)
}

/// Score with an explicit lexicon (config-loaded or test fixture).
pub fn score_with(lexicon: &BiasLexicon, article: &Article) -> ScoreResult {
    let bias_rating = calculate_bias_rating(lexicon, article);
    ScoreResult {
        bias_rating,
        bias_description: describe(bias_rating),
        category: determine_category(lexicon, article),
    }
}

pub fn calculate_bias_rating(lexicon: &BiasLexicon, article: &Article) -> i32 {
    let base = lexicon.source_rating(article.source_name());

    let full_text = format!(
        "{} {} {}",
        article.title().to_lowercase(),
        article.description().to_lowercase(),
        article.content().to_lowercase()
    );

    let liberal = count_present(&full_text, &lexicon.keywords.liberal);
    let conservative = count_present(&full_text, &lexicon.keywords.conservative);

    clamp_rating(base.saturating_add(conservative).saturating_sub(liberal))
}

pub fn determine_category(lexicon: &BiasLexicon, article: &Article) -> Category {
    let text = format!(
        "{} {}",
        article.title().to_lowercase(),
        article.description().to_lowercase()
    );

    lexicon
        .categories
        .iter()
        .find(|c| c.keywords.iter().any(|k| text.contains(k.as_str())))
        .map(|c| c.category)
        .unwrap_or(Category::World)
}

/// Number of keywords that occur at least once in `text` (substring match).
fn count_present(text: &str, keywords: &[String]) -> i32 {
    let n = keywords.iter().filter(|k| text.contains(k.as_str())).count();
    i32::try_from(n).unwrap_or(i32::MAX)
}
