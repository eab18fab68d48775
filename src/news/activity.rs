// src/news/activity.rs
//! Per-country news activity for the world map, plus the canned data served
//! when the upstream API is unavailable.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::article::{Article, ArticleSource};

/// Countries shown on the world map.
pub const COUNTRIES: [&str; 20] = [
    "us", "gb", "ca", "au", "in", "fr", "de", "jp", "br", "za", "ru", "cn", "mx", "it", "es",
    "kr", "sg", "ae", "ar", "ng",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
}

impl ActivityLevel {
    /// `> 20` results is high, `> 10` medium, anything else low.
    pub fn from_total(total_results: u64) -> Self {
        if total_results > 20 {
            ActivityLevel::High
        } else if total_results > 10 {
            ActivityLevel::Medium
        } else {
            ActivityLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryActivity {
    pub activity_level: ActivityLevel,
    pub articles: u64,
    pub summary: String,
}

const MOCK: [(&str, ActivityLevel, u64, &str); 20] = [
    (
        "us",
        ActivityLevel::High,
        24,
        "Political tensions rise as new economic policies are announced",
    ),
    ("gb", ActivityLevel::Medium, 15, "Brexit aftermath continues to impact trade relations"),
    ("ca", ActivityLevel::Low, 8, "New environmental protection laws proposed"),
    ("au", ActivityLevel::Medium, 12, "Wildfires in eastern regions prompt emergency response"),
    (
        "in",
        ActivityLevel::High,
        22,
        "Tech industry growth accelerates with new international partnerships",
    ),
    ("fr", ActivityLevel::Medium, 14, "Labor strikes affect transportation across major cities"),
    ("de", ActivityLevel::Medium, 16, "Economic outlook improves as manufacturing sector rebounds"),
    ("jp", ActivityLevel::Low, 9, "Central bank announces new monetary policy measures"),
    ("br", ActivityLevel::High, 20, "Amazon deforestation concerns prompt international response"),
    ("za", ActivityLevel::Low, 7, "Elections scheduled as political campaigns intensify"),
    ("ru", ActivityLevel::High, 25, "Diplomatic tensions escalate with neighboring countries"),
    (
        "cn",
        ActivityLevel::High,
        27,
        "Economic growth surpasses expectations amid trade discussions",
    ),
    ("mx", ActivityLevel::Medium, 13, "Border issues and trade negotiations continue"),
    ("it", ActivityLevel::Low, 10, "Tourism recovery efforts show positive results"),
    ("es", ActivityLevel::Low, 9, "Renewable energy initiatives gain momentum"),
    ("kr", ActivityLevel::Medium, 15, "Tech innovation drives economic growth"),
    ("sg", ActivityLevel::Low, 6, "Financial hub status strengthens with new policies"),
    ("ae", ActivityLevel::Medium, 11, "Energy sector diversification continues"),
    ("ar", ActivityLevel::Medium, 12, "Economic reforms aim to address inflation concerns"),
    ("ng", ActivityLevel::High, 18, "Oil production issues impact national economy"),
];

/// Canned activity for one country, if it is on the map.
pub fn mock_activity(country: &str) -> Option<CountryActivity> {
    MOCK.iter()
        .find(|(code, ..)| *code == country)
        .map(|(_, level, articles, summary)| CountryActivity {
            activity_level: *level,
            articles: *articles,
            summary: summary.to_string(),
        })
}

pub fn mock_global_activity() -> BTreeMap<String, CountryActivity> {
    COUNTRIES
        .iter()
        .filter_map(|c| mock_activity(c).map(|a| (c.to_string(), a)))
        .collect()
}

/// Headline summary: the first three non-empty titles joined with "; ".
pub fn summarize(articles: &[Article]) -> String {
    let titles: Vec<&str> = articles
        .iter()
        .map(|a| a.title().trim())
        .filter(|t| !t.is_empty())
        .take(3)
        .collect();
    if titles.is_empty() {
        "No recent headlines".to_string()
    } else {
        titles.join("; ")
    }
}

/// Placeholder articles for a country on the map, built from its canned summary.
/// Unknown countries get none.
pub fn mock_articles(country: &str, count: usize) -> Vec<Article> {
    let Some(activity) = mock_activity(country) else {
        return Vec::new();
    };
    let code = country.to_ascii_uppercase();
    (1..=count)
        .map(|i| Article {
            source: ArticleSource {
                id: Some("mock-news".to_string()),
                name: Some("Mock News".to_string()),
            },
            title: Some(format!("{code} update {i}: {}", activity.summary)),
            description: Some(activity.summary.clone()),
            url: Some(format!("https://example.com/mock/{country}/{i}")),
            ..Default::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds() {
        assert_eq!(ActivityLevel::from_total(21), ActivityLevel::High);
        assert_eq!(ActivityLevel::from_total(20), ActivityLevel::Medium);
        assert_eq!(ActivityLevel::from_total(11), ActivityLevel::Medium);
        assert_eq!(ActivityLevel::from_total(10), ActivityLevel::Low);
        assert_eq!(ActivityLevel::from_total(0), ActivityLevel::Low);
    }

    #[test]
    fn every_map_country_has_mock_data() {
        let all = mock_global_activity();
        assert_eq!(all.len(), COUNTRIES.len());
        assert_eq!(all["cn"].articles, 27);
        assert_eq!(all["cn"].activity_level, ActivityLevel::High);
    }

    #[test]
    fn mock_articles_only_for_known_countries() {
        let arts = mock_articles("fr", 10);
        assert_eq!(arts.len(), 10);
        assert!(arts[0].title().starts_with("FR update 1:"));
        assert!(mock_articles("zz", 10).is_empty());
    }

    #[test]
    fn summary_skips_blank_titles() {
        let arts = vec![
            Article {
                title: Some("  ".into()),
                ..Default::default()
            },
            Article {
                title: Some("One".into()),
                ..Default::default()
            },
            Article {
                title: Some("Two".into()),
                ..Default::default()
            },
        ];
        assert_eq!(summarize(&arts), "One; Two");
        assert_eq!(summarize(&[]), "No recent headlines");
    }
}
