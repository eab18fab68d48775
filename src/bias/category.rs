use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Topical tag assigned by keyword match. Declaration order is match priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Politics,
    Technology,
    Business,
    Health,
    Science,
    Sports,
    Entertainment,
    World,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Politics,
        Category::Technology,
        Category::Business,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Entertainment,
        Category::World,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Politics => "politics",
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Entertainment => "entertainment",
            Category::World => "world",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| anyhow::anyhow!("unknown category `{s}`"))
    }
}
