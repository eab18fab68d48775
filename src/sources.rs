//! # Source Profiles
//!
//! Editorial profile per outlet: a coarse leaning (far left … far right), a
//! reliability score in `[0.0, 1.0]` and a short description. Served to the UI
//! so it can show a badge next to each article's source.
//!
//! - Loads from a JSON array (`config/source_profiles.json` or
//!   `$SOURCE_PROFILES_PATH`); falls back to the built-in seed on error.
//! - Case-insensitive lookup with normalization of punctuation and dashes.
//!
//! Separate from the scorer's outlet table: profiles are descriptive, the
//! scorer's ratings are the numeric fixture the bias rating starts from.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_SOURCE_PROFILES_PATH: &str = "config/source_profiles.json";
pub const ENV_SOURCE_PROFILES_PATH: &str = "SOURCE_PROFILES_PATH";

static SEED: Lazy<Vec<SourceProfile>> = Lazy::new(|| {
    let raw = include_str!("../config/source_profiles.json");
    serde_json::from_str(raw).expect("valid built-in source profiles")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Leaning {
    FarLeft,
    Left,
    CenterLeft,
    Center,
    CenterRight,
    Right,
    FarRight,
}

impl Leaning {
    pub fn label(self) -> &'static str {
        match self {
            Leaning::FarLeft => "Far Left",
            Leaning::Left => "Left",
            Leaning::CenterLeft => "Center-Left",
            Leaning::Center => "Center",
            Leaning::CenterRight => "Center-Right",
            Leaning::Right => "Right",
            Leaning::FarRight => "Far Right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reliability {
    High,
    Medium,
    Low,
}

impl Reliability {
    /// `>= 0.8` high, `>= 0.6` medium, otherwise low.
    pub fn from_score(score: f32) -> Self {
        if score >= 0.8 {
            Reliability::High
        } else if score >= 0.6 {
            Reliability::Medium
        } else {
            Reliability::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceProfile {
    pub source_name: String,
    pub bias_rating: Leaning,
    pub reliability_score: f32,
    #[serde(default)]
    pub description: String,
}

/// Profile plus the derived labels the UI shows.
#[derive(Debug, Clone, Serialize)]
pub struct SourceProfileView {
    #[serde(flatten)]
    pub profile: SourceProfile,
    pub bias_label: &'static str,
    pub reliability_label: Reliability,
}

impl From<&SourceProfile> for SourceProfileView {
    fn from(p: &SourceProfile) -> Self {
        Self {
            profile: p.clone(),
            bias_label: p.bias_rating.label(),
            reliability_label: Reliability::from_score(p.reliability_score),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceProfiles {
    profiles: Vec<SourceProfile>,
}

impl SourceProfiles {
    pub fn new(profiles: Vec<SourceProfile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|mut p| {
                p.reliability_score = p.reliability_score.clamp(0.0, 1.0);
                p
            })
            .collect();
        Self { profiles }
    }

    pub fn default_seed() -> Self {
        Self::new(SEED.clone())
    }

    /// Load from a JSON file; falls back to `default_seed()` on error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(s) => match serde_json::from_str::<Vec<SourceProfile>>(&s) {
                Ok(v) => Self::new(v),
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "invalid source profiles, using seed"
                    );
                    Self::default_seed()
                }
            },
            Err(_) => Self::default_seed(),
        }
    }

    pub fn from_env() -> Self {
        let path = std::env::var(ENV_SOURCE_PROFILES_PATH)
            .unwrap_or_else(|_| DEFAULT_SOURCE_PROFILES_PATH.to_string());
        Self::load_from_file(path)
    }

    pub fn all(&self) -> &[SourceProfile] {
        &self.profiles
    }

    /// Case- and punctuation-insensitive lookup by outlet name.
    pub fn find(&self, name: &str) -> Option<&SourceProfile> {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return None;
        }
        self.profiles
            .iter()
            .find(|p| normalize(&p.source_name) == wanted)
    }
}

/// Lowercase, replace punctuation/dashes with spaces, collapse whitespace.
fn normalize(s: &str) -> String {
    let mut out = s.trim().to_lowercase();

    for ch in ['—', '–', '-', '_', '/', '\\'] {
        out = out.replace(ch, " ");
    }
    out = out.replace(['\n', '\r', '\t', '.', ',', '’', '\''], " ");

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
