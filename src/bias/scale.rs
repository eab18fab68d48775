//! The bias scale: one ordered threshold table that buckets a rating.
//!
//! Both the API description (`describe`) and the UI display class
//! (`css_class_for`) come from this table, so the server and client views of a
//! rating can never disagree.

use serde::Serialize;

pub const RATING_MIN: i32 = -10;
pub const RATING_MAX: i32 = 10;

/// Clamp any raw rating into `[RATING_MIN, RATING_MAX]`.
pub fn clamp_rating(raw: i32) -> i32 {
    raw.clamp(RATING_MIN, RATING_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasBucket {
    StrongLeft,
    ModerateLeft,
    SlightLeft,
    Minimal,
    SlightRight,
    ModerateRight,
    StrongRight,
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    AtLeast(i32),
    AtMost(i32),
}

impl Bound {
    fn admits(self, rating: i32) -> bool {
        match self {
            Bound::AtLeast(t) => rating >= t,
            Bound::AtMost(t) => rating <= t,
        }
    }
}

/// Evaluated in order, first match wins; no match means `Minimal`.
const THRESHOLDS: [(Bound, BiasBucket); 6] = [
    (Bound::AtLeast(7), BiasBucket::StrongRight),
    (Bound::AtLeast(4), BiasBucket::ModerateRight),
    (Bound::AtLeast(1), BiasBucket::SlightRight),
    (Bound::AtMost(-7), BiasBucket::StrongLeft),
    (Bound::AtMost(-4), BiasBucket::ModerateLeft),
    (Bound::AtMost(-1), BiasBucket::SlightLeft),
];

impl BiasBucket {
    /// Left-to-right display order.
    pub const SPECTRUM: [BiasBucket; 7] = [
        BiasBucket::StrongLeft,
        BiasBucket::ModerateLeft,
        BiasBucket::SlightLeft,
        BiasBucket::Minimal,
        BiasBucket::SlightRight,
        BiasBucket::ModerateRight,
        BiasBucket::StrongRight,
    ];

    pub fn for_rating(rating: i32) -> Self {
        THRESHOLDS
            .iter()
            .find(|(bound, _)| bound.admits(rating))
            .map(|(_, bucket)| *bucket)
            .unwrap_or(BiasBucket::Minimal)
    }

    /// Human-readable description attached to API responses.
    pub fn description(self) -> &'static str {
        match self {
            BiasBucket::StrongRight => "Strong right-wing bias",
            BiasBucket::ModerateRight => "Moderate right-wing bias",
            BiasBucket::SlightRight => "Slight right-wing bias",
            BiasBucket::StrongLeft => "Strong left-wing bias",
            BiasBucket::ModerateLeft => "Moderate left-wing bias",
            BiasBucket::SlightLeft => "Slight left-wing bias",
            BiasBucket::Minimal => "Minimal bias detected",
        }
    }

    /// CSS class used by the web UI to color the rating badge.
    pub fn css_class(self) -> &'static str {
        match self {
            BiasBucket::StrongLeft => "bias-left-strong",
            BiasBucket::ModerateLeft => "bias-left-moderate",
            BiasBucket::SlightLeft => "bias-left-slight",
            BiasBucket::StrongRight => "bias-right-strong",
            BiasBucket::ModerateRight => "bias-right-moderate",
            BiasBucket::SlightRight => "bias-right-slight",
            BiasBucket::Minimal => "bias-neutral",
        }
    }

    /// Short badge label used by the web UI.
    pub fn short_label(self) -> &'static str {
        match self {
            BiasBucket::StrongLeft => "Strong Left",
            BiasBucket::ModerateLeft => "Moderate Left",
            BiasBucket::SlightLeft => "Slight Left",
            BiasBucket::StrongRight => "Strong Right",
            BiasBucket::ModerateRight => "Moderate Right",
            BiasBucket::SlightRight => "Slight Right",
            BiasBucket::Minimal => "Neutral",
        }
    }

    /// Metric label value.
    pub fn as_str(self) -> &'static str {
        match self {
            BiasBucket::StrongLeft => "strong_left",
            BiasBucket::ModerateLeft => "moderate_left",
            BiasBucket::SlightLeft => "slight_left",
            BiasBucket::Minimal => "minimal",
            BiasBucket::SlightRight => "slight_right",
            BiasBucket::ModerateRight => "moderate_right",
            BiasBucket::StrongRight => "strong_right",
        }
    }

    /// Inclusive rating range covered by this bucket, derived from the table.
    pub fn range(self) -> (i32, i32) {
        let mut covered = (RATING_MIN..=RATING_MAX).filter(|r| Self::for_rating(*r) == self);
        let lo = covered.next().unwrap_or(0);
        let hi = covered.last().unwrap_or(lo);
        (lo, hi)
    }
}

/// Server-side description for a rating.
pub fn describe(rating: i32) -> &'static str {
    BiasBucket::for_rating(rating).description()
}

/// Client-side display class for a rating.
pub fn css_class_for(rating: i32) -> &'static str {
    BiasBucket::for_rating(rating).css_class()
}

/// One row of the published scale (`GET /api/bias/scale`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleEntry {
    pub bucket: BiasBucket,
    pub min: i32,
    pub max: i32,
    pub description: &'static str,
    pub css_class: &'static str,
    pub label: &'static str,
}

pub fn scale() -> Vec<ScaleEntry> {
    BiasBucket::SPECTRUM
        .iter()
        .map(|&bucket| {
            let (min, max) = bucket.range();
            ScaleEntry {
                bucket,
                min,
                max,
                description: bucket.description(),
                css_class: bucket.css_class(),
                label: bucket.short_label(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_around_zero() {
        assert_eq!(describe(1), "Slight right-wing bias");
        assert_eq!(describe(0), "Minimal bias detected");
        assert_eq!(describe(-1), "Slight left-wing bias");
    }

    #[test]
    fn every_rating_matches_threshold_table() {
        for r in RATING_MIN..=RATING_MAX {
            let expected = if r >= 7 {
                "Strong right-wing bias"
            } else if r >= 4 {
                "Moderate right-wing bias"
            } else if r >= 1 {
                "Slight right-wing bias"
            } else if r <= -7 {
                "Strong left-wing bias"
            } else if r <= -4 {
                "Moderate left-wing bias"
            } else if r <= -1 {
                "Slight left-wing bias"
            } else {
                "Minimal bias detected"
            };
            assert_eq!(describe(r), expected, "rating {r}");
        }
    }

    #[test]
    fn ui_class_tracks_server_description() {
        for r in RATING_MIN..=RATING_MAX {
            let bucket = BiasBucket::for_rating(r);
            assert_eq!(css_class_for(r), bucket.css_class());
            assert_eq!(describe(r), bucket.description());
        }
        assert_eq!(css_class_for(-4), "bias-left-moderate");
        assert_eq!(css_class_for(0), "bias-neutral");
        assert_eq!(css_class_for(7), "bias-right-strong");
    }

    #[test]
    fn scale_partitions_the_rating_range() {
        let rows = scale();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows.first().map(|r| (r.min, r.max)), Some((-10, -7)));
        assert_eq!(rows[3].min, 0);
        assert_eq!(rows[3].max, 0);
        assert_eq!(rows.last().map(|r| (r.min, r.max)), Some((7, 10)));
        for pair in rows.windows(2) {
            assert_eq!(pair[0].max + 1, pair[1].min);
        }
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_rating(14), 10);
        assert_eq!(clamp_rating(-11), -10);
        assert_eq!(clamp_rating(3), 3);
    }
}
