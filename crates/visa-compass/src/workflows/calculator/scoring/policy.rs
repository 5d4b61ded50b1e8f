use serde::{Deserialize, Serialize};

use super::super::domain::ProbabilityTier;

/// Totals at or above this score are reported as a high probability.
pub const HIGH_PROBABILITY_THRESHOLD: u8 = 85;
/// Totals at or above this score (and below the high threshold) are medium.
pub const MEDIUM_PROBABILITY_THRESHOLD: u8 = 60;

/// Field-of-study fragments treated as in-demand STEM disciplines.
pub const STEM_FIELD_KEYWORDS: &[&str] = &[
    "computer science",
    "engineering",
    "medicine",
    "healthcare",
    "it",
    "technology",
    "science",
    "data",
];

/// Destination fragments that earn the high-demand country bonus.
pub const HIGH_DEMAND_COUNTRIES: &[&str] = &["canada", "australia", "new zealand", "germany", "uk"];

/// Tunable policy shared by the scoring engine and the recommendation generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub high_threshold: u8,
    pub medium_threshold: u8,
    pub stem_keywords: Vec<String>,
    pub high_demand_countries: Vec<String>,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            high_threshold: HIGH_PROBABILITY_THRESHOLD,
            medium_threshold: MEDIUM_PROBABILITY_THRESHOLD,
            stem_keywords: to_owned_list(STEM_FIELD_KEYWORDS),
            high_demand_countries: to_owned_list(HIGH_DEMAND_COUNTRIES),
        }
    }
}

impl ScoringPolicy {
    pub fn with_thresholds(high_threshold: u8, medium_threshold: u8) -> Self {
        Self {
            high_threshold,
            medium_threshold,
            ..Self::default()
        }
    }

    pub fn tier_for(&self, total_score: u8) -> ProbabilityTier {
        if total_score >= self.high_threshold {
            ProbabilityTier::High
        } else if total_score >= self.medium_threshold {
            ProbabilityTier::Medium
        } else {
            ProbabilityTier::Low
        }
    }

    /// Case-insensitive substring match against the STEM keyword list.
    pub fn is_stem_field(&self, field_of_study: &str) -> bool {
        contains_any(field_of_study, &self.stem_keywords)
    }

    pub fn is_high_demand_country(&self, target_country: &str) -> bool {
        contains_any(target_country, &self.high_demand_countries)
    }
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    if haystack.is_empty() {
        return false;
    }
    let lowered = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| lowered.contains(needle.to_lowercase().as_str()))
}
