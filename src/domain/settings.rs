use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_MIN_REVIEW_SCORE: f64 = 1.0;
pub const DEFAULT_MAX_REVIEW_SCORE: f64 = 10.0;

/// What to fill missing distances with when no value in the column parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingMedianPolicy {
    /// Abort the load.
    #[default]
    Fail,
    /// Fill with 0 km.
    Zero,
}

/// Acceptance rules for a submitted entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryRules {
    pub min_distance: f64,
    pub min_review_score: f64,
    pub max_review_score: f64,
}

impl Default for EntryRules {
    fn default() -> Self {
        Self {
            min_distance: 0.0,
            min_review_score: DEFAULT_MIN_REVIEW_SCORE,
            max_review_score: DEFAULT_MAX_REVIEW_SCORE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    pub trees: usize,
    /// `None` grows each tree until its leaves are pure.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub test_ratio: f64,
    pub seed: u64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            trees: 100,
            max_depth: None,
            min_samples_split: 2,
            test_ratio: 0.2,
            seed: 42,
        }
    }
}
