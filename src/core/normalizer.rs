//! Distance normalization: free-text or numeric distances to kilometers.

use crate::domain::model::RawDistance;
use crate::domain::settings::MissingMedianPolicy;
use crate::utils::error::{LoadError, Result};
use regex::Regex;
use std::sync::LazyLock;

static FROM_CENTRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*from centre\s*").expect("static pattern"));

/// Parses one distance cell into kilometers. `None` marks a missing value.
///
/// Text is checked for `km` before `m`; both unit checks are case-sensitive.
pub fn normalize_distance(raw: &RawDistance) -> Option<f64> {
    let km = match raw {
        RawDistance::Numeric(value) => Some(*value),
        RawDistance::Text(text) => parse_distance_text(text),
        RawDistance::Missing => None,
    };
    km.filter(|v| !v.is_nan())
}

fn parse_distance_text(text: &str) -> Option<f64> {
    let cleaned = FROM_CENTRE.replace_all(text.trim(), "");

    if cleaned.contains("km") {
        cleaned.replace("km", "").trim().parse::<f64>().ok()
    } else if cleaned.contains('m') {
        cleaned
            .replace('m', "")
            .trim()
            .parse::<f64>()
            .ok()
            .map(|meters| meters / 1000.0)
    } else {
        None
    }
}

/// Median of the present values; the mean of the middle pair for even counts.
pub fn column_median(values: &[Option<f64>]) -> Option<f64> {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(|a, b| a.total_cmp(b));

    let mid = present.len() / 2;
    if present.len() % 2 == 0 {
        Some((present[mid - 1] + present[mid]) / 2.0)
    } else {
        Some(present[mid])
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceNormalizer {
    policy: MissingMedianPolicy,
}

impl DistanceNormalizer {
    pub fn new(policy: MissingMedianPolicy) -> Self {
        Self { policy }
    }

    /// Normalizes a whole column and imputes missing entries with the column median.
    pub fn normalize_column<'a>(
        &self,
        column: impl IntoIterator<Item = &'a RawDistance>,
    ) -> Result<Vec<f64>> {
        let parsed: Vec<Option<f64>> = column.into_iter().map(normalize_distance).collect();
        let missing = parsed.iter().filter(|v| v.is_none()).count();

        if missing == 0 {
            return Ok(parsed.into_iter().flatten().collect());
        }

        let fill = match column_median(&parsed) {
            Some(median) => median,
            None => match self.policy {
                MissingMedianPolicy::Fail => {
                    return Err(LoadError::Other(
                        "Distance column has no parseable values".to_string(),
                    )
                    .into());
                }
                MissingMedianPolicy::Zero => {
                    tracing::warn!("⚠️ No parseable distances, filling {} rows with 0 km", missing);
                    0.0
                }
            },
        };

        tracing::debug!("Imputing {} missing distances with {:.3} km", missing, fill);
        Ok(parsed.into_iter().map(|v| v.unwrap_or(fill)).collect())
    }
}
