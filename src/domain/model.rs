use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Popularity category derived from a review score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Good,
    Superb,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Superb => "Superb",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Good" => Ok(Category::Good),
            "Superb" => Ok(Category::Superb),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Distance cell as read from the dataset, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDistance {
    Text(String),
    Numeric(f64),
    Missing,
}

impl RawDistance {
    /// Types a whole column at once. The column is numeric only when every
    /// non-blank cell parses as a float; otherwise every non-blank cell is text.
    pub fn type_column(cells: Vec<String>) -> Vec<RawDistance> {
        let numeric = cells
            .iter()
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .all(|cell| cell.parse::<f64>().is_ok());

        cells
            .into_iter()
            .map(|cell| {
                let trimmed = cell.trim();
                if trimmed.is_empty() {
                    RawDistance::Missing
                } else if numeric {
                    trimmed
                        .parse::<f64>()
                        .map(RawDistance::Numeric)
                        .unwrap_or(RawDistance::Missing)
                } else {
                    RawDistance::Text(cell)
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawListing {
    pub title: String,
    pub distance: RawDistance,
    pub review_score: Option<f64>,
    /// Upstream label. Replaced by the derived category when the score column exists.
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawDataset {
    pub rows: Vec<RawListing>,
    pub has_distance: bool,
    pub has_review_score: bool,
}

impl RawDataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A labeled listing that passed the category filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Distance")]
    pub distance: Option<f64>,
    #[serde(rename = "Review_Score")]
    pub review_score: Option<f64>,
    #[serde(rename = "Category")]
    pub category: Category,
}

/// A listing submitted by the user during the current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub title: String,
    pub distance: f64,
    pub review_score: f64,
    pub category: Category,
    pub submitted_at: DateTime<Utc>,
}

impl From<&NewEntry> for Listing {
    fn from(entry: &NewEntry) -> Self {
        Listing {
            title: entry.title.clone(),
            distance: Some(entry.distance),
            review_score: Some(entry.review_score),
            category: entry.category,
        }
    }
}

/// Labeled catalog in dataset order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub listings: Vec<Listing>,
    /// Rows dropped by the category filter.
    pub dropped: usize,
}

/// First rows of each category, as shown side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    pub superb: Vec<Listing>,
    pub good: Vec<Listing>,
    pub total: usize,
    pub generated_at: DateTime<Utc>,
}

impl CategoryReport {
    /// Takes the first `top_n` rows of each category without reordering.
    pub fn build(listings: &[Listing], top_n: usize) -> Self {
        let first_of = |category: Category| -> Vec<Listing> {
            listings
                .iter()
                .filter(|l| l.category == category)
                .take(top_n)
                .cloned()
                .collect()
        };

        Self {
            superb: first_of(Category::Superb),
            good: first_of(Category::Good),
            total: listings.len(),
            generated_at: Utc::now(),
        }
    }

    pub fn rows_for(&self, category: Category) -> &[Listing] {
        match category {
            Category::Superb => &self.superb,
            Category::Good => &self.good,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(title: &str, category: Category) -> Listing {
        Listing {
            title: title.to_string(),
            distance: Some(1.0),
            review_score: Some(8.0),
            category,
        }
    }

    #[test]
    fn test_category_parse_is_exact() {
        assert_eq!("Good".parse::<Category>(), Ok(Category::Good));
        assert_eq!("Superb".parse::<Category>(), Ok(Category::Superb));
        assert!("superb".parse::<Category>().is_err());
        assert!("Excellent".parse::<Category>().is_err());
        assert!(Category::Good < Category::Superb);
    }

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_numeric_column() {
        assert_eq!(
            RawDistance::type_column(cells(&["2.5", "", " 0.8 "])),
            vec![
                RawDistance::Numeric(2.5),
                RawDistance::Missing,
                RawDistance::Numeric(0.8)
            ]
        );
    }

    #[test]
    fn test_mixed_column_is_all_text() {
        assert_eq!(
            RawDistance::type_column(cells(&["1 km from centre", "50", "   "])),
            vec![
                RawDistance::Text("1 km from centre".to_string()),
                RawDistance::Text("50".to_string()),
                RawDistance::Missing
            ]
        );
    }

    #[test]
    fn test_report_keeps_first_rows_in_order() {
        let mut listings = Vec::new();
        for i in 0..15 {
            listings.push(listing(&format!("Superb {}", i), Category::Superb));
        }
        listings.push(listing("Good 0", Category::Good));
        listings.push(listing("Good 1", Category::Good));

        let report = CategoryReport::build(&listings, 10);

        assert_eq!(report.superb.len(), 10);
        assert_eq!(report.superb[0].title, "Superb 0");
        assert_eq!(report.superb[9].title, "Superb 9");
        assert_eq!(report.good.len(), 2);
        assert_eq!(report.rows_for(Category::Good)[1].title, "Good 1");
        assert_eq!(report.total, 17);
    }
}
