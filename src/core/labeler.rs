//! Category derivation and the known-category filter.

use crate::domain::model::{Category, Listing, RawListing};

/// Review scores at or above this are `Superb`.
pub const SUPERB_THRESHOLD: f64 = 8.6;

pub fn classify_review_score(review_score: f64) -> Category {
    if review_score >= SUPERB_THRESHOLD {
        Category::Superb
    } else {
        Category::Good
    }
}

/// Overwrites every row's label with the derived category.
///
/// A missing score fails the threshold comparison, so the row is `Good`.
pub fn derive_labels(rows: &mut [RawListing]) {
    for row in rows.iter_mut() {
        let category = row
            .review_score
            .map_or(Category::Good, classify_review_score);
        row.label = Some(category.as_str().to_string());
    }
}

/// Keeps rows whose label is a known category, in their original order.
///
/// `distances` is parallel to `rows` when the dataset has a distance column.
pub fn retain_known(rows: Vec<RawListing>, distances: Option<Vec<f64>>) -> (Vec<Listing>, usize) {
    let total = rows.len();
    let mut distances = distances.map(|d| d.into_iter());

    let listings: Vec<Listing> = rows
        .into_iter()
        .filter_map(|row| {
            let distance = distances.as_mut().and_then(|d| d.next());
            let category = row.label.as_deref()?.parse::<Category>().ok()?;
            Some(Listing {
                title: row.title,
                distance,
                review_score: row.review_score,
                category,
            })
        })
        .collect();

    let dropped = total - listings.len();
    (listings, dropped)
}
