//! CSV dataset reading.

use crate::domain::model::{RawDataset, RawDistance, RawListing};
use crate::utils::error::{LoadError, Result};
use csv::{ReaderBuilder, StringRecord};

pub const TITLE_COLUMN: &str = "Title";
pub const DISTANCE_COLUMN: &str = "Distance";
pub const REVIEW_SCORE_COLUMN: &str = "Review_Score";
pub const LABEL_COLUMNS: [&str; 2] = ["Category", "Kategori"];

struct Columns {
    title: usize,
    distance: Option<usize>,
    review_score: Option<usize>,
    label: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let title = find(TITLE_COLUMN).ok_or_else(|| {
            LoadError::Other(format!("Dataset has no '{}' column", TITLE_COLUMN))
        })?;

        Ok(Self {
            title,
            distance: find(DISTANCE_COLUMN),
            review_score: find(REVIEW_SCORE_COLUMN),
            label: LABEL_COLUMNS.iter().find_map(|&name| find(name)),
        })
    }
}

fn parse_score(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parses dataset bytes into raw rows.
///
/// Empty input, a blank header or a malformed record is reported as
/// [`LoadError::Empty`]. A header with no rows is a valid, empty dataset.
pub fn parse_dataset(bytes: &[u8]) -> Result<RawDataset> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(LoadError::Empty.into());
    }

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let headers = reader.headers().map_err(|_| LoadError::Empty)?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(LoadError::Empty.into());
    }

    let columns = Columns::locate(&headers)?;
    let cell = |record: &StringRecord, index: usize| record.get(index).unwrap_or("").to_string();

    let mut rows = Vec::new();
    let mut distance_cells = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            tracing::debug!("Record {} could not be parsed: {}", line + 1, e);
            LoadError::Empty
        })?;

        if let Some(i) = columns.distance {
            distance_cells.push(cell(&record, i));
        }
        rows.push(RawListing {
            title: cell(&record, columns.title),
            distance: RawDistance::Missing,
            review_score: columns
                .review_score
                .and_then(|i| parse_score(&cell(&record, i))),
            label: columns
                .label
                .map(|i| cell(&record, i))
                .filter(|l| !l.trim().is_empty()),
        });
    }

    if columns.distance.is_some() {
        for (row, distance) in rows.iter_mut().zip(RawDistance::type_column(distance_cells)) {
            row.distance = distance;
        }
    }

    tracing::debug!(
        "Parsed {} rows (distance column: {}, review score column: {})",
        rows.len(),
        columns.distance.is_some(),
        columns.review_score.is_some()
    );

    Ok(RawDataset {
        rows,
        has_distance: columns.distance.is_some(),
        has_review_score: columns.review_score.is_some(),
    })
}
