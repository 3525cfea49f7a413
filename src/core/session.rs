//! Entries submitted during one interactive session.

use crate::core::labeler::classify_review_score;
use crate::domain::model::{Listing, NewEntry};
use crate::domain::settings::EntryRules;
use crate::utils::error::{HotelError, Result};
use crate::utils::validation::{validate_min, validate_non_empty_string, validate_range};
use chrono::Utc;

/// Raw values from the entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    pub title: String,
    pub distance: f64,
    pub review_score: f64,
}

impl EntryForm {
    pub fn new(title: impl Into<String>, distance: f64, review_score: f64) -> Self {
        Self {
            title: title.into(),
            distance,
            review_score,
        }
    }

    pub fn validate(&self, rules: &EntryRules) -> Result<()> {
        validate_non_empty_string("Hotel name", &self.title)?;
        validate_min("Distance", self.distance, rules.min_distance)?;
        validate_range(
            "Review score",
            self.review_score,
            rules.min_review_score,
            rules.max_review_score,
        )?;
        Ok(())
    }
}

/// Append-only list of entries owned by one session.
#[derive(Debug, Default)]
pub struct SessionState {
    entries: Vec<NewEntry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and appends a form. A rejected form leaves the session unchanged.
    pub fn submit(&mut self, form: EntryForm, rules: &EntryRules) -> Result<&NewEntry> {
        if let Err(e) = form.validate(rules) {
            tracing::debug!("Rejected entry {:?}: {}", form.title, e);
            return Err(e);
        }

        let entry = NewEntry {
            title: form.title.trim().to_string(),
            distance: form.distance,
            review_score: form.review_score,
            category: classify_review_score(form.review_score),
            submitted_at: Utc::now(),
        };

        tracing::info!(
            "➕ Added '{}' ({} km, score {}, {})",
            entry.title,
            entry.distance,
            entry.review_score,
            entry.category
        );
        self.entries.push(entry);
        self.entries.last().ok_or_else(|| HotelError::ProcessingError {
            message: "Session entry list is empty after an append".to_string(),
        })
    }

    pub fn entries(&self) -> &[NewEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The catalog followed by this session's entries.
    pub fn combined_with(&self, catalog: &[Listing]) -> Vec<Listing> {
        catalog
            .iter()
            .cloned()
            .chain(self.entries.iter().map(Listing::from))
            .collect()
    }
}
