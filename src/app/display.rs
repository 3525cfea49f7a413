//! Plain-text rendering of tables and notifications.

use crate::core::classifier::HoldoutReport;
use crate::domain::model::{Category, CategoryReport, Listing, NewEntry};
use crate::utils::error::LoadError;
use std::fmt::Write;

const HEADERS: [&str; 5] = ["#", "Title", "Distance (km)", "Review Score", "Category"];

fn cells(index: usize, listing: &Listing) -> [String; 5] {
    [
        index.to_string(),
        listing.title.clone(),
        listing
            .distance
            .map(|d| format!("{:.2}", d))
            .unwrap_or_default(),
        listing
            .review_score
            .map(|s| format!("{:.1}", s))
            .unwrap_or_default(),
        listing.category.to_string(),
    ]
}

/// Renders rows with a 1-based index column.
pub fn render_table(listings: &[Listing]) -> String {
    let rows: Vec<[String; 5]> = listings
        .iter()
        .enumerate()
        .map(|(i, listing)| cells(i + 1, listing))
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cols: [&str; 5]| -> String {
        let padded: Vec<String> = cols
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(col, (cell, width))| match col {
                // Index and numeric columns are right-aligned.
                0 | 2 | 3 => format!("{:>width$}", cell, width = width),
                _ => format!("{:<width$}", cell, width = width),
            })
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(HEADERS));
    let _ = writeln!(
        out,
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );
    if rows.is_empty() {
        let _ = writeln!(out, "(no rows)");
    }
    for row in &rows {
        let _ = writeln!(out, "{}", line(row.each_ref().map(String::as_str)));
    }
    out
}

pub fn render_report(report: &CategoryReport) -> String {
    let mut out = String::new();
    for category in [Category::Superb, Category::Good] {
        let rows = report.rows_for(category);
        let _ = writeln!(out, "{} Hotels in category {}", rows.len(), category);
        out.push_str(&render_table(rows));
        out.push('\n');
    }
    out
}

pub fn render_entries(entries: &[NewEntry]) -> String {
    let listings: Vec<Listing> = entries.iter().map(Listing::from).collect();
    format!("Newly added entries:\n{}", render_table(&listings))
}

pub fn render_holdout(report: &HoldoutReport) -> String {
    format!(
        "Random forest accuracy: {:.2}% ({} training rows, {} held out)",
        report.accuracy * 100.0,
        report.train_size,
        report.test_size
    )
}

pub fn render_load_error(error: &LoadError) -> String {
    format!("❌ {}", error)
}

pub fn render_added(entry: &NewEntry) -> String {
    format!("✅ Hotel '{}' added successfully!", entry.title)
}

pub fn render_rejected(reason: &str) -> String {
    format!("❌ Make sure every input is valid and not empty. ({})", reason)
}
