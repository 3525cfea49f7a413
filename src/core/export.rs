use crate::core::Storage;
use crate::domain::model::{CategoryReport, Listing};
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const REPORT_ARCHIVE: &str = "hotel_report.zip";

fn listings_to_csv(listings: &[Listing]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if listings.is_empty() {
        writer.write_record(["Title", "Distance", "Review_Score", "Category"])?;
    }
    for listing in listings {
        writer.serialize(listing)?;
    }
    writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()).into())
}

/// Packs the shown tables and the full listing set into one archive.
pub fn build_archive(report: &CategoryReport, listings: &[Listing]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.start_file::<_, ()>("superb.csv", FileOptions::default())?;
    zip.write_all(&listings_to_csv(&report.superb)?)?;

    zip.start_file::<_, ()>("good.csv", FileOptions::default())?;
    zip.write_all(&listings_to_csv(&report.good)?)?;

    zip.start_file::<_, ()>("catalog.csv", FileOptions::default())?;
    zip.write_all(&listings_to_csv(listings)?)?;

    zip.start_file::<_, ()>("summary.json", FileOptions::default())?;
    let summary = serde_json::json!({
        "generated_at": report.generated_at,
        "listings": listings.len(),
        "superb_shown": report.superb.len(),
        "good_shown": report.good.len(),
    });
    zip.write_all(serde_json::to_string_pretty(&summary)?.as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

/// Writes the report archive under `dir` and returns its path.
pub async fn export_report<S: Storage>(
    storage: &S,
    dir: &str,
    report: &CategoryReport,
    listings: &[Listing],
) -> Result<String> {
    let zip_data = build_archive(report, listings)?;
    let path = std::path::Path::new(dir)
        .join(REPORT_ARCHIVE)
        .to_string_lossy()
        .into_owned();

    tracing::debug!("Writing report archive ({} bytes) to {}", zip_data.len(), path);
    storage.write_file(&path, &zip_data).await?;

    tracing::info!("📦 Report exported: {}", path);
    Ok(path)
}
