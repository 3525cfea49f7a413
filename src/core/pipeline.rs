use crate::core::dataset::parse_dataset;
use crate::core::export::export_report;
use crate::core::labeler::{derive_labels, retain_known};
use crate::core::normalizer::DistanceNormalizer;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{Catalog, CategoryReport, RawDataset};
use crate::utils::error::{HotelError, LoadError, Result};

/// Loads the hotel dataset, normalizes distances and labels each row.
pub struct ListingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ListingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ListingPipeline<S, C> {
    async fn extract(&self) -> Result<RawDataset> {
        let path = self.config.dataset_path();
        tracing::info!("📂 Reading dataset: {}", path);

        let bytes = match self.storage.read_file(path).await {
            Ok(bytes) => bytes,
            Err(HotelError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound {
                    path: path.to_string(),
                }
                .into());
            }
            Err(e) => return Err(e),
        };

        let dataset = parse_dataset(&bytes)?;
        tracing::info!("📊 Extracted {} rows", dataset.len());
        Ok(dataset)
    }

    async fn transform(&self, data: RawDataset) -> Result<Catalog> {
        let RawDataset {
            mut rows,
            has_distance,
            has_review_score,
        } = data;

        let distances = if has_distance {
            let normalizer = DistanceNormalizer::new(self.config.missing_median_policy());
            Some(normalizer.normalize_column(rows.iter().map(|r| &r.distance))?)
        } else {
            tracing::warn!("No Distance column, skipping distance normalization");
            None
        };

        if has_review_score {
            derive_labels(&mut rows);
        } else {
            tracing::warn!("No Review_Score column, skipping category derivation");
        }

        let (listings, dropped) = retain_known(rows, distances);
        if dropped > 0 {
            tracing::info!("🔎 {} rows without a Good/Superb category were filtered out", dropped);
        }

        tracing::info!("✅ Transform complete: {} listings", listings.len());
        Ok(Catalog { listings, dropped })
    }

    async fn load(&self, catalog: &Catalog) -> Result<CategoryReport> {
        let report = CategoryReport::build(&catalog.listings, self.config.top_n());
        tracing::debug!(
            "Report holds {} Superb and {} Good rows",
            report.superb.len(),
            report.good.len()
        );

        if let Some(dir) = self.config.export_path() {
            export_report(&self.storage, dir, &report, &catalog.listings).await?;
        }

        Ok(report)
    }
}
