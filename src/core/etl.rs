use crate::core::Pipeline;
use crate::domain::model::{Catalog, CategoryReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Everything a successful load attempt produces.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub catalog: Catalog,
    pub report: CategoryReport,
}

pub struct ListingEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ListingEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs one load attempt. Any failure aborts the attempt; nothing is retried.
    pub async fn run(&self) -> Result<LoadOutcome> {
        tracing::info!("🚀 Starting dataset load");
        self.monitor.log_stats("Start");

        let raw = self.pipeline.extract().await?;
        self.monitor.log_stats("Extract");

        let catalog = self.pipeline.transform(raw).await?;
        self.monitor.log_stats("Transform");

        let report = self.pipeline.load(&catalog).await?;
        self.monitor.log_stats("Load");

        tracing::info!(
            "✅ Load complete: {} listings ({} Superb, {} Good shown)",
            catalog.listings.len(),
            report.superb.len(),
            report.good.len()
        );
        self.monitor.log_final_stats();

        Ok(LoadOutcome { catalog, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Category, Listing, RawDataset, RawDistance, RawListing};
    use crate::utils::error::{HotelError, LoadError};
    use async_trait::async_trait;

    struct StaticPipeline {
        rows: Option<Vec<RawListing>>,
    }

    #[async_trait]
    impl Pipeline for StaticPipeline {
        async fn extract(&self) -> Result<RawDataset> {
            match &self.rows {
                Some(rows) => Ok(RawDataset {
                    rows: rows.clone(),
                    has_distance: false,
                    has_review_score: true,
                }),
                None => Err(LoadError::Empty.into()),
            }
        }

        async fn transform(&self, data: RawDataset) -> Result<Catalog> {
            let listings = data
                .rows
                .into_iter()
                .map(|r| Listing {
                    title: r.title,
                    distance: None,
                    review_score: r.review_score,
                    category: Category::Good,
                })
                .collect();
            Ok(Catalog {
                listings,
                dropped: 0,
            })
        }

        async fn load(&self, catalog: &Catalog) -> Result<CategoryReport> {
            Ok(CategoryReport::build(&catalog.listings, 1))
        }
    }

    #[test]
    fn test_engine_runs_all_phases() {
        let rows = vec![
            RawListing {
                title: "A".to_string(),
                distance: RawDistance::Missing,
                review_score: Some(7.0),
                label: None,
            },
            RawListing {
                title: "B".to_string(),
                distance: RawDistance::Missing,
                review_score: Some(7.2),
                label: None,
            },
        ];
        let engine = ListingEngine::new(StaticPipeline { rows: Some(rows) });

        let outcome = tokio_test::block_on(engine.run()).unwrap();

        assert_eq!(outcome.catalog.listings.len(), 2);
        assert_eq!(outcome.report.good.len(), 1);
        assert_eq!(outcome.report.good[0].title, "A");
    }

    #[test]
    fn test_engine_stops_on_extract_failure() {
        let engine = ListingEngine::new(StaticPipeline { rows: None });

        let err = tokio_test::block_on(engine.run()).unwrap_err();
        assert!(matches!(err, HotelError::Load(LoadError::Empty)));
    }
}
