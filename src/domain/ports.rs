use crate::domain::model::{Catalog, CategoryReport, RawDataset};
use crate::domain::settings::{ClassifierSettings, EntryRules, MissingMedianPolicy};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn dataset_path(&self) -> &str;
    fn top_n(&self) -> usize;
    fn missing_median_policy(&self) -> MissingMedianPolicy;
    fn entry_rules(&self) -> EntryRules;
    /// `Some` when the holdout classifier should run after loading.
    fn classifier(&self) -> Option<ClassifierSettings>;
    /// `Some` when the report should be exported under this directory.
    fn export_path(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RawDataset>;
    async fn transform(&self, data: RawDataset) -> Result<Catalog>;
    async fn load(&self, catalog: &Catalog) -> Result<CategoryReport>;
}
