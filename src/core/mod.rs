pub mod classifier;
pub mod dataset;
pub mod etl;
pub mod export;
pub mod labeler;
pub mod normalizer;
pub mod pipeline;
pub mod session;

pub use crate::domain::model::{Catalog, CategoryReport, Listing, RawDataset};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
