//! Random forest over `(distance, review_score)` with a seeded holdout split.
//!
//! The classifier consumes an already labeled catalog; it never feeds labels
//! back into the pipeline.

use crate::domain::model::{Category, Listing};
use crate::domain::settings::ClassifierSettings;
use crate::utils::error::{HotelError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::metrics::accuracy;

const FEATURES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Distance in km, review score.
    pub features: [f64; FEATURES],
    pub label: Category,
}

impl TryFrom<&Listing> for Sample {
    type Error = HotelError;

    fn try_from(listing: &Listing) -> Result<Self> {
        match (listing.distance, listing.review_score) {
            (Some(distance), Some(score)) => Ok(Sample {
                features: [distance, score],
                label: listing.category,
            }),
            _ => Err(HotelError::ProcessingError {
                message: format!(
                    "'{}' needs both a distance and a review score for training",
                    listing.title
                ),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoldoutReport {
    pub accuracy: f64,
    pub train_size: usize,
    pub test_size: usize,
}

/// Shuffles `0..n` with `seed` and returns `(train, test)` index sets.
///
/// The test set holds `ceil(n * test_ratio)` rows; both sets must be non-empty.
pub fn train_test_split(n: usize, test_ratio: f64, seed: u64) -> Result<(Vec<usize>, Vec<usize>)> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(HotelError::InvalidConfigValueError {
            field: "classifier.test_ratio".to_string(),
            value: test_ratio.to_string(),
            reason: "Ratio must be strictly between 0 and 1".to_string(),
        });
    }

    let test_size = (n as f64 * test_ratio).ceil() as usize;
    if test_size == 0 || test_size >= n {
        return Err(HotelError::ProcessingError {
            message: format!("{} rows are not enough for a train/test split", n),
        });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(test_size);
    Ok((train, indices))
}

fn encode(label: Category) -> u32 {
    match label {
        Category::Good => 0,
        Category::Superb => 1,
    }
}

fn decode(class: u32) -> Category {
    if class == 1 {
        Category::Superb
    } else {
        Category::Good
    }
}

fn feature_matrix(samples: &[Sample]) -> DenseMatrix<f64> {
    let rows: Vec<Vec<f64>> = samples.iter().map(|s| s.features.to_vec()).collect();
    DenseMatrix::from_2d_vec(&rows)
}

fn forest_parameters(settings: &ClassifierSettings) -> Result<RandomForestClassifierParameters> {
    let trees = u16::try_from(settings.trees)
        .ok()
        .filter(|&t| t > 0)
        .ok_or_else(|| HotelError::InvalidConfigValueError {
            field: "classifier.trees".to_string(),
            value: settings.trees.to_string(),
            reason: format!("Tree count must be between 1 and {}", u16::MAX),
        })?;

    // Both features are candidates at every split.
    let mut params = RandomForestClassifierParameters::default()
        .with_n_trees(trees)
        .with_m(FEATURES)
        .with_min_samples_split(settings.min_samples_split)
        .with_seed(settings.seed);
    if let Some(depth) = settings.max_depth {
        params = params.with_max_depth(u16::try_from(depth).unwrap_or(u16::MAX));
    }
    Ok(params)
}

/// Random forest trained on labeled samples.
pub struct ListingForest {
    model: RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>,
}

impl ListingForest {
    pub fn fit(samples: &[Sample], settings: &ClassifierSettings) -> Result<Self> {
        if samples.is_empty() {
            return Err(HotelError::ProcessingError {
                message: "Cannot train on an empty sample set".to_string(),
            });
        }

        let params = forest_parameters(settings)?;
        let x = feature_matrix(samples);
        let y: Vec<u32> = samples.iter().map(|s| encode(s.label)).collect();

        let model = RandomForestClassifier::fit(&x, &y, params)?;
        Ok(Self { model })
    }

    pub fn predict(&self, samples: &[Sample]) -> Result<Vec<Category>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }
        let predicted = self.model.predict(&feature_matrix(samples))?;
        Ok(predicted.into_iter().map(decode).collect())
    }

    /// Share of `samples` whose label is predicted correctly.
    pub fn accuracy(&self, samples: &[Sample]) -> Result<f64> {
        if samples.is_empty() {
            return Ok(0.0);
        }
        let truth: Vec<u32> = samples.iter().map(|s| encode(s.label)).collect();
        let predicted = self.model.predict(&feature_matrix(samples))?;
        Ok(accuracy(&truth, &predicted))
    }
}

/// Trains on a seeded split of the catalog and scores the held-out rows.
///
/// Rows without both a distance and a review score are left out of training.
pub fn evaluate_holdout(listings: &[Listing], settings: &ClassifierSettings) -> Result<HoldoutReport> {
    let samples: Vec<Sample> = listings
        .iter()
        .filter_map(|listing| match Sample::try_from(listing) {
            Ok(sample) => Some(sample),
            Err(e) => {
                tracing::warn!("Skipping row for training: {}", e);
                None
            }
        })
        .collect();

    let (train_idx, test_idx) = train_test_split(samples.len(), settings.test_ratio, settings.seed)?;
    let train: Vec<Sample> = train_idx.iter().map(|&i| samples[i]).collect();
    let test: Vec<Sample> = test_idx.iter().map(|&i| samples[i]).collect();

    tracing::info!(
        "🌲 Training random forest ({} trees) on {} rows, holding out {}",
        settings.trees,
        train.len(),
        test.len()
    );

    let forest = ListingForest::fit(&train, settings)?;
    let accuracy = forest.accuracy(&test)?;

    tracing::info!("🎯 Holdout accuracy: {:.2}%", accuracy * 100.0);
    Ok(HoldoutReport {
        accuracy,
        train_size: train.len(),
        test_size: test.len(),
    })
}
