pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::TomlConfig;
    use crate::domain::settings::MissingMedianPolicy;
    use crate::utils::error::Result;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    /// Command line flags. Every value set here overrides the config file.
    #[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
    #[command(name = "hotel-popularity")]
    #[command(about = "Shows hotel listings split into Good and Superb by review score")]
    pub struct CliConfig {
        /// Path to the hotel dataset (CSV)
        #[arg(short, long)]
        pub dataset: Option<String>,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Rows shown per category
        #[arg(long)]
        pub top_n: Option<usize>,

        /// Fill distances with 0 km when no value in the column parses
        #[arg(long)]
        pub zero_fill_distance: bool,

        #[arg(long)]
        pub min_review_score: Option<f64>,

        #[arg(long)]
        pub max_review_score: Option<f64>,

        /// Train the random forest and report holdout accuracy
        #[arg(long)]
        pub train: bool,

        #[arg(long)]
        pub trees: Option<usize>,

        #[arg(long)]
        pub seed: Option<u64>,

        /// Export the report as a ZIP archive into this directory
        #[arg(long)]
        pub export: Option<String>,

        /// Add an entry to this session, as "TITLE;DISTANCE;SCORE"
        #[arg(long = "add", value_name = "ENTRY")]
        pub entries: Vec<String>,

        /// Read new entries from standard input after displaying the dataset
        #[arg(short, long)]
        pub interactive: bool,

        #[arg(long, help = "Enable system monitoring")]
        pub monitor: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub json_logs: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Loads the config file (or defaults) and applies the flags on top.
        pub fn resolve(&self) -> Result<TomlConfig> {
            let mut config = match &self.config {
                Some(path) => {
                    tracing::info!("📁 Loading configuration from: {}", path);
                    TomlConfig::from_file(path)?
                }
                None => TomlConfig::default(),
            };
            self.apply_overrides(&mut config);
            Ok(config)
        }

        pub fn apply_overrides(&self, config: &mut TomlConfig) {
            if let Some(dataset) = &self.dataset {
                config.dataset.path = dataset.clone();
            }
            if let Some(top_n) = self.top_n {
                config.display.top_n = top_n;
            }
            if self.zero_fill_distance {
                config.distance.on_empty_column = MissingMedianPolicy::Zero;
            }
            if let Some(min) = self.min_review_score {
                config.validation.min_review_score = min;
            }
            if let Some(max) = self.max_review_score {
                config.validation.max_review_score = max;
            }
            if self.train {
                config.classifier.enabled = true;
            }
            if let Some(trees) = self.trees {
                config.classifier.trees = trees;
            }
            if let Some(seed) = self.seed {
                config.classifier.seed = seed;
            }
            if let Some(export) = &self.export {
                config.export.enabled = true;
                config.export.output_path = Some(export.clone());
            }
            if self.monitor {
                config.monitoring.enabled = true;
            }
        }
    }

}

#[cfg(feature = "cli")]
pub use args::CliConfig;
