use crate::core::ConfigProvider;
use crate::domain::settings::{
    ClassifierSettings, EntryRules, MissingMedianPolicy, DEFAULT_MAX_REVIEW_SCORE,
    DEFAULT_MIN_REVIEW_SCORE, DEFAULT_TOP_N,
};
use crate::utils::error::{HotelError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_path, validate_positive_number, validate_required_field,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_DATASET_PATH: &str = "data/hotel_mumbai.csv";

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub dataset: DatasetConfig,
    pub display: DisplayConfig,
    pub distance: DistanceConfig,
    pub validation: ValidationConfig,
    pub classifier: ClassifierConfig,
    pub export: ExportConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATASET_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub top_n: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceConfig {
    pub on_empty_column: MissingMedianPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub min_review_score: f64,
    pub max_review_score: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_review_score: DEFAULT_MIN_REVIEW_SCORE,
            max_review_score: DEFAULT_MAX_REVIEW_SCORE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub enabled: bool,
    pub trees: usize,
    pub max_depth: Option<usize>,
    pub test_ratio: f64,
    pub seed: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let defaults = ClassifierSettings::default();
        Self {
            enabled: false,
            trees: defaults.trees,
            max_depth: defaults.max_depth,
            test_ratio: defaults.test_ratio,
            seed: defaults.seed,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub enabled: bool,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HotelError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| HotelError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATASET_PATH})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("dataset.path", &self.dataset.path)?;
        validate_file_extension("dataset.path", &self.dataset.path, &["csv"])?;
        validate_positive_number("display.top_n", self.display.top_n, 1)?;

        let (min, max) = (
            self.validation.min_review_score,
            self.validation.max_review_score,
        );
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(HotelError::InvalidConfigValueError {
                field: "validation".to_string(),
                value: format!("[{}, {}]", min, max),
                reason: "Review score bounds must be finite with min <= max".to_string(),
            });
        }

        if self.classifier.enabled {
            validate_positive_number("classifier.trees", self.classifier.trees, 1)?;
            let ratio = self.classifier.test_ratio;
            if !(ratio > 0.0 && ratio < 1.0) {
                return Err(HotelError::InvalidConfigValueError {
                    field: "classifier.test_ratio".to_string(),
                    value: ratio.to_string(),
                    reason: "Ratio must be strictly between 0 and 1".to_string(),
                });
            }
        }

        if self.export.enabled {
            let output = validate_required_field("export.output_path", &self.export.output_path)?;
            validate_path("export.output_path", output)?;
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }
}

impl ConfigProvider for TomlConfig {
    fn dataset_path(&self) -> &str {
        &self.dataset.path
    }

    fn top_n(&self) -> usize {
        self.display.top_n
    }

    fn missing_median_policy(&self) -> MissingMedianPolicy {
        self.distance.on_empty_column
    }

    fn entry_rules(&self) -> EntryRules {
        EntryRules {
            min_review_score: self.validation.min_review_score,
            max_review_score: self.validation.max_review_score,
            ..EntryRules::default()
        }
    }

    fn classifier(&self) -> Option<ClassifierSettings> {
        self.classifier.enabled.then(|| ClassifierSettings {
            trees: self.classifier.trees,
            max_depth: self.classifier.max_depth,
            test_ratio: self.classifier.test_ratio,
            seed: self.classifier.seed,
            ..ClassifierSettings::default()
        })
    }

    fn export_path(&self) -> Option<&str> {
        if self.export.enabled {
            self.export.output_path.as_deref()
        } else {
            None
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[dataset]
path = "data/hotels.csv"

[display]
top_n = 5

[distance]
on_empty_column = "zero"

[validation]
min_review_score = 7.0
max_review_score = 10.0

[classifier]
enabled = true
trees = 25
max_depth = 6
test_ratio = 0.25
seed = 7

[export]
enabled = true
output_path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.dataset_path(), "data/hotels.csv");
        assert_eq!(config.top_n(), 5);
        assert_eq!(config.missing_median_policy(), MissingMedianPolicy::Zero);
        assert_eq!(config.entry_rules().min_review_score, 7.0);

        let classifier = config.classifier().unwrap();
        assert_eq!(classifier.trees, 25);
        assert_eq!(classifier.max_depth, Some(6));
        assert_eq!(classifier.seed, 7);

        assert_eq!(config.export_path(), Some("./output"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.dataset_path(), DEFAULT_DATASET_PATH);
        assert_eq!(config.top_n(), 10);
        assert_eq!(config.missing_median_policy(), MissingMedianPolicy::Fail);
        assert_eq!(config.entry_rules(), EntryRules::default());
        assert!(config.classifier().is_none());
        assert!(config.export_path().is_none());
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HOTEL_TEST_DATASET", "fixtures/hotels.csv");

        let toml_content = r#"
[dataset]
path = "${HOTEL_TEST_DATASET}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.dataset.path, "fixtures/hotels.csv");

        std::env::remove_var("HOTEL_TEST_DATASET");
    }

    #[test]
    fn test_config_validation() {
        let bad_bounds = TomlConfig::from_toml_str(
            "[validation]\nmin_review_score = 9.0\nmax_review_score = 2.0\n",
        )
        .unwrap();
        assert!(bad_bounds.validate().is_err());

        let bad_extension = TomlConfig::from_toml_str("[dataset]\npath = \"hotels.xlsx\"\n").unwrap();
        assert!(bad_extension.validate().is_err());

        let export_without_path = TomlConfig::from_toml_str("[export]\nenabled = true\n").unwrap();
        assert!(matches!(
            export_without_path.validate(),
            Err(HotelError::MissingConfigError { .. })
        ));

        let bad_ratio =
            TomlConfig::from_toml_str("[classifier]\nenabled = true\ntest_ratio = 1.5\n").unwrap();
        assert!(bad_ratio.validate().is_err());
    }

    #[test]
    fn test_invalid_policy_fails_to_parse() {
        let err = TomlConfig::from_toml_str("[distance]\non_empty_column = \"mean\"\n").unwrap_err();
        assert!(matches!(err, HotelError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[display]\ntop_n = 3\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.top_n(), 3);
    }
}
