use thiserror::Error;

/// Why a dataset load attempt failed, as shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Dataset file '{path}' was not found. Make sure the file exists at the given path.")]
    NotFound { path: String },

    #[error("Dataset file is empty or invalid.")]
    Empty,

    #[error("An error occurred: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum HotelError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Model training failed: {0}")]
    ModelError(#[from] smartcore::error::Failed),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, HotelError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Dataset,
    Configuration,
    Processing,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HotelError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HotelError::Load(_) | HotelError::CsvError(_) => ErrorCategory::Dataset,
            HotelError::ConfigError { .. }
            | HotelError::ConfigValidationError { .. }
            | HotelError::InvalidConfigValueError { .. }
            | HotelError::MissingConfigError { .. } => ErrorCategory::Configuration,
            HotelError::ProcessingError { .. }
            | HotelError::SerializationError(_)
            | HotelError::ModelError(_) => ErrorCategory::Processing,
            HotelError::ValidationError { .. } => ErrorCategory::Input,
            HotelError::IoError(_) | HotelError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HotelError::ValidationError { .. } => ErrorSeverity::Low,
            HotelError::Load(LoadError::NotFound { .. }) | HotelError::Load(LoadError::Empty) => {
                ErrorSeverity::Medium
            }
            HotelError::IoError(_) | HotelError::ZipError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            HotelError::Load(LoadError::NotFound { .. }) => {
                "Check the --dataset path or the [dataset] path entry in the config file"
            }
            HotelError::Load(LoadError::Empty) | HotelError::CsvError(_) => {
                "Make sure the dataset is a CSV file with a header row"
            }
            HotelError::Load(LoadError::Other(_)) => {
                "Inspect the dataset columns (Title, Distance, Review_Score)"
            }
            HotelError::ConfigError { .. }
            | HotelError::ConfigValidationError { .. }
            | HotelError::InvalidConfigValueError { .. }
            | HotelError::MissingConfigError { .. } => "Fix the configuration value and retry",
            HotelError::ValidationError { .. } => {
                "Make sure every input is valid and not empty"
            }
            HotelError::ProcessingError { .. } | HotelError::SerializationError(_) => {
                "Run again with --verbose to see which step failed"
            }
            HotelError::ModelError(_) => {
                "Check that the catalog holds both Good and Superb rows with distances and scores"
            }
            HotelError::IoError(_) | HotelError::ZipError(_) => {
                "Check file permissions and available disk space"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HotelError::Load(e) => e.to_string(),
            HotelError::ValidationError { message } => format!("Invalid input: {}", message),
            other => other.load_error().to_string(),
        }
    }

    /// Collapses any failure into the three kinds a load attempt reports.
    pub fn load_error(&self) -> LoadError {
        match self {
            HotelError::Load(e) => e.clone(),
            HotelError::CsvError(_) => LoadError::Empty,
            other => LoadError::Other(other.to_string()),
        }
    }
}
