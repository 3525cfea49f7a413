use crate::utils::error::{HotelError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(HotelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(HotelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(HotelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension) => Ok(()),
        Some(extension) => Err(HotelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(HotelError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| HotelError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HotelError::ValidationError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

/// Inclusive range check. NaN is always out of range.
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(HotelError::ValidationError {
            message: format!("{} must be between {} and {} (got {})", field_name, min, max, value),
        });
    }
    Ok(())
}

pub fn validate_min(field_name: &str, value: f64, min: f64) -> Result<()> {
    if !(value >= min) || !value.is_finite() {
        return Err(HotelError::ValidationError {
            message: format!("{} must be a number of at least {} (got {})", field_name, min, value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("dataset.path", "data/hotels.csv").is_ok());
        assert!(validate_path("dataset.path", "").is_err());
        assert!(validate_path("dataset.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("display.top_n", 5, 1).is_ok());
        assert!(validate_positive_number("display.top_n", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("dataset.path", "hotels.csv", &["csv"]).is_ok());
        assert!(validate_file_extension("dataset.path", "hotels.xlsx", &["csv"]).is_err());
        assert!(validate_file_extension("dataset.path", "hotels", &["csv"]).is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("review_score", 8.6, 1.0, 10.0).is_ok());
        assert!(validate_range("review_score", 10.0, 1.0, 10.0).is_ok());
        assert!(validate_range("review_score", 0.5, 1.0, 10.0).is_err());
        assert!(validate_range("review_score", f64::NAN, 1.0, 10.0).is_err());
    }

    #[test]
    fn test_validate_min() {
        assert!(validate_min("distance", 0.0, 0.0).is_ok());
        assert!(validate_min("distance", -0.1, 0.0).is_err());
        assert!(validate_min("distance", f64::INFINITY, 0.0).is_err());
    }
}
