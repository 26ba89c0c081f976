use crate::utils::error::{PlanError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PlanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PlanError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PlanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PlanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PlanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(PlanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Rejects NaN, infinities and negative amounts.
pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PlanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite, non-negative number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PlanError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_iso_datetime(field_name: &str, value: &str) -> Result<()> {
    let parsed = chrono::DateTime::parse_from_rfc3339(value)
        .map(|_| ())
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").map(|_| ()));

    parsed.map_err(|e| PlanError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Expected an ISO-8601 date-time: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("places.endpoint", "https://example.com").is_ok());
        assert!(validate_url("places.endpoint", "http://example.com").is_ok());
        assert!(validate_url("places.endpoint", "").is_err());
        assert!(validate_url("places.endpoint", "invalid-url").is_err());
        assert!(validate_url("places.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("planner.max_items", 3, 1).is_ok());
        assert!(validate_positive_number("planner.max_items", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("max_cost", 0.0).is_ok());
        assert!(validate_non_negative("max_cost", 30.0).is_ok());
        assert!(validate_non_negative("max_cost", -1.0).is_err());
        assert!(validate_non_negative("max_cost", f64::NAN).is_err());
        assert!(validate_non_negative("max_cost", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_iso_datetime() {
        assert!(validate_iso_datetime("input.datetime", "2025-11-01T19:00:00").is_ok());
        assert!(validate_iso_datetime("input.datetime", "2025-11-01T19:00:00-07:00").is_ok());
        assert!(validate_iso_datetime("input.datetime", "tomorrow evening").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("Ashland, OR".to_string());
        let missing: Option<String> = None;
        assert_eq!(
            validate_required_field("input.location", &present).unwrap(),
            "Ashland, OR"
        );
        assert!(matches!(
            validate_required_field("input.location", &missing),
            Err(PlanError::MissingConfigError { .. })
        ));
    }
}
