use thiserror::Error;

use crate::config::error::ConfigError;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

/// Application-wide error type for everything outside the dispatcher boundary.
///
/// Dispatchers never return this type: their failures are folded into
/// `DispatchResult::Failed`. `AppError` covers request validation, configuration,
/// the gateway management commands and unexpected failures in the binary.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Several validation errors collected by `validator`
    #[error("Validation failed: {}", format_field_errors(.errors))]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Error returned by an upstream SMS gateway
    #[error("{gateway} gateway error: {message}")]
    ExternalApi {
        gateway: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

fn format_field_errors(errors: &[ValidationFieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = error.field().unwrap_or("settings").to_string();
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut collected: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| ValidationFieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        // HashMap iteration order is unstable
        collected.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: collected }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "Message cannot be empty"))]
        message: String,
        #[validate(length(min = 1))]
        phone_numbers: Vec<String>,
    }

    #[test]
    fn test_validation_errors_conversion_sorted_with_messages() {
        let form = Form {
            message: String::new(),
            phone_numbers: vec![],
        };
        let err: AppError = form.validate().unwrap_err().into();

        match err {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "message");
                assert_eq!(errors[0].message, "Message cannot be empty");
                assert_eq!(errors[1].field, "phone_numbers");
                assert_eq!(errors[1].message, "length");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_errors_display() {
        let err = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "endpoint".to_string(),
                message: "must be a URL".to_string(),
            }],
        };
        assert_eq!(err.to_string(), "Validation failed: endpoint: must be a URL");
    }

    #[test]
    fn test_config_error_conversion_keeps_field() {
        let err: AppError = ConfigError::validation("http.timeout_seconds", "must be positive").into();
        assert!(matches!(err, AppError::Configuration { key, .. } if key == "http.timeout_seconds"));
    }
}
