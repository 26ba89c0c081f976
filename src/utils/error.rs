use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("{capability} provider failed: {message}")]
    ProviderError { capability: String, message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid activity '{name}': {reason}")]
    InvalidActivityError { name: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Provider,
    Data,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity. Never 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl PlanError {
    pub fn provider(capability: &str, message: impl Into<String>) -> Self {
        PlanError::ProviderError {
            capability: capability.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PlanError::InvalidConfigValueError { .. }
            | PlanError::MissingConfigError { .. }
            | PlanError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            PlanError::ProviderError { .. } | PlanError::HttpError(_) => ErrorCategory::Provider,
            PlanError::InvalidActivityError { .. } | PlanError::SerializationError(_) => {
                ErrorCategory::Data
            }
            PlanError::IoError(_) | PlanError::CsvError(_) | PlanError::ZipError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // a provider may recover on its own; retrying is the caller's call
            ErrorCategory::Provider => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PlanError::InvalidConfigValueError { field, .. } => {
                format!("Check the value of '{}' and try again", field)
            }
            PlanError::MissingConfigError { field } => {
                format!("Provide '{}' on the command line or in the config file", field)
            }
            PlanError::ConfigValidationError { .. } => {
                "Make sure the config file is valid TOML".to_string()
            }
            PlanError::ProviderError { capability, .. } => {
                format!("The {} service may be unavailable; retry later", capability)
            }
            PlanError::HttpError(_) => {
                "Check the places endpoint URL and network connectivity".to_string()
            }
            PlanError::InvalidActivityError { .. } => {
                "The places source returned malformed data; inspect its output".to_string()
            }
            PlanError::SerializationError(_) => "Inspect the JSON payload".to_string(),
            PlanError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            PlanError::CsvError(_) | PlanError::ZipError(_) => {
                "Try a different export format".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Provider => format!("Could not reach a data source: {}", self),
            ErrorCategory::Data => format!("Received unusable activity data: {}", self),
            ErrorCategory::Output => format!("Could not write the plan: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
