use thiserror::Error;

#[derive(Error, Debug)]
pub enum MeetError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Could not resolve origin '{origin}' for participant '{participant}'")]
    UnresolvedAddress { participant: String, origin: String },

    #[error("Address resolver failed: {message}")]
    ResolverError { message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Resolution,
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MeetError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        MeetError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MeetError::InvalidInput { .. } => ErrorCategory::Input,
            MeetError::UnresolvedAddress { .. } | MeetError::ResolverError { .. } => {
                ErrorCategory::Resolution
            }
            MeetError::HttpError(_) => ErrorCategory::Network,
            MeetError::CsvError(_) | MeetError::SerializationError(_) => ErrorCategory::Data,
            MeetError::IoError(_) => ErrorCategory::System,
            MeetError::ConfigError { .. }
            | MeetError::ConfigValidationError { .. }
            | MeetError::InvalidConfigValueError { .. }
            | MeetError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Resolution => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 只有網路層面的暫時性錯誤值得重試
    pub fn is_retryable(&self) -> bool {
        match self {
            MeetError::HttpError(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().map(|s| s.is_server_error()).unwrap_or(false)
            }
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MeetError::InvalidInput { .. } => {
                "Provide at least two participants with unique names and valid coordinates"
            }
            MeetError::UnresolvedAddress { .. } => {
                "Check the spelling of the origin or pass explicit coordinates as LAT,LNG"
            }
            MeetError::ResolverError { .. } | MeetError::HttpError(_) => {
                "Check network access and the resolver endpoint, then try again"
            }
            MeetError::CsvError(_) => {
                "Check the venue catalog CSV columns: label,lat,lng,venue_type,features"
            }
            MeetError::SerializationError(_) => "Check that the request is valid JSON",
            MeetError::IoError(_) => "Check that the file exists and is readable",
            MeetError::MissingConfigError { .. } => {
                "Add the missing field to the configuration file or environment"
            }
            MeetError::ConfigError { .. }
            | MeetError::ConfigValidationError { .. }
            | MeetError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MeetError::InvalidInput { message } => format!("Invalid request: {}", message),
            MeetError::UnresolvedAddress {
                participant,
                origin,
            } => format!(
                "We could not find where '{}' is starting from ('{}')",
                participant, origin
            ),
            MeetError::ResolverError { .. } | MeetError::HttpError(_) => {
                "The address lookup service is unavailable right now".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MeetError>;
