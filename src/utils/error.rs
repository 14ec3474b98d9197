use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForumError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Upstream returned status {status} for {url}")]
    UpstreamStatusError { status: u16, url: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("{entity} not found: {id}")]
    NotFoundError { entity: String, id: String },

    #[error("User has already voted on this {parent}")]
    DuplicateVoteError { parent: String },

    #[error("Username already taken by another user: {username}")]
    UsernameTakenError { username: String },

    #[error("Store is read-only: {message}")]
    ReadOnlyStoreError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ForumError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ForumError::ApiError(_) | ForumError::UpstreamStatusError { .. } => {
                ErrorCategory::Network
            }
            ForumError::CsvError(_)
            | ForumError::IoError(_)
            | ForumError::SerializationError(_)
            | ForumError::ReadOnlyStoreError { .. } => ErrorCategory::Storage,
            ForumError::ConfigError { .. }
            | ForumError::ConfigValidationError { .. }
            | ForumError::InvalidConfigValueError { .. }
            | ForumError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ForumError::ValidationError { .. }
            | ForumError::NotFoundError { .. }
            | ForumError::DuplicateVoteError { .. }
            | ForumError::UsernameTakenError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ForumError::DuplicateVoteError { .. } | ForumError::UsernameTakenError { .. } => {
                ErrorSeverity::Low
            }
            ForumError::ApiError(_) | ForumError::UpstreamStatusError { .. } => {
                ErrorSeverity::Medium
            }
            ForumError::ValidationError { .. }
            | ForumError::NotFoundError { .. }
            | ForumError::ReadOnlyStoreError { .. }
            | ForumError::CsvError(_)
            | ForumError::SerializationError(_) => ErrorSeverity::High,
            ForumError::IoError(_)
            | ForumError::ConfigError { .. }
            | ForumError::ConfigValidationError { .. }
            | ForumError::InvalidConfigValueError { .. }
            | ForumError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ForumError::ApiError(_) | ForumError::UpstreamStatusError { .. } => {
                "Check that the forum service is running and the endpoint is reachable".to_string()
            }
            ForumError::IoError(_) => {
                "Check that the store file exists and is readable/writable".to_string()
            }
            ForumError::SerializationError(_) | ForumError::CsvError(_) => {
                "The store file may be corrupted; verify it is valid JSON".to_string()
            }
            ForumError::ConfigError { .. }
            | ForumError::ConfigValidationError { .. }
            | ForumError::InvalidConfigValueError { .. }
            | ForumError::MissingConfigError { .. } => {
                "Review the command line flags or the TOML configuration file".to_string()
            }
            ForumError::ValidationError { .. } => {
                "Provide non-empty values for every required field".to_string()
            }
            ForumError::NotFoundError { entity, .. } => {
                format!("List existing records to find a valid {} id", entity.to_lowercase())
            }
            ForumError::DuplicateVoteError { .. } => {
                "Each user can vote once per question or answer".to_string()
            }
            ForumError::UsernameTakenError { .. } => "Pick a different username".to_string(),
            ForumError::ReadOnlyStoreError { .. } => {
                "Use a file or memory store for write operations".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the forum service: {}", self),
            ErrorCategory::Storage => format!("Could not access the forum store: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ForumError>;
