/// Centralized error types for repo-render using thiserror
///
/// Per-file problems never show up here: they are recorded as an
/// `InclusionDecision` on the file itself. These types cover whole-run failures.
use thiserror::Error;

/// Main error type for the renderer
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Whole-tree failures from the walker
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Root directory does not exist: {0}")]
    RootNotFound(String),

    #[error("Root path is not a directory: {0}")]
    NotADirectory(String),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

/// Errors related to input validation
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid GitHub URL: {0}")]
    InvalidGithubUrl(String),

    #[error("Invalid repository path: {0}")]
    InvalidRepoPath(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

impl From<anyhow::Error> for RenderError {
    fn from(err: anyhow::Error) -> Self {
        RenderError::Other(format!("{:#}", err))
    }
}

impl RenderError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        RenderError::Other(msg.into())
    }

    /// Convert to a user-facing error string
    pub fn to_user_string(&self) -> String {
        format!("{}", self)
    }

    /// Check if this is a user error (bad input) vs system error
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RenderError::Validation(_)
                | RenderError::Config(ConfigError::InvalidValue { .. })
                | RenderError::Scan(ScanError::RootNotFound(_) | ScanError::NotADirectory(_))
        )
    }
}
