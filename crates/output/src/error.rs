use thiserror::Error;

/// Result type for output formatting
pub type Result<T> = std::result::Result<T, OutputError>;

/// Errors that can occur while post-processing rendered YAML
#[derive(Error, Debug)]
pub enum OutputError {
    /// Invalid alignment configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl OutputError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
