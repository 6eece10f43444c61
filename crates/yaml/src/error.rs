use thiserror::Error;

/// Result type for YAML tree operations
pub type Result<T> = std::result::Result<T, YamlError>;

/// Errors that can occur while reading a YAML stream
#[derive(Error, Debug)]
pub enum YamlError {
    /// The scanner or parser rejected the input
    #[error("YAML parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// An alias referenced an anchor that was never defined
    #[error("YAML alias at line {line} refers to an unknown anchor")]
    UnknownAnchor { line: usize },

    /// Alias expansion grew the document past the node limit
    #[error("YAML aliases at line {line} expand to more than {limit} nodes")]
    AliasLimit { line: usize, limit: usize },

    /// The event stream ended in the middle of a node
    #[error("Unexpected end of YAML stream: {0}")]
    Truncated(String),
}

impl YamlError {
    /// Create a parse error at the given location
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a truncated-stream error
    pub fn truncated(msg: impl Into<String>) -> Self {
        Self::Truncated(msg.into())
    }
}
