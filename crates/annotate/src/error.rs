use thiserror::Error;

/// Result type for annotation operations
pub type Result<T> = std::result::Result<T, AnnotateError>;

/// Errors that make a document impossible to annotate.
///
/// Ownership paths that do not resolve are never errors; they end up in the
/// [`AnnotationReport`](crate::AnnotationReport) instead.
#[derive(Error, Debug)]
pub enum AnnotateError {
    /// The document is not a Kubernetes-style object
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// `metadata.managedFields` has an unexpected shape
    #[error("Invalid managedFields: {0}")]
    InvalidManagedFields(String),

    /// A ledger entry carries a `time` that is not RFC 3339
    #[error("Invalid time {value:?} in managedFields entry {index}: {source}")]
    InvalidTime {
        index: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl AnnotateError {
    /// Create an invalid document error
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }

    /// Create an invalid managedFields error
    pub fn invalid_managed_fields(msg: impl Into<String>) -> Self {
        Self::InvalidManagedFields(msg.into())
    }
}
