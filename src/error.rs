use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the mock, and the errors tests inject as canned responses.
///
/// `Clone` so a canned error can be handed back on every matching call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Resource not found: {kind} {name} in namespace {namespace}")]
    NotFound {
        kind: String,
        name: String,
        namespace: String,
    },

    #[error("Resource already exists: {kind} {name} in namespace {namespace}")]
    AlreadyExists {
        kind: String,
        name: String,
        namespace: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Failed to access object metadata: {0}")]
    MetadataError(String),

    /// A failed command that still produced output, as kubectl does when it
    /// applies part of a manifest before erroring.
    #[error("{source}")]
    WithOutput { output: String, source: Box<Error> },
}

impl Error {
    /// Output the failed command produced, if any
    pub fn output(&self) -> Option<&str> {
        match self {
            Error::WithOutput { output, .. } => Some(output),
            _ => None,
        }
    }

    /// The error without any attached output
    pub fn without_output(&self) -> &Error {
        match self {
            Error::WithOutput { source, .. } => source.without_output(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
