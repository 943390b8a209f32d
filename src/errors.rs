use std::fmt;

/// Errors raised by the caller-owned lead state and the wire decoder.
///
/// The prioritization engine itself never fails: a malformed timestamp
/// degrades to a fallback instead of surfacing here.
#[derive(Debug, Clone, PartialEq)]
pub enum CrmError {
    /// Lead (or other record) not found.
    NotFound(String),
    /// Input rejected before it reached the lead book.
    BadRequest(String),
    /// Lead list payload could not be decoded.
    Parse(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<CrmError>,
        /// Additional context message.
        context: String,
    },
}

impl CrmError {
    /// Walks the context chain down to the originating error.
    pub fn root_cause(&self) -> &CrmError {
        match self {
            CrmError::WithContext { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl fmt::Display for CrmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrmError::NotFound(msg) => write!(f, "Not found: {}", msg),
            CrmError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            CrmError::Parse(msg) => write!(f, "Parse error: {}", msg),
            CrmError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for CrmError {}

impl From<serde_json::Error> for CrmError {
    /// Converts a `serde_json::Error` into a `CrmError`.
    fn from(err: serde_json::Error) -> Self {
        CrmError::Parse(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `CrmError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, CrmError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, CrmError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, CrmError> {
    fn context(self, context: impl Into<String>) -> Result<T, CrmError> {
        self.map_err(|e| CrmError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, CrmError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| CrmError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}
