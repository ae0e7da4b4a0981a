//! Error types for pagination calls

use thiserror::Error;

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pagination calls
///
/// Parameter parsing never produces an error: malformed `page`, `rows`, and
/// range values degrade to defaults so user-supplied input cannot abort a
/// request. The variants below cover the failures that *must* reach the
/// caller.
#[derive(Debug, Error)]
pub enum Error {
    /// A storage driver failed while executing `find` or `count`
    #[error("driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A record could not be serialized while reading cursor fields
    #[error("record serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a backend error as a driver failure
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagekit::error::Error;
    ///
    /// let err = Error::driver("storage unreachable");
    /// assert_eq!(err.to_string(), "driver error: storage unreachable");
    /// ```
    pub fn driver(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Driver(err.into())
    }
}
