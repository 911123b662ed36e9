use thiserror::Error;

/// Unified error type for version resolution.
#[derive(Error, Debug)]
pub enum ScmVersionError {
    #[error("SCM query failed: {0}")]
    ScmQuery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in scm-version
pub type Result<T> = std::result::Result<T, ScmVersionError>;

impl ScmVersionError {
    /// Create an SCM query error with context
    pub fn scm_query(msg: impl Into<String>) -> Self {
        ScmVersionError::ScmQuery(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ScmVersionError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ScmVersionError::Version(msg.into())
    }
}
