use std::io;
use thiserror::Error;

/// Custom error type for the enrichment engine
#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("SNMP walk of {oid} failed: {reason}")]
    Walk { oid: String, reason: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Enrichment set rejected: {0}")]
    Emission(String),
}

/// Result type alias for the enrichment engine
pub type Result<T> = std::result::Result<T, EnrichError>;

impl EnrichError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        EnrichError::Config(msg.into())
    }

    /// Create a walk error for the given subtree
    pub fn walk<O: Into<String>, S: Into<String>>(oid: O, reason: S) -> Self {
        EnrichError::Walk {
            oid: oid.into(),
            reason: reason.into(),
        }
    }

    /// Create an emission error
    pub fn emission<S: Into<String>>(msg: S) -> Self {
        EnrichError::Emission(msg.into())
    }
}
