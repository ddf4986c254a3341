//! Error types for the finance ledger.

/// All errors that can occur when using the finance ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key-value storage backend failed.
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// User-supplied amount is not a positive finite number.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
}

/// Convenience alias for results produced by this crate.
pub type Result<T> = core::result::Result<T, LedgerError>;
