//! Error types for HoloCard

use thiserror::Error;

/// Main error type for HoloCard operations
#[derive(Error, Debug)]
pub enum CardError {
    /// Card slug does not exist on the API
    #[error("Card not found: {0}")]
    CardNotFound(String),

    /// Card exists but is inactive, private or missing its name
    #[error("Card not public: {0}")]
    CardNotPublic(String),

    /// Platform has no install prompt API
    #[error("Platform does not support install prompts")]
    PlatformUnsupported,

    /// Install prompt requested while no deferred handle is held
    #[error("No install prompt available")]
    PromptUnavailable,

    /// A platform call (install prompt, resource creation) failed
    #[error("Platform error: {0}")]
    Platform(String),

    /// Error during key-value storage operations
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database creation/opening error
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// Transaction error
    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// Table error
    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    /// Storage operation error
    #[error("Storage operation error: {0}")]
    StorageOp(#[from] redb::StorageError),

    /// Commit error
    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport error talking to the card API
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Unexpected HTTP status from the card API
    #[error("API error: HTTP {status}")]
    Api { status: u16 },

    /// A URL could not be parsed or joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration file is unreadable or malformed
    #[error("Config error: {0}")]
    Config(String),

    /// Log subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using CardError
pub type CardResult<T> = Result<T, CardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CardError::CardNotFound("ana-ruiz".to_string());
        assert_eq!(format!("{}", err), "Card not found: ana-ruiz");
        assert_eq!(
            CardError::Api { status: 502 }.to_string(),
            "API error: HTTP 502"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let card_err: CardError = io_err.into();
        assert!(matches!(card_err, CardError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let card_err: CardError = json_err.into();
        assert!(matches!(card_err, CardError::Serialization(_)));
    }
}
