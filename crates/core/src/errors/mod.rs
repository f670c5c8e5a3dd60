//! Error types and Result alias for the QRcade reward library

use thiserror::Error;

/// Main error type for the reward library
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Loot box not found or already opened")]
    LootBoxUnavailable,

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Store item not found: {0}")]
    ItemNotFound(i64),

    #[error("Unknown rarity tier: {0}")]
    UnknownRarity(String),

    #[error("Unknown boost type: {0}")]
    UnknownBoostType(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
