//! Persistence layer for the sauna front desk
//!
//! Provides:
//! - The `Store` port: three named JSON entries (customers, packages, lockers)
//! - SQLite and in-memory implementations
//! - Export/import codec for backup files

mod memory;
mod sqlite;
mod traits;
mod transfer;

pub use memory::*;
pub use sqlite::*;
pub use traits::*;
pub use transfer::*;

use sauna_util::DeskError;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<StoreError> for DeskError {
    fn from(e: StoreError) -> Self {
        DeskError::store(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
