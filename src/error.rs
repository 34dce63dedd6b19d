//! Error types for the sqlite_tools crate.
//!
//! Every failure (opening the file, a bad statement, a constraint
//! violation, commit or rollback) lands in the same [`SqliteError`]
//! category and is handed back to the caller as-is.

use thiserror::Error;

/// Alias for `Result<T, SqliteError>`.
pub type Result<T> = std::result::Result<T, SqliteError>;

/// A database operation failed.
#[derive(Debug, Error)]
pub enum SqliteError {
    /// SQLite reported an error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
