//! Scoped SQLite connections and generic table operations.
//!
//! # Intention
//!
//! - Run each unit of work on its own connection and transaction:
//!   commit on success, roll back on failure, always close.
//! - Offer create / insert / select / delete over any table without a
//!   schema declared up front.
//!
//! # Architectural Boundaries
//!
//! - No pooling, caching, migrations or typed row mapping.
//! - Table names and where-clauses are not sanitized; see [`statement`].

pub mod connection;
pub mod error;
pub mod sqlite;
pub mod statement;
pub mod tools;

pub use connection::SqliteConnect;
pub use error::{Result, SqliteError};
pub use sqlite::{Columns, Row, SqliteConfig, Value};
pub use tools::SqliteTools;
