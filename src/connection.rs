//! Scoped connections: one fresh handle and one transaction per unit of work.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;

/// Opens a connection to one database file for each unit of work.
///
/// Nothing is cached between calls: every [`SqliteConnect::connection`]
/// opens the file, runs the work inside a transaction and closes the handle
/// before returning.
#[derive(Debug, Clone)]
pub struct SqliteConnect {
    db_path: PathBuf,
}

impl SqliteConnect {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Run `work` against a fresh connection inside a transaction.
    ///
    /// Commits when `work` returns `Ok`. When it returns `Err`, the
    /// transaction is rolled back and that same error is returned. A failing
    /// commit or rollback is returned instead. The handle is closed on every
    /// path.
    ///
    /// ```ignore
    /// let count: i64 = connect.connection(|conn| {
    ///     Ok(conn.query_row("SELECT count(*) FROM ORDERS", [], |row| row.get(0))?)
    /// })?;
    /// ```
    pub fn connection<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        debug!(path = %self.db_path.display(), "opening connection");
        let mut conn = Connection::open(&self.db_path)?;

        match Self::in_transaction(&mut conn, work) {
            Ok(value) => {
                conn.close().map_err(|(_, err)| err)?;
                Ok(value)
            }
            Err(err) => {
                // Dropping closes the handle; the failure from the scope wins.
                drop(conn);
                Err(err)
            }
        }
    }

    fn in_transaction<T, F>(conn: &mut Connection, work: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let tx = conn.transaction()?;
        match work(&tx) {
            Ok(value) => {
                debug!("committing");
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                debug!("rolling back");
                tx.rollback()?;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SqliteError;

    fn count(connect: &SqliteConnect) -> i64 {
        connect
            .connection(|conn| {
                Ok(conn.query_row("SELECT count(*) FROM items", [], |row| row.get(0))?)
            })
            .unwrap()
    }

    fn setup() -> (SqliteConnect, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let connect = SqliteConnect::new(dir.path().join("scope.db"));
        connect
            .connection(|conn| {
                conn.execute("CREATE TABLE items (name TEXT)", [])?;
                Ok(())
            })
            .unwrap();
        (connect, dir)
    }

    #[test]
    fn commits_on_success() {
        let (connect, _dir) = setup();
        connect
            .connection(|conn| {
                conn.execute("INSERT INTO items VALUES ('a')", [])?;
                Ok(())
            })
            .unwrap();
        assert_eq!(count(&connect), 1);
    }

    #[test]
    fn rolls_back_and_returns_the_scope_error() {
        let (connect, _dir) = setup();
        let result: Result<()> = connect.connection(|conn| {
            conn.execute("INSERT INTO items VALUES ('a')", [])?;
            conn.execute("INSERT INTO missing VALUES ('b')", [])?;
            Ok(())
        });

        let err = result.unwrap_err();
        assert!(err.to_string().contains("no such table: missing"), "{err}");
        assert_eq!(count(&connect), 0);
    }

    #[test]
    fn caller_error_passes_through_unchanged() {
        let (connect, _dir) = setup();
        let result: Result<()> = connect.connection(|conn| {
            conn.execute("INSERT INTO items VALUES ('a')", [])?;
            Err(SqliteError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
        });

        assert!(matches!(
            result,
            Err(SqliteError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
        ));
        assert_eq!(count(&connect), 0);
    }

    #[test]
    fn each_scope_sees_earlier_commits() {
        let (connect, _dir) = setup();
        for name in ["a", "b", "c"] {
            connect
                .connection(|conn| {
                    conn.execute("INSERT INTO items VALUES (?1)", [name])?;
                    Ok(())
                })
                .unwrap();
        }
        assert_eq!(count(&connect), 3);
    }

    #[test]
    fn open_failure_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let connect = SqliteConnect::new(dir.path().join("no/such/dir/x.db"));
        let result = connect.connection(|_| Ok(()));
        assert!(matches!(result, Err(SqliteError::Sqlite(_))));
    }
}
