use std::path::Path;

use rusqlite::{params_from_iter, Batch, Connection, Statement};
use tracing::debug;

use crate::connection::SqliteConnect;
use crate::error::Result;
use crate::sqlite::{Columns, Row, SqliteConfig, Value};
use crate::statement;

/// Prepare `sql`, failing with `MultipleStatement` if anything but
/// whitespace or comments follows the first statement.
fn prepare_single<'c>(conn: &'c Connection, sql: &str) -> rusqlite::Result<Statement<'c>> {
    let mut batch = Batch::new(conn, sql);
    let Some(stmt) = batch.next()? else {
        return conn.prepare(sql);
    };
    if batch.next()?.is_some() {
        return Err(rusqlite::Error::MultipleStatement);
    }
    Ok(stmt)
}

/// Create, insert, select and delete against one database file.
///
/// Each call is its own scope on [`SqliteConnect`]: open, execute, commit or
/// roll back, close. Table names and where-clauses are executed as written
/// (see [`crate::statement`]).
#[derive(Debug, Clone)]
pub struct SqliteTools {
    sqlite_conn: SqliteConnect,
}

impl SqliteTools {
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            sqlite_conn: SqliteConnect::new(db_path),
        }
    }

    pub fn from_config(config: SqliteConfig) -> Self {
        Self::new(config.db_path)
    }

    pub fn path(&self) -> &Path {
        self.sqlite_conn.path()
    }

    /// The underlying scope provider, for work the four operations don't cover.
    pub fn connect(&self) -> &SqliteConnect {
        &self.sqlite_conn
    }

    /// Create `table` with an autoincrementing `id` followed by `columns`.
    ///
    /// Does nothing if a table with that name already exists, whatever its
    /// columns are.
    pub fn create(&self, table: &str, columns: &Columns) -> Result<()> {
        let sql = statement::create_table(table, columns);
        self.sqlite_conn.connection(|conn| {
            debug!(sql = %sql, "create");
            prepare_single(conn, &sql)?.execute([])?;
            Ok(())
        })
    }

    /// Insert every row in order, all in one transaction.
    ///
    /// If any row fails, none of the batch is kept.
    pub fn insert(&self, table: &str, rows: &[Row]) -> Result<()> {
        self.sqlite_conn.connection(|conn| {
            for row in rows {
                let sql = statement::insert(table, row);
                debug!(sql = %sql, "insert");
                prepare_single(conn, &sql)?
                    .execute(params_from_iter(row.values.iter().map(|(_, value)| value)))?;
            }
            Ok(())
        })
    }

    /// Every row of `table` matching `where_clause` (all rows when empty).
    ///
    /// Values come back in the table's column order, `id` first.
    pub fn select(&self, table: &str, where_clause: &str) -> Result<Vec<Vec<Value>>> {
        let sql = statement::select(table, where_clause);
        self.sqlite_conn.connection(|conn| {
            debug!(sql = %sql, "select");
            let mut stmt = prepare_single(conn, &sql)?;
            let width = stmt.column_count();
            let rows = stmt.query_map([], |row| {
                (0..width)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?;
            let mut result = Vec::new();
            for row in rows {
                result.push(row?);
            }
            Ok(result)
        })
    }

    /// Delete rows of `table` matching `where_clause`.
    ///
    /// An empty clause deletes every row.
    pub fn delete(&self, table: &str, where_clause: &str) -> Result<()> {
        let sql = statement::delete(table, where_clause);
        self.sqlite_conn.connection(|conn| {
            debug!(sql = %sql, "delete");
            prepare_single(conn, &sql)?.execute([])?;
            Ok(())
        })
    }
}
