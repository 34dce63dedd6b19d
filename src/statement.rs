//! SQL text for the table operations.
//!
//! Table names, column names, column types and where-clauses are pasted
//! into the statement text verbatim. Nothing here quotes, escapes or
//! validates them, so adversarial input is executed as written. Only row
//! values are bound as parameters (see [`insert`]). Text that turns into a
//! second statement is refused when it is prepared, not here.
//!
//! All identifier and predicate pasting goes through [`interpolate`]; a
//! hardened builder (identifier allow-list, quoting) replaces that one
//! function.

use crate::sqlite::{Columns, Row};

/// UNSANITIZED: substitutes each `{}` in `template` with the next fragment.
fn interpolate(template: &str, fragments: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut fragments = fragments.iter();
    let mut pieces = template.split("{}");
    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    for piece in pieces {
        if let Some(fragment) = fragments.next() {
            out.push_str(fragment);
        }
        out.push_str(piece);
    }
    out
}

/// `WHERE <clause>` or nothing when the clause is empty.
fn where_suffix(clause: &str) -> String {
    if clause.is_empty() {
        String::new()
    } else {
        interpolate(" WHERE {}", &[clause])
    }
}

/// `CREATE TABLE IF NOT EXISTS` with a synthetic `id` key ahead of `columns`.
pub fn create_table(table: &str, columns: &Columns) -> String {
    let columns = columns
        .columns
        .iter()
        .map(|(name, data_type)| interpolate("{} {}", &[name.as_str(), data_type.as_str()]))
        .collect::<Vec<_>>()
        .join(", ");
    interpolate(
        "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, {})",
        &[table, columns.as_str()],
    )
}

/// `INSERT` naming the row's columns, with one `?` placeholder per value.
pub fn insert(table: &str, row: &Row) -> String {
    let fields = row
        .values
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; row.values.len()].join(", ");
    interpolate(
        "INSERT INTO {} ({}) VALUES ({})",
        &[table, fields.as_str(), placeholders.as_str()],
    )
}

pub fn select(table: &str, where_clause: &str) -> String {
    interpolate("SELECT * FROM {}{}", &[table, where_suffix(where_clause).as_str()])
}

pub fn delete(table: &str, where_clause: &str) -> String {
    interpolate("DELETE FROM {}{}", &[table, where_suffix(where_clause).as_str()])
}
