use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Core value types for SQLite operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Boolean(bool),
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::Borrowed(ValueRef::Null),
            Value::Integer(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            Value::Real(f) => ToSqlOutput::Borrowed(ValueRef::Real(*f)),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
            // SQLite has no boolean storage class.
            Value::Boolean(b) => ToSqlOutput::Borrowed(ValueRef::Integer(i64::from(*b))),
        })
    }
}

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(f) => Value::Real(f),
            ValueRef::Text(_) => Value::Text(value.as_str()?.to_owned()),
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        })
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Sets `key` to `value`, keeping the slot of an existing key.
fn upsert<V>(entries: &mut Vec<(String, V)>, key: &str, value: V) {
    match entries.iter_mut().find(|(k, _)| k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key.to_string(), value)),
    }
}

/// Column definitions for a new table, in declaration order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Columns {
    pub columns: Vec<(String, String)>,
}

impl Columns {
    /// Create an empty column list
    pub fn new() -> Self {
        Self::default()
    }
    /// Add a column with its declared type (`"text"`, `"int"`, ...)
    pub fn with_column(mut self, name: &str, data_type: &str) -> Self {
        upsert(&mut self.columns, name, data_type.to_string());
        self
    }
}

impl<K: AsRef<str>, T: AsRef<str>> FromIterator<(K, T)> for Columns {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |cols, (k, t)| cols.with_column(k.as_ref(), t.as_ref()))
    }
}

/// One row to insert: column names mapped to values, in insertion order
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }
    /// Add a named value
    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        upsert(&mut self.values, name, value.into());
        self
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |row, (k, v)| row.with_value(k.as_ref(), v))
    }
}

/// SQLite tools configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
}

impl SqliteConfig {
    /// Create a new SQLite config for the database file at `db_path`
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_keeps_insertion_order() {
        let row = Row::new()
            .with_value("item", "car")
            .with_value("numbers", 123)
            .with_value("price", 9.5);
        let names: Vec<&str> = row.values.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["item", "numbers", "price"]);
    }

    #[test]
    fn resetting_a_key_keeps_its_position() {
        let row = Row::new()
            .with_value("item", "car")
            .with_value("numbers", 123)
            .with_value("item", "bike");
        assert_eq!(
            row.values,
            vec![
                ("item".to_string(), Value::Text("bike".to_string())),
                ("numbers".to_string(), Value::Integer(123)),
            ]
        );
    }

    #[test]
    fn columns_from_pairs() {
        let cols: Columns = [("item", "text"), ("numbers", "int")].into_iter().collect();
        assert_eq!(
            cols.columns,
            vec![
                ("item".to_string(), "text".to_string()),
                ("numbers".to_string(), "int".to_string()),
            ]
        );
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }

    #[test]
    fn values_serialize_untagged() {
        let row = vec![Value::Integer(1), Value::Text("car".into()), Value::Null];
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"[1,"car",null]"#);

        let back: Vec<Value> = serde_json::from_str(r#"[2, 4.5, "x", true]"#).unwrap();
        assert_eq!(
            back,
            vec![
                Value::Integer(2),
                Value::Real(4.5),
                Value::Text("x".into()),
                Value::Boolean(true)
            ]
        );
    }
}
