//! Mapping records to `INSERT` and `UPDATE` statements.
//!
//! The primary path is the [`Record`] trait, normally derived with
//! `#[derive(Record)]` from `polysql-derive`: column names and their order
//! are fixed at compile time from the struct's annotated fields.
//!
//! For values that only implement [`Serialize`], [`QueryBuilder::map_to_insert`]
//! and [`QueryBuilder::map_to_update`] read the fields from the serialized
//! map instead. Field order is the serialization order, which for derived
//! `Serialize` impls is declaration order; `#[serde(skip)]` excludes a field.

use serde::Serialize;

use crate::builder::{Build, Insert, SqlValue, Update};
use crate::error::{Error, Result};
use crate::query::QueryBuilder;

/// A struct whose fields map to the columns of one table.
///
/// ```rust
/// use polysql_core::{Build, Dialect, QueryBuilder, Record, SqlValue};
///
/// struct User {
///     id: i64,
///     name: String,
/// }
///
/// impl Record for User {
///     const TABLE: &'static str = "users";
///     const COLUMNS: &'static [&'static str] = &["id", "name"];
///     const PRIMARY_KEY: Option<&'static str> = Some("id");
///
///     fn values(&self) -> Vec<SqlValue> {
///         vec![SqlValue::Int(self.id), SqlValue::Text(self.name.clone())]
///     }
/// }
///
/// let user = User { id: 7, name: "Ada".into() };
/// let (sql, _) = QueryBuilder::new(Dialect::Postgres).update_record(&user).build();
/// assert_eq!(sql, "UPDATE users SET name = $1 WHERE id = $2");
/// ```
pub trait Record {
    /// Table the record is stored in.
    const TABLE: &'static str;
    /// Column names, in field declaration order.
    const COLUMNS: &'static [&'static str];
    /// Key column used as the `UPDATE` predicate, if any.
    const PRIMARY_KEY: Option<&'static str>;

    /// Field values, one per entry of [`COLUMNS`](Record::COLUMNS), in the
    /// same order.
    fn values(&self) -> Vec<SqlValue>;
}

impl QueryBuilder {
    /// Starts an `INSERT` of every mapped column of `record`.
    pub fn insert_record<R: Record>(&self, record: &R) -> Insert {
        self.insert_into(R::TABLE, R::COLUMNS).values(record.values())
    }

    /// Starts an `UPDATE` setting every mapped column of `record`.
    ///
    /// With a primary key, the key column is moved from the `SET` list into
    /// a `WHERE key = ?` predicate. Without one, no predicate is added.
    pub fn update_record<R: Record>(&self, record: &R) -> Update {
        let mut update = self.update(R::TABLE);
        let mut key = None;
        for (column, value) in R::COLUMNS.iter().zip(record.values()) {
            if R::PRIMARY_KEY == Some(*column) {
                key = Some((*column, value));
            } else {
                update = update.set(column, value);
            }
        }
        if let Some((column, value)) = key {
            update = update.where_clause(&format!("{column} = ?"), vec![value]);
        }
        update
    }

    /// Renders an `INSERT` into `table` from the fields of any serializable
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAStructType`] if `record` does not serialize to a
    /// map, or [`Error::Json`] if serialization itself fails.
    pub fn map_to_insert<T: Serialize>(
        &self,
        record: &T,
        table: &str,
    ) -> Result<(String, Vec<SqlValue>)> {
        let (columns, values) = record_fields(record)?;
        let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
        Ok(self.insert_into(table, &columns).values(values).build())
    }

    /// Renders an `UPDATE` of `table` setting every field of any serializable
    /// record. No predicate is added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAStructType`] if `record` does not serialize to a
    /// map, or [`Error::Json`] if serialization itself fails.
    pub fn map_to_update<T: Serialize>(
        &self,
        record: &T,
        table: &str,
    ) -> Result<(String, Vec<SqlValue>)> {
        let (columns, values) = record_fields(record)?;
        let update = columns
            .iter()
            .zip(values)
            .fold(self.update(table), |update, (column, value)| {
                update.set(column, value)
            });
        Ok(update.build())
    }
}

fn record_fields<T: Serialize>(record: &T) -> Result<(Vec<String>, Vec<SqlValue>)> {
    let serde_json::Value::Object(fields) = serde_json::to_value(record)? else {
        return Err(Error::NotAStructType(String::from(std::any::type_name::<T>())));
    };
    Ok(fields
        .into_iter()
        .map(|(name, value)| (name, json_to_sql_value(value)))
        .unzip())
}

fn json_to_sql_value(value: serde_json::Value) -> SqlValue {
    use serde_json::Value;

    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Bool(b),
        Value::Number(n) => n
            .as_i64()
            .map_or_else(|| SqlValue::Float(n.as_f64().unwrap_or(f64::NAN)), SqlValue::Int),
        Value::String(s) => SqlValue::Text(s),
        nested @ (Value::Array(_) | Value::Object(_)) => SqlValue::Text(nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;
    use crate::dialect::Dialect;

    struct Tag {
        label: String,
        weight: Option<i64>,
    }

    impl Record for Tag {
        const TABLE: &'static str = "tags";
        const COLUMNS: &'static [&'static str] = &["label", "weight"];
        const PRIMARY_KEY: Option<&'static str> = None;

        fn values(&self) -> Vec<SqlValue> {
            vec![
                SqlValue::Text(self.label.clone()),
                self.weight.map_or(SqlValue::Null, SqlValue::Int),
            ]
        }
    }

    #[test]
    fn test_insert_record() {
        let tag = Tag {
            label: "rust".into(),
            weight: None,
        };
        let (sql, args) = QueryBuilder::new(Dialect::Oracle).insert_record(&tag).build();
        assert_eq!(sql, "INSERT INTO tags (label, weight) VALUES (:p1, :p2)");
        assert_eq!(args, vec![SqlValue::Text("rust".into()), SqlValue::Null]);
    }

    #[test]
    fn test_update_record_without_key() {
        let tag = Tag {
            label: "rust".into(),
            weight: Some(3),
        };
        let (sql, args) = QueryBuilder::new(Dialect::Sqlite).update_record(&tag).build();
        assert_eq!(sql, "UPDATE tags SET label = ?, weight = ?");
        assert_eq!(args.len(), 2);
    }

    #[derive(Serialize)]
    struct Account {
        id: i64,
        owner: String,
        #[serde(skip)]
        #[allow(dead_code)]
        session: String,
        balance: f64,
        flags: Vec<String>,
    }

    fn account() -> Account {
        Account {
            id: 1,
            owner: "ada".into(),
            session: "secret".into(),
            balance: 12.5,
            flags: vec!["vip".into()],
        }
    }

    #[test]
    fn test_map_to_insert_keeps_field_order() {
        let (sql, args) = QueryBuilder::new(Dialect::Postgres)
            .map_to_insert(&account(), "accounts")
            .unwrap();
        assert_eq!(
            sql,
            "INSERT INTO accounts (id, owner, balance, flags) VALUES ($1, $2, $3, $4)"
        );
        assert_eq!(
            args,
            vec![
                SqlValue::Int(1),
                SqlValue::Text("ada".into()),
                SqlValue::Float(12.5),
                SqlValue::Text(r#"["vip"]"#.into()),
            ]
        );
    }

    #[test]
    fn test_map_to_update() {
        let (sql, args) = QueryBuilder::new(Dialect::MySql)
            .map_to_update(&account(), "accounts")
            .unwrap();
        assert_eq!(
            sql,
            "UPDATE accounts SET id = ?, owner = ?, balance = ?, flags = ?"
        );
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn test_non_struct_is_rejected() {
        let qb = QueryBuilder::new(Dialect::Sqlite);
        assert!(matches!(
            qb.map_to_insert(&42_i32, "numbers"),
            Err(Error::NotAStructType(ref t)) if t == "i32"
        ));
        assert!(matches!(
            qb.map_to_update(&vec![1, 2], "numbers"),
            Err(Error::NotAStructType(_))
        ));
    }
}
