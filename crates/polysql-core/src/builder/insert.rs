//! `INSERT` statement builder.

use crate::query::QueryBuilder;

use super::fragment::Fragment;
use super::statement::InsertStatement;
use super::value::IntoArgs;

/// An `INSERT` statement under construction.
#[derive(Debug, Clone)]
#[must_use]
pub struct Insert {
    pub(crate) ctx: QueryBuilder,
    pub(crate) stmt: InsertStatement,
}

impl Insert {
    pub(crate) fn new(ctx: QueryBuilder, table: &str, columns: &[&str]) -> Self {
        let stmt = InsertStatement {
            schema: ctx.schema().map(String::from),
            table: String::from(table),
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            rows: vec![],
        };
        Self { ctx, stmt }
    }

    /// Returns the statement state.
    #[must_use]
    pub const fn statement(&self) -> &InsertStatement {
        &self.stmt
    }

    /// Qualifies the table with a schema.
    pub fn schema(mut self, schema: &str) -> Self {
        self.stmt.schema = Some(String::from(schema));
        self
    }

    /// Appends one row of bound values, one marker per value.
    pub fn values(mut self, values: impl IntoArgs) -> Self {
        let args = values.into_args();
        let markers = vec!["?"; args.len()].join(", ");
        self.stmt.rows.push(Fragment { sql: markers, args });
        self
    }

    /// Appends one row written as SQL, e.g. `?, CURRENT_TIMESTAMP`.
    pub fn values_expr(mut self, row: &str, args: impl IntoArgs) -> Self {
        self.stmt.rows.push(Fragment::new(row, args));
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{Build, SqlValue};
    use crate::dialect::Dialect;
    use crate::query::QueryBuilder;

    #[test]
    fn test_insert_oracle() {
        let (sql, args) = QueryBuilder::new(Dialect::Oracle)
            .insert_into("accounts", &["username", "balance"])
            .values(("alice", 1000))
            .build();
        assert_eq!(
            sql,
            "INSERT INTO accounts (username, balance) VALUES (:p1, :p2)"
        );
        assert_eq!(
            args,
            vec![SqlValue::Text(String::from("alice")), SqlValue::Int(1000)]
        );
    }

    #[test]
    fn test_multi_row_insert() {
        let (sql, args) = QueryBuilder::new(Dialect::Postgres)
            .insert_into("users", &["name", "age"])
            .values(("a", 1))
            .values(("b", 2))
            .build();
        assert_eq!(sql, "INSERT INTO users (name, age) VALUES ($1, $2), ($3, $4)");
        assert_eq!(args.len(), 4);
    }

    #[test]
    fn test_insert_with_expression_row() {
        let (sql, args) = QueryBuilder::new(Dialect::MySql)
            .insert_into("events", &["name", "created_at"])
            .values_expr("?, CURRENT_TIMESTAMP", "login")
            .build();
        assert_eq!(
            sql,
            "INSERT INTO events (name, created_at) VALUES (?, CURRENT_TIMESTAMP)"
        );
        assert_eq!(args, vec![SqlValue::Text(String::from("login"))]);
    }

    #[test]
    fn test_insert_null_and_schema() {
        let (sql, args) = QueryBuilder::new(Dialect::Sqlite)
            .insert_into("users", &["name", "email"])
            .schema("main")
            .values(("bob", None::<String>))
            .build();
        assert_eq!(sql, "INSERT INTO main.users (name, email) VALUES (?, ?)");
        assert_eq!(args[1], SqlValue::Null);
    }
}
