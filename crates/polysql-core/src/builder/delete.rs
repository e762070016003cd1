//! `DELETE` statement builder.

use crate::query::QueryBuilder;

use super::fragment::Fragment;
use super::push_or;
use super::statement::DeleteStatement;
use super::value::IntoArgs;

/// A `DELETE` statement under construction.
///
/// Without a predicate the statement deletes every row.
#[derive(Debug, Clone)]
#[must_use]
pub struct Delete {
    pub(crate) ctx: QueryBuilder,
    pub(crate) stmt: DeleteStatement,
}

impl Delete {
    pub(crate) fn new(ctx: QueryBuilder, table: &str) -> Self {
        let stmt = DeleteStatement {
            schema: ctx.schema().map(String::from),
            table: String::from(table),
            predicates: vec![],
        };
        Self { ctx, stmt }
    }

    /// Returns the statement state.
    #[must_use]
    pub const fn statement(&self) -> &DeleteStatement {
        &self.stmt
    }

    /// Qualifies the table with a schema.
    pub fn schema(mut self, schema: &str) -> Self {
        self.stmt.schema = Some(String::from(schema));
        self
    }

    /// Adds a predicate, AND-ed with the previous ones.
    pub fn where_clause(mut self, condition: &str, args: impl IntoArgs) -> Self {
        self.stmt.predicates.push(Fragment::new(condition, args));
        self
    }

    /// Adds a predicate OR-ed with the most recent one.
    pub fn or_where(mut self, condition: &str, args: impl IntoArgs) -> Self {
        push_or(&mut self.stmt.predicates, Fragment::new(condition, args));
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::{Build, SqlValue};
    use crate::dialect::Dialect;
    use crate::query::QueryBuilder;

    #[test]
    fn test_delete_all() {
        let sql = QueryBuilder::new(Dialect::Sqlite)
            .delete_from("sessions")
            .build_sql();
        assert_eq!(sql, "DELETE FROM sessions");
    }

    #[test]
    fn test_delete_mysql_keeps_question_marks() {
        let (sql, args) = QueryBuilder::new(Dialect::MySql)
            .delete_from("users")
            .where_clause("name = ?", "john")
            .build();
        assert_eq!(sql, "DELETE FROM users WHERE name = ?");
        assert_eq!(args, vec![SqlValue::Text(String::from("john"))]);
    }

    #[test]
    fn test_delete_multiple_predicates() {
        let (sql, args) = QueryBuilder::new(Dialect::Postgres)
            .delete_from("sessions")
            .where_clause("expires_at < ?", 1_700_000_000_i64)
            .where_clause("user_id = ?", 3)
            .build();
        assert_eq!(
            sql,
            "DELETE FROM sessions WHERE expires_at < $1 AND user_id = $2"
        );
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_delete_or_where_with_schema() {
        let sql = QueryBuilder::new(Dialect::SqlServer)
            .delete_from("logs")
            .schema("dbo")
            .where_clause("level = ?", "debug")
            .or_where("level = ?", "trace")
            .build_sql();
        assert_eq!(
            sql,
            "DELETE FROM dbo.logs WHERE ((level = ?) OR (level = ?))"
        );
    }

    #[test]
    fn test_delete_or_where_stays_inside_earlier_filter() {
        let sql = QueryBuilder::new(Dialect::Oracle)
            .delete_from("sessions")
            .where_clause("tenant_id = ?", 7)
            .where_clause("expired = ?", true)
            .or_where("revoked = ?", true)
            .build_sql();
        assert_eq!(
            sql,
            "DELETE FROM sessions WHERE tenant_id = :p1 AND ((expired = :p2) OR (revoked = :p3))"
        );
    }
}
