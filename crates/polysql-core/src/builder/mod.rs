//! Dialect-aware statement builders.
//!
//! Every statement kind has its own builder, created from a
//! [`QueryBuilder`](crate::QueryBuilder). Clause methods exist only on the
//! kinds they apply to, so an `ORDER BY` on an `INSERT` does not compile.
//!
//! # Example
//!
//! ```rust
//! use polysql_core::{Build, Dialect, QueryBuilder, SqlValue};
//!
//! let (sql, args) = QueryBuilder::new(Dialect::Postgres)
//!     .select("users", &["id", "name"])
//!     .where_clause("status = ?", "active")
//!     .order_by("name")
//!     .limit(10)
//!     .build();
//!
//! assert_eq!(sql, "SELECT id, name FROM users WHERE status = $1 ORDER BY name LIMIT 10");
//! assert_eq!(args, vec![SqlValue::Text(String::from("active"))]);
//! ```

mod delete;
mod fragment;
mod insert;
mod merge;
mod raw;
mod select;
mod statement;
mod table;
mod update;
pub mod value;
mod writer;

pub use delete::Delete;
pub use fragment::Fragment;
pub use insert::Insert;
pub use merge::Merge;
pub use raw::Raw;
pub use select::Select;
pub use statement::{
    CreateTableStatement, DeleteStatement, DropTableStatement, InsertStatement, MergeStatement,
    RawStatement, SelectStatement, Statement, StatementKind, UpdateStatement,
};
pub use table::{CreateTable, DropTable};
pub use update::Update;
pub use value::{IntoArgs, SqlValue, ToSqlValue};

use crate::dialect::Dialect;
use crate::placeholder;
use crate::query::QueryBuilder;
use crate::structured::StructuredQuery;

use writer::SqlWriter;

/// Rendering and composition shared by every statement builder.
pub trait Build {
    /// Returns the factory this builder was created from.
    fn context(&self) -> &QueryBuilder;

    /// Returns the statement kind.
    fn kind(&self) -> StatementKind;

    /// Returns a copy of the statement state.
    fn to_statement(&self) -> Statement;

    /// Renders the statement with generic `?` markers.
    ///
    /// Use this to embed the statement in a larger one (subqueries,
    /// `EXISTS`, CTEs); the parent numbers all markers once when it is built.
    fn fragment(&self) -> Fragment;

    /// Returns the bound dialect.
    fn dialect(&self) -> Dialect {
        self.context().dialect()
    }

    /// Renders the final SQL text and its arguments.
    ///
    /// Markers are numbered left to right in the rendered text, and the
    /// argument list follows the same order.
    fn build(&self) -> (String, Vec<SqlValue>) {
        let dialect = self.dialect();
        let Fragment { sql, args } = self.fragment();
        let sql = placeholder::format(dialect.placeholder_style(), &sql);
        tracing::debug!(
            dialect = %dialect,
            kind = %self.kind(),
            args = args.len(),
            sql = %sql,
            "built statement"
        );
        (sql, args)
    }

    /// Renders only the SQL text.
    fn build_sql(&self) -> String {
        self.build().0
    }

    /// Exports the statement state as a serializable [`StructuredQuery`].
    fn export(&self) -> StructuredQuery {
        StructuredQuery::from_statement(self.dialect(), &self.to_statement())
    }

    /// Combines this statement with `other` using `UNION`.
    fn union(&self, other: &impl Build) -> Raw
    where
        Self: Sized,
    {
        compound(self, "UNION", other)
    }

    /// Combines this statement with `other` using `UNION ALL`.
    fn union_all(&self, other: &impl Build) -> Raw
    where
        Self: Sized,
    {
        compound(self, "UNION ALL", other)
    }

    /// Discards the statement, returning the factory bound to the same
    /// dialect and schema.
    fn clear(self) -> QueryBuilder
    where
        Self: Sized,
    {
        self.context().clone()
    }
}

fn compound(left: &impl Build, op: &str, right: &impl Build) -> Raw {
    Raw::from_clauses(
        left.context().clone(),
        vec![left.fragment(), Fragment::new(op, ()), right.fragment()],
    )
}

macro_rules! impl_build {
    ($($builder:ident => $variant:ident),+ $(,)?) => {
        $(
            impl Build for $builder {
                fn context(&self) -> &QueryBuilder {
                    &self.ctx
                }

                fn kind(&self) -> StatementKind {
                    StatementKind::$variant
                }

                fn to_statement(&self) -> Statement {
                    Statement::$variant(self.stmt.clone())
                }

                fn fragment(&self) -> Fragment {
                    let mut w = SqlWriter::new(self.ctx.dialect());
                    self.stmt.render(&mut w);
                    w.finish()
                }
            }
        )+
    };
}

impl_build!(
    Select => Select,
    Insert => Insert,
    Update => Update,
    Delete => Delete,
    CreateTable => Create,
    DropTable => Drop,
    Merge => Merge,
    Raw => Raw,
);

/// Joins `fragment` to the last predicate with `OR`.
///
/// The result is parenthesized as a whole so that AND-joining it with the
/// earlier predicates keeps them applied to both branches.
fn push_or(predicates: &mut Vec<Fragment>, fragment: Fragment) {
    match predicates.pop() {
        Some(previous) => predicates.push(Fragment {
            sql: format!("(({}) OR ({}))", previous.sql, fragment.sql),
            args: previous.args.into_iter().chain(fragment.args).collect(),
        }),
        None => predicates.push(fragment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_or_on_empty_list() {
        let mut predicates = vec![];
        push_or(&mut predicates, Fragment::new("c = ?", 3));
        assert_eq!(predicates, vec![Fragment::new("c = ?", 3)]);
    }

    #[test]
    fn test_push_or_groups_previous_predicate() {
        let mut predicates = vec![Fragment::new("a = ?", 1), Fragment::new("b = ?", 2)];
        push_or(&mut predicates, Fragment::new("c = ?", 3));
        assert_eq!(predicates.len(), 2);
        assert_eq!(predicates[1].sql, "((b = ?) OR (c = ?))");
        assert_eq!(predicates[1].args, vec![SqlValue::Int(2), SqlValue::Int(3)]);
    }

    #[test]
    fn test_union_numbers_markers_continuously() {
        let qb = QueryBuilder::new(Dialect::Postgres);
        let active = qb.select("users", &["id"]).where_clause("status = ?", "active");
        let admins = qb.select("admins", &["id"]).where_clause("level > ?", 3);

        let (sql, args) = active.union(&admins).build();
        assert_eq!(
            sql,
            "SELECT id FROM users WHERE status = $1 UNION SELECT id FROM admins WHERE level > $2"
        );
        assert_eq!(
            args,
            vec![SqlValue::Text(String::from("active")), SqlValue::Int(3)]
        );
    }

    #[test]
    fn test_union_all_keyword() {
        let qb = QueryBuilder::new(Dialect::Sqlite);
        let sql = qb
            .select("a", &["x"])
            .union_all(&qb.select("b", &["x"]))
            .build_sql();
        assert_eq!(sql, "SELECT x FROM a UNION ALL SELECT x FROM b");
    }

    #[test]
    fn test_clear_keeps_dialect_and_schema() {
        let qb = QueryBuilder::new(Dialect::Oracle).with_schema("hr");
        let cleared = qb.select("emp", &[]).where_clause("id = ?", 1).clear();
        assert_eq!(cleared, qb);
        assert_eq!(cleared.select("emp", &[]).build_sql(), "SELECT * FROM hr.emp");
    }
}
