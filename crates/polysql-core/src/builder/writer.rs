//! SQL text assembly shared by the statement renderers.

use crate::dialect::{Dialect, Pagination};

use super::fragment::Fragment;
use super::value::SqlValue;

/// Accumulates dialect-neutral SQL and its arguments while a statement
/// renders. Placeholders stay generic until the final formatting pass.
pub(crate) struct SqlWriter {
    pub(crate) dialect: Dialect,
    sql: String,
    args: Vec<SqlValue>,
}

impl SqlWriter {
    pub(crate) fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            sql: String::with_capacity(128),
            args: vec![],
        }
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    pub(crate) fn push_fragment(&mut self, fragment: &Fragment) {
        self.sql.push_str(&fragment.sql);
        self.args.extend(fragment.args.iter().cloned());
    }

    /// Writes `keyword` followed by the fragments joined with `separator`,
    /// or nothing when there are no fragments.
    pub(crate) fn push_clause(&mut self, keyword: &str, fragments: &[Fragment], separator: &str) {
        if fragments.is_empty() {
            return;
        }
        self.sql.push(' ');
        self.sql.push_str(keyword);
        self.sql.push(' ');
        self.push_fragment(&Fragment::join(fragments, separator));
    }

    pub(crate) fn push_list(&mut self, keyword: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        self.sql.push(' ');
        self.sql.push_str(keyword);
        self.sql.push(' ');
        self.sql.push_str(&items.join(", "));
    }

    pub(crate) fn push_table(&mut self, schema: Option<&str>, table: &str) {
        if let Some(schema) = schema.filter(|s| !s.is_empty()) {
            self.sql.push_str(schema);
            self.sql.push('.');
        }
        self.sql.push_str(table);
    }

    pub(crate) fn push_pagination(&mut self, limit: Option<u64>, offset: Option<u64>) {
        match self.dialect.pagination() {
            Pagination::LimitOffset => {
                if let Some(limit) = limit {
                    self.sql.push_str(&format!(" LIMIT {limit}"));
                }
                if let Some(offset) = offset {
                    self.sql.push_str(&format!(" OFFSET {offset}"));
                }
            }
            Pagination::OffsetFetch => {
                if limit.is_none() && offset.is_none() {
                    return;
                }
                self.sql
                    .push_str(&format!(" OFFSET {} ROWS", offset.unwrap_or(0)));
                if let Some(limit) = limit {
                    self.sql.push_str(&format!(" FETCH NEXT {limit} ROWS ONLY"));
                }
            }
        }
    }

    pub(crate) fn finish(self) -> Fragment {
        Fragment {
            sql: self.sql,
            args: self.args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_limit_offset() {
        let mut w = SqlWriter::new(Dialect::Postgres);
        w.push_pagination(Some(10), Some(20));
        assert_eq!(w.finish().sql, " LIMIT 10 OFFSET 20");
    }

    #[test]
    fn test_pagination_offset_fetch() {
        let mut w = SqlWriter::new(Dialect::Oracle);
        w.push_pagination(Some(10), None);
        assert_eq!(w.finish().sql, " OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY");

        let mut w = SqlWriter::new(Dialect::SqlServer);
        w.push_pagination(None, Some(5));
        assert_eq!(w.finish().sql, " OFFSET 5 ROWS");

        let mut w = SqlWriter::new(Dialect::Oracle);
        w.push_pagination(None, None);
        assert_eq!(w.finish().sql, "");
    }

    #[test]
    fn test_push_table_with_schema() {
        let mut w = SqlWriter::new(Dialect::Sqlite);
        w.push_table(Some("public"), "users");
        w.push_str(" ");
        w.push_table(Some(""), "orders");
        assert_eq!(w.finish().sql, "public.users orders");
    }

    #[test]
    fn test_push_clause_skips_empty() {
        let mut w = SqlWriter::new(Dialect::MySql);
        w.push_clause("WHERE", &[], " AND ");
        w.push_clause("WHERE", &[Fragment::new("a = ?", 1)], " AND ");
        let fragment = w.finish();
        assert_eq!(fragment.sql, " WHERE a = ?");
        assert_eq!(fragment.args.len(), 1);
    }
}
