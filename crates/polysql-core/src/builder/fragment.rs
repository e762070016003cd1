//! SQL text paired with the arguments its markers consume.

use crate::dialect::Dialect;
use crate::placeholder;

use super::value::{IntoArgs, SqlValue};

/// A piece of dialect-neutral SQL using generic `?` markers, together with
/// its arguments in marker order.
///
/// Fragments are copied by value between builders, so embedding a built
/// sub-statement never aliases the builder it came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    /// SQL text with generic markers.
    pub sql: String,
    /// Arguments, in marker order.
    pub args: Vec<SqlValue>,
}

impl Fragment {
    /// Creates a fragment from text and arguments.
    #[must_use]
    pub fn new(sql: impl Into<String>, args: impl IntoArgs) -> Self {
        Self {
            sql: sql.into(),
            args: args.into_args(),
        }
    }

    /// Wraps the fragment in parentheses, for use as a subquery.
    #[must_use]
    pub fn parenthesized(self) -> Self {
        Self {
            sql: format!("({})", self.sql),
            args: self.args,
        }
    }

    /// Renders the fragment on its own for `dialect`.
    #[must_use]
    pub fn render(&self, dialect: Dialect) -> (String, Vec<SqlValue>) {
        (
            placeholder::format(dialect.placeholder_style(), &self.sql),
            self.args.clone(),
        )
    }

    /// Splits the fragment into text and arguments.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.args)
    }

    /// Joins `fragments` with `separator`, concatenating arguments in order.
    pub(crate) fn join<'a>(fragments: impl IntoIterator<Item = &'a Fragment>, separator: &str) -> Self {
        let mut joined = Self::default();
        for (i, fragment) in fragments.into_iter().enumerate() {
            if i > 0 {
                joined.sql.push_str(separator);
            }
            joined.sql.push_str(&fragment.sql);
            joined.args.extend(fragment.args.iter().cloned());
        }
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collects_args() {
        let fragment = Fragment::new("age > ? AND name = ?", (18, "bob"));
        assert_eq!(fragment.sql, "age > ? AND name = ?");
        assert_eq!(
            fragment.args,
            vec![SqlValue::Int(18), SqlValue::Text(String::from("bob"))]
        );
    }

    #[test]
    fn test_render_numbers_markers() {
        let fragment = Fragment::new("a = ? OR b = ?", (1, 2));
        let (sql, args) = fragment.render(Dialect::Postgres);
        assert_eq!(sql, "a = $1 OR b = $2");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_join() {
        let parts = [
            Fragment::new("a = ?", 1),
            Fragment::new("b IS NULL", ()),
            Fragment::new("c = ?", "x"),
        ];
        let joined = Fragment::join(&parts, " AND ");
        assert_eq!(joined.sql, "a = ? AND b IS NULL AND c = ?");
        assert_eq!(
            joined.args,
            vec![SqlValue::Int(1), SqlValue::Text(String::from("x"))]
        );
    }

    #[test]
    fn test_parenthesized() {
        let fragment = Fragment::new("SELECT id FROM t WHERE x = ?", 5).parenthesized();
        assert_eq!(fragment.sql, "(SELECT id FROM t WHERE x = ?)");
        assert_eq!(fragment.args, vec![SqlValue::Int(5)]);
    }
}
