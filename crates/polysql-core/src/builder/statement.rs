//! Statement state, one struct per statement kind.
//!
//! Each struct renders itself to dialect-neutral SQL through a
//! [`SqlWriter`]. Clauses render in a fixed order regardless of the order in
//! which they were added, and arguments are gathered from each fragment as it
//! is written, so the argument list always follows the markers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ddl::Column;
use crate::dialect::Dialect;

use super::fragment::Fragment;
use super::writer::SqlWriter;

/// The kind of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    /// `SELECT`.
    Select,
    /// `INSERT`.
    Insert,
    /// `UPDATE`.
    Update,
    /// `DELETE`.
    Delete,
    /// `CREATE TABLE`.
    Create,
    /// `DROP TABLE`.
    Drop,
    /// `MERGE`.
    Merge,
    /// Verbatim clauses.
    Raw,
}

impl StatementKind {
    /// Returns the lower-case kind name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Create => "create",
            Self::Drop => "drop",
            Self::Merge => "merge",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `SELECT` state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStatement {
    pub schema: Option<String>,
    pub table: String,
    pub alias: Option<String>,
    pub distinct: bool,
    pub columns: Vec<String>,
    pub joins: Vec<Fragment>,
    pub predicates: Vec<Fragment>,
    pub group_by: Vec<String>,
    pub having: Vec<Fragment>,
    pub order_by: Vec<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SelectStatement {
    pub(crate) fn render(&self, w: &mut SqlWriter) {
        w.push_str("SELECT ");
        if self.distinct {
            w.push_str("DISTINCT ");
        }
        if self.columns.is_empty() {
            w.push_str("*");
        } else {
            w.push_str(&self.columns.join(", "));
        }
        w.push_str(" FROM ");
        w.push_table(self.schema.as_deref(), &self.table);
        if let Some(ref alias) = self.alias {
            w.push_str(" AS ");
            w.push_str(alias);
        }
        for join in &self.joins {
            w.push_str(" ");
            w.push_fragment(join);
        }
        w.push_clause("WHERE", &self.predicates, " AND ");
        w.push_list("GROUP BY", &self.group_by);
        w.push_clause("HAVING", &self.having, " AND ");
        w.push_list("ORDER BY", &self.order_by);
        w.push_pagination(self.limit, self.offset);
    }
}

/// `INSERT` state. Each row is one parenthesized value list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertStatement {
    pub schema: Option<String>,
    pub table: String,
    pub columns: Vec<String>,
    pub rows: Vec<Fragment>,
}

impl InsertStatement {
    pub(crate) fn render(&self, w: &mut SqlWriter) {
        w.push_str("INSERT INTO ");
        w.push_table(self.schema.as_deref(), &self.table);
        w.push_str(" (");
        w.push_str(&self.columns.join(", "));
        w.push_str(") VALUES ");
        if self.rows.is_empty() {
            w.push_str("()");
        }
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                w.push_str(", ");
            }
            w.push_str("(");
            w.push_fragment(row);
            w.push_str(")");
        }
    }
}

/// `UPDATE` state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateStatement {
    pub schema: Option<String>,
    pub table: String,
    pub assignments: Vec<Fragment>,
    pub predicates: Vec<Fragment>,
}

impl UpdateStatement {
    pub(crate) fn render(&self, w: &mut SqlWriter) {
        w.push_str("UPDATE ");
        w.push_table(self.schema.as_deref(), &self.table);
        w.push_str(" SET ");
        w.push_fragment(&Fragment::join(&self.assignments, ", "));
        w.push_clause("WHERE", &self.predicates, " AND ");
    }
}

/// `DELETE` state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteStatement {
    pub schema: Option<String>,
    pub table: String,
    pub predicates: Vec<Fragment>,
}

impl DeleteStatement {
    pub(crate) fn render(&self, w: &mut SqlWriter) {
        w.push_str("DELETE FROM ");
        w.push_table(self.schema.as_deref(), &self.table);
        w.push_clause("WHERE", &self.predicates, " AND ");
    }
}

/// `CREATE TABLE` state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTableStatement {
    pub table: String,
    pub if_not_exists: bool,
    pub columns: Vec<Column>,
}

impl CreateTableStatement {
    pub(crate) fn render(&self, w: &mut SqlWriter) {
        let dialect = w.dialect;
        let defs: Vec<String> = self
            .columns
            .iter()
            .map(|c| c.definition(dialect))
            .chain(self.columns.iter().filter_map(|c| c.foreign_key_constraint(dialect)))
            .collect();

        w.push_str("CREATE TABLE ");
        if self.if_not_exists {
            w.push_str("IF NOT EXISTS ");
        }
        w.push_str(&self.table);
        w.push_str(" (");
        w.push_str(&defs.join(", "));
        w.push_str(")");
    }
}

/// `DROP TABLE` state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropTableStatement {
    pub table: String,
    pub if_exists: bool,
}

impl DropTableStatement {
    pub(crate) fn render(&self, w: &mut SqlWriter) {
        w.push_str("DROP TABLE ");
        if self.if_exists {
            w.push_str("IF EXISTS ");
        }
        w.push_str(&self.table);
    }
}

/// `MERGE` state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeStatement {
    pub table: String,
    pub using: Option<String>,
    pub on: Option<Fragment>,
    pub matched_set: Vec<Fragment>,
    pub insert_columns: Vec<String>,
    pub insert_values: Option<Fragment>,
}

impl MergeStatement {
    pub(crate) fn render(&self, w: &mut SqlWriter) {
        w.push_str("MERGE INTO ");
        w.push_str(&self.table);
        if let Some(ref using) = self.using {
            w.push_str(" USING ");
            w.push_str(using);
        }
        if let Some(ref on) = self.on {
            w.push_str(" ON ");
            w.push_fragment(on);
        }
        if !self.matched_set.is_empty() {
            w.push_str(" WHEN MATCHED THEN UPDATE SET ");
            w.push_fragment(&Fragment::join(&self.matched_set, ", "));
        }
        if !self.insert_columns.is_empty() {
            w.push_str(" WHEN NOT MATCHED THEN INSERT (");
            w.push_str(&self.insert_columns.join(", "));
            w.push_str(") VALUES (");
            if let Some(ref values) = self.insert_values {
                w.push_fragment(values);
            }
            w.push_str(")");
        }
    }
}

/// Verbatim clauses joined by single spaces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStatement {
    pub clauses: Vec<Fragment>,
}

impl RawStatement {
    pub(crate) fn render(&self, w: &mut SqlWriter) {
        w.push_fragment(&Fragment::join(&self.clauses, " "));
    }
}

/// A statement of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `SELECT`.
    Select(SelectStatement),
    /// `INSERT`.
    Insert(InsertStatement),
    /// `UPDATE`.
    Update(UpdateStatement),
    /// `DELETE`.
    Delete(DeleteStatement),
    /// `CREATE TABLE`.
    Create(CreateTableStatement),
    /// `DROP TABLE`.
    Drop(DropTableStatement),
    /// `MERGE`.
    Merge(MergeStatement),
    /// Verbatim clauses.
    Raw(RawStatement),
}

impl Statement {
    /// Returns the statement kind.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        match self {
            Self::Select(_) => StatementKind::Select,
            Self::Insert(_) => StatementKind::Insert,
            Self::Update(_) => StatementKind::Update,
            Self::Delete(_) => StatementKind::Delete,
            Self::Create(_) => StatementKind::Create,
            Self::Drop(_) => StatementKind::Drop,
            Self::Merge(_) => StatementKind::Merge,
            Self::Raw(_) => StatementKind::Raw,
        }
    }

    /// Returns the argument-bearing fragment rendered last, if any.
    pub(crate) fn last_fragment_mut(&mut self) -> Option<&mut Fragment> {
        match self {
            Self::Select(s) => s
                .having
                .last_mut()
                .or(s.predicates.last_mut())
                .or(s.joins.last_mut()),
            Self::Insert(s) => s.rows.last_mut(),
            Self::Update(s) => s.predicates.last_mut().or(s.assignments.last_mut()),
            Self::Delete(s) => s.predicates.last_mut(),
            Self::Merge(s) => s
                .insert_values
                .as_mut()
                .or(s.matched_set.last_mut())
                .or(s.on.as_mut()),
            Self::Raw(s) => s.clauses.last_mut(),
            Self::Create(_) | Self::Drop(_) => None,
        }
    }

    /// Renders the statement to dialect-neutral SQL and its arguments.
    #[must_use]
    pub fn to_fragment(&self, dialect: Dialect) -> Fragment {
        let mut w = SqlWriter::new(dialect);
        match self {
            Self::Select(s) => s.render(&mut w),
            Self::Insert(s) => s.render(&mut w),
            Self::Update(s) => s.render(&mut w),
            Self::Delete(s) => s.render(&mut w),
            Self::Create(s) => s.render(&mut w),
            Self::Drop(s) => s.render(&mut w),
            Self::Merge(s) => s.render(&mut w),
            Self::Raw(s) => s.render(&mut w),
        }
        w.finish()
    }
}
