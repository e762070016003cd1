//! Fluent CREATE TABLE script builder.

use std::path::Path;

use crate::dialect::{CanonicalType, Dialect};
use crate::error::Result;

use super::column::{Column, ForeignKey, ForeignKeyAction, Index};

/// Handle to a column declared on a [`TableBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnId(usize);

/// Builds a `CREATE TABLE` statement plus one `CREATE INDEX` per declared
/// index, for one dialect.
///
/// Identifiers are always quoted and types mapped by the bound dialect.
///
/// ```rust
/// use polysql_core::{Dialect, ForeignKeyAction, TableBuilder};
///
/// let mut table = TableBuilder::new(Dialect::Postgres, "posts");
/// table
///     .column("id")
///     .int()
///     .primary_key()
///     .auto_increment()
///     .column("author_id")
///     .int()
///     .not_null()
///     .foreign_key("users", "id")
///     .on_delete(ForeignKeyAction::Cascade)
///     .index(false);
///
/// assert_eq!(
///     table.build(),
///     "CREATE TABLE \"posts\" (\n  \"id\" SERIAL PRIMARY KEY,\n  \"author_id\" INTEGER NOT NULL,\n  \
///      FOREIGN KEY (\"author_id\") REFERENCES \"users\"(\"id\") ON DELETE CASCADE\n);\n\
///      CREATE INDEX \"idx_posts_author_id\" ON \"posts\"(\"author_id\");"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TableBuilder {
    dialect: Dialect,
    name: String,
    if_not_exists: bool,
    columns: Vec<Column>,
    indexes: Vec<Index>,
}

impl TableBuilder {
    /// Starts a table script.
    #[must_use]
    pub fn new(dialect: Dialect, name: &str) -> Self {
        Self {
            dialect,
            name: String::from(name),
            if_not_exists: false,
            columns: vec![],
            indexes: vec![],
        }
    }

    /// Adds `IF NOT EXISTS`.
    pub fn if_not_exists(&mut self) -> &mut Self {
        self.if_not_exists = true;
        self
    }

    /// Declares a column and returns a builder scoped to it.
    pub fn column(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.columns.push(Column::new(name, ""));
        let id = ColumnId(self.columns.len() - 1);
        ColumnBuilder { table: self, id }
    }

    /// Returns a builder for a previously declared column, or `None` if `id`
    /// does not name a column of this table.
    pub fn configure(&mut self, id: ColumnId) -> Option<ColumnBuilder<'_>> {
        (id.0 < self.columns.len()).then_some(ColumnBuilder { table: self, id })
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared columns, in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the declared indexes, in declaration order.
    #[must_use]
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Renders the script as separate statements: the table first, then
    /// each index.
    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        let d = self.dialect;
        let lines: Vec<String> = self
            .columns
            .iter()
            .map(|c| c.definition(d))
            .chain(self.columns.iter().filter_map(|c| c.foreign_key_constraint(d)))
            .collect();

        let mut statements = Vec::with_capacity(1 + self.indexes.len());
        statements.push(format!(
            "CREATE TABLE {}{} (\n  {}\n);",
            if self.if_not_exists { "IF NOT EXISTS " } else { "" },
            d.quote_identifier(&self.name),
            lines.join(",\n  ")
        ));
        statements.extend(self.indexes.iter().map(|idx| idx.to_sql(d, &self.name)));
        statements
    }

    /// Renders the script, one statement per line group.
    #[must_use]
    pub fn build(&self) -> String {
        let script = self.statements().join("\n");
        tracing::debug!(
            dialect = %self.dialect,
            table = %self.name,
            columns = self.columns.len(),
            indexes = self.indexes.len(),
            "built table script"
        );
        script
    }

    /// Writes the script to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be written.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, format!("{}\n", self.build()))?;
        tracing::debug!(path = %path.display(), table = %self.name, "wrote table script");
        Ok(())
    }
}

/// Configures one column of a [`TableBuilder`].
///
/// Every call addresses the column this builder was created for, so
/// constraints cannot land on the wrong column. Call
/// [`column`](ColumnBuilder::column) to move on to the next one.
#[derive(Debug)]
pub struct ColumnBuilder<'a> {
    table: &'a mut TableBuilder,
    id: ColumnId,
}

impl<'a> ColumnBuilder<'a> {
    fn col(&mut self) -> &mut Column {
        &mut self.table.columns[self.id.0]
    }

    /// Returns the handle of the column being configured.
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Sets the column type: a canonical name or a native type.
    pub fn column_type(mut self, ty: &str) -> Self {
        self.col().ty = String::from(ty);
        self
    }

    fn canonical(self, ty: CanonicalType) -> Self {
        self.column_type(ty.as_str())
    }

    /// Sets the type to `int`.
    pub fn int(self) -> Self {
        self.canonical(CanonicalType::Int)
    }

    /// Sets the type to `float64`.
    pub fn float64(self) -> Self {
        self.canonical(CanonicalType::Float64)
    }

    /// Sets the type to `string`.
    pub fn string(self) -> Self {
        self.canonical(CanonicalType::String)
    }

    /// Sets the type to `bool`.
    pub fn bool(self) -> Self {
        self.canonical(CanonicalType::Bool)
    }

    /// Sets the type to `timestamp`.
    pub fn timestamp(self) -> Self {
        self.canonical(CanonicalType::Timestamp)
    }

    /// Adds NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.col().not_null = true;
        self
    }

    /// Marks the column as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.col().primary_key = true;
        self
    }

    /// Makes the column auto-increment.
    pub fn auto_increment(mut self) -> Self {
        self.col().auto_increment = true;
        self
    }

    /// Adds UNIQUE.
    pub fn unique(mut self) -> Self {
        self.col().unique = true;
        self
    }

    /// Sets the DEFAULT expression, emitted verbatim.
    pub fn default_value(mut self, expr: &str) -> Self {
        self.col().default = Some(String::from(expr));
        self
    }

    /// Adds a foreign key to `table(column)`.
    pub fn foreign_key(mut self, table: &str, column: &str) -> Self {
        self.col().foreign_key = Some(ForeignKey {
            ref_table: String::from(table),
            ref_column: String::from(column),
            on_delete: None,
            on_update: None,
        });
        self
    }

    /// Sets the foreign key's `ON DELETE` action. No-op without a foreign key.
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        if let Some(fk) = self.col().foreign_key.as_mut() {
            fk.on_delete = Some(action);
        }
        self
    }

    /// Sets the foreign key's `ON UPDATE` action. No-op without a foreign key.
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        if let Some(fk) = self.col().foreign_key.as_mut() {
            fk.on_update = Some(action);
        }
        self
    }

    /// Declares an index on the column, named `idx_<table>_<column>`.
    pub fn index(self, unique: bool) -> Self {
        let Self { table, id } = self;
        let index = Index::for_column(&table.name, &table.columns[id.0].name, unique);
        table.indexes.push(index);
        Self { table, id }
    }

    /// Declares the next column.
    pub fn column(self, name: &str) -> ColumnBuilder<'a> {
        let table = self.table;
        table.column(name)
    }
}
