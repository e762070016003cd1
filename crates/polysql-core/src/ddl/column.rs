//! Column, foreign key and index definitions.

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A reference from a column to a column of another table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    /// The referenced table.
    pub ref_table: String,
    /// The referenced column.
    pub ref_column: String,
    /// Action on delete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<ForeignKeyAction>,
    /// Action on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ForeignKeyAction>,
}

/// A column definition.
///
/// `ty` holds either a canonical type name, mapped through the dialect when
/// rendered, or a native type passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Canonical or native type.
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether NOT NULL is emitted.
    #[serde(default, skip_serializing_if = "is_false")]
    pub not_null: bool,
    /// Whether this is the primary key.
    #[serde(default, skip_serializing_if = "is_false")]
    pub primary_key: bool,
    /// Whether the column auto-increments.
    #[serde(default, skip_serializing_if = "is_false")]
    pub auto_increment: bool,
    /// Whether UNIQUE is emitted.
    #[serde(default, skip_serializing_if = "is_false")]
    pub unique: bool,
    /// Default value, as a SQL expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Foreign key reference, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKey>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

impl Column {
    /// Creates a nullable column with no constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            not_null: false,
            primary_key: false,
            auto_increment: false,
            unique: false,
            default: None,
            foreign_key: None,
        }
    }

    /// Marks the column as the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Adds NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Makes the column auto-increment.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Adds UNIQUE.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the DEFAULT expression, emitted verbatim.
    #[must_use]
    pub fn default_value(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    /// Adds a foreign key to `table(column)`.
    #[must_use]
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.foreign_key = Some(ForeignKey {
            ref_table: table.into(),
            ref_column: column.into(),
            on_delete: None,
            on_update: None,
        });
        self
    }

    /// Renders the column definition for `dialect`. An empty type is
    /// omitted.
    ///
    /// PostgreSQL expresses autoincrement as the `SERIAL` type; elsewhere the
    /// keyword follows `PRIMARY KEY`.
    #[must_use]
    pub fn definition(&self, dialect: Dialect) -> String {
        let ty = if self.auto_increment && dialect.autoincrement_is_type() {
            dialect.autoincrement_keyword().to_string()
        } else {
            dialect.map_type(&self.ty)
        };

        let mut def = dialect.quote_identifier(&self.name);
        if !ty.is_empty() {
            def.push(' ');
            def.push_str(&ty);
        }
        if self.primary_key {
            def.push(' ');
            def.push_str(dialect.primary_key_syntax());
        }
        if self.auto_increment && !dialect.autoincrement_is_type() {
            let keyword = dialect.autoincrement_keyword();
            if !keyword.is_empty() {
                def.push(' ');
                def.push_str(keyword);
            }
        }
        if self.not_null {
            def.push_str(" NOT NULL");
        }
        if self.unique {
            def.push_str(" UNIQUE");
        }
        if let Some(ref default) = self.default {
            def.push_str(" DEFAULT ");
            def.push_str(default);
        }
        def
    }

    /// Renders the table-level FOREIGN KEY constraint, if the column has one.
    #[must_use]
    pub fn foreign_key_constraint(&self, dialect: Dialect) -> Option<String> {
        let fk = self.foreign_key.as_ref()?;
        let mut sql = format!(
            "FOREIGN KEY ({}) REFERENCES {}({})",
            dialect.quote_identifier(&self.name),
            dialect.quote_identifier(&fk.ref_table),
            dialect.quote_identifier(&fk.ref_column)
        );
        if let Some(action) = fk.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = fk.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }
        Some(sql)
    }
}

/// A single-column index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Index name.
    pub name: String,
    /// Indexed column.
    pub column: String,
    /// Whether the index is UNIQUE.
    #[serde(default)]
    pub unique: bool,
}

impl Index {
    /// Creates an index named `idx_<table>_<column>`, lower-cased.
    #[must_use]
    pub fn for_column(table: &str, column: &str, unique: bool) -> Self {
        Self {
            name: format!("idx_{}_{}", table.to_lowercase(), column.to_lowercase()),
            column: column.to_string(),
            unique,
        }
    }

    /// Renders the `CREATE INDEX` statement on `table`.
    #[must_use]
    pub fn to_sql(&self, dialect: Dialect, table: &str) -> String {
        format!(
            "CREATE {}INDEX {} ON {}({});",
            if self.unique { "UNIQUE " } else { "" },
            dialect.quote_identifier(&self.name),
            dialect.quote_identifier(table),
            dialect.quote_identifier(&self.column)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_definition() {
        let col = Column::new("email", "string").not_null().unique();
        assert_eq!(
            col.definition(Dialect::Postgres),
            "\"email\" VARCHAR NOT NULL UNIQUE"
        );
        assert_eq!(
            col.definition(Dialect::MySql),
            "`email` VARCHAR(255) NOT NULL UNIQUE"
        );
    }

    #[test]
    fn test_native_type_passes_through() {
        let col = Column::new("payload", "JSONB");
        assert_eq!(col.definition(Dialect::Postgres), "\"payload\" JSONB");
    }

    #[test]
    fn test_autoincrement_per_dialect() {
        let col = Column::new("id", "int").primary_key().auto_increment();
        assert_eq!(col.definition(Dialect::Postgres), "\"id\" SERIAL PRIMARY KEY");
        assert_eq!(
            col.definition(Dialect::MySql),
            "`id` INT PRIMARY KEY AUTO_INCREMENT"
        );
        assert_eq!(
            col.definition(Dialect::Sqlite),
            "\"id\" INTEGER PRIMARY KEY AUTOINCREMENT"
        );
        assert_eq!(col.definition(Dialect::Oracle), "\"ID\" NUMBER PRIMARY KEY");
        assert_eq!(
            col.definition(Dialect::SqlServer),
            "[id] INT PRIMARY KEY IDENTITY(1,1)"
        );
    }

    #[test]
    fn test_untyped_column() {
        assert_eq!(Column::new("note", "").definition(Dialect::Sqlite), "\"note\"");
    }

    #[test]
    fn test_default_value() {
        let col = Column::new("created_at", "timestamp").default_value("CURRENT_TIMESTAMP");
        assert_eq!(
            col.definition(Dialect::Sqlite),
            "\"created_at\" TEXT DEFAULT CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_foreign_key_constraint() {
        let mut col = Column::new("user_id", "int").references("users", "id");
        assert_eq!(
            col.foreign_key_constraint(Dialect::Postgres).unwrap(),
            "FOREIGN KEY (\"user_id\") REFERENCES \"users\"(\"id\")"
        );

        if let Some(fk) = col.foreign_key.as_mut() {
            fk.on_delete = Some(ForeignKeyAction::Cascade);
            fk.on_update = Some(ForeignKeyAction::SetNull);
        }
        assert_eq!(
            col.foreign_key_constraint(Dialect::MySql).unwrap(),
            "FOREIGN KEY (`user_id`) REFERENCES `users`(`id`) ON DELETE CASCADE ON UPDATE SET NULL"
        );
        assert!(Column::new("x", "int")
            .foreign_key_constraint(Dialect::MySql)
            .is_none());
    }

    #[test]
    fn test_index_name_is_lowercased() {
        let idx = Index::for_column("Users", "Email", true);
        assert_eq!(idx.name, "idx_users_email");
        assert_eq!(
            idx.to_sql(Dialect::Postgres, "Users"),
            "CREATE UNIQUE INDEX \"idx_users_email\" ON \"Users\"(\"Email\");"
        );
    }

    #[test]
    fn test_column_serializes_compactly() {
        let col = Column::new("id", "int").primary_key();
        let json = serde_json::to_string(&col).unwrap();
        assert_eq!(json, r#"{"name":"id","type":"int","primaryKey":true}"#);
        let back: Column = serde_json::from_str(&json).unwrap();
        assert_eq!(back, col);
    }
}
