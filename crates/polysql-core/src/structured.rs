//! Serializable snapshot of a statement.
//!
//! [`StructuredQuery`] mirrors every statement field in a flat record that
//! encodes to JSON, YAML and XML. Exported fragments carry the dialect's
//! native markers, numbered across the whole statement in render order, so
//! the snapshot reads exactly like the SQL it produces. Importing reverses
//! the numbering and hands the arguments back out in the same order, which
//! makes `import(export(s))` render the same text and arguments as `s`.

use serde::{Deserialize, Serialize};

use crate::builder::{
    CreateTableStatement, DeleteStatement, DropTableStatement, Fragment, InsertStatement,
    MergeStatement, RawStatement, SelectStatement, SqlValue, Statement, StatementKind,
    UpdateStatement,
};
use crate::ddl::Column;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::placeholder::{self, PlaceholderStyle};

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

/// A flat, serializable projection of a statement.
///
/// Empty lists, unset options and false flags are omitted when encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "query", rename_all = "camelCase")]
pub struct StructuredQuery {
    /// Statement kind.
    pub kind: StatementKind,
    /// Dialect whose marker syntax the fragments use.
    pub dialect: Dialect,
    /// Schema qualifying the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Target table.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub table: String,
    /// Table alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Output columns (select) or target columns (insert).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    /// `SELECT DISTINCT`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub distinct: bool,
    /// Join clauses, each including its keyword.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joins: Vec<String>,
    /// Predicates, AND-ed.
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub predicates: Vec<String>,
    /// `GROUP BY` terms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<String>,
    /// `HAVING` predicates, AND-ed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub having: Vec<String>,
    /// `ORDER BY` terms.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<String>,
    /// Row limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Row offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Insert rows, each the text between the parentheses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Update assignments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set: Vec<String>,
    /// Column definitions (create).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub definitions: Vec<Column>,
    /// `IF NOT EXISTS` (create).
    #[serde(default, skip_serializing_if = "is_false")]
    pub if_not_exists: bool,
    /// `IF EXISTS` (drop).
    #[serde(default, skip_serializing_if = "is_false")]
    pub if_exists: bool,
    /// Merge source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub using: Option<String>,
    /// Merge condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_on: Option<String>,
    /// `WHEN MATCHED` assignments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merge_matched_set: Vec<String>,
    /// `WHEN NOT MATCHED` insert columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merge_insert_columns: Vec<String>,
    /// `WHEN NOT MATCHED` insert values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_insert_values: Option<String>,
    /// Raw clauses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw: Vec<String>,
    /// The rendered SQL at export time. Informational; import ignores it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sql: String,
    /// All arguments, in marker order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<SqlValue>,
}

/// Formats fragments with one counter shared across the statement.
struct Exporter {
    style: PlaceholderStyle,
    counter: usize,
    args: Vec<SqlValue>,
}

impl Exporter {
    fn fragment(&mut self, fragment: &Fragment) -> String {
        self.args.extend(fragment.args.iter().cloned());
        placeholder::format_from(self.style, &fragment.sql, &mut self.counter)
    }

    fn fragments(&mut self, fragments: &[Fragment]) -> Vec<String> {
        fragments.iter().map(|f| self.fragment(f)).collect()
    }
}

/// Hands exported arguments back to fragments by marker count.
struct Importer<'a> {
    style: PlaceholderStyle,
    args: &'a [SqlValue],
    pos: usize,
}

impl Importer<'_> {
    fn fragment(&mut self, sql: &str) -> Fragment {
        let sql = placeholder::to_generic(self.style, sql);
        let end = (self.pos + placeholder::count_markers(&sql)).min(self.args.len());
        let args = self.args[self.pos..end].to_vec();
        self.pos = end;
        Fragment { sql, args }
    }

    fn fragments(&mut self, sqls: &[String]) -> Vec<Fragment> {
        sqls.iter().map(|s| self.fragment(s)).collect()
    }

    fn remaining(&self) -> &[SqlValue] {
        &self.args[self.pos..]
    }
}

impl StructuredQuery {
    fn empty(kind: StatementKind, dialect: Dialect) -> Self {
        Self {
            kind,
            dialect,
            schema: None,
            table: String::new(),
            alias: None,
            columns: vec![],
            distinct: false,
            joins: vec![],
            predicates: vec![],
            group_by: vec![],
            having: vec![],
            order_by: vec![],
            limit: None,
            offset: None,
            values: vec![],
            set: vec![],
            definitions: vec![],
            if_not_exists: false,
            if_exists: false,
            using: None,
            merge_on: None,
            merge_matched_set: vec![],
            merge_insert_columns: vec![],
            merge_insert_values: None,
            raw: vec![],
            sql: String::new(),
            args: vec![],
        }
    }

    /// Projects `statement` for `dialect`.
    ///
    /// Fragments are formatted in render order with a single counter.
    #[must_use]
    pub fn from_statement(dialect: Dialect, statement: &Statement) -> Self {
        let style = dialect.placeholder_style();
        let mut ex = Exporter {
            style,
            counter: 0,
            args: vec![],
        };
        let mut q = Self::empty(statement.kind(), dialect);

        match statement {
            Statement::Select(s) => {
                q.schema.clone_from(&s.schema);
                q.table.clone_from(&s.table);
                q.alias.clone_from(&s.alias);
                q.distinct = s.distinct;
                q.columns.clone_from(&s.columns);
                q.joins = ex.fragments(&s.joins);
                q.predicates = ex.fragments(&s.predicates);
                q.group_by.clone_from(&s.group_by);
                q.having = ex.fragments(&s.having);
                q.order_by.clone_from(&s.order_by);
                q.limit = s.limit;
                q.offset = s.offset;
            }
            Statement::Insert(s) => {
                q.schema.clone_from(&s.schema);
                q.table.clone_from(&s.table);
                q.columns.clone_from(&s.columns);
                q.values = ex.fragments(&s.rows);
            }
            Statement::Update(s) => {
                q.schema.clone_from(&s.schema);
                q.table.clone_from(&s.table);
                q.set = ex.fragments(&s.assignments);
                q.predicates = ex.fragments(&s.predicates);
            }
            Statement::Delete(s) => {
                q.schema.clone_from(&s.schema);
                q.table.clone_from(&s.table);
                q.predicates = ex.fragments(&s.predicates);
            }
            Statement::Create(s) => {
                q.table.clone_from(&s.table);
                q.if_not_exists = s.if_not_exists;
                q.definitions.clone_from(&s.columns);
            }
            Statement::Drop(s) => {
                q.table.clone_from(&s.table);
                q.if_exists = s.if_exists;
            }
            Statement::Merge(s) => {
                q.table.clone_from(&s.table);
                q.using.clone_from(&s.using);
                q.merge_on = s.on.as_ref().map(|f| ex.fragment(f));
                q.merge_matched_set = ex.fragments(&s.matched_set);
                q.merge_insert_columns.clone_from(&s.insert_columns);
                q.merge_insert_values = s.insert_values.as_ref().map(|f| ex.fragment(f));
            }
            Statement::Raw(s) => {
                q.raw = ex.fragments(&s.clauses);
            }
        }

        q.sql = placeholder::format(style, &statement.to_fragment(dialect).sql);
        q.args = ex.args;
        tracing::trace!(
            dialect = %dialect,
            kind = %q.kind,
            args = q.args.len(),
            "exported structured query"
        );
        q
    }

    /// Rebuilds the statement this snapshot was exported from.
    ///
    /// Arguments are assigned to fragments in render order by marker count;
    /// any surplus stays with the last fragment so the argument list is
    /// preserved as a whole.
    #[must_use]
    pub fn to_statement(&self) -> Statement {
        let mut im = Importer {
            style: self.dialect.placeholder_style(),
            args: &self.args,
            pos: 0,
        };

        let mut statement = match self.kind {
            StatementKind::Select => Statement::Select(SelectStatement {
                schema: self.schema.clone(),
                table: self.table.clone(),
                alias: self.alias.clone(),
                distinct: self.distinct,
                columns: self.columns.clone(),
                joins: im.fragments(&self.joins),
                predicates: im.fragments(&self.predicates),
                group_by: self.group_by.clone(),
                having: im.fragments(&self.having),
                order_by: self.order_by.clone(),
                limit: self.limit,
                offset: self.offset,
            }),
            StatementKind::Insert => Statement::Insert(InsertStatement {
                schema: self.schema.clone(),
                table: self.table.clone(),
                columns: self.columns.clone(),
                rows: im.fragments(&self.values),
            }),
            StatementKind::Update => Statement::Update(UpdateStatement {
                schema: self.schema.clone(),
                table: self.table.clone(),
                assignments: im.fragments(&self.set),
                predicates: im.fragments(&self.predicates),
            }),
            StatementKind::Delete => Statement::Delete(DeleteStatement {
                schema: self.schema.clone(),
                table: self.table.clone(),
                predicates: im.fragments(&self.predicates),
            }),
            StatementKind::Create => Statement::Create(CreateTableStatement {
                table: self.table.clone(),
                if_not_exists: self.if_not_exists,
                columns: self.definitions.clone(),
            }),
            StatementKind::Drop => Statement::Drop(DropTableStatement {
                table: self.table.clone(),
                if_exists: self.if_exists,
            }),
            StatementKind::Merge => Statement::Merge(MergeStatement {
                table: self.table.clone(),
                using: self.using.clone(),
                on: self.merge_on.as_deref().map(|s| im.fragment(s)),
                matched_set: im.fragments(&self.merge_matched_set),
                insert_columns: self.merge_insert_columns.clone(),
                insert_values: self.merge_insert_values.as_deref().map(|s| im.fragment(s)),
            }),
            StatementKind::Raw => Statement::Raw(RawStatement {
                clauses: im.fragments(&self.raw),
            }),
        };

        let surplus = im.remaining();
        if !surplus.is_empty() {
            if let Some(last) = statement.last_fragment_mut() {
                last.args.extend_from_slice(surplus);
            }
        }

        tracing::trace!(dialect = %self.dialect, kind = %self.kind, "imported structured query");
        statement
    }

    /// Encodes as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if encoding fails.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Decodes from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] if encoding fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Decodes from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] on malformed input.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Encodes as XML with a `<query>` root element.
    ///
    /// Arguments are written as one typed element each inside `<args>`,
    /// for example `<arg type="int">7</arg>`, `<arg type="null"/>` or
    /// `<arg type="blob">01ff</arg>` (hex), so every argument stays one
    /// element and NULL differs from the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Xml`] if a value has no XML representation.
    pub fn to_xml(&self) -> Result<String> {
        let body = Self {
            args: vec![],
            ..self.clone()
        };
        let xml = quick_xml::se::to_string(&body).map_err(|e| Error::Xml(e.to_string()))?;
        if self.args.is_empty() {
            return Ok(xml);
        }

        let args = XmlArgs {
            arg: self.args.iter().map(XmlArg::from).collect(),
        };
        let args = quick_xml::se::to_string_with_root("args", &args)
            .map_err(|e| Error::Xml(e.to_string()))?;
        let head = xml
            .strip_suffix("</query>")
            .ok_or_else(|| Error::Xml(String::from("missing </query> end tag")))?;
        Ok(format!("{head}{args}</query>"))
    }
}

/// The `<args>` element of the XML encoding.
#[derive(Serialize)]
struct XmlArgs {
    arg: Vec<XmlArg>,
}

/// One argument, tagged with its type.
#[derive(Serialize)]
struct XmlArg {
    #[serde(rename = "@type")]
    ty: &'static str,
    #[serde(rename = "$text", skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl From<&SqlValue> for XmlArg {
    fn from(value: &SqlValue) -> Self {
        let (ty, value) = match value {
            SqlValue::Null => ("null", None),
            SqlValue::Bool(b) => ("bool", Some(b.to_string())),
            SqlValue::Int(n) => ("int", Some(n.to_string())),
            SqlValue::Float(x) => ("float", Some(x.to_string())),
            SqlValue::Text(s) => ("text", Some(s.clone())),
            SqlValue::Blob(bytes) => (
                "blob",
                Some(bytes.iter().map(|b| format!("{b:02x}")).collect()),
            ),
        };
        Self { ty, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Build;
    use crate::query::QueryBuilder;

    fn round_trip(built: &impl Build) {
        let exported = built.export();
        let imported = QueryBuilder::new(exported.dialect).import(&exported);
        assert_eq!(imported.build(), built.build());
    }

    #[test]
    fn test_export_numbers_across_fragments() {
        let q = QueryBuilder::new(Dialect::Postgres)
            .update("users")
            .set("email", "a@b.c")
            .where_clause("id = ?", 3)
            .export();
        assert_eq!(q.kind, StatementKind::Update);
        assert_eq!(q.set, vec![String::from("email = $1")]);
        assert_eq!(q.predicates, vec![String::from("id = $2")]);
        assert_eq!(q.sql, "UPDATE users SET email = $1 WHERE id = $2");
        assert_eq!(
            q.args,
            vec![SqlValue::Text(String::from("a@b.c")), SqlValue::Int(3)]
        );
    }

    #[test]
    fn test_round_trip_every_kind() {
        let qb = QueryBuilder::new(Dialect::Oracle).with_schema("hr");
        round_trip(
            &qb.select("emp", &["id", "name"])
                .distinct()
                .alias("e")
                .join("dept d", "d.id = e.dept_id AND d.open = ?", true)
                .where_clause("salary > ?", 1000)
                .or_where("bonus > ?", 10)
                .group_by(&["id", "name"])
                .having("COUNT(*) > ?", 1)
                .order_by_desc("name")
                .limit(5)
                .offset(10),
        );
        round_trip(
            &qb.insert_into("emp", &["name", "age"])
                .values(("a", 1))
                .values_expr("?, 2", "b"),
        );
        round_trip(&qb.update("emp").set_raw("n = n + ?", 1).where_clause("id = ?", 2));
        round_trip(&qb.delete_from("emp").where_clause("id = ?", 2));
        round_trip(
            &qb.create_table("emp")
                .if_not_exists()
                .column(Column::new("id", "int").primary_key().auto_increment()),
        );
        round_trip(&qb.drop_table("emp").if_exists());
        round_trip(
            &qb.merge_into("emp")
                .using("staging s")
                .on("emp.id = ?", 1)
                .when_matched_set("name", "x")
                .when_not_matched_insert(&["id", "name"], (1, "x")),
        );
        round_trip(&qb.raw("SELECT ? FROM dual", 1).append("UNION SELECT ? FROM dual", 2));
    }

    #[test]
    fn test_round_trip_keeps_quoted_markers() {
        let select = QueryBuilder::new(Dialect::Postgres)
            .select("t", &["id"])
            .where_clause("note <> '?' AND id = ?", 4);
        let exported = select.export();
        assert_eq!(exported.predicates, vec![String::from("note <> '?' AND id = $1")]);
        round_trip(&select);
    }

    #[test]
    fn test_round_trip_surplus_args() {
        // More args than markers still rebuild the same argument list.
        let select = QueryBuilder::new(Dialect::Postgres)
            .select("t", &[])
            .where_clause("a = 1", 9)
            .where_clause("b = ?", 8);
        round_trip(&select);
    }

    #[test]
    fn test_omits_empty_fields() {
        let json = QueryBuilder::new(Dialect::Sqlite)
            .drop_table("users")
            .export()
            .to_json(false)
            .unwrap();
        assert_eq!(
            json,
            r#"{"kind":"drop","dialect":"sqlite","table":"users","sql":"DROP TABLE users"}"#
        );
    }

    #[test]
    fn test_json_and_yaml_decode() {
        let exported = QueryBuilder::new(Dialect::MySql)
            .select("users", &["id"])
            .where_clause("name = ?", "ann")
            .limit(3)
            .export();

        let from_json = StructuredQuery::from_json(&exported.to_json(true).unwrap()).unwrap();
        assert_eq!(from_json, exported);

        let from_yaml = StructuredQuery::from_yaml(&exported.to_yaml().unwrap()).unwrap();
        assert_eq!(from_yaml, exported);
    }

    #[test]
    fn test_xml_root_element() {
        let xml = QueryBuilder::new(Dialect::Postgres)
            .select("users", &["id", "name"])
            .where_clause("name = ?", "ann")
            .export()
            .to_xml()
            .unwrap();
        assert!(xml.starts_with("<query>"));
        assert!(xml.contains("<table>users</table>"));
        assert!(xml.contains("<columns>id</columns><columns>name</columns>"));
        assert!(xml.contains("<where>name = $1</where>"));
        assert!(xml.contains(r#"<args><arg type="text">ann</arg></args>"#));
        assert!(xml.ends_with("</query>"));
    }

    #[test]
    fn test_xml_keeps_one_element_per_argument() {
        let xml = QueryBuilder::new(Dialect::Postgres)
            .insert_into("files", &["id", "note", "body", "label"])
            .values(vec![
                SqlValue::Int(1),
                SqlValue::Null,
                SqlValue::Blob(vec![0x01, 0xff]),
                SqlValue::Text(String::new()),
            ])
            .export()
            .to_xml()
            .unwrap();

        assert!(xml.contains("<values>$1, $2, $3, $4</values>"));
        assert_eq!(xml.matches("<arg ").count(), 4);
        assert!(xml.contains(r#"<arg type="int">1</arg>"#));
        assert!(xml.contains(r#"<arg type="null""#));
        assert!(xml.contains(r#"<arg type="blob">01ff</arg>"#));
        assert!(xml.contains(r#"<arg type="text""#));
        assert!(!xml.contains("<args>1</args>"));
        assert!(xml.ends_with("</args></query>"));
    }

    #[test]
    fn test_xml_without_args() {
        let xml = QueryBuilder::new(Dialect::Sqlite)
            .drop_table("t")
            .export()
            .to_xml()
            .unwrap();
        assert!(!xml.contains("<args"));
        assert!(xml.ends_with("</query>"));
    }
}
