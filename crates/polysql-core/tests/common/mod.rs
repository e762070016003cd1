#![allow(dead_code)]

use polysql_core::{Build, Dialect, QueryBuilder, SqlValue, StructuredQuery};

pub fn builder(dialect: Dialect) -> QueryBuilder {
    QueryBuilder::new(dialect)
}

/// Returns the numbers of the `$N` / `:pN` markers in `sql`, left to right.
pub fn marker_numbers(sql: &str, prefix: &str) -> Vec<usize> {
    let mut numbers = Vec::new();
    let mut rest = sql;
    while let Some(pos) = rest.find(prefix) {
        rest = &rest[pos + prefix.len()..];
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        if let Ok(n) = digits.parse() {
            numbers.push(n);
        }
    }
    numbers
}

/// Exports `query`, re-imports it under the same dialect and checks that
/// both render identically.
pub fn assert_round_trip(query: &impl Build) -> StructuredQuery {
    let expected = query.build();
    let exported = query.export();
    let imported = QueryBuilder::new(query.dialect()).import(&exported).build();
    assert_eq!(
        imported, expected,
        "round trip changed the statement for {:?}",
        query.dialect()
    );
    exported
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}
