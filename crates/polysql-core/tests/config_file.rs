//! Loading builder options from files.

use std::io::Write;

use polysql_core::{Build, BuilderOptions, Dialect, Error, QueryBuilder};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_json() {
    let file = write_temp(".json", r#"{"driver": "postgres", "schema": "public"}"#);
    let options = BuilderOptions::load(file.path()).unwrap();
    let qb = QueryBuilder::from_options(&options).unwrap();

    assert_eq!(qb.dialect(), Dialect::Postgres);
    assert_eq!(
        qb.select("users", &["id"]).build_sql(),
        "SELECT id FROM public.users"
    );
}

#[test]
fn test_load_yaml() {
    let file = write_temp(".yml", "driver: memory\n");
    let options = BuilderOptions::load(file.path()).unwrap();
    let qb = QueryBuilder::from_options(&options).unwrap();

    assert_eq!(qb.dialect(), Dialect::Sqlite);
    assert_eq!(qb.schema(), None);
}

#[test]
fn test_empty_schema_is_ignored() {
    let options = BuilderOptions::from_json(r#"{"driver": "mysql", "schema": ""}"#).unwrap();
    let qb = QueryBuilder::from_options(&options).unwrap();
    assert_eq!(qb.delete_from("t").build_sql(), "DELETE FROM t");
}

#[test]
fn test_unsupported_driver() {
    let file = write_temp(".json", r#"{"driver": "db2"}"#);
    let options = BuilderOptions::load(file.path()).unwrap();
    assert!(matches!(
        QueryBuilder::from_options(&options),
        Err(Error::UnsupportedDialect(ref name)) if name == "db2"
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        BuilderOptions::load(dir.path().join("absent.json")),
        Err(Error::Io(_))
    ));
}
