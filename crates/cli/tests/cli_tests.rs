use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SCHEMA: &str = r#"{
  "id": {"kind": "number", "label": "ID", "readonly": true, "filterable": true},
  "name": {"kind": "text", "label": "Name", "filterable": true},
  "active": {"kind": "bool", "filterable": true},
  "createdAt": {"kind": "date", "filterable": true},
  "meta": {"kind": "json"},
  "options": {
    "kind": "entity",
    "filterable": true,
    "schema": {
      "size": {"kind": "select", "filterable": true, "options": [
        {"label": "S", "value": "S"},
        {"label": "L", "value": "L"}
      ]}
    }
  }
}"#;

const ROWS: &str = r#"[
  {"id": 3, "name": "Gamma", "active": true, "createdAt": "2003-01-19T20:09:29.0Z", "options": {"size": "L"}},
  {"id": 1, "name": "Alpha", "active": false, "createdAt": "1985-08-09T02:10:18.0Z", "options": {"size": "S"}},
  {"id": 2, "name": "beta", "active": true, "createdAt": "1956-03-20T08:59:40.0Z", "options": {"size": "L"}}
]"#;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("schema.json"), SCHEMA).unwrap();
        std::fs::write(dir.path().join("rows.json"), ROWS).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

fn entiform() -> Command {
    let mut cmd = Command::cargo_bin("entiform").unwrap();
    cmd.env_remove("ENTIFORM_SCHEMA").env_remove("ENTIFORM_ROWS");
    cmd
}

fn query(fx: &Fixture) -> Command {
    let mut cmd = entiform();
    cmd.arg("query")
        .arg("--schema")
        .arg(fx.path("schema.json"))
        .arg("--rows")
        .arg(fx.path("rows.json"));
    cmd
}

fn ids(output: &[u8]) -> Vec<i64> {
    let rows: Vec<serde_json::Value> = serde_json::from_slice(output).unwrap();
    rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
}

#[test]
fn test_query_table_output() {
    let fx = Fixture::new();
    query(&fx)
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha"))
        .stdout(predicate::str::contains("Name"))
        .stdout(predicate::str::contains("3 of 3 rows"));
}

#[test]
fn test_query_text_filter_is_case_insensitive() {
    let fx = Fixture::new();
    let out = query(&fx).args(["-f", "name=al", "--json"]).output().unwrap();
    assert!(out.status.success());
    assert_eq!(ids(&out.stdout), vec![1]);
}

#[test]
fn test_query_nested_filter_and_sort() {
    let fx = Fixture::new();
    let out = query(&fx)
        .args(["-f", "options.size=L", "--sort", "id:desc", "--json"])
        .output()
        .unwrap();
    assert_eq!(ids(&out.stdout), vec![3, 2]);
}

#[test]
fn test_query_date_range_and_limit() {
    let fx = Fixture::new();
    let out = query(&fx)
        .args([
            "-f",
            "createdAt=1980-01-01T00:00:00Z..",
            "--sort",
            "createdAt",
            "--limit",
            "1",
            "--json",
        ])
        .output()
        .unwrap();
    assert_eq!(ids(&out.stdout), vec![1]);
}

#[test]
fn test_query_reads_paths_from_env() {
    let fx = Fixture::new();
    let out = entiform()
        .env("ENTIFORM_SCHEMA", fx.path("schema.json"))
        .env("ENTIFORM_ROWS", fx.path("rows.json"))
        .args(["query", "--json"])
        .output()
        .unwrap();
    assert_eq!(ids(&out.stdout), vec![3, 1, 2]);
}

#[test]
fn test_query_unknown_filter_field_fails() {
    let fx = Fixture::new();
    query(&fx)
        .args(["-f", "color=red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field 'color'"));
}

#[test]
fn test_query_missing_rows_file_fails() {
    let fx = Fixture::new();
    entiform()
        .arg("query")
        .arg("--schema")
        .arg(fx.path("schema.json"))
        .arg("--rows")
        .arg(Path::new("/nonexistent/rows.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading rows"));
}

#[test]
fn test_validate_valid_draft() {
    let fx = Fixture::new();
    let draft = fx.write("draft.json", r#"{"id": 1, "name": "Alpha", "meta": "{\"a\": 1}"}"#);
    entiform()
        .arg("validate")
        .arg("--schema")
        .arg(fx.path("schema.json"))
        .arg("--draft")
        .arg(draft)
        .assert()
        .success()
        .stdout(predicate::str::contains("Draft is valid"))
        .stdout(predicate::str::contains("\"a\": 1"));
}

#[test]
fn test_validate_invalid_json_exits_non_zero() {
    let fx = Fixture::new();
    let draft = fx.write("draft.json", r#"{"id": 1, "meta": "{invalid"}"#);
    entiform()
        .arg("validate")
        .arg("--schema")
        .arg(fx.path("schema.json"))
        .arg("--draft")
        .arg(draft)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Invalid JSON"));
}

#[test]
fn test_columns_lists_nested_filter_paths() {
    let fx = Fixture::new();
    entiform()
        .arg("columns")
        .arg("--schema")
        .arg(fx.path("schema.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("createdAt"))
        .stdout(predicate::str::contains("options.size"));
}

#[test]
fn test_query_malformed_date_bound_fails() {
    let fx = Fixture::new();
    query(&fx)
        .args(["-f", "createdAt=garbage.."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid filter for 'createdAt'"));
}
