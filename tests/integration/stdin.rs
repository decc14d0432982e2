//! Standard input handling through the binary.

use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_csv_from_stdin() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--csv", "data=-", "-e", "{% for r in CSV.data %}{{ r.a }},{{ r.b }}{% endfor %}"])
        .write_stdin("a,b\n1,2\n")
        .assert()
        .success()
        .stdout("1,2");
}

#[test]
fn test_stdin_shared_across_flags_by_default() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--json", "one=-", "--yml", "two=-", "-e", "{{ JSON.one.n }} {{ YML.two.n }}"])
        .write_stdin("{\"n\": 42}")
        .assert()
        .success()
        .stdout("42 42");
}

#[test]
fn test_exclusive_stdin_rejects_second_reference() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--exclusive-stdin", "--json", "one=-", "--json", "two=-", "-e", "x"])
        .write_stdin("{}")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("already claimed by 'one'"))
        .stderr(predicate::str::contains("'two'"));
}

#[test]
fn test_exclusive_stdin_via_environment() {
    let project = TestProject::new();

    project
        .tmplx()
        .env("TMPLX_EXCLUSIVE_STDIN", "true")
        .args(["--csv", "a=-", "--csv", "b=-", "-e", "x"])
        .write_stdin("h\n1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already claimed"));
}

#[test]
fn test_exclusive_stdin_allows_single_reference() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--exclusive-stdin", "--yml", "doc=-", "-e", "{{ YML.doc.name }}"])
        .write_stdin("name: solo\n")
        .assert()
        .success()
        .stdout("solo");
}

#[test]
fn test_var_dash_is_literal() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--var", "dash=-", "-e", "[{{ Var.dash }}]"])
        .write_stdin("ignored")
        .assert()
        .success()
        .stdout("[-]");
}

#[test]
fn test_template_from_stdin() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--var", "who=pipe", "-"])
        .write_stdin("hello {{ Var.who }}")
        .assert()
        .success()
        .stdout("hello pipe");
}
