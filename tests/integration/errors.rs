//! Failure reporting: exit status 1, nothing on stdout, a useful message on
//! stderr.

use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_malformed_var_names_token() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--var", "bad", "-e", "{{ Var.bad }}"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("'bad'"))
        .stderr(predicate::str::contains("key=value"));
}

#[test]
fn test_no_template() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--var", "a=1"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("unable to find template file or eval argument"));
}

#[test]
fn test_invalid_json_names_flag_and_key() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--json", "cfg={broken", "-e", "x"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("--json cfg={broken"))
        .stderr(predicate::str::contains("JSON"));
}

#[test]
fn test_ragged_csv_is_strict_by_default() {
    let project = TestProject::new();
    project.write_file("ragged.csv", "a,b\n1\n");

    project
        .tmplx()
        .args(["--csv", "rows=ragged.csv", "-e", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--csv rows=ragged.csv"))
        .stderr(predicate::str::contains("--csv-lenient"));
}

#[test]
fn test_missing_template_file() {
    let project = TestProject::new();

    project
        .tmplx()
        .arg("nope.tmpl")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unable to read template 'nope.tmpl'"));
}

#[test]
fn test_unknown_variable_suggests_alternative() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--var", "greeting=hi", "-e", "{{ Var.greting }}"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Var.greting"))
        .stderr(predicate::str::contains("Did you mean: Var.greeting?"));
}

#[test]
fn test_template_syntax_error() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["-e", "{% for x in %}"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not render template 'eval'"));
}

#[test]
fn test_verbose_and_quiet_are_exclusive() {
    let project = TestProject::new();

    project.tmplx().args(["-v", "-q", "-e", "x"]).assert().failure();
}
