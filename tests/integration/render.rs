//! End-to-end rendering through the binary.

use predicates::prelude::*;
use tmplx_cli::test_utils::SAMPLE_CSV;

use crate::common::TestProject;

#[test]
fn test_var_and_csv_file() {
    let project = TestProject::new();
    project.write_file("sample.csv", SAMPLE_CSV);

    project
        .tmplx()
        .args([
            "--var",
            "greeting=hello",
            "--csv",
            "data=sample.csv",
            "-e",
            "{{ Var.greeting }}:{% for row in CSV.data %} {{ row.name }}({{ row.age }}){% endfor %}",
        ])
        .assert()
        .success()
        .stdout("hello: Alice(30) Bob(25)");
}

#[test]
fn test_template_file_with_partials() {
    let project = TestProject::new();
    project.write_file("report.txt", "{% include \"header.txt\" %}\n{{ Var.body }}\n");
    project.write_file("parts/header.txt", "# {{ Var.title }}");

    project
        .tmplx()
        .args(["--var", "title=Weekly", "--var", "body=All good", "report.txt", "parts/header.txt"])
        .assert()
        .success()
        .stdout("# Weekly\nAll good\n");
}

#[test]
fn test_eval_with_partial_file() {
    let project = TestProject::new();
    project.write_file("footer.txt", "-- {{ Var.who }}");

    project
        .tmplx()
        .args(["--var", "who=ops", "-e", "body {% include \"footer.txt\" %}", "footer.txt"])
        .assert()
        .success()
        .stdout("body -- ops");
}

#[test]
fn test_env_namespace() {
    let project = TestProject::new();

    project
        .tmplx()
        .env("env1", "val1")
        .args(["-e", "{{ Env.env1 }}"])
        .assert()
        .success()
        .stdout("val1");
}

#[test]
fn test_var_value_keeps_later_equals_signs() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--var", "moar=more=data", "-e", "{{ Var.moar }}"])
        .assert()
        .success()
        .stdout("more=data");
}

#[test]
fn test_duplicate_key_last_write_wins() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--var", "k=first", "--var", "k=second", "-e", "{{ Var.k }}"])
        .assert()
        .success()
        .stdout("second");
}

#[test]
fn test_html_template_is_escaped() {
    let project = TestProject::new();
    project.write_file("page.html", "<p>{{ Var.text }}</p>");

    project
        .tmplx()
        .args(["--var", "text=<b>bold</b>", "page.html"])
        .assert()
        .success()
        .stdout("<p>&lt;b&gt;bold&lt;&#x2F;b&gt;</p>");
}

#[test]
fn test_verbose_logs_go_to_stderr() {
    let project = TestProject::new();
    project.write_file("sample.csv", SAMPLE_CSV);

    project
        .tmplx()
        .args(["--verbose", "--csv", "rows=sample.csv", "-e", "{{ CSV.rows | length }}"])
        .assert()
        .success()
        .stdout("2")
        .stderr(predicate::str::contains("from file"));
}

#[test]
fn test_quiet_hides_fallback_warning() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--quiet", "--json", "doc=missing.json", "-e", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WARN").not());
}

#[test]
fn test_csv_rows_render_in_file_order() {
    let project = TestProject::new();
    project.write_file("sample.csv", "name,age\nAlice,30\nBob,40");

    project
        .tmplx()
        .args([
            "--var",
            "greeting=hello",
            "--csv",
            "data=sample.csv",
            "-e",
            "{{ Var.greeting }}\n{% for row in CSV.data %}{{ row.name }}/{{ row.age }}\n{% endfor %}",
        ])
        .assert()
        .success()
        .stdout("hello\nAlice/30\nBob/40\n");
}
