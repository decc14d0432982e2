//! CSV, JSON and YAML data through the binary.

use predicates::prelude::*;
use tmplx_cli::test_utils::{SAMPLE_JSON, SAMPLE_TYPED_CSV, SAMPLE_YAML};

use crate::common::TestProject;

#[test]
fn test_inline_csv() {
    let project = TestProject::new();

    project
        .tmplx()
        .args(["--csv", "rows=a,b\n1,2", "-e", "{{ CSV.rows.0.a }}+{{ CSV.rows.0.b }}"])
        .assert()
        .success()
        .stdout("1+2");
}

#[test]
fn test_typed_csv_hint_row() {
    let project = TestProject::new();
    project.write_file("people.csv", SAMPLE_TYPED_CSV);

    project
        .tmplx()
        .args([
            "--csv-typed",
            "--csv",
            "people=people.csv",
            "-e",
            "{% for p in CSV.people %}{% if p.active %}{{ p.name }}:{{ p.age + 1 }}{% endif %}{% endfor %}",
        ])
        .assert()
        .success()
        .stdout("Alice:31");
}

#[test]
fn test_csv_is_untyped_by_default() {
    let project = TestProject::new();
    project.write_file("people.csv", SAMPLE_TYPED_CSV);

    project
        .tmplx()
        .args(["--csv", "people=people.csv", "-e", "{{ CSV.people | length }}:{{ CSV.people.0.age }}"])
        .assert()
        .success()
        .stdout("3:int");
}

#[test]
fn test_typed_csv_via_environment() {
    let project = TestProject::new();

    project
        .tmplx()
        .env("TMPLX_CSV_TYPED", "true")
        .args(["--csv", "flags=on\nbool\nTRUE", "-e", "{% if CSV.flags.0.on %}yes{% endif %}"])
        .assert()
        .success()
        .stdout("yes");
}

#[test]
fn test_csv_column_of_hint_words_keeps_every_row() {
    let project = TestProject::new();
    project.write_file("kinds.csv", "kind\ntext\nbool\n");

    project
        .tmplx()
        .args(["--csv", "kinds=kinds.csv", "-e", "{% for k in CSV.kinds %}{{ k.kind }};{% endfor %}"])
        .assert()
        .success()
        .stdout("text;bool;");
}

#[test]
fn test_csv_quoted_field_after_space() {
    let project = TestProject::new();
    project.write_file("mottos.csv", "name, motto\nAda, \"first, best\"\n");

    project
        .tmplx()
        .args(["--csv", "m=mottos.csv", "-e", "{{ CSV.m.0.name }}: {{ CSV.m.0.motto }}"])
        .assert()
        .success()
        .stdout("Ada: first, best");
}

#[test]
fn test_csv_comments_and_blank_lines() {
    let project = TestProject::new();
    project.write_file("notes.csv", "# exported\nkey, value\n\nk1, v1\n# trailing\n");

    project
        .tmplx()
        .args(["--csv", "notes=notes.csv", "-e", "{% for n in CSV.notes %}{{ n.key }}={{ n.value }}{% endfor %}"])
        .assert()
        .success()
        .stdout("k1=v1");
}

#[test]
fn test_csv_lenient_via_environment() {
    let project = TestProject::new();

    project
        .tmplx()
        .env("TMPLX_CSV_LENIENT", "true")
        .args(["--csv", "rows={\"key\": \"value\"}", "-e", "[{{ CSV.rows | length }}]"])
        .assert()
        .success()
        .stdout("[0]");
}

#[test]
fn test_json_file_and_inline() {
    let project = TestProject::new();
    project.write_file("config.json", SAMPLE_JSON);

    project
        .tmplx()
        .args([
            "--json",
            "cfg=config.json",
            "--json",
            "list=[1, 2, 3]",
            "-e",
            "{{ JSON.cfg.server.host }}:{{ JSON.cfg.server.port }} {{ JSON.list | length }}",
        ])
        .assert()
        .success()
        .stdout("localhost:8080 3");
}

#[test]
fn test_yaml_file_with_both_extensions() {
    let project = TestProject::new();
    project.write_file("values.yml", SAMPLE_YAML);
    project.write_file("more.yaml", "name: extra\n");

    project
        .tmplx()
        .args([
            "--yml",
            "values=values.yml",
            "--yml",
            "more=more.yaml",
            "-e",
            "{{ YML.values.replicas }} {{ YML.values.images | join(sep=\",\") }} {{ YML.more.name }}",
        ])
        .assert()
        .success()
        .stdout("2 web,worker extra");
}

#[test]
fn test_existing_file_with_other_extension_is_inline() {
    let project = TestProject::new();
    project.write_file("data.txt", "{\"from\": \"file\"}");

    project
        .tmplx()
        .args(["--json", "doc=data.txt", "-e", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--json doc=data.txt"));
}
