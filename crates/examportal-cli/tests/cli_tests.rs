//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A base URL nothing is listening on.
fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    format!("http://127.0.0.1:{port}")
}

/// Run in an empty directory so no stray config file is picked up.
fn examportal(dir: &TempDir, base_url: &str) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("examportal").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("EXAMPORTAL_BASE_URL", base_url);
    cmd
}

fn write_answer_sheet(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("response.html");
    std::fs::write(&path, "<div class=\"section-lbl\">Math</div>").unwrap();
    path
}

#[test]
fn result_without_params_reports_missing_details() {
    let dir = TempDir::new().unwrap();

    examportal(&dir, &unreachable_url())
        .arg("result")
        .assert()
        .success()
        .stdout(predicate::str::contains("Result details not provided."));
}

#[test]
fn result_with_partial_location_reports_missing_details() {
    let dir = TempDir::new().unwrap();

    examportal(&dir, &unreachable_url())
        .args(["result", "--location", "result.html?exam=Mock_Exam"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Result details not provided."));
}

#[test]
fn result_with_unreachable_service_is_unavailable() {
    let dir = TempDir::new().unwrap();

    examportal(&dir, &unreachable_url())
        .args(["result", "--exam", "Mock_Exam", "--roll", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Result not available yet. Please try again later.",
        ))
        .stderr(predicate::str::contains("could not fetch result"));
}

#[test]
fn submit_with_missing_fields_prompts() {
    let dir = TempDir::new().unwrap();
    let sheet = write_answer_sheet(&dir);

    examportal(&dir, &unreachable_url())
        .args(["submit", "--exam", "Mock Exam", "--name", "A", "--roll", "1"])
        .arg("--file")
        .arg(&sheet)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fill all fields"))
        .stdout(predicate::str::contains("Navigate").not());
}

#[test]
fn submit_without_file_prompts() {
    let dir = TempDir::new().unwrap();

    examportal(&dir, &unreachable_url())
        .args([
            "submit", "--exam", "Mock Exam", "--name", "A", "--roll", "1", "--category", "GEN",
            "--gender", "F", "--state", "KA",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please fill all fields"));
}

#[test]
fn submit_navigates_even_when_service_is_down() {
    let dir = TempDir::new().unwrap();
    let sheet = write_answer_sheet(&dir);

    examportal(&dir, &unreachable_url())
        .args([
            "submit", "--exam", "Mock Exam", "--name", "A", "--roll", " 1 ", "--category", "GEN",
            "--gender", "F", "--state", "KA",
        ])
        .arg("--file")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Navigate: result.html?exam=Mock_Exam&roll=1",
        ))
        .stderr(predicate::str::contains("evaluation request failed"));
}

#[test]
fn submit_page_flag_overrides_configured_page() {
    let dir = TempDir::new().unwrap();
    let sheet = write_answer_sheet(&dir);
    std::fs::write(
        dir.path().join("examportal.toml"),
        "result_page = \"configured.html\"\n",
    )
    .unwrap();

    examportal(&dir, &unreachable_url())
        .args([
            "submit", "--exam", "Mock Exam", "--name", "A", "--roll", "1", "--category", "GEN",
            "--gender", "F", "--state", "KA", "--page", "scores.html",
        ])
        .arg("--file")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Navigate: scores.html?exam=Mock_Exam&roll=1",
        ));

    examportal(&dir, &unreachable_url())
        .args([
            "submit", "--exam", "Mock Exam", "--name", "A", "--roll", "1", "--category", "GEN",
            "--gender", "F", "--state", "KA",
        ])
        .arg("--file")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Navigate: configured.html?exam=Mock_Exam&roll=1",
        ));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    examportal(&dir, &unreachable_url())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created examportal.toml"));

    assert!(dir.path().join("examportal.toml").exists());

    examportal(&dir, &unreachable_url())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn unknown_format_is_an_error() {
    let dir = TempDir::new().unwrap();

    examportal(&dir, &unreachable_url())
        .args(["result", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[tokio::test(flavor = "multi_thread")]
async fn result_renders_table_from_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/result"))
        .and(query_param("exam", "Mock_Exam"))
        .and(query_param("roll", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "exam": "Mock_Exam",
            "candidate": {"name": "A", "roll": "1"},
            "subjects": [{"name": "Math", "attempt": 1, "na": 0, "right": 1, "wrong": 0, "marks": 4}],
            "overall": {"attempt": 1, "na": 0, "right": 1, "wrong": 0, "marks": 4}
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    examportal(&dir, &server.uri())
        .args(["result", "--location", "result.html?exam=Mock_Exam&roll=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mock Exam"))
        .stdout(predicate::str::contains("Name: A"))
        .stdout(predicate::str::contains("Math"))
        .stdout(predicate::str::contains("Overall"));

    let html_path = dir.path().join("out").join("result.html");
    examportal(&dir, &server.uri())
        .args(["result", "--exam", "Mock_Exam", "--roll", "1", "--format", "html"])
        .arg("--output")
        .arg(&html_path)
        .assert()
        .success();
    let html = std::fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("<tr class=\"overall\"><td>Overall</td>"));
}

#[tokio::test(flavor = "multi_thread")]
async fn result_shows_service_error_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/result"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "Result not found"})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    examportal(&dir, &server.uri())
        .args(["result", "--exam", "Mock_Exam", "--roll", "1", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"text\": \"Result not found\""))
        .stdout(predicate::str::contains("\"state\": \"service_error\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn exams_list_prints_catalogue() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/exams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"exam_name": "Mock Exam", "correct": 4, "wrong": -1, "na": 0}
        ])))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    examportal(&dir, &server.uri())
        .args(["exams", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mock Exam"))
        .stdout(predicate::str::contains("-1"));
}
