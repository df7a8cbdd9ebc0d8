use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn speller() -> Command {
    let mut cmd = Command::cargo_bin("speller").unwrap();
    cmd.arg("--no-color").env_remove("SPELLER_CHECK_URL");
    cmd
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn write_config(dir: &TempDir, server: &MockServer) -> std::path::PathBuf {
    write_file(
        dir,
        "speller.toml",
        &format!(
            "[service]\ncheck_url = \"{0}/spell.cgi\"\nsuggest_url = \"{0}/suggest.cgi\"\n",
            server.uri()
        ),
    )
}

#[test]
fn test_help_lists_commands() {
    speller()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("suggest"));
}

#[test]
fn test_empty_file_is_not_sent() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "empty.txt", "   \n");

    // An unreachable endpoint proves no request is made
    speller()
        .args(["--check-url", "http://127.0.0.1:1/"])
        .arg("check")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("No text to check."));
}

#[test]
fn test_missing_file() {
    speller()
        .args(["check", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_unreachable_service() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "text.txt", "Tere, kuidas läheb?");

    speller()
        .args(["--check-url", "http://127.0.0.1:1/"])
        .arg("check")
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error checking grammar"));
}

#[tokio::test]
async fn test_check_lists_flagged_words() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spell.cgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<body><span data-fs-suggest="x">läheb</span></body>"#),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server);
    let file = write_file(&dir, "text.txt", "Tere,\nkuidas läheb?");

    speller()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("2:8 läheb"))
        .stdout(predicate::str::contains("Found 1 mistake(s)."));
}

#[tokio::test]
async fn test_check_json_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spell.cgi"))
        .and(query_param("doc", "kuidas"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<span data-fs-suggest="x">kuidas</span>"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server);
    let file = write_file(&dir, "text.txt", "Tere, kuidas läheb? kuidas");

    let output = speller()
        .arg("--config")
        .arg(&config)
        .args(["check", "--no-fail", "--format", "json", "--selection", "1:7-1:13"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_highlights"], 2);
    assert_eq!(json["highlights"][0]["word"], "kuidas");
    assert_eq!(json["highlights"][0]["column"], 7);
    assert_eq!(json["highlights"][1]["start"], 21);
}

#[tokio::test]
async fn test_check_json_output_without_issues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/spell.cgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<body>Tere</body>"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server);
    let file = write_file(&dir, "text.txt", "Tere");

    let output = speller()
        .arg("--config")
        .arg(&config)
        .args(["check", "--format", "json"])
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total_highlights"], 0);
    assert_eq!(json["highlights"], serde_json::json!([]));
    assert_eq!(json["file"], file.display().to_string());
}

#[tokio::test]
async fn test_suggest_without_terminal_makes_no_edit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/suggest.cgi"))
        .and(query_param("word", "tere"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<body>Tere<br>Tervist<br>x</body>"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &server);
    let file = write_file(&dir, "text.txt", "tere maailm");

    speller()
        .arg("--config")
        .arg(&config)
        .args(["suggest", "--at", "1:2"])
        .arg(&file)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&file).unwrap(), "tere maailm");
}

#[test]
fn test_suggest_needs_a_word() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "text.txt", "tere   maailm");

    speller()
        .args(["--check-url", "http://127.0.0.1:1/"])
        .args(["suggest", "--at", "1:6"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Position the cursor on a word."));
}
