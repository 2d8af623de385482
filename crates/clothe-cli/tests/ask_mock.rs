use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_ask_find_ideas_prints_idea() {
    let home = tempdir().unwrap();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/outfits/find-ideas"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"userId": "user", "text": "I have a red floral skirt"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"idea": "wear a coat"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("clothe")
        .env("CLOTHE_HOME", home.path())
        .env("CLOTHE_BACKEND_URL", mock_server.uri())
        .args(["ask", "find-ideas", "--text", "I have a red floral skirt"])
        .assert()
        .success()
        .stdout(predicate::str::diff("wear a coat\n"));
}

#[tokio::test]
async fn test_ask_analyze_prints_parsed_fields() {
    let home = tempdir().unwrap();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/outfits/analyze"))
        .and(body_json(json!({"userId": "guest", "text": "wool coat"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parsed": {"type": "coat", "material": "wool"}
        })))
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("clothe")
        .env("CLOTHE_HOME", home.path())
        .args(["--backend-url", &mock_server.uri()])
        .args(["ask", "analyze", "--text", "wool coat", "--user-id", "guest"])
        .assert()
        .success()
        .stdout(predicate::str::diff("type: coat\nmaterial: wool\n"));
}

#[tokio::test]
async fn test_ask_uses_config_backend_and_user() {
    let home = tempdir().unwrap();
    let mock_server = MockServer::start().await;
    fs::write(
        home.path().join("config.toml"),
        format!(
            "backend_url = \"{}\"\nuser_id = \"ana\"\n",
            mock_server.uri()
        ),
    )
    .unwrap();

    Mock::given(method("POST"))
        .and(path("/api/garments/"))
        .and(body_json(json!({"userId": "ana", "text": "shirts"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"idea": "3 shirts"})))
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("clothe")
        .env("CLOTHE_HOME", home.path())
        .env_remove("CLOTHE_BACKEND_URL")
        .args(["ask", "list-garments", "--text", "shirts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 shirts"));
}

#[tokio::test]
async fn test_ask_ignores_blank_config_user_id() {
    let home = tempdir().unwrap();
    let mock_server = MockServer::start().await;
    fs::write(home.path().join("config.toml"), "user_id = \"  \"\n").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/outfits/find-ideas"))
        .and(body_json(json!({"userId": "user", "text": "coat"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"idea": "default user"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("clothe")
        .env("CLOTHE_HOME", home.path())
        .env("CLOTHE_BACKEND_URL", mock_server.uri())
        .args(["ask", "find-ideas", "--text", "coat"])
        .assert()
        .success()
        .stdout(predicate::str::diff("default user\n"));
}

#[tokio::test]
async fn test_ask_missing_key_reports_unexpected_format() {
    let home = tempdir().unwrap();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/outfits/find-ideas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "nope"})))
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("clothe")
        .env("CLOTHE_HOME", home.path())
        .env("CLOTHE_BACKEND_URL", mock_server.uri())
        .args(["ask", "find-ideas", "--text", "coat"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Unexpected response format"));
}

#[test]
fn test_ask_connection_refused_mentions_backend() {
    let home = tempdir().unwrap();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    cargo_bin_cmd!("clothe")
        .env("CLOTHE_HOME", home.path())
        .env("CLOTHE_BACKEND_URL", &base)
        .args(["ask", "find-ideas", "--text", "coat"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error connecting to backend:"))
        .stderr(predicate::str::contains(format!(
            "Make sure the backend is running at {base}"
        )));
}

#[test]
fn test_ask_rejects_blank_text() {
    let home = tempdir().unwrap();

    cargo_bin_cmd!("clothe")
        .env("CLOTHE_HOME", home.path())
        .args(["ask", "find-ideas", "--text", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--text must not be empty"));
}

#[tokio::test]
async fn test_health_prints_backend_message() {
    let home = tempdir().unwrap();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Clothe AI backend"})),
        )
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("clothe")
        .env("CLOTHE_HOME", home.path())
        .env("CLOTHE_BACKEND_URL", mock_server.uri())
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::contains("Clothe AI backend"));
}
