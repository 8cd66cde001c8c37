use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sso_group(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sso-group").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("SSO_URL")
        .env_remove("SSO_TOKEN")
        .env_remove("SSO_DOMAIN");
    cmd
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    sso_group(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_update_help_shows_examples() {
    let dir = TempDir::new().unwrap();
    sso_group(&dir)
        .args(["update", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sso-group update -g -a group1 NAME"))
        .stdout(predicate::str::contains("--description"));
}

#[test]
fn test_missing_group_name_is_usage_error() {
    let dir = TempDir::new().unwrap();
    sso_group(&dir)
        .args(["update", "-d", "text"])
        .assert()
        .code(2);
}

#[test]
fn test_extra_positional_is_usage_error() {
    let dir = TempDir::new().unwrap();
    sso_group(&dir)
        .args(["update", "eng", "ops"])
        .assert()
        .code(2);
}

#[test]
fn test_missing_connection_settings() {
    let dir = TempDir::new().unwrap();
    sso_group(&dir)
        .args(["update", "-d", "text", "eng"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base URL"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    sso_group(&dir)
        .args(["--config", "missing.toml", "update", "eng"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_against_service() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/groups/eng"))
        .and(body_json(json!({"description": "Engineering team"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/groups"))
        .and(query_param("name", "admins"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"name": "admins", "domain": "vsphere.local"}])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/groups/eng/groups"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("sso.toml"),
        format!("base_url = \"{}\"\ntoken = \"secret\"\n", server.uri()),
    )
    .unwrap();

    sso_group(&dir)
        .args(["update", "-d", "Engineering team", "-g", "-a", "admins", "eng"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_user_reports_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let dir = TempDir::new().unwrap();
    sso_group(&dir)
        .args(["--url", uri.as_str(), "--token", "secret"])
        .args(["update", "-r", "bob", "eng"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("user \"bob\" not found"));
}
