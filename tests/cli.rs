//
//  github-rest
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

/// A `ghr` invocation isolated from the user's configuration, environment
/// tokens and keyring.
fn ghr(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ghr").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("APPDATA", home.path())
        .env("GHR_NO_PROMPT", "true")
        .env_remove("GH_TOKEN")
        .env_remove("GITHUB_TOKEN")
        .env_remove("GHR_HOST")
        .env_remove("GHR_OWNER")
        .env_remove("GHR_REPO")
        .env_remove("GHR_DEBUG")
        .env_remove("GHR_TIMEOUT")
        .env_remove("GHR_LOG");
    cmd
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    ghr(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command() {
    let home = TempDir::new().unwrap();
    ghr(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ghr version"));
}

#[test]
fn test_config_path_is_under_config_dir() {
    let home = TempDir::new().unwrap();
    ghr(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ghr").and(predicate::str::contains("config.toml")));
}

#[test]
fn test_config_set_then_get() {
    let home = TempDir::new().unwrap();
    ghr(&home)
        .args(["config", "set", "repo", "octo/hello"])
        .assert()
        .success();

    ghr(&home)
        .args(["config", "get", "owner"])
        .assert()
        .success()
        .stdout("octo\n");

    ghr(&home)
        .args(["config", "set", "host", "ghe.corp.io"])
        .assert()
        .success();

    ghr(&home)
        .args(["config", "get", "host"])
        .assert()
        .success()
        .stdout("https://ghe.corp.io/api/v3\n");
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    ghr(&home)
        .args(["config", "set", "editor", "vim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_api_get_prints_body() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/user")
        .match_header("authorization", "token test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"login": "octocat", "id": 1}"#)
        .create();

    ghr(&home)
        .args(["api", "/user", "--host", &server.url(), "--token", "test-token"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"login\": \"octocat\""));

    mock.assert();
}

#[test]
fn test_api_query_pairs_keep_falsy_values() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/repos/octo/hello/issues")
        .match_query(Matcher::Exact("state=open&page=0".to_string()))
        .with_status(200)
        .with_body("[]")
        .create();

    ghr(&home)
        .args([
            "api",
            "repos/{owner}/{repo}/issues",
            "-q",
            "state=open",
            "-q",
            "page=0",
            "-R",
            "octo/hello",
            "--host",
            &server.url(),
            "--token",
            "t",
        ])
        .assert()
        .success();

    mock.assert();
}

#[test]
fn test_api_post_sends_typed_fields() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/repos/octo/hello/issues")
        .match_body(Matcher::Json(json!({
            "title": "Bug",
            "labels": ["bug"],
            "milestone": 3
        })))
        .with_status(201)
        .with_body(r#"{"number": 42}"#)
        .create();

    ghr(&home)
        .args([
            "api",
            "/repos/octo/hello/issues",
            "-X",
            "post",
            "-F",
            "title=Bug",
            "-F",
            "labels=[\"bug\"]",
            "-F",
            "milestone=3",
            "--host",
            &server.url(),
            "--token",
            "t",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("42"));

    mock.assert();
}

#[test]
fn test_api_include_prints_status_and_rate_limit() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/rate_limit")
        .with_status(200)
        .with_header("x-ratelimit-limit", "5000")
        .with_header("x-ratelimit-remaining", "4999")
        .with_body(r#"{"resources": {}}"#)
        .create();

    ghr(&home)
        .args(["api", "/rate_limit", "-i", "--host", &server.url(), "--token", "t"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("200")
                .and(predicate::str::contains("x-ratelimit-remaining: 4999"))
                .and(predicate::str::contains("4999/5000 remaining")),
        );
}

#[test]
fn test_api_unsupported_verb_is_usage_error() {
    let home = TempDir::new().unwrap();
    ghr(&home)
        .args([
            "api",
            "/user",
            "-X",
            "OPTIONS",
            "--host",
            "http://127.0.0.1:9",
            "--token",
            "t",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported HTTP verb"));
}

#[test]
fn test_api_not_found_exit_code_and_body() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/repos/octo/missing")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Not Found"}"#)
        .create();

    ghr(&home)
        .args(["api", "/repos/octo/missing", "--host", &server.url(), "--token", "t"])
        .assert()
        .code(8)
        .stdout(predicate::str::contains("Not Found"))
        .stderr(predicate::str::contains("HTTP 404: Not Found"));
}

#[test]
fn test_api_unauthorized_exit_code() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/user")
        .with_status(401)
        .with_body(r#"{"message": "Bad credentials"}"#)
        .create();

    ghr(&home)
        .args(["api", "/user", "--host", &server.url(), "--token", "bad"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Bad credentials"));
}

#[test]
fn test_issue_list_requires_repository() {
    let home = TempDir::new().unwrap();
    ghr(&home)
        .current_dir(home.path())
        .args(["issue", "list", "--token", "t", "--host", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not determine repository"));
}

#[test]
fn test_issue_list_filters_pull_requests() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/repos/octo/hello/issues")
        .match_query(Matcher::Exact("state=open&per_page=30".to_string()))
        .with_status(200)
        .with_body(
            json!([
                {"id": 1, "number": 1, "title": "Real issue", "state": "open",
                 "html_url": "https://github.com/octo/hello/issues/1"},
                {"id": 2, "number": 2, "title": "A pull request", "state": "open",
                 "pull_request": {"url": "https://api.github.com/repos/octo/hello/pulls/2"},
                 "html_url": "https://github.com/octo/hello/pull/2"}
            ])
            .to_string(),
        )
        .create();

    ghr(&home)
        .args([
            "issue", "list", "--json", "-R", "octo/hello", "--host", &server.url(), "--token", "t",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Real issue").and(predicate::str::contains("A pull request").not()));
}

#[test]
fn test_pr_close_comments_then_closes() {
    let home = TempDir::new().unwrap();
    let mut server = Server::new();
    let comment = server
        .mock("POST", "/repos/octo/hello/issues/7/comments")
        .match_body(Matcher::Json(json!({"body": "Superseded by #8"})))
        .with_status(201)
        .with_body(r#"{"id": 1, "body": "Superseded by #8", "html_url": "https://github.com/octo/hello/pull/7#issuecomment-1"}"#)
        .create();
    let close = server
        .mock("PATCH", "/repos/octo/hello/pulls/7")
        .match_body(Matcher::Json(json!({"state": "closed"})))
        .with_status(200)
        .with_body(
            json!({
                "id": 1007, "number": 7, "title": "Add feature", "state": "closed",
                "head": {"label": "octo:feature", "ref": "feature", "sha": "abc123"},
                "base": {"label": "octo:main", "ref": "main", "sha": "def456"},
                "html_url": "https://github.com/octo/hello/pull/7"
            })
            .to_string(),
        )
        .create();

    ghr(&home)
        .args([
            "pr", "close", "7", "-c", "Superseded by #8", "--json", "-R", "octo/hello", "--host",
            &server.url(), "--token", "t",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"state\": \"closed\""));

    comment.assert();
    close.assert();
}

#[test]
fn test_completion_bash() {
    let home = TempDir::new().unwrap();
    ghr(&home)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ghr"));
}
