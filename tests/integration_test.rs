use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::Server;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const RELEASE_BODY: &str = r#"{
    "tag_name": "v2.3.1",
    "name": "Talk to Your Accounts 2.3.1",
    "prerelease": false,
    "assets": [
        {"name": "Talk-to-Your-Accounts-Setup-2.3.1.exe", "size": 10, "browser_download_url": "https://dl.example/Setup-2.3.1.exe"},
        {"name": "Talk-to-Your-Accounts-2.3.1.AppImage", "size": 10, "browser_download_url": "https://dl.example/2.3.1.AppImage"},
        {"name": "latest.yml", "size": 1, "browser_download_url": "https://dl.example/latest.yml"}
    ]
}"#;

fn command(api_url: &str) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("release-links"));
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("RELEASE_LINKS_REPO")
        .arg("--repo")
        .arg("owner/repo")
        .arg("--api-url")
        .arg(api_url);
    cmd
}

#[test]
fn test_resolve_latest_release_text() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RELEASE_BODY)
        .create();

    command(&server.url())
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("owner/repo - Latest version: v2.3.1"))
        .stdout(predicate::str::contains("Release: Talk to Your Accounts 2.3.1"))
        .stdout(predicate::str::contains("10 B"))
        .stdout(predicate::str::contains("https://dl.example/Setup-2.3.1.exe"))
        .stdout(predicate::str::contains("Download .AppImage"))
        .stdout(predicate::str::contains("View Releases"))
        .stdout(predicate::str::contains(
            "https://github.com/owner/repo/releases",
        ));

    mock.assert();
}

#[test]
fn test_resolve_latest_release_json() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RELEASE_BODY)
        .create();

    let output = command(&server.url())
        .args(["resolve", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["version"], "2.3.1");
    assert_eq!(
        value["links"]["windows"],
        serde_json::json!({"available": true, "url": "https://dl.example/Setup-2.3.1.exe"})
    );
    assert_eq!(value["links"]["macos"]["available"], false);
    assert_eq!(value["links"]["linux-deb"]["url"], serde_json::Value::Null);
    assert_eq!(value["links"]["linux-appimage"]["available"], true);
}

#[test]
fn test_resolve_by_tag() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/repos/owner/repo/releases/tags/v0.9.0")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"tag_name": "v0.9.0", "assets": []}"#)
        .create();

    command(&server.url())
        .args(["resolve", "--tag", "v0.9.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Latest version: v0.9.0"))
        .stdout(predicate::str::contains("Download").not());

    mock.assert();
}

#[test]
fn test_resolve_falls_back_when_release_missing() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create();

    command(&server.url())
        .args(["resolve", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version": "1.0.0""#))
        .stdout(predicate::str::contains(r#""available": true"#).not());
}

#[test]
fn test_resolve_falls_back_when_api_unreachable() {
    // Nothing listens on port 9 (discard) on test machines.
    command("http://127.0.0.1:9")
        .arg("resolve")
        .assert()
        .success()
        .stdout(predicate::str::contains("Latest version: v1.0.0"));
}

#[test]
fn test_resolve_from_input_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"tag_name": "v5.0.0", "assets": [
            {{"name": "APP.DMG", "browser_download_url": "https://dl.example/APP.DMG"}}
        ]}}"#
    )
    .unwrap();

    command("http://127.0.0.1:9")
        .arg("resolve")
        .arg("--input")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Latest version: v5.0.0"))
        .stdout(predicate::str::contains("Download .dmg"))
        .stdout(predicate::str::contains("https://dl.example/APP.DMG"));
}

#[test]
fn test_resolve_input_file_missing() {
    let dir = tempfile::tempdir().unwrap();

    command("http://127.0.0.1:9")
        .arg("resolve")
        .arg("--input")
        .arg(dir.path().join("missing.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn test_resolve_invalid_repo() {
    Command::new(cargo::cargo_bin!("release-links"))
        .env_remove("RELEASE_LINKS_REPO")
        .args(["--repo", "not-a-repo", "resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("owner/repo"));
}
