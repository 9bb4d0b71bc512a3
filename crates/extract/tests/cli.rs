// ABOUTME: Integration tests for the scribe CLI binary.
// ABOUTME: Tests HTML file extraction, multiple URLs, JSON output and argument validation.

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn scribe_cmd() -> Command {
    Command::cargo_bin("scribe").unwrap()
}

#[test]
fn extract_html_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("post.html");
    fs::write(
        &html_path,
        "<html><body><article><p>Hi there</p><script>hidden()</script></article></body></html>",
    )
    .unwrap();

    scribe_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--url")
        .arg("https://example.com/post")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hi there"))
        .stdout(predicate::str::contains("hidden()").not());
}

#[test]
fn multiple_urls_are_separated_by_blank_line() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/one");
        then.status(200)
            .body("<html><body><article>Page One</article></body></html>");
    });
    server.mock(|when, then| {
        when.method(GET).path("/two");
        then.status(200)
            .body("<html><body><article>Page Two</article></body></html>");
    });

    scribe_cmd()
        .arg(server.url("/one"))
        .arg(server.url("/two"))
        .assert()
        .success()
        .stdout("Page One\n\nPage Two\n");
}

#[test]
fn json_output_includes_extractor() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("groups.html");
    fs::write(
        &html_path,
        r#"<html><body><h1>Groups</h1><table class="table table-striped">
            <thead><tr><th>ID</th></tr></thead><tbody><tr><td>G0001</td></tr></tbody>
        </table></body></html>"#,
    )
    .unwrap();

    scribe_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--url")
        .arg("https://attack.mitre.org/groups/")
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"extractor\": \"structured\""))
        .stdout(predicate::str::contains("Threat Groups List"));
}

#[test]
fn failed_url_sets_exit_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/down");
        then.status(503);
    });

    scribe_cmd()
        .arg(server.url("/down"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("network error"));
}

#[test]
fn missing_pdf_reports_io_error() {
    let temp_dir = TempDir::new().unwrap();
    scribe_cmd()
        .arg("--pdf")
        .arg(temp_dir.path().join("absent.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("io error"));
}

#[test]
fn html_requires_url() {
    scribe_cmd()
        .arg("--html")
        .arg("page.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url is required"));
}

#[test]
fn modes_are_mutually_exclusive() {
    scribe_cmd()
        .arg("--pdf")
        .arg("a.pdf")
        .arg("https://example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("mutually exclusive"));
}
