#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::{Value, json};
use wiremock::MockServer;

/// Gateway base URL of a mock server.
pub fn gateway_url(server: &MockServer) -> String {
    format!("http://127.0.0.1:{}/api", server.address().port())
}

fn command(args: &[&str], config_dir: &Path, gateway: Option<&str>) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_marquee"));
    cmd.args(args);
    cmd.env("MARQUEE_CONFIG_DIR", config_dir);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    match gateway {
        Some(url) => cmd.env("MARQUEE_GATEWAY", url),
        None => cmd.env_remove("MARQUEE_GATEWAY"),
    };
    cmd
}

/// Run the CLI with an isolated config directory.
pub fn run_cli(args: &[&str], config_dir: &Path, gateway: Option<&str>) -> Output {
    command(args, config_dir, gateway)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI")
}

/// Run the CLI, feeding `input` to stdin.
pub fn run_cli_with_input(
    args: &[&str],
    config_dir: &Path,
    gateway: Option<&str>,
    input: &str,
) -> Output {
    let mut child = command(args, config_dir, gateway)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], config_dir: &Path, gateway: Option<&str>) -> String {
    let output = run_cli(args, config_dir, gateway);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// A record as the gateway sends it.
pub fn record_json(id: u64, title: &str, category: &str, director: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "type": category,
        "director": director,
        "budget": "$10M",
        "location": "Los Angeles",
        "duration": "120 min",
        "yearTime": "2001",
        "description": null,
        "imageUrl": null,
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    })
}

/// A list response body.
pub fn page_json(records: Vec<Value>, current: u32, total_pages: u32, total: u64) -> Value {
    json!({
        "data": records,
        "pagination": {
            "currentPage": current,
            "totalPages": total_pages,
            "totalItems": total,
            "hasNext": current < total_pages,
            "hasPrev": current > 1
        }
    })
}

/// `count` films with ids starting at `first`.
pub fn films(first: u64, count: u64) -> Vec<Value> {
    (first..first + count)
        .map(|i| record_json(i, &format!("Film {}", i), "Movie", "Director"))
        .collect()
}
