//! Integration tests that run the CLI binary.

use httpmock::prelude::*;
use serde_json::json;

const ENV_VARS: &[&str] = &[
    "NANOGPT_API_KEY",
    "NANOGPT_BASE_URL",
    "NANOGPT_AUTH_STYLE",
    "OPENROUTER_BASE_URL",
    "MODEL_BROWSER_BIND",
    "MODEL_BROWSER_TIMEOUT_SECS",
    "RUST_LOG",
];

/// Binary with a clean environment, run from a temp dir so dotenv() finds no .env.
fn bin(tmp: &tempfile::TempDir) -> std::process::Command {
    // CARGO_BIN_EXE_<name> uses the binary target name; hyphens require concat! for env!()
    let bin = env!(concat!("CARGO_BIN_EXE_model", "-", "browser"));
    let mut cmd = std::process::Command::new(bin);
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.current_dir(tmp.path());
    cmd
}

#[test]
fn cli_help_succeeds_and_outputs_usage() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin(&tmp)
        .arg("--help")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("models"), "expected subcommands in usage text");
    assert!(stdout.contains("openrouter"));
}

#[test]
fn cli_version_succeeds() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin(&tmp)
        .arg("--version")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("model-browser"));
}

#[test]
fn cli_models_without_api_key_exits_with_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin(&tmp)
        .arg("models")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        !output.status.success(),
        "expected failure when NANOGPT_API_KEY is not set"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("NANOGPT_API_KEY"),
        "expected API key error message, got: {}",
        stderr
    );
}

#[test]
fn cli_config_reports_missing_key() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin(&tmp)
        .arg("config")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("https://nano-gpt.com/api"));
    assert!(stdout.contains("not set"));
}

#[test]
fn cli_config_masks_api_key() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin(&tmp)
        .arg("config")
        .env("NANOGPT_API_KEY", "sk-nano-secret-value")
        .output()
        .expect("binary not found - run cargo build first");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sk-nano-se..."));
    assert!(!stdout.contains("secret-value"));
}

#[test]
fn cli_invalid_auth_style_exits_with_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin(&tmp)
        .arg("config")
        .env("NANOGPT_AUTH_STYLE", "cookie")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("NANOGPT_AUTH_STYLE"));
}

#[test]
fn cli_openrouter_list_prints_normalized_models() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/models");
        then.status(200).json_body(json!({"data": [
            {"id": "acme/foo-7b", "name": "Acme Foo", "architecture": {"input_modalities": ["image"]}},
            {"id": "standalone-model", "name": "Standalone"}
        ]}));
    });

    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin(&tmp)
        .args(["openrouter", "list", "--json"])
        .env("OPENROUTER_BASE_URL", server.base_url())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(parsed[0]["owned_by"], "acme");
    assert_eq!(parsed[0]["capabilities"]["vision"], true);
    assert_eq!(parsed[1]["owned_by"], "OpenRouter");
    mock.assert_calls(1);
}

#[test]
fn cli_model_lookup_reports_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/personalized/v1/models")
            .header("x-api-key", "sk-cli-test");
        then.status(200)
            .json_body(json!({"data": [{"id": "llama-3.3-70b"}]}));
    });

    let tmp = tempfile::TempDir::new().expect("temp dir");
    let output = bin(&tmp)
        .args(["model", "ghost-model"])
        .env("NANOGPT_API_KEY", "sk-cli-test")
        .env("NANOGPT_BASE_URL", server.base_url())
        .output()
        .expect("binary not found - run cargo build first");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Model not found: ghost-model"), "got: {}", stderr);
}
