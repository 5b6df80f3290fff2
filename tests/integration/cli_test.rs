//! Runs the built binary and checks the JSON envelope it prints.
//!
//! Registry-dependent commands are only checked for well-formed output, since
//! what is running (or whether a registry is reachable at all) depends on the
//! machine running the tests.

use std::process::{Command, Output};

fn app_finder(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_app-finder"))
        .args(args)
        .output()
        .expect("failed to run app-finder")
}

fn envelope(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).expect("output is not valid JSON")
}

#[test]
fn version_command_outputs_json() {
    let output = app_finder(&["version"]);
    let json = envelope(&output);
    assert!(output.status.success());
    assert_eq!(json["ok"], true);
    assert_eq!(json["command"], "version");
    assert!(json["data"]["version"].is_string());
}

#[test]
fn version_rejects_unknown_flags() {
    let output = app_finder(&["version", "--json"]);
    let json = envelope(&output);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(json["error"]["code"], "INVALID_ARGS");
}

#[test]
fn find_without_name_is_invalid_args() {
    let output = app_finder(&["find", "--timeout-ms", "0"]);
    let json = envelope(&output);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(json["ok"], false);
    assert_eq!(json["command"], "find");
    assert_eq!(json["error"]["code"], "INVALID_ARGS");
}

#[test]
fn unknown_flag_is_invalid_args() {
    let output = app_finder(&["find", "--bogus"]);
    let json = envelope(&output);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(json["error"]["code"], "INVALID_ARGS");
}

#[test]
fn list_apps_always_prints_an_envelope() {
    let output = app_finder(&["list-apps"]);
    let json = envelope(&output);
    assert_eq!(json["command"], "list-apps");
    if json["ok"] == true {
        let count = json["data"]["count"].as_u64().unwrap();
        let apps = json["data"]["apps"].as_array().unwrap();
        assert!(apps.len() as u64 <= count);
    } else {
        let code = json["error"]["code"].as_str().unwrap();
        assert!(
            ["CONNECTION_FAILED", "PLATFORM_NOT_SUPPORTED"].contains(&code),
            "unexpected error code {code}"
        );
    }
}

#[test]
fn find_bogus_app_fails_without_hanging() {
    let output = app_finder(&["find", "--name", "Bogus App 7f3a", "--timeout-ms", "200"]);
    let json = envelope(&output);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(json["ok"], false);
    let code = json["error"]["code"].as_str().unwrap();
    if code == "APP_NOT_FOUND" {
        assert_eq!(json["error"]["message"], "No such application running.");
    } else {
        assert!(["CONNECTION_FAILED", "PLATFORM_NOT_SUPPORTED"].contains(&code));
    }
}
