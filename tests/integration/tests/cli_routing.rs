//! CLI binary integration tests.
//!
//! These tests run the compiled `cipherh` binary to check command routing,
//! help text, exit codes and the config/format commands end to end.

use cipherh_integration_tests::cipherh_cmd;
use std::process::Output;
use tempfile::TempDir;

fn run(args: &[&str]) -> Option<Output> {
    let mut cmd = cipherh_cmd()?;
    Some(cmd.args(args).output().expect("failed to run cipherh"))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_cli_version() {
    let Some(output) = run(&["version"]) else { return };
    assert!(output.status.success(), "version command should succeed");
    assert!(stdout(&output).starts_with("cipherh "));
}

#[test]
fn test_cli_help_lists_commands() {
    let Some(output) = run(&["--help"]) else { return };
    assert!(output.status.success(), "--help should succeed");
    let text = stdout(&output);
    for command in ["serve", "channels", "format", "config", "version"] {
        assert!(text.contains(command), "help should mention '{command}', got: {text}");
    }
}

#[test]
fn test_cli_unknown_command() {
    let Some(output) = run(&["nonexistent-command"]) else { return };
    assert!(!output.status.success(), "unknown command should fail");
}

#[test]
fn test_cli_format_truncates_for_telegram() {
    let long = "A".repeat(5000);
    let Some(output) = run(&["format", "telegram", &long]) else { return };
    assert!(output.status.success());

    let text = stdout(&output);
    let line = text.trim_end_matches('\n');
    assert_eq!(line.chars().count(), 4096);
    assert!(line.ends_with("..."));
    assert!(stderr(&output).contains("truncated to 4096 chars for telegram"));
}

#[test]
fn test_cli_format_json() {
    let Some(output) = run(&["format", "tiktok", "hello", "world", "--json"]) else { return };
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["platform"], "tiktok");
    assert_eq!(json["text"], "hello world");
    assert_eq!(json["truncated"], false);
}

#[test]
fn test_cli_format_unknown_channel_fails() {
    let Some(output) = run(&["format", "myspace", "hi"]) else { return };
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Platform myspace not supported"));
}

#[test]
fn test_cli_config_init_show_validate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cipherh.json5");
    let path_arg = path.to_str().unwrap();

    let Some(output) = run(&["--config", path_arg, "config", "init"]) else { return };
    assert!(output.status.success(), "init failed: {}", stderr(&output));
    assert!(path.exists());

    let Some(output) = run(&["--config", path_arg, "config", "init"]) else { return };
    assert!(!output.status.success(), "second init without --force must fail");

    // Add a credential, then make sure `show` masks it.
    let mut config = cipherh_core::Config::load(&path).unwrap();
    config.channels.telegram.bot_token = Some("123456:telegram-secret".into());
    config.save(&path).unwrap();

    let Some(output) = run(&["config", "show", "--config", path_arg]) else { return };
    assert!(output.status.success());
    let shown = stdout(&output);
    assert!(!shown.contains("telegram-secret"));
    assert!(shown.contains("****cret"));

    let Some(output) = run(&["--config", path_arg, "config", "validate"]) else { return };
    assert!(output.status.success());
    assert!(stdout(&output).contains("Configuration is valid"));

    let Some(output) = run(&["--config", path_arg, "config", "path"]) else { return };
    assert_eq!(stdout(&output).trim(), path_arg);
}

#[test]
fn test_cli_config_validate_reports_problems() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cipherh.json5");
    std::fs::write(
        &path,
        r#"{
            // port 0 and a half-configured Zalo account
            gateway: { port: 0 },
            channels: { zalo: { app_id: "123" } },
        }"#,
    )
    .unwrap();

    let Some(output) = run(&["--config", path.to_str().unwrap(), "config", "validate"]) else {
        return;
    };
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("Gateway port cannot be 0"), "got: {err}");
    assert!(err.contains("Zalo requires both app_id and app_secret"), "got: {err}");
}

#[test]
fn test_cli_channels_list() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cipherh.json5");

    let Some(output) = run(&["--config", path.to_str().unwrap(), "channels", "list"]) else {
        return;
    };
    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    for channel in ["facebook", "tiktok", "zalo", "telegram", "email"] {
        assert!(text.contains(channel), "missing {channel} in: {text}");
    }
    assert!(text.contains("truncate at 2000 chars"));
}
