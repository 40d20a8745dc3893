//! End-to-end tests for the headless commands.

use std::process::{Command, Output};

mod fixtures;
use fixtures::*;

/// Path to the keyboard-settings binary
fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_keyboard-settings")
}

/// Creates a Command with isolated config directory and paths into `env`.
fn command(env: &KeymapEnv, args: &[&str]) -> Command {
    let mut cmd = Command::new(bin());
    cmd.env("KEYBOARD_SETTINGS_CONFIG_DIR", env.dir.path().join("config"));
    cmd.env_remove("KEYBOARD_SETTINGS_LOG");
    cmd.args(args);
    cmd.arg("--status-file").arg(&env.status_file);
    cmd.arg("--keymaps-dir").arg(&env.keymaps_dir);
    cmd.arg("--keymap-tool").arg(&env.keymap_tool);
    cmd.arg("--store-dir").arg(&env.store_dir);
    cmd
}

fn run(env: &KeymapEnv, args: &[&str]) -> Output {
    // Retry when a freshly written tool script is still busy in another process.
    for _ in 0..20 {
        let output = command(env, args).output().expect("Failed to execute command");
        if !String::from_utf8_lossy(&output.stderr).contains("Text file busy") {
            return output;
        }
        std::thread::sleep(std::time::Duration::from_millis(20));
    }
    command(env, args).output().expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list_marks_current() {
    let env = KeymapEnv::standard();
    let output = run(&env, &["list"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "  de\n  fr\n* us\n");
}

#[test]
fn test_list_json() {
    let env = KeymapEnv::new(r#"{"keymap":"DE"}"#, &["us.json", "de.json"]);
    let output = run(&env, &["list", "--json"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json[0]["name"], "de");
    assert_eq!(json[0]["current"], true);
    assert_eq!(json[1]["name"], "us");
    assert_eq!(json[1]["current"], false);
}

#[test]
fn test_list_unreadable_directory() {
    let env = KeymapEnv::standard();
    std::fs::remove_dir_all(&env.keymaps_dir).unwrap();
    let output = run(&env, &["list"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error on reading mapping file list"));
}

// ============================================================================
// show
// ============================================================================

#[test]
fn test_show_defaults_num_lock_on() {
    let env = KeymapEnv::standard();
    let output = run(&env, &["show", "--json"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["keymap"], "us");
    assert_eq!(json["num_lock"], true);
}

#[test]
fn test_show_malformed_status() {
    let env = KeymapEnv::new(r#"{"layout":"us"}"#, &["us.json"]);
    let output = run(&env, &["show"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("no \"keymap\" string"));
}

// ============================================================================
// apply
// ============================================================================

#[cfg(unix)]
#[test]
fn test_apply_launches_tool_and_stores_preference() {
    let env = KeymapEnv::standard();
    env.install_tool();

    let output = run(&env, &["apply", "FR", "--num-lock", "false"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Switching keymap to fr"));
    assert_eq!(env.wait_for_tool_calls(1), vec!["1:fr".to_string()]);

    let show = run(&env, &["show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&show)).unwrap();
    assert_eq!(json["num_lock"], false);
}

#[test]
fn test_apply_unknown_keymap() {
    let env = KeymapEnv::standard();
    let output = run(&env, &["apply", "it", "--num-lock", "false"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown keymap \"it\""));
    assert!(env.store_contents().is_none());
}

#[test]
fn test_apply_missing_tool() {
    let env = KeymapEnv::standard();
    let output = run(&env, &["apply", "de", "--num-lock", "true"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to launch"));
    assert!(env.store_contents().is_none());
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_set_requires_a_value() {
    let env = KeymapEnv::standard();
    let mut cmd = Command::new(bin());
    cmd.env("KEYBOARD_SETTINGS_CONFIG_DIR", env.dir.path().join("config"));
    let output = cmd.args(["config", "set"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("At least one configuration option"));
}

#[test]
fn test_config_set_and_show() {
    let env = KeymapEnv::standard();
    let config_dir = env.dir.path().join("config");

    let output = Command::new(bin())
        .env("KEYBOARD_SETTINGS_CONFIG_DIR", &config_dir)
        .args(["config", "set", "--theme", "light", "--keymaps-dir"])
        .arg(&env.keymaps_dir)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(config_dir.join("config.toml").exists());

    let output = Command::new(bin())
        .env("KEYBOARD_SETTINGS_CONFIG_DIR", &config_dir)
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["ui"]["theme"], "light");
    assert_eq!(
        json["paths"]["keymaps_dir"],
        env.keymaps_dir.to_string_lossy().as_ref()
    );
    assert_eq!(json["paths"]["keymap_tool"], "/bin/keymap");
}

// ============================================================================
// settings window startup
// ============================================================================

#[test]
fn test_window_refuses_unlisted_current_keymap() {
    let env = KeymapEnv::new(r#"{"keymap":"it"}"#, &["us.json"]);
    let output = run(&env, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("not among the installed keymaps"));
}

#[test]
fn test_window_starts_without_log_file() {
    let env = KeymapEnv::new(r#"{"keymap":"it"}"#, &["us.json"]);
    // A config directory below a regular file can never be created.
    let blocker = env.dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    let output = command(&env, &[])
        .env("KEYBOARD_SETTINGS_CONFIG_DIR", blocker.join("config"))
        .output()
        .unwrap();

    // Startup reaches the status check instead of failing on logging.
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Logging disabled"));
    assert!(stderr(&output).contains("not among the installed keymaps"));
}
