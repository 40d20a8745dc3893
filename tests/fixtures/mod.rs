//! Shared test fixtures for keymap environments.
#![allow(dead_code)] // Not every test binary uses every fixture

use keyboard_settings::config::PathConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway status document, keymap directory, store and keymap tool.
pub struct KeymapEnv {
    /// Keeps the directory alive for the duration of the test
    pub dir: TempDir,
    /// Status document path
    pub status_file: PathBuf,
    /// Keymap directory
    pub keymaps_dir: PathBuf,
    /// Config store directory
    pub store_dir: PathBuf,
    /// Keymap tool path (only exists after `install_tool`)
    pub keymap_tool: PathBuf,
    /// File the fake keymap tool appends its arguments to
    pub tool_log: PathBuf,
}

impl KeymapEnv {
    /// Creates an environment whose status document contains `status` and
    /// whose keymap directory contains `files`.
    pub fn new(status: &str, files: &[&str]) -> Self {
        let dir = TempDir::new().unwrap();
        let keymaps_dir = dir.path().join("keymaps");
        fs::create_dir(&keymaps_dir).unwrap();
        for file in files {
            fs::write(keymaps_dir.join(file), "{}").unwrap();
        }

        let status_file = dir.path().join("status.json");
        fs::write(&status_file, status).unwrap();

        Self {
            status_file,
            keymaps_dir,
            store_dir: dir.path().join("store"),
            keymap_tool: dir.path().join("keymap"),
            tool_log: dir.path().join("keymap.log"),
            dir,
        }
    }

    /// Status `{"keymap":"us"}` with `us.json`, `de.json` and `fr.json` installed.
    pub fn standard() -> Self {
        Self::new(r#"{"keymap":"us"}"#, &["us.json", "de.json", "fr.json"])
    }

    /// Paths pointing into this environment.
    pub fn paths(&self) -> PathConfig {
        PathConfig {
            status_file: self.status_file.clone(),
            keymaps_dir: self.keymaps_dir.clone(),
            keymap_tool: self.keymap_tool.clone(),
            store_dir: Some(self.store_dir.clone()),
        }
    }

    /// Installs a keymap tool that appends `<argc>:<args>` to `tool_log`.
    #[cfg(unix)]
    pub fn install_tool(&self) {
        use std::os::unix::fs::PermissionsExt;

        let script = format!(
            "#!/bin/sh\necho \"$#:$*\" >> '{}'\n",
            self.tool_log.display()
        );
        fs::write(&self.keymap_tool, script).unwrap();
        fs::set_permissions(&self.keymap_tool, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Waits for the fake tool to record `count` invocations and returns them.
    pub fn wait_for_tool_calls(&self, count: usize) -> Vec<String> {
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            let calls: Vec<String> = fs::read_to_string(&self.tool_log)
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect();
            if calls.len() >= count || std::time::Instant::now() >= deadline {
                return calls;
            }
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
    }

    /// Contents of the store file for the application domain, if written.
    pub fn store_contents(&self) -> Option<String> {
        fs::read_to_string(self.store_dir.join("KeyboardSettings.toml")).ok()
    }
}
