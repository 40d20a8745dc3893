//! Application-wide constants.
//!
//! This module defines the application name, the default locations of the
//! external keymap resources, and the coordinates of the NumLock preference
//! in the config store.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Keyboard Settings";

/// Default status document exposing the active keymap.
pub const DEFAULT_STATUS_FILE: &str = "/proc/keymap";

/// Default directory holding the `<name>.json` character map files.
pub const DEFAULT_KEYMAPS_DIR: &str = "/res/keymaps/";

/// Default helper that switches the active keymap.
pub const DEFAULT_KEYMAP_TOOL: &str = "/bin/keymap";

/// Suffix stripped from keymap file names to derive display names.
pub const KEYMAP_FILE_SUFFIX: &str = ".json";

/// Field of the status document holding the current keymap name.
pub const STATUS_KEYMAP_FIELD: &str = "keymap";

/// Config store domain owned by this application.
pub const STORE_DOMAIN: &str = "KeyboardSettings";

/// Config store group for settings applied at startup.
pub const STORE_GROUP_STARTUP: &str = "StartupEnable";

/// Config store key for the NumLock preference.
pub const STORE_KEY_NUM_LOCK: &str = "NumLock";

/// NumLock preference used when the store has no value yet.
pub const DEFAULT_NUM_LOCK: bool = true;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "KEYBOARD_SETTINGS_CONFIG_DIR";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "KEYBOARD_SETTINGS_LOG";
