//! Status document reader.
//!
//! The status document is a JSON object published by the system, e.g.
//! `{"keymap": "en-us"}`. It is read once at startup.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::constants::STATUS_KEYMAP_FIELD;
use crate::error::{SettingsError, SettingsResult};

/// Reads the name of the active keymap from the status document at `path`.
pub fn read_current_keymap(path: &Path) -> SettingsResult<String> {
    let content = fs::read_to_string(path).map_err(|source| SettingsError::StatusUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let current = parse_current_keymap(&content).map_err(|reason| match reason {
        StatusProblem::Malformed(reason) => SettingsError::StatusMalformed {
            path: path.to_path_buf(),
            reason,
        },
        StatusProblem::MissingField => SettingsError::MissingKeymapField {
            path: path.to_path_buf(),
        },
    })?;

    debug!("Status document reports current keymap: {current}");
    Ok(current)
}

enum StatusProblem {
    Malformed(String),
    MissingField,
}

fn parse_current_keymap(content: &str) -> Result<String, StatusProblem> {
    let json: Value =
        serde_json::from_str(content).map_err(|e| StatusProblem::Malformed(e.to_string()))?;

    let object = json
        .as_object()
        .ok_or_else(|| StatusProblem::Malformed("expected a JSON object".to_string()))?;

    object
        .get(STATUS_KEYMAP_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(StatusProblem::MissingField)
}
