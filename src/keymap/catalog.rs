//! Installed keymap enumeration.
//!
//! Keymaps are the entries of the keymap directory with the `.json` suffix
//! stripped, sorted ascending. Hidden entries are skipped; duplicates are
//! kept as listed.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::constants::KEYMAP_FILE_SUFFIX;
use crate::error::{SettingsError, SettingsResult};

/// Lists the keymap names available in `dir`, sorted ascending.
pub fn enumerate_keymaps(dir: &Path) -> SettingsResult<Vec<String>> {
    let unreadable = |source| SettingsError::KeymapDirUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            warn!("Skipping non UTF-8 keymap entry {:?}", entry.path());
            continue;
        };
        if file_name.starts_with('.') {
            continue;
        }
        names.push(keymap_name(file_name).to_string());
    }

    names.sort();
    debug!("Found {} keymaps in {}", names.len(), dir.display());
    Ok(names)
}

/// Derives a keymap name from a file name.
pub fn keymap_name(file_name: &str) -> &str {
    file_name
        .strip_suffix(KEYMAP_FILE_SUFFIX)
        .unwrap_or(file_name)
}

/// Finds `current` in `names`, ignoring ASCII case. The last match wins.
pub fn locate_keymap(names: &[String], current: &str) -> Option<usize> {
    names
        .iter()
        .rposition(|name| name.eq_ignore_ascii_case(current))
}

/// Installed keymaps together with the position of the active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapCatalog {
    /// Sorted keymap names
    pub names: Vec<String>,
    /// Index of the active keymap in `names`
    pub current_index: usize,
}

impl KeymapCatalog {
    /// Builds a catalog from already-enumerated names.
    ///
    /// Fails with a fatal error when `current` is not among `names`.
    pub fn new(names: Vec<String>, current: &str) -> SettingsResult<Self> {
        let current_index =
            locate_keymap(&names, current).ok_or_else(|| SettingsError::CurrentKeymapNotListed {
                current: current.to_string(),
            })?;
        Ok(Self {
            names,
            current_index,
        })
    }
}
