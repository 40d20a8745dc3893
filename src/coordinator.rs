//! Settings coordinator.
//!
//! Ties the keymap status, the installed keymaps, the NumLock preference and
//! the keymap tool together. Every collaborator lives in an [`AppContext`]
//! that the caller constructs and passes in by reference.

use tracing::info;

use crate::config::PathConfig;
use crate::constants::{DEFAULT_NUM_LOCK, STORE_DOMAIN, STORE_GROUP_STARTUP, STORE_KEY_NUM_LOCK};
use crate::error::{SettingsError, SettingsResult};
use crate::keymap::{enumerate_keymaps, read_current_keymap, KeymapCatalog};
use crate::launcher::KeymapLauncher;
use crate::store::ConfigStore;

/// Everything the coordinator talks to.
#[derive(Debug)]
pub struct AppContext<S, L> {
    /// Resource locations
    pub paths: PathConfig,
    /// Where the NumLock preference is persisted
    pub store: S,
    /// How the chosen keymap is activated
    pub launcher: L,
}

impl<S: ConfigStore, L: KeymapLauncher> AppContext<S, L> {
    /// Creates a context from its parts.
    pub fn new(paths: PathConfig, store: S, launcher: L) -> Self {
        Self {
            paths,
            store,
            launcher,
        }
    }

    /// Reads the stored NumLock preference.
    pub fn read_num_lock(&self) -> bool {
        self.store.read_bool(
            STORE_DOMAIN,
            STORE_GROUP_STARTUP,
            STORE_KEY_NUM_LOCK,
            DEFAULT_NUM_LOCK,
        )
    }

    /// Persists the NumLock preference.
    pub fn write_num_lock(&self, enabled: bool) -> SettingsResult<()> {
        self.store
            .write_bool(STORE_DOMAIN, STORE_GROUP_STARTUP, STORE_KEY_NUM_LOCK, enabled)
    }
}

/// Which button triggered an apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    /// Apply and close the application
    Ok,
    /// Apply and keep the application open
    Apply,
}

/// What the application should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running
    Continue,
    /// Terminate the application
    Quit,
}

/// State behind the settings window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsCoordinator {
    current_keymap: String,
    keymaps: Vec<String>,
    selected: Option<usize>,
    num_lock: bool,
}

impl SettingsCoordinator {
    /// Reads the status document, enumerates keymaps and loads the preference.
    ///
    /// Errors from the status document and a current keymap missing from the
    /// listing are fatal; a keymap directory that cannot be listed is not.
    pub fn initialize<S: ConfigStore, L: KeymapLauncher>(
        ctx: &AppContext<S, L>,
    ) -> SettingsResult<Self> {
        let current_keymap = read_current_keymap(&ctx.paths.status_file)?;
        let keymaps = enumerate_keymaps(&ctx.paths.keymaps_dir)?;
        let catalog = KeymapCatalog::new(keymaps, &current_keymap)?;

        Ok(Self {
            current_keymap,
            selected: Some(catalog.current_index),
            keymaps: catalog.names,
            num_lock: ctx.read_num_lock(),
        })
    }

    /// Keymap name reported by the status document.
    pub fn current_keymap(&self) -> &str {
        &self.current_keymap
    }

    /// Installed keymaps, sorted.
    pub fn keymaps(&self) -> &[String] {
        &self.keymaps
    }

    /// Index of the selected keymap, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Name of the selected keymap, if any.
    pub fn selected_keymap(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.keymaps.get(i))
            .map(String::as_str)
    }

    /// Current checkbox state.
    pub fn num_lock(&self) -> bool {
        self.num_lock
    }

    /// Sets the checkbox state.
    pub fn set_num_lock(&mut self, enabled: bool) {
        self.num_lock = enabled;
    }

    /// Flips the checkbox state.
    pub fn toggle_num_lock(&mut self) {
        self.num_lock = !self.num_lock;
    }

    /// Selects `index`; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.keymaps.len() {
            self.selected = Some(index);
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Moves the selection up one entry.
    pub fn select_previous(&mut self) {
        match self.selected {
            Some(i) => self.selected = Some(i.saturating_sub(1)),
            None => self.select_last(),
        }
    }

    /// Moves the selection down one entry.
    pub fn select_next(&mut self) {
        match self.selected {
            Some(i) if i + 1 < self.keymaps.len() => self.selected = Some(i + 1),
            Some(_) => {}
            None => self.select_first(),
        }
    }

    /// Selects the first entry.
    pub fn select_first(&mut self) {
        self.select(0);
    }

    /// Selects the last entry.
    pub fn select_last(&mut self) {
        if let Some(last) = self.keymaps.len().checked_sub(1) {
            self.select(last);
        }
    }

    /// Selects the next keymap (after the current selection, wrapping) whose
    /// name starts with `c`, ignoring ASCII case.
    pub fn select_by_initial(&mut self, c: char) {
        let len = self.keymaps.len();
        let start = self.selected.map_or(0, |i| i + 1);
        let found = (0..len).map(|offset| (start + offset) % len).find(|&i| {
            self.keymaps[i]
                .chars()
                .next()
                .is_some_and(|first| first.eq_ignore_ascii_case(&c))
        });
        if let Some(index) = found {
            self.selected = Some(index);
        }
    }

    /// Applies the selection: launches the keymap tool with the selected name,
    /// then persists the NumLock preference.
    ///
    /// With nothing selected this fails with [`SettingsError::EmptySelection`]
    /// before anything is launched or written.
    pub fn apply<S: ConfigStore, L: KeymapLauncher>(
        &self,
        ctx: &AppContext<S, L>,
        mode: ApplyMode,
    ) -> SettingsResult<Flow> {
        let keymap = self
            .selected_keymap()
            .filter(|name| !name.is_empty())
            .ok_or(SettingsError::EmptySelection)?;

        ctx.launcher.launch(keymap)?;
        ctx.write_num_lock(self.num_lock)?;
        info!("Applied keymap {keymap}, NumLock on startup: {}", self.num_lock);

        Ok(match mode {
            ApplyMode::Ok => Flow::Quit,
            ApplyMode::Apply => Flow::Continue,
        })
    }

    /// Closes without persisting anything.
    pub fn cancel(&self) -> Flow {
        info!("Cancelled, nothing applied");
        Flow::Quit
    }
}
