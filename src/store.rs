//! Key/value config store addressed by (domain, group, key).
//!
//! Each domain is one TOML file, each group a table, each key an entry:
//!
//! ```toml
//! # KeyboardSettings.toml
//! [StartupEnable]
//! NumLock = true
//! ```

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{SettingsError, SettingsResult};

/// Persistence for small typed settings.
pub trait ConfigStore {
    /// Reads a boolean, returning `default` when the value is absent.
    fn read_bool(&self, domain: &str, group: &str, key: &str, default: bool) -> bool;

    /// Writes a boolean.
    fn write_bool(&self, domain: &str, group: &str, key: &str, value: bool) -> SettingsResult<()>;
}

/// Config store backed by one TOML file per domain.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    dir: PathBuf,
}

impl FileConfigStore {
    /// Creates a store rooted at `dir`. Nothing is touched until a write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the domain files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `domain`.
    pub fn domain_path(&self, domain: &str) -> PathBuf {
        self.dir.join(format!("{domain}.toml"))
    }

    /// Loads the table of `domain`. A missing file is `Ok(None)`; a file that
    /// cannot be read or parsed is an error carrying the reason.
    fn load_domain(&self, domain: &str) -> Result<Option<toml::Table>, String> {
        let path = self.domain_path(domain);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

        toml::from_str::<toml::Table>(&content)
            .map(Some)
            .map_err(|e| format!("cannot parse {}: {e}", path.display()))
    }
}

impl ConfigStore for FileConfigStore {
    fn read_bool(&self, domain: &str, group: &str, key: &str, default: bool) -> bool {
        let table = match self.load_domain(domain) {
            Ok(table) => table,
            Err(reason) => {
                warn!("Ignoring config store: {reason}");
                None
            }
        };
        table
            .as_ref()
            .and_then(|table| table.get(group))
            .and_then(toml::Value::as_table)
            .and_then(|group| group.get(key))
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    fn write_bool(&self, domain: &str, group: &str, key: &str, value: bool) -> SettingsResult<()> {
        let fail = |reason: String| SettingsError::StoreWrite {
            domain: domain.to_string(),
            group: group.to_string(),
            key: key.to_string(),
            reason,
        };

        // An existing file that cannot be parsed is never replaced.
        let mut table = self.load_domain(domain).map_err(fail)?.unwrap_or_default();
        let group_table = table
            .entry(group.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));

        // A scalar sitting where the group belongs is replaced.
        if !group_table.is_table() {
            *group_table = toml::Value::Table(toml::Table::new());
        }
        if let toml::Value::Table(entries) = group_table {
            entries.insert(key.to_string(), toml::Value::Boolean(value));
        }

        fs::create_dir_all(&self.dir).map_err(|e| fail(e.to_string()))?;

        let content = toml::to_string_pretty(&table).map_err(|e| fail(e.to_string()))?;
        let path = self.domain_path(domain);
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).map_err(|e| fail(e.to_string()))?;
        fs::rename(&temp_path, &path).map_err(|e| fail(e.to_string()))?;

        debug!("Wrote {domain}/{group}/{key} = {value} to {}", path.display());
        Ok(())
    }
}

/// A single recorded store write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreWrite {
    /// Config domain
    pub domain: String,
    /// Config group
    pub group: String,
    /// Config key
    pub key: String,
    /// Written value
    pub value: bool,
}

/// In-process config store that remembers every write.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    writes: RefCell<Vec<StoreWrite>>,
}

impl MemoryConfigStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with one value already present.
    pub fn with_bool(domain: &str, group: &str, key: &str, value: bool) -> Self {
        let store = Self::new();
        store.writes.borrow_mut().push(StoreWrite {
            domain: domain.to_string(),
            group: group.to_string(),
            key: key.to_string(),
            value,
        });
        store
    }

    /// All values written so far, including any seeded value.
    pub fn writes(&self) -> Vec<StoreWrite> {
        self.writes.borrow().clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn read_bool(&self, domain: &str, group: &str, key: &str, default: bool) -> bool {
        self.writes
            .borrow()
            .iter()
            .rev()
            .find(|w| w.domain == domain && w.group == group && w.key == key)
            .map_or(default, |w| w.value)
    }

    fn write_bool(&self, domain: &str, group: &str, key: &str, value: bool) -> SettingsResult<()> {
        self.writes.borrow_mut().push(StoreWrite {
            domain: domain.to_string(),
            group: group.to_string(),
            key: key.to_string(),
            value,
        });
        Ok(())
    }
}
