//! Application orchestration layer
//!
//! High-level functions that coordinate the config, the coordinator and the
//! TUI without containing detailed implementation logic.

/// Settings window startup and shutdown
pub mod launch;

pub use launch::run_settings_terminal;
