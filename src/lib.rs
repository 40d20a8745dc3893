//! Keyboard Settings library
//!
//! Core of the keyboard settings panel: reading the active keymap, listing
//! installed keymaps, switching keymaps through the keymap tool and
//! persisting the NumLock-on-login preference.

// Module declarations
pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coordinator;
pub mod error;
pub mod keymap;
pub mod launcher;
pub mod logging;
pub mod store;
pub mod tui;

pub use coordinator::{AppContext, ApplyMode, Flow, SettingsCoordinator};
pub use error::{SettingsError, SettingsResult};
