//! Keymap discovery: the active keymap and the installed keymap files.

pub mod catalog;
pub mod status;

pub use catalog::{enumerate_keymaps, locate_keymap, KeymapCatalog};
pub use status::read_current_keymap;
