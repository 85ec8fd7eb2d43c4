// Account form store library entry point.
// Pure logic is usable without Tauri; the desktop bridge sits behind the `tauri` feature.

pub mod settings;

// Shared types
pub mod state;

// Pure logic modules (no Tauri imports)
pub mod modules;

#[cfg(feature = "tauri")]
pub mod commands;

pub use modules::accounts::AccountStore;
pub use modules::tag_input::KeyEvent;
pub use settings::StoreSettings;
pub use state::{Account, AccountId, AccountsSnapshot, StoreEvent, Tag};
