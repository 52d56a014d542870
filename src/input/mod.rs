//! Input module turning raw key state into per-tick logical snapshots.
pub mod bindings;
pub mod buffer;
pub mod plugin;

pub use plugin::InputPlugin;
