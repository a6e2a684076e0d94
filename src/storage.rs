//! Persistence of inventories to disk.
//!
//! Inventories are stored as UTF-8 JSON documents. Every save goes through a
//! temporary file in the destination directory which is renamed over the
//! target once fully written, so readers only ever see a complete file.

mod atomic;
pub(crate) use atomic::write_atomically;

/// JSON serialization of inventories.
pub mod inventory_file;
pub use inventory_file::{LoadError, SaveError, load, save};
