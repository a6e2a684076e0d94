//! Domain models for inventory management.
//!
//! This module contains the core domain types: validated item names and
//! quantities, the inventory itself, the change records it emits, and
//! configuration.

/// Validated item names.
pub mod item_name;
pub use item_name::ItemName;

/// Non-negative item quantities.
pub mod quantity;
pub use quantity::{IntoQuantity, Quantity};

mod validation;
pub use validation::{InvalidInput, validate};

/// The inventory and its mutation records.
pub mod inventory;
pub use inventory::{Change, ChangeKind, Error, Inventory};

mod config;
pub use config::Config;
