//! Plain-text Inventory Management
//!
//! An inventory maps item names to non-negative quantities. It is mutated
//! through validated operations and stored as a JSON document that is
//! replaced atomically on every save.
//!
//! ```
//! use inventory::{Inventory, Quantity};
//!
//! let mut inventory = Inventory::new();
//! inventory.add("apple", 3)?;
//! inventory.add("apple", 2)?;
//! assert_eq!(inventory.get("apple"), Some(Quantity::new(5)));
//! # Ok::<(), inventory::Error>(())
//! ```

pub mod domain;
pub use domain::{
    Change, ChangeKind, Config, Error, IntoQuantity, InvalidInput, Inventory, ItemName, Quantity,
    validate,
};

pub mod storage;
pub use storage::{LoadError, SaveError, load, save};
