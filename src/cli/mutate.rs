//! Commands that change stock levels.
//!
//! Quantities are taken as raw text so that negative or non-numeric input is
//! reported by the inventory's own validation rather than by the argument
//! parser.

use clap::Parser;
use inventory::ChangeKind;
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, Parser)]
pub struct Add {
    /// The item to add stock to
    name: String,

    /// How many units to add
    #[arg(allow_hyphen_values = true)]
    quantity: String,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        workspace.update(|inventory| inventory.add(&self.name, &self.quantity))?;
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Set {
    /// The item to update
    name: String,

    /// The new quantity
    #[arg(allow_hyphen_values = true)]
    quantity: String,
}

impl Set {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        workspace.update(|inventory| inventory.set_quantity(&self.name, &self.quantity))?;
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Take {
    /// The item to take stock from
    name: String,

    /// How many units to take
    #[arg(allow_hyphen_values = true)]
    quantity: String,
}

impl Take {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let change = workspace.update(|inventory| inventory.take(&self.name, &self.quantity))?;

        if matches!(change.kind(), ChangeKind::Taken { remaining, .. } if remaining.is_zero()) {
            println!("{}", format!("{} is now out of stock", change.item()).warning());
        }
        Ok(())
    }
}

#[derive(Debug, Parser)]
pub struct Remove {
    /// The item to remove
    name: String,
}

impl Remove {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        workspace.update(|inventory| inventory.remove(&self.name))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use inventory::Quantity;
    use tempfile::tempdir;

    use super::*;

    fn workspace_in(root: &Path) -> Workspace {
        Workspace::open(&root.join("inventory.toml"), None).unwrap()
    }

    fn saved_quantity(root: &Path, name: &str) -> Option<Quantity> {
        inventory::load(&root.join("inventory.json"))
            .unwrap()
            .get(name)
    }

    #[test]
    fn add_then_take_saves_through_data_file() {
        let tmp = tempdir().unwrap();
        let workspace = workspace_in(tmp.path());

        Add {
            name: "apple".to_string(),
            quantity: "5".to_string(),
        }
        .run(&workspace)
        .unwrap();
        assert_eq!(saved_quantity(tmp.path(), "apple"), Some(Quantity::new(5)));

        Take {
            name: "apple".to_string(),
            quantity: "2".to_string(),
        }
        .run(&workspace)
        .unwrap();
        assert_eq!(saved_quantity(tmp.path(), "apple"), Some(Quantity::new(3)));
    }

    #[test]
    fn taking_everything_removes_the_item() {
        let tmp = tempdir().unwrap();
        let workspace = workspace_in(tmp.path());
        workspace
            .update(|inventory| inventory.add("apple", 2))
            .unwrap();

        Take {
            name: "apple".to_string(),
            quantity: "2".to_string(),
        }
        .run(&workspace)
        .unwrap();

        assert_eq!(saved_quantity(tmp.path(), "apple"), None);
    }

    #[test]
    fn negative_quantity_writes_nothing() {
        let tmp = tempdir().unwrap();
        let workspace = workspace_in(tmp.path());

        let error = Add {
            name: "apple".to_string(),
            quantity: "-3".to_string(),
        }
        .run(&workspace)
        .unwrap_err();

        assert!(matches!(
            error.downcast_ref::<inventory::Error>(),
            Some(inventory::Error::InvalidInput(
                inventory::InvalidInput::NegativeQuantity(_)
            ))
        ));
        assert!(!tmp.path().join("inventory.json").exists());
    }

    #[test]
    fn set_and_remove_update_the_file() {
        let tmp = tempdir().unwrap();
        let workspace = workspace_in(tmp.path());
        workspace
            .update(|inventory| inventory.add("apple", 2))
            .unwrap();

        Set {
            name: "apple".to_string(),
            quantity: "9".to_string(),
        }
        .run(&workspace)
        .unwrap();
        assert_eq!(saved_quantity(tmp.path(), "apple"), Some(Quantity::new(9)));

        Remove {
            name: "apple".to_string(),
        }
        .run(&workspace)
        .unwrap();
        assert_eq!(saved_quantity(tmp.path(), "apple"), None);
    }
}
