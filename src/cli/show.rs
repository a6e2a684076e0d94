use clap::Parser;
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Show the quantity of one item")]
pub struct Show {
    /// The item to look up
    name: String,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let inventory = workspace.load()?;
        let quantity = inventory.quantity(&self.name)?;

        if inventory.contains(&self.name) {
            println!("{} -> {quantity}", self.name.trim());
        } else {
            println!("{}", format!("{} -> 0 (not stocked)", self.name.trim()).dim());
        }
        Ok(())
    }
}
