use clap::Parser;
use inventory::{ItemName, Quantity};
use tracing::instrument;

use super::{Workspace, terminal::Colorize};

/// Command arguments for `inv list`.
#[derive(Debug, Default, Parser)]
#[command(about = "Print every item and its quantity")]
pub struct List {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let inventory = workspace.load()?;

        if inventory.is_empty() && matches!(self.output, OutputFormat::Table) && !self.quiet {
            println!("No items yet. Add one with 'inv add <NAME> <QTY>'.");
            return Ok(());
        }

        print_items("Items Report", inventory.iter(), self.output, self.quiet)
    }
}

/// Prints `(name, quantity)` rows in the requested format.
pub fn print_items<'a>(
    title: &str,
    items: impl Iterator<Item = (&'a ItemName, Quantity)>,
    output: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    match output {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = items
                .map(|(name, quantity)| (name.to_string(), quantity.get().into()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        OutputFormat::Table if quiet => {
            for (name, quantity) in items {
                println!("{name}\t{quantity}");
            }
        }
        OutputFormat::Table => {
            println!("{title}");
            println!("{}", "─".repeat(title.chars().count()).dim());
            for (name, quantity) in items {
                println!("{name} -> {quantity}");
            }
        }
    }
    Ok(())
}
