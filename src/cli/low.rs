use clap::Parser;
use inventory::Quantity;
use tracing::instrument;

use super::{
    Workspace,
    list::{OutputFormat, print_items},
    terminal::Colorize,
};

/// Command arguments for `inv low`.
#[derive(Debug, Parser)]
#[command(about = "List items below the low-stock threshold")]
pub struct Low {
    /// Report items with fewer units than this (defaults to the configured
    /// threshold)
    #[arg(long, short)]
    threshold: Option<Quantity>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting
    #[arg(long)]
    quiet: bool,
}

impl Low {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, workspace: &Workspace) -> anyhow::Result<()> {
        let configured = workspace.config().low_stock_threshold;
        let threshold = self.threshold.unwrap_or(configured);
        let inventory = workspace.load()?;

        let mut low = inventory.low_stock(threshold).peekable();
        if low.peek().is_none() && matches!(self.output, OutputFormat::Table) && !self.quiet {
            println!("{}", format!("No items below {threshold}.").success());
            return Ok(());
        }

        print_items(
            &format!("Items below {threshold}"),
            low,
            self.output,
            self.quiet,
        )
    }
}
