//! `inv`: a command-line front end for plain-text inventories.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
