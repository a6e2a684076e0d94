use std::path::{Path, PathBuf};

mod init;
mod list;
mod low;
mod mutate;
mod show;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use init::Init;
use inventory::{Change, Config, Inventory};
use list::List;
use low::Low;
use mutate::{Add, Remove, Set, Take};
use show::Show;
use tracing::instrument;

use terminal::Colorize;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = "inventory.toml", global = true)]
    config: PathBuf,

    /// The inventory data file (overrides the configured path)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::List(List::default()))
            .run(&self.config, self.file.as_deref())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Print every item and its quantity (default)
    List(List),

    /// Create a configuration file and an empty inventory
    Init(Init),

    /// Add stock of an item, creating it if needed
    Add(Add),

    /// Overwrite the quantity of an existing item
    Set(Set),

    /// Take stock out of an item
    ///
    /// The item is removed once nothing remains.
    Take(Take),

    /// Remove an item entirely
    Remove(Remove),

    /// Show the quantity of one item
    Show(Show),

    /// List items below the low-stock threshold
    Low(Low),
}

impl Command {
    fn run(self, config_path: &Path, file: Option<&Path>) -> anyhow::Result<()> {
        let open = || Workspace::open(config_path, file);
        match self {
            Self::Init(command) => command.run(config_path, file)?,
            Self::List(command) => command.run(&open()?)?,
            Self::Add(command) => command.run(&open()?)?,
            Self::Set(command) => command.run(&open()?)?,
            Self::Take(command) => command.run(&open()?)?,
            Self::Remove(command) => command.run(&open()?)?,
            Self::Show(command) => command.run(&open()?)?,
            Self::Low(command) => command.run(&open()?)?,
        }
        Ok(())
    }
}

/// Pins a `--file` value to the current directory.
///
/// Paths inside the config file are relative to the config's own directory,
/// so the flag has to be made absolute before it is stored there or used in
/// place of the configured path.
fn absolute_file_flag(file: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    file.map(std::path::absolute)
        .transpose()
        .context("Failed to resolve the --file path")
}

/// The resolved configuration and data file for one invocation.
#[derive(Debug)]
pub struct Workspace {
    config: Config,
    data_file: PathBuf,
}

impl Workspace {
    #[instrument(level = "debug")]
    fn open(config_path: &Path, file: Option<&Path>) -> anyhow::Result<Self> {
        let config = Config::load_or_default(config_path).map_err(|e| anyhow::anyhow!("{e}"))?;
        let data_file =
            absolute_file_flag(file)?.unwrap_or_else(|| config.resolve_data_file(config_path));
        tracing::debug!(data_file = %data_file.display(), "workspace resolved");

        Ok(Self { config, data_file })
    }

    const fn config(&self) -> &Config {
        &self.config
    }

    fn load(&self) -> anyhow::Result<Inventory> {
        inventory::load(&self.data_file)
            .with_context(|| format!("Failed to load inventory from {}", self.data_file.display()))
    }

    fn save(&self, inventory: &Inventory) -> anyhow::Result<()> {
        inventory::save(inventory, &self.data_file)
            .with_context(|| format!("Failed to save inventory to {}", self.data_file.display()))
    }

    /// Loads the inventory, applies `mutation`, and saves the result.
    ///
    /// Nothing is written if the mutation fails.
    fn update<F>(&self, mutation: F) -> anyhow::Result<Change>
    where
        F: FnOnce(&mut Inventory) -> Result<Change, inventory::Error>,
    {
        let mut inventory = self.load()?;
        let change = mutation(&mut inventory)?;
        self.save(&inventory)?;

        tracing::info!(%change, "inventory updated");
        println!("{}", change.to_string().success());
        Ok(change)
    }
}
