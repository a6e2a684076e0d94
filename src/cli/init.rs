use std::path::Path;

use inventory::{Config, Inventory};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Init {
    /// Low-stock threshold to record in the new configuration
    #[arg(long)]
    threshold: Option<inventory::Quantity>,
}

impl Init {
    #[instrument]
    pub fn run(self, config_path: &Path, file: Option<&Path>) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Inventory already initialized (found existing {})",
                config_path.display()
            );
        }

        let mut config = Config::default();
        if let Some(file) = super::absolute_file_flag(file)? {
            config.set_data_file(file);
        }
        if let Some(threshold) = self.threshold {
            config.low_stock_threshold = threshold;
        }

        config
            .save(config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", config_path.display()))?;

        let data_file = config.resolve_data_file(config_path);
        let created_data_file = !data_file.exists();
        if created_data_file {
            inventory::save(&Inventory::new(), &data_file)?;
        }

        println!(
            "{}",
            format!("Initialized inventory in {}", config_path.display()).success()
        );
        println!("  Created: {}", config_path.display());
        if created_data_file {
            println!("  Created: {}", data_file.display());
        } else {
            println!("  Using existing: {}", data_file.display());
        }
        println!();
        println!("Next steps:");
        println!("  inv add apple 10");

        Ok(())
    }
}
