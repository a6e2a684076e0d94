use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Quantity;

/// Configuration for inventory management.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The file the inventory is persisted to.
    ///
    /// Relative paths are resolved against the directory containing the
    /// configuration file.
    data_file: PathBuf,

    /// Items with a quantity strictly below this are reported as low stock.
    pub low_stock_threshold: Quantity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration if the file exists, otherwise returns the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// The file is replaced atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        crate::storage::write_atomically(path, |writer| writer.write_all(content.as_bytes()))
            .map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the configured data file path, as written in the config.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Sets the data file path.
    pub fn set_data_file(&mut self, path: PathBuf) {
        self.data_file = path;
    }

    /// Resolves the data file against the directory holding the config file.
    #[must_use]
    pub fn resolve_data_file(&self, config_path: &Path) -> PathBuf {
        match config_path.parent() {
            Some(dir) if self.data_file.is_relative() => dir.join(&self.data_file),
            _ => self.data_file.clone(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("inventory.json")
}

const fn default_low_stock_threshold() -> Quantity {
    Quantity::new(5)
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_data_file")]
        data_file: PathBuf,

        #[serde(default = "default_low_stock_threshold")]
        low_stock_threshold: Quantity,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                data_file,
                low_stock_threshold,
            } => Self {
                data_file,
                low_stock_threshold,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            data_file: config.data_file,
            low_stock_threshold: config.low_stock_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\ndata_file = \"stock.json\"\nlow_stock_threshold = 12\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.data_file(), Path::new("stock.json"));
        assert_eq!(config.low_stock_threshold, Quantity::new(12));
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_or_default_missing_file_returns_default() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        assert_eq!(Config::load_or_default(&missing), Ok(Config::default()));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nlow_stock_threshold = -2\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        // Tests that deserialising an empty file returns the default configuration.
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("inventory.toml");
        let mut config = Config::default();
        config.set_data_file(PathBuf::from("data/stock.json"));
        config.low_stock_threshold = Quantity::new(3);

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn relative_data_file_resolves_against_config_dir() {
        let config = Config::default();
        assert_eq!(
            config.resolve_data_file(Path::new("shop/inventory.toml")),
            Path::new("shop/inventory.json")
        );
    }
}
