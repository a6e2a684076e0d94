use std::{
    collections::{BTreeMap, btree_map::Entry},
    fmt, io,
    path::{Path, PathBuf},
};

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, IgnoredAny, MapAccess, Visitor},
};
use tracing::instrument;

use crate::domain::{Inventory, ItemName, Quantity};

/// Errors that can occur while loading an inventory file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file exists but could not be read.
    #[error("failed to read '{}'", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The file was read but does not contain a valid inventory.
    #[error("'{}' is corrupt: {reason}", path.display())]
    CorruptData {
        /// The file being read.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
}

/// Errors that can occur while saving an inventory file.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The file could not be written. The previous contents, if any, are
    /// unchanged.
    #[error("failed to write '{}'", path.display())]
    Io {
        /// The file being written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

/// Loads an inventory from `path`.
///
/// A missing file is treated as an empty inventory. Both the versioned
/// document written by [`save`] and a bare `{"name": quantity}` object are
/// accepted.
///
/// # Errors
///
/// - [`LoadError::Io`] if the file exists but cannot be read
/// - [`LoadError::CorruptData`] if the contents are not UTF-8, not valid
///   JSON, or do not describe a valid inventory
#[instrument]
pub fn load(path: &Path) -> Result<Inventory, LoadError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("inventory file not found, starting empty");
            return Ok(Inventory::new());
        }
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let corrupt = |reason: String| LoadError::CorruptData {
        path: path.to_path_buf(),
        reason,
    };

    let content = String::from_utf8(bytes).map_err(|e| corrupt(format!("not UTF-8: {e}")))?;
    let items = parse(&content).map_err(corrupt)?;
    let inventory = validate_items(items).map_err(corrupt)?;

    tracing::debug!(items = inventory.len(), "inventory loaded");
    Ok(inventory)
}

/// Saves an inventory to `path`, replacing any existing file atomically.
///
/// # Errors
///
/// Returns [`SaveError::Io`] if the file cannot be written. In that case the
/// previous file at `path` is left untouched.
#[instrument(skip(inventory), fields(items = inventory.len()))]
pub fn save(inventory: &Inventory, path: &Path) -> Result<(), SaveError> {
    let document = Versions::from(inventory);

    super::write_atomically(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, &document)?;
        writer.write_all(b"\n")
    })
    .map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// The serialized versions of an inventory.
///
/// Item names are kept as plain strings here and validated when converting
/// to the domain type.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        items: Items,
    },
}

impl From<&Inventory> for Versions {
    fn from(inventory: &Inventory) -> Self {
        Self::V1 {
            items: Items(
                inventory
                    .iter()
                    .map(|(name, quantity)| (name.to_string(), quantity))
                    .collect(),
            ),
        }
    }
}

/// Quantities keyed by raw item name.
///
/// Unlike a plain map, deserializing fails when a name appears twice instead
/// of keeping the last value.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
struct Items(BTreeMap<String, Quantity>);

impl<'de> Deserialize<'de> for Items {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ItemsVisitor)
    }
}

struct ItemsVisitor;

impl<'de> Visitor<'de> for ItemsVisitor {
    type Value = Items;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of item names to quantities")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut items = BTreeMap::new();
        while let Some((name, quantity)) = map.next_entry::<String, Quantity>()? {
            match items.entry(name) {
                Entry::Occupied(entry) => {
                    return Err(de::Error::custom(format_args!(
                        "item '{}' appears more than once",
                        entry.key()
                    )));
                }
                Entry::Vacant(entry) => {
                    entry.insert(quantity);
                }
            }
        }
        Ok(Items(items))
    }
}

/// Just enough of a document to tell the versioned form from a bare mapping.
#[derive(Deserialize)]
struct VersionTag {
    #[serde(rename = "_version")]
    version: Option<IgnoredAny>,
}

fn parse(content: &str) -> Result<BTreeMap<String, Quantity>, String> {
    let tag: VersionTag =
        serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;

    if tag.version.is_some() {
        let Versions::V1 { items } =
            serde_json::from_str(content).map_err(|e| format!("invalid document: {e}"))?;
        Ok(items.0)
    } else {
        let items: Items =
            serde_json::from_str(content).map_err(|e| format!("invalid item mapping: {e}"))?;
        Ok(items.0)
    }
}

fn validate_items(items: BTreeMap<String, Quantity>) -> Result<Inventory, String> {
    items
        .into_iter()
        .map(|(raw, quantity)| -> Result<(ItemName, Quantity), String> {
            let name = ItemName::new(&raw).map_err(|e| format!("item '{raw}': {e}"))?;
            // Saved names are always trimmed, so anything else was edited by hand.
            if name.as_str() != raw {
                return Err(format!("item '{raw}' has surrounding whitespace"));
            }
            Ok((name, quantity))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use test_case::test_case;

    use super::*;

    fn path_in(tmp: &TempDir) -> PathBuf {
        tmp.path().join("inventory.json")
    }

    #[test]
    fn missing_file_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let inventory = load(&path_in(&tmp)).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn saved_inventory_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = path_in(&tmp);

        let mut inventory = Inventory::new();
        inventory.add("apple", 3).unwrap();
        inventory.add("apple", 2).unwrap();
        inventory.add("crème brûlée", 1).unwrap();
        inventory.add("empty shelf", 0).unwrap();
        inventory.add("grain", u64::MAX).unwrap();

        save(&inventory, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, inventory);
        assert_eq!(loaded.get("apple"), Some(Quantity::new(5)));
    }

    #[test]
    fn saved_file_is_versioned_utf8_json() {
        let tmp = TempDir::new().unwrap();
        let path = path_in(&tmp);

        let mut inventory = Inventory::new();
        inventory.add("jalapeño", 4).unwrap();
        save(&inventory, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\n  \"_version\": \"1\",\n  \"items\": {\n    \"jalapeño\": 4\n  }\n}\n"
        );
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let tmp = TempDir::new().unwrap();
        let path = path_in(&tmp);

        let mut inventory = Inventory::new();
        inventory.add("apple", 1).unwrap();
        inventory.add("banana", 1).unwrap();
        save(&inventory, &path).unwrap();

        inventory.remove("banana").unwrap();
        save(&inventory, &path).unwrap();

        assert_eq!(load(&path).unwrap(), inventory);
    }

    #[test]
    fn failed_save_leaves_previous_file() {
        let tmp = TempDir::new().unwrap();
        // A directory cannot be replaced by a file.
        let path = tmp.path().join("occupied");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let mut inventory = Inventory::new();
        inventory.add("apple", 1).unwrap();

        let error = save(&inventory, &path).unwrap_err();
        assert!(matches!(error, SaveError::Io { .. }));
        assert!(path.is_dir());
        assert_eq!(fs::read_to_string(path.join("keep")).unwrap(), "x");
    }

    #[test]
    fn loads_unversioned_mapping() {
        let tmp = TempDir::new().unwrap();
        let path = path_in(&tmp);
        fs::write(&path, r#"{"apple":7,"banana":0}"#).unwrap();

        let inventory = load(&path).unwrap();

        assert_eq!(inventory.get("apple"), Some(Quantity::new(7)));
        assert_eq!(inventory.get("banana"), Some(Quantity::ZERO));
    }

    #[test_case(b"{\"_version\": \"1\", \"items\": {" ; "truncated")]
    #[test_case(b"not json at all" ; "not json")]
    #[test_case(b"[1, 2, 3]" ; "wrong shape")]
    #[test_case(b"{\"_version\": \"2\", \"items\": {}}" ; "unknown version")]
    #[test_case(b"{\"_version\": \"1\", \"items\": {\"apple\": -1}}" ; "negative quantity")]
    #[test_case(b"{\"apple\": 1.5}" ; "fractional quantity")]
    #[test_case(b"{\"apple\": \"3\"}" ; "quantity as string")]
    #[test_case(b"{\"\": 1}" ; "empty name")]
    #[test_case(b"{\"_version\": \"1\", \"items\": {\"apple\": 1, \"apple\": 9}}" ; "duplicate name")]
    #[test_case(b"{\"apple\": 1, \"apple\": 9}" ; "duplicate name unversioned")]
    #[test_case(b"{\"_version\": \"1\", \"items\": {}, \"items\": {}}" ; "duplicate items table")]
    #[test_case(b"{\" apple\": 1}" ; "untrimmed name")]
    #[test_case(b"\xff\xfe{}" ; "not utf8")]
    fn corrupt_files_are_rejected(content: &[u8]) {
        let tmp = TempDir::new().unwrap();
        let path = path_in(&tmp);
        fs::write(&path, content).unwrap();

        let error = load(&path).unwrap_err();
        assert!(
            matches!(error, LoadError::CorruptData { .. }),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn unreadable_path_is_io_error() {
        let tmp = TempDir::new().unwrap();
        // Reading a directory fails with something other than NotFound.
        let error = load(tmp.path()).unwrap_err();
        assert!(matches!(error, LoadError::Io { .. }));
    }
}
