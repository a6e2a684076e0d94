use std::{
    collections::{BTreeMap, btree_map::Entry},
    fmt,
};

use chrono::{DateTime, Utc};

use super::{IntoQuantity, InvalidInput, ItemName, Quantity, validate};

/// Errors returned by [`Inventory`] mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The item name or quantity was rejected by validation.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    /// The item does not exist in the inventory.
    #[error("item '{0}' not found")]
    NotFound(ItemName),

    /// The new quantity would not fit in a [`Quantity`].
    #[error("adding {added} to '{item}' would overflow its quantity of {current}")]
    Overflow {
        /// The item being added to.
        item: ItemName,
        /// Its quantity before the addition.
        current: Quantity,
        /// The quantity that could not be added.
        added: Quantity,
    },
}

/// An in-memory mapping from item name to quantity.
///
/// Every mutation validates its input before touching the map, so a failed
/// call leaves the inventory exactly as it was. Items are kept in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: BTreeMap<ItemName, Quantity>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Adds `quantity` units of `name`, creating the item if needed.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the name or quantity is invalid
    /// - [`Error::Overflow`] if the resulting quantity is too large
    pub fn add(&mut self, name: &str, quantity: impl IntoQuantity) -> Result<Change, Error> {
        let (name, quantity) = validate(name, quantity)?;

        let total = match self.items.entry(name.clone()) {
            Entry::Vacant(entry) => *entry.insert(quantity),
            Entry::Occupied(mut entry) => {
                let current = *entry.get();
                let total = current
                    .checked_add(quantity)
                    .ok_or_else(|| Error::Overflow {
                        item: name.clone(),
                        current,
                        added: quantity,
                    })?;
                entry.insert(total);
                total
            }
        };

        Ok(Change::now(name, ChangeKind::Added { quantity, total }))
    }

    /// Removes an item entirely.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the name is empty
    /// - [`Error::NotFound`] if the item does not exist
    pub fn remove(&mut self, name: &str) -> Result<Change, Error> {
        let name = ItemName::new(name)?;
        let previous = self
            .items
            .remove(&name)
            .ok_or_else(|| Error::NotFound(name.clone()))?;

        Ok(Change::now(name, ChangeKind::Removed { previous }))
    }

    /// Replaces the quantity of an existing item.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the name or quantity is invalid
    /// - [`Error::NotFound`] if the item does not exist
    pub fn set_quantity(
        &mut self,
        name: &str,
        quantity: impl IntoQuantity,
    ) -> Result<Change, Error> {
        let (name, quantity) = validate(name, quantity)?;
        let slot = self
            .items
            .get_mut(&name)
            .ok_or_else(|| Error::NotFound(name.clone()))?;
        let previous = std::mem::replace(slot, quantity);

        Ok(Change::now(name, ChangeKind::Set { previous, quantity }))
    }

    /// Takes `quantity` units of an item out of stock.
    ///
    /// If nothing would remain, the item is removed altogether.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the name is invalid or the quantity is
    ///   not a positive integer
    /// - [`Error::NotFound`] if the item does not exist
    pub fn take(&mut self, name: &str, quantity: impl IntoQuantity) -> Result<Change, Error> {
        let (name, quantity) = validate(name, quantity)?;
        if quantity.is_zero() {
            return Err(InvalidInput::ZeroQuantity.into());
        }

        let Entry::Occupied(mut entry) = self.items.entry(name.clone()) else {
            return Err(Error::NotFound(name));
        };

        let remaining = entry.get().saturating_sub(quantity);
        if remaining.is_zero() {
            entry.remove();
        } else {
            entry.insert(remaining);
        }

        Ok(Change::now(
            name,
            ChangeKind::Taken {
                quantity,
                remaining,
            },
        ))
    }

    /// Returns the quantity of an item, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Quantity> {
        self.items.get(name.trim()).copied()
    }

    /// Returns the quantity of an item, treating absent items as zero stock.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::EmptyName`] if the name is empty.
    pub fn quantity(&self, name: &str) -> Result<Quantity, InvalidInput> {
        let name = ItemName::new(name)?;
        Ok(self.items.get(&name).copied().unwrap_or_default())
    }

    /// Returns `true` if the item is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over items whose quantity is strictly below `threshold`, in
    /// name order.
    pub fn low_stock(&self, threshold: Quantity) -> impl Iterator<Item = (&ItemName, Quantity)> {
        self.iter().filter(move |(_, quantity)| *quantity < threshold)
    }

    /// Iterates over all items in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemName, Quantity)> {
        self.items.iter().map(|(name, quantity)| (name, *quantity))
    }

    /// Returns the number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the inventory holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(ItemName, Quantity)> for Inventory {
    fn from_iter<T: IntoIterator<Item = (ItemName, Quantity)>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// A record of one successful mutation.
///
/// Mutations return these to the caller instead of appending to a log held
/// by the inventory, so each caller decides where (and whether) to keep them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    at: DateTime<Utc>,
    item: ItemName,
    kind: ChangeKind,
}

impl Change {
    fn now(item: ItemName, kind: ChangeKind) -> Self {
        Self {
            at: Utc::now(),
            item,
            kind,
        }
    }

    /// When the change was made.
    #[must_use]
    pub const fn at(&self) -> DateTime<Utc> {
        self.at
    }

    /// The item that changed.
    #[must_use]
    pub const fn item(&self) -> &ItemName {
        &self.item
    }

    /// What happened to the item.
    #[must_use]
    pub const fn kind(&self) -> &ChangeKind {
        &self.kind
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let at = self.at.format("%Y-%m-%d %H:%M:%S");
        let item = &self.item;
        match self.kind {
            ChangeKind::Added { quantity, total } => {
                write!(f, "{at}: Added {quantity} of {item} (now {total})")
            }
            ChangeKind::Set { previous, quantity } => {
                write!(f, "{at}: Set {item} from {previous} to {quantity}")
            }
            ChangeKind::Taken {
                quantity,
                remaining,
            } => write!(
                f,
                "{at}: Took {quantity} of {item} ({remaining} remaining)"
            ),
            ChangeKind::Removed { previous } => {
                write!(f, "{at}: Removed {item} (had {previous})")
            }
        }
    }
}

/// The kind of mutation a [`Change`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Stock was added.
    Added {
        /// The amount added.
        quantity: Quantity,
        /// The quantity after the addition.
        total: Quantity,
    },
    /// The quantity was overwritten.
    Set {
        /// The quantity before.
        previous: Quantity,
        /// The quantity after.
        quantity: Quantity,
    },
    /// Stock was taken out.
    Taken {
        /// The amount requested.
        quantity: Quantity,
        /// The quantity left; zero means the item was removed.
        remaining: Quantity,
    },
    /// The item was removed.
    Removed {
        /// The quantity it held.
        previous: Quantity,
    },
}
