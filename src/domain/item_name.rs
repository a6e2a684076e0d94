use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

use super::InvalidInput;

/// The name of an inventory item.
///
/// Names are trimmed of surrounding whitespace and must be non-empty after
/// trimming. Comparison is case-sensitive, so `Apple` and `apple` are
/// distinct items.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ItemName(NonEmptyString);

impl ItemName {
    /// Creates a new `ItemName`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::EmptyName`] if the name is empty or contains
    /// only whitespace.
    pub fn new(name: &str) -> Result<Self, InvalidInput> {
        NonEmptyString::new(name.trim().to_string())
            .map(Self)
            .map_err(|_| InvalidInput::EmptyName)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<&str> for ItemName {
    type Error = InvalidInput;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ItemName {
    type Error = InvalidInput;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl FromStr for ItemName {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<ItemName> for String {
    fn from(name: ItemName) -> Self {
        name.as_str().to_owned()
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for ItemName {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl Deref for ItemName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
