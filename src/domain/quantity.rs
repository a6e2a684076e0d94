use std::{fmt, num::IntErrorKind, str::FromStr};

use serde::{Deserialize, Serialize};

use super::InvalidInput;

/// A stock quantity.
///
/// Quantities are unsigned, so a negative stock level cannot be represented.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    /// No stock.
    pub const ZERO: Self = Self(0);

    /// The largest representable quantity.
    pub const MAX: Self = Self(u64::MAX);

    /// Creates a quantity from an unsigned value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns `true` if the quantity is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Adds two quantities, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Subtracts `other`, clamping at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Quantity> for u64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Quantity {
    type Err = InvalidInput;

    /// Parses a decimal integer, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<u64>() {
            Ok(value) => Ok(Self(value)),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                Err(InvalidInput::QuantityTooLarge(trimmed.to_string()))
            }
            Err(_) => match trimmed.parse::<i128>() {
                Ok(value) if value < 0 => Err(InvalidInput::NegativeQuantity(trimmed.to_string())),
                // "-0"
                Ok(_) => Ok(Self::ZERO),
                Err(e) if *e.kind() == IntErrorKind::NegOverflow => {
                    Err(InvalidInput::NegativeQuantity(trimmed.to_string()))
                }
                Err(_) => Err(InvalidInput::NotAnInteger(trimmed.to_string())),
            },
        }
    }
}

/// Candidate quantity values that can be validated into a [`Quantity`].
///
/// Implemented for raw text (as typed by a user) and for the integer types,
/// so callers can hand over whatever they have and let validation decide.
pub trait IntoQuantity {
    /// Validates `self` as a non-negative integer quantity.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if the value is negative, not an integer, or
    /// too large.
    fn into_quantity(self) -> Result<Quantity, InvalidInput>;
}

impl IntoQuantity for Quantity {
    fn into_quantity(self) -> Result<Quantity, InvalidInput> {
        Ok(self)
    }
}

impl IntoQuantity for u64 {
    fn into_quantity(self) -> Result<Quantity, InvalidInput> {
        Ok(Quantity(self))
    }
}

impl IntoQuantity for &str {
    fn into_quantity(self) -> Result<Quantity, InvalidInput> {
        self.parse()
    }
}

impl IntoQuantity for &String {
    fn into_quantity(self) -> Result<Quantity, InvalidInput> {
        self.parse()
    }
}

macro_rules! unsigned_into_quantity {
    ($($ty:ty),*) => {
        $(
            impl IntoQuantity for $ty {
                fn into_quantity(self) -> Result<Quantity, InvalidInput> {
                    Ok(Quantity(u64::from(self)))
                }
            }
        )*
    };
}

macro_rules! signed_into_quantity {
    ($($ty:ty),*) => {
        $(
            impl IntoQuantity for $ty {
                fn into_quantity(self) -> Result<Quantity, InvalidInput> {
                    u64::try_from(self)
                        .map(Quantity)
                        .map_err(|_| InvalidInput::NegativeQuantity(self.to_string()))
                }
            }
        )*
    };
}

unsigned_into_quantity!(u8, u16, u32);
signed_into_quantity!(i8, i16, i32, i64);
