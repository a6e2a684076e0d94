use super::{IntoQuantity, ItemName, Quantity};

/// Error returned when an item name or quantity is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    /// The item name was empty or contained only whitespace.
    #[error("item name must be non-empty")]
    EmptyName,

    /// The quantity was not an integer.
    #[error("quantity '{0}' is not an integer")]
    NotAnInteger(String),

    /// The quantity was negative.
    #[error("quantity '{0}' must be non-negative")]
    NegativeQuantity(String),

    /// The quantity does not fit in a 64-bit unsigned integer.
    #[error("quantity '{0}' is too large")]
    QuantityTooLarge(String),

    /// The operation requires a strictly positive quantity.
    #[error("quantity must be greater than zero")]
    ZeroQuantity,
}

/// Validates a candidate item name and quantity.
///
/// The name is trimmed and must be non-empty. The quantity must be a
/// non-negative integer; textual quantities are parsed, never evaluated.
///
/// # Errors
///
/// Returns [`InvalidInput`] describing the first problem found. The name is
/// checked before the quantity.
///
/// # Examples
///
/// ```
/// use inventory::{InvalidInput, validate};
///
/// let (name, quantity) = validate(" apple ", "3").unwrap();
/// assert_eq!(name.as_str(), "apple");
/// assert_eq!(quantity.get(), 3);
///
/// assert_eq!(validate("", 1), Err(InvalidInput::EmptyName));
/// assert!(validate("apple", -1).is_err());
/// ```
pub fn validate(
    name: &str,
    quantity: impl IntoQuantity,
) -> Result<(ItemName, Quantity), InvalidInput> {
    let name = ItemName::new(name)?;
    let quantity = quantity.into_quantity()?;
    Ok((name, quantity))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test]
    fn returns_normalised_values() {
        let (name, quantity) = validate("  widget ", " 12 ").unwrap();
        assert_eq!(name.as_str(), "widget");
        assert_eq!(quantity, Quantity::new(12));
    }

    #[test]
    fn name_is_checked_first() {
        assert_eq!(validate(" ", "abc"), Err(InvalidInput::EmptyName));
    }

    #[test_case("-4"; "negative")]
    #[test_case("four"; "word")]
    #[test_case("4.0"; "float")]
    fn rejects_bad_quantity_text(quantity: &str) {
        assert!(validate("widget", quantity).is_err());
    }

    #[test]
    fn rejects_negative_integer() {
        assert_eq!(
            validate("widget", -4_i64),
            Err(InvalidInput::NegativeQuantity("-4".to_string()))
        );
    }
}
