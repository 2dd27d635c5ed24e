//! # Validation Module
//!
//! Rules for the non-numeric fields of a line item. Numeric fields are
//! validated by parsing them, see [`crate::decimal`].

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a line-item name.
///
/// ## Rules
/// - Must not be empty or whitespace only
///
/// ## Example
/// ```rust
/// use folio_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Website redesign").is_ok());
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}
