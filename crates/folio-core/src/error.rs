//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  folio-core errors (this file)                                         │
//! │  ├── CoreError        - Preparation / computation failures             │
//! │  ├── ParseError       - Malformed decimal strings                      │
//! │  └── ValidationError  - Non-numeric input rules                        │
//! │                                                                         │
//! │  folio-layout errors (separate crate)                                  │
//! │  └── LayoutError      - Geometry and configuration failures            │
//! │                                                                         │
//! │  Flow: ParseError → CoreError::Parse → CoreError::Item → caller        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, item index)
//! 3. The first failure wins, errors are never aggregated

use std::fmt;

use thiserror::Error;

// =============================================================================
// Field
// =============================================================================

/// The numeric field of a line item that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    UnitCost,
    Quantity,
    DiscountMagnitude,
    TaxMagnitude,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::UnitCost => write!(f, "unit_cost"),
            Field::Quantity => write!(f, "quantity"),
            Field::DiscountMagnitude => write!(f, "discount"),
            Field::TaxMagnitude => write!(f, "tax"),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while preparing or computing a line item.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A numeric field is not a valid decimal string.
    ///
    /// ## When This Occurs
    /// - `quantity = "abc"`
    /// - `unit_cost = "1,50"` (locale separators are not accepted)
    /// - `discount = {"percent": ""}`
    #[error("{field}: {source}")]
    Parse {
        field: Field,
        #[source]
        source: ParseError,
    },

    /// A computation was requested on an item that has not been prepared.
    ///
    /// This is caller misuse, never an end-user condition.
    #[error("line item has not been prepared")]
    NotPrepared,

    /// An intermediate value left the range of the decimal type.
    #[error("arithmetic overflow while computing {operation}")]
    Overflow { operation: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Preparation of one item in a batch failed.
    ///
    /// ## User Workflow
    /// ```text
    /// prepare_all([item0, item1, item2])
    ///      │
    ///      ▼
    /// item1.quantity = "abc"
    ///      │
    ///      ▼
    /// Item { index: 1, source: Parse { quantity, .. } }
    ///      │
    ///      ▼
    /// No document is generated
    /// ```
    #[error("item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    /// Returns the innermost error, unwrapping batch context.
    pub fn root(&self) -> &CoreError {
        match self {
            CoreError::Item { source, .. } => source.root(),
            other => other,
        }
    }
}

// =============================================================================
// Parse Error
// =============================================================================

/// Why a string is not a valid decimal numeral.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was the empty string.
    #[error("value is empty")]
    Empty,

    /// A character outside `[+-0-9.]` or a misplaced sign.
    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    /// More than one `.` in the input.
    #[error("more than one decimal point")]
    MultipleDecimalPoints,

    /// A sign and/or decimal point without any digit.
    #[error("no digits")]
    NoDigits,

    /// Too many significant digits or fractional digits for an exact decimal.
    #[error("value {input:?} cannot be represented exactly")]
    OutOfRange { input: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for non-numeric fields.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
