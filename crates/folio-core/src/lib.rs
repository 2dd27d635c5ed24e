//! # folio-core: Line-Item Computation for Folio
//!
//! This crate turns string-encoded invoice lines into exact decimal totals.
//! It is pure: no I/O, no formatting, no floating point.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Folio Architecture                             │
//! │                                                                         │
//! │  JSON line items                                                        │
//! │        │                                                                │
//! │  ┌─────▼───────────────────────────────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌─────────────┐               │   │
//! │  │   │  decimal  │─►│ adjustment │─►│  line_item  │               │   │
//! │  │   │  parsing  │  │ Discount   │  │  Totals     │               │   │
//! │  │   │           │  │ Tax        │  │  prepare    │               │   │
//! │  │   └───────────┘  └────────────┘  └─────────────┘               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &PreparedLineItem                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                     folio-layout                                │   │
//! │  │    row measurement, cursor, page surface, money formatting      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`decimal`] - Strict decimal parsing (no rounding, no locale)
//! - [`adjustment`] - Discount and tax resolution
//! - [`line_item`] - Raw/prepared items and their totals
//! - [`error`] - Domain error types
//! - [`validation`] - Non-numeric input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::{RawAdjustment, RawLineItem};
//!
//! let item = RawLineItem::new("Support plan", "50", "2")
//!     .with_discount(RawAdjustment::Amount("15".into()))
//!     .prepare()
//!     .unwrap();
//!
//! assert_eq!(item.subtotal().to_string(), "100");
//! assert_eq!(item.grand_total().to_string(), "85");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod adjustment;
pub mod decimal;
pub mod error;
pub mod line_item;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use adjustment::{AdjustmentKind, Discount, RawAdjustment, Tax};
pub use error::{CoreError, CoreResult, Field, ParseError, ValidationError};
pub use line_item::{prepare_all, LineItem, PreparedLineItem, RawLineItem, Totals};
pub use rust_decimal::Decimal;
