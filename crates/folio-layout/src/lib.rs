//! # folio-layout: Row Layout for Folio
//!
//! Lays prepared line items out as rows of an invoice table.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Folio Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        folio-core                               │   │
//! │  │         parsing, discount/tax resolution, totals                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &PreparedLineItem                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ folio-layout (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────┐   ┌──────────┐   ┌──────────┐   ┌─────────────┐   │   │
//! │  │   │ config │──►│   row    │──►│ geometry │   │   format    │   │   │
//! │  │   │        │   │ measure  │   │  Cursor  │   │ money, text │   │   │
//! │  │   │        │   │ place    │   │  Rect    │   │  encoding   │   │   │
//! │  │   └────────┘   └────┬─────┘   └──────────┘   └─────────────┘   │   │
//! │  └─────────────────────┼───────────────────────────────────────────┘   │
//! │                        │ Placement                                      │
//! │                 ┌──────▼───────┐                                        │
//! │                 │ PageSurface  │  RecordingSurface / PDF backend        │
//! │                 └──────────────┘                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - TOML + environment configuration
//! - [`geometry`] - Column bands, rectangles, the vertical cursor
//! - [`text`] - Text measurement and word wrapping
//! - [`input`] - JSON line-item loading and preparation
//! - [`format`] - Money formatting and text encoding
//! - [`surface`] - The drawing seam and a recording implementation
//! - [`row`] - Row measurement, placement and rendering
//! - [`error`] - Layout error types
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::RawLineItem;
//! use folio_layout::{Cursor, LayoutConfig, RecordingSurface, RowLayout};
//!
//! let config = LayoutConfig::default();
//! let mut surface = RecordingSurface::new(config.text.base_style());
//! let layout = RowLayout::new(config).unwrap();
//!
//! let item = RawLineItem::new("Widget", "10.00", "3").prepare().unwrap();
//! let plan = layout.measure(&item);
//! let next = layout.render(&plan, Cursor::at(50.0), &mut surface);
//!
//! assert_eq!(next.y(), 53.0);
//! assert_eq!(plan.content.total, "€ 30.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod input;
pub mod row;
pub mod surface;
pub mod text;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::{LayoutConfig, TextConfig};
pub use error::{LayoutError, LayoutResult};
pub use format::{
    CurrencyConfig, CurrencyFormatter, MoneyFormatter, PassthroughEncoder, TextEncoder,
};
pub use geometry::{Align, ColumnGeometry, Cursor, Rect};
pub use input::{parse_items, read_items};
pub use row::{Placement, RowContent, RowLayout, RowPlan};
pub use surface::{DrawOp, PageSurface, RecordingSurface, Rgb, TextStyle};
pub use text::{wrap_text, TextMeasure, UniformMetrics};
