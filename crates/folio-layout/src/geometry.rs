//! # Page Geometry
//!
//! Coordinates are in layout units (millimetres with the default
//! configuration), origin at the top-left corner of the page, `y` growing
//! downwards.
//!
//! ## Column Bands
//! ```text
//!  name          unit_price   quantity    tax        total      right_edge
//!   │               │            │          │          │            │
//!   ▼               ▼            ▼          ▼          ▼            ▼
//!   ┌───────────────┬────────────┬──────────┬──────────┬────────────┐
//!   │ Name          │  10.00     │    3     │   2.00   │    32.00   │
//!   │ Description   │            │          │          │            │
//!   └───────────────┴────────────┴──────────┴──────────┴────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, LayoutResult};

// =============================================================================
// Column Geometry
// =============================================================================

/// Left edges of the table's column bands, plus the right edge of the last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnGeometry {
    pub name: f64,
    pub unit_price: f64,
    pub quantity: f64,
    pub tax: f64,
    pub total: f64,
    pub right_edge: f64,
}

impl Default for ColumnGeometry {
    fn default() -> Self {
        ColumnGeometry {
            name: 10.0,
            unit_price: 80.0,
            quantity: 110.0,
            tax: 130.0,
            total: 160.0,
            right_edge: 200.0,
        }
    }
}

impl ColumnGeometry {
    /// Rejects bands that are out of order or have no width.
    pub fn validate(&self) -> LayoutResult<()> {
        let edges = [
            ("name", self.name),
            ("unit_price", self.unit_price),
            ("quantity", self.quantity),
            ("tax", self.tax),
            ("total", self.total),
            ("right_edge", self.right_edge),
        ];

        for (label, value) in edges {
            if !value.is_finite() {
                return Err(LayoutError::InvalidGeometry(format!(
                    "{label} must be a finite number, got {value}"
                )));
            }
        }

        for pair in edges.windows(2) {
            let (left_label, left) = pair[0];
            let (right_label, right) = pair[1];
            if right <= left {
                return Err(LayoutError::InvalidGeometry(format!(
                    "{right_label} ({right}) must be greater than {left_label} ({left})"
                )));
            }
        }

        Ok(())
    }

    pub fn name_width(&self) -> f64 {
        self.unit_price - self.name
    }

    pub fn unit_price_width(&self) -> f64 {
        self.quantity - self.unit_price
    }

    pub fn quantity_width(&self) -> f64 {
        self.tax - self.quantity
    }

    pub fn tax_width(&self) -> f64 {
        self.total - self.tax
    }

    pub fn total_width(&self) -> f64 {
        self.right_edge - self.total
    }
}

// =============================================================================
// Rect / Align
// =============================================================================

/// An axis-aligned box. (x, y) is the upper-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Horizontal text alignment inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

// =============================================================================
// Cursor
// =============================================================================

/// The running vertical position of a table.
///
/// A value, not shared state: every placement takes a cursor and returns
/// the advanced one, so rows are placed strictly in document order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cursor {
    y: f64,
}

impl Cursor {
    /// Creates a cursor at the top edge `y` of the next row.
    pub fn at(y: f64) -> Self {
        Cursor { y }
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// The cursor `height` units further down the page.
    #[must_use]
    pub fn advanced_by(self, height: f64) -> Self {
        Cursor { y: self.y + height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry_is_valid() {
        let columns = ColumnGeometry::default();
        assert!(columns.validate().is_ok());
        assert_eq!(columns.name_width(), 70.0);
        assert_eq!(columns.unit_price_width(), 30.0);
        assert_eq!(columns.quantity_width(), 20.0);
        assert_eq!(columns.tax_width(), 30.0);
        assert_eq!(columns.total_width(), 40.0);
    }

    #[test]
    fn test_rejects_unordered_columns() {
        let columns = ColumnGeometry {
            quantity: 80.0, // same as unit_price: zero-width band
            ..ColumnGeometry::default()
        };
        let err = columns.validate().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGeometry(_)));
        assert!(err.to_string().contains("quantity (80) must be greater than unit_price (80)"));
    }

    #[test]
    fn test_rejects_missing_right_edge() {
        let columns = ColumnGeometry {
            right_edge: 150.0,
            ..ColumnGeometry::default()
        };
        assert!(columns.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        let columns = ColumnGeometry {
            tax: f64::NAN,
            ..ColumnGeometry::default()
        };
        assert!(columns.validate().is_err());
    }

    #[test]
    fn test_cursor_advances() {
        let cursor = Cursor::at(50.0);
        let next = cursor.advanced_by(3.0);
        assert_eq!(cursor.y(), 50.0);
        assert_eq!(next.y(), 53.0);
    }
}
