//! # Page Surface
//!
//! The drawing seam between layout and whatever produces the page.
//!
//! ```text
//! ┌──────────────┐  Placement  ┌──────────────────┐
//! │  RowLayout   │ ──────────► │   PageSurface    │
//! │  (render)    │             │                  │
//! └──────────────┘             │  multi_cell()    │
//!                              │  cell()          │
//!                              │  style()         │
//!                              │  set_style()     │
//!                              └────────┬─────────┘
//!                                       │
//!                     ┌─────────────────┴───────────────┐
//!                     ▼                                 ▼
//!           ┌──────────────────┐              ┌──────────────────┐
//!           │ RecordingSurface │              │  PDF backend     │
//!           │ (Vec<DrawOp>)    │              │  (out of tree)   │
//!           └──────────────────┘              └──────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::{Align, Rect};

// =============================================================================
// Styling State
// =============================================================================

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The surface's current text style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub font: String,
    pub font_size: f64,
    pub color: Rgb,
}

// =============================================================================
// PageSurface Trait
// =============================================================================

/// A page that text can be drawn on.
///
/// Coordinates are in layout units with `y` growing downwards. Cells are
/// drawn with their text vertically centred in `rect`.
pub trait PageSurface {
    /// Current styling state.
    fn style(&self) -> TextStyle;

    fn set_style(&mut self, style: TextStyle);

    /// Draws pre-wrapped `lines` top-down from (`x`, `y`), one per `line_height`.
    fn multi_cell(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        line_height: f64,
        lines: &[String],
        align: Align,
    );

    /// Draws a single-line boxed cell.
    fn cell(&mut self, rect: Rect, text: &str, border: bool, align: Align);
}

// =============================================================================
// Recording Surface
// =============================================================================

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    SetStyle(TextStyle),
    MultiCell {
        x: f64,
        y: f64,
        width: f64,
        line_height: f64,
        lines: Vec<String>,
        align: Align,
    },
    Cell {
        rect: Rect,
        text: String,
        border: bool,
        align: Align,
    },
}

/// A [`PageSurface`] that keeps a log of draw calls instead of drawing.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    style: TextStyle,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(style: TextStyle) -> Self {
        RecordingSurface {
            style,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

impl PageSurface for RecordingSurface {
    fn style(&self) -> TextStyle {
        self.style.clone()
    }

    fn set_style(&mut self, style: TextStyle) {
        self.ops.push(DrawOp::SetStyle(style.clone()));
        self.style = style;
    }

    fn multi_cell(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        line_height: f64,
        lines: &[String],
        align: Align,
    ) {
        self.ops.push(DrawOp::MultiCell {
            x,
            y,
            width,
            line_height,
            lines: lines.to_vec(),
            align,
        });
    }

    fn cell(&mut self, rect: Rect, text: &str, border: bool, align: Align) {
        self.ops.push(DrawOp::Cell {
            rect,
            text: text.to_string(),
            border,
            align,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_style() -> TextStyle {
        TextStyle {
            font: "Helvetica".to_string(),
            font_size: 8.0,
            color: Rgb(35, 35, 35),
        }
    }

    #[test]
    fn test_records_calls_in_order() {
        let mut surface = RecordingSurface::new(base_style());
        surface.multi_cell(10.0, 50.0, 70.0, 3.0, &["Widget".to_string()], Align::Left);
        surface.cell(
            Rect {
                x: 160.0,
                y: 50.0,
                width: 40.0,
                height: 3.0,
            },
            "€ 30.00",
            false,
            Align::Right,
        );

        let ops = surface.ops();
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], DrawOp::MultiCell { y, .. } if y == 50.0));
        assert!(matches!(&ops[1], DrawOp::Cell { text, .. } if text == "€ 30.00"));
    }

    #[test]
    fn test_set_style_updates_state() {
        let mut surface = RecordingSurface::new(base_style());
        let small = TextStyle {
            font_size: 7.0,
            color: Rgb(82, 82, 82),
            ..base_style()
        };
        surface.set_style(small.clone());
        assert_eq!(surface.style(), small);
        assert_eq!(surface.into_ops(), vec![DrawOp::SetStyle(small)]);
    }

    #[test]
    fn test_ops_serialize_with_tag() {
        let mut surface = RecordingSurface::new(base_style());
        surface.cell(
            Rect {
                x: 0.0,
                y: 0.0,
                width: 1.0,
                height: 1.0,
            },
            "3",
            false,
            Align::Right,
        );
        let json = serde_json::to_value(surface.ops()).unwrap();
        assert_eq!(json[0]["op"], "cell");
        assert_eq!(json[0]["align"], "right");
        assert_eq!(json[0]["text"], "3");
    }
}
