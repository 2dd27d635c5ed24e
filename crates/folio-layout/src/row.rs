//! # Row Layout
//!
//! Turns prepared line items into positioned table rows.
//!
//! ## Row Anatomy
//! ```text
//!  cursor.y ─►┌────────────────────┬──────────┬──────┬─────────┬──────────┐
//!             │ Name, wrapped at   │          │      │         │          │
//!             │ the name band      │  € 50.00 │    2 │ € 17.00 │ € 102.00 │
//!             │ (gap)              │          │      │         │          │
//!             │ Grey description   │          │      │         │          │
//!             └────────────────────┴──────────┴──────┴─────────┴──────────┘
//!  next y   ─►
//!             row height = max(name + description, one line)
//! ```
//!
//! ## Two Phases
//! ```text
//!   measure(item) ──► RowPlan           pure, independent per row
//!   place(plan, cursor) ──► (placements, next cursor)   document order
//!   render(plan, cursor, surface) ──► next cursor       draws placements
//! ```

use folio_core::{Decimal, PreparedLineItem};
use serde::Serialize;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::LayoutResult;
use crate::format::{CurrencyFormatter, MoneyFormatter, PassthroughEncoder, TextEncoder};
use crate::geometry::{Align, Cursor, Rect};
use crate::surface::{PageSurface, TextStyle};
use crate::text::{wrap_text, TextMeasure};

// =============================================================================
// Row Content / Plan / Placement
// =============================================================================

/// The display strings of one row, already formatted and encoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowContent {
    pub name: String,
    pub description: Option<String>,
    pub unit_price: String,
    pub quantity: String,
    /// Present only when the item carries a tax.
    pub tax: Option<String>,
    pub total: String,
}

/// A measured row, ready to be placed at any cursor position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowPlan {
    pub content: RowContent,
    pub name_lines: Vec<String>,
    /// Empty when the row has no description.
    pub description_lines: Vec<String>,
    pub name_height: f64,
    /// Gap plus wrapped description, or zero.
    pub description_height: f64,
    pub height: f64,
}

/// One positioned drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Wrapped text drawn line by line from the top of `rect`.
    Block {
        rect: Rect,
        lines: Vec<String>,
        line_height: f64,
        style: TextStyle,
    },
    /// Single-line boxed cell, text vertically centred in `rect`.
    Cell {
        rect: Rect,
        text: String,
        align: Align,
        border: bool,
        style: TextStyle,
    },
}

impl Placement {
    pub fn rect(&self) -> Rect {
        match self {
            Placement::Block { rect, .. } | Placement::Cell { rect, .. } => *rect,
        }
    }

    pub fn style(&self) -> &TextStyle {
        match self {
            Placement::Block { style, .. } | Placement::Cell { style, .. } => style,
        }
    }
}

// =============================================================================
// RowLayout
// =============================================================================

/// Lays out line items with a fixed configuration and set of collaborators.
pub struct RowLayout {
    config: LayoutConfig,
    metrics: Box<dyn TextMeasure + Send + Sync>,
    money: Box<dyn MoneyFormatter + Send + Sync>,
    encoder: Box<dyn TextEncoder + Send + Sync>,
}

impl std::fmt::Debug for RowLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowLayout")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RowLayout {
    /// Builds a layout with the default collaborators for `config`.
    ///
    /// Fails if the configuration is degenerate; after that, laying out a
    /// prepared item cannot fail.
    pub fn new(config: LayoutConfig) -> LayoutResult<Self> {
        config.validate()?;
        let metrics = config.text.metrics();
        let money = CurrencyFormatter::new(config.currency.clone());
        Ok(RowLayout {
            config,
            metrics: Box::new(metrics),
            money: Box::new(money),
            encoder: Box::new(PassthroughEncoder),
        })
    }

    pub fn with_metrics(mut self, metrics: impl TextMeasure + Send + Sync + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    pub fn with_money_formatter(
        mut self,
        money: impl MoneyFormatter + Send + Sync + 'static,
    ) -> Self {
        self.money = Box::new(money);
        self
    }

    pub fn with_encoder(mut self, encoder: impl TextEncoder + Send + Sync + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Formats and encodes every displayed value of `item`.
    pub fn content(&self, item: &PreparedLineItem) -> RowContent {
        RowContent {
            name: self.encoder.encode(item.name()),
            description: item.description().map(|d| self.encoder.encode(d)),
            unit_price: self.money_text(item.unit_cost()),
            quantity: self.encoder.encode(&item.quantity().normalize().to_string()),
            tax: item.tax().map(|_| self.money_text(item.tax_amount())),
            total: self.money_text(item.grand_total()),
        }
    }

    fn money_text(&self, amount: Decimal) -> String {
        self.encoder.encode(&self.money.format_money(amount))
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Wraps the text of `item` and computes its row height.
    pub fn measure(&self, item: &PreparedLineItem) -> RowPlan {
        let text = &self.config.text;
        let width = self.config.columns.name_width();
        let content = self.content(item);

        let name_lines = wrap_text(&content.name, width, text.base_font_size, self.metrics.as_ref());
        let name_height = name_lines.len() as f64 * text.line_height;

        let description_lines = match &content.description {
            Some(description) => {
                wrap_text(description, width, text.small_font_size, self.metrics.as_ref())
            }
            None => Vec::new(),
        };
        let description_height = if description_lines.is_empty() {
            0.0
        } else {
            text.description_gap + description_lines.len() as f64 * text.line_height
        };

        let height = (name_height + description_height).max(text.line_height);

        RowPlan {
            content,
            name_lines,
            description_lines,
            name_height,
            description_height,
            height,
        }
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Positions a measured row at `cursor` and returns the cursor below it.
    pub fn place(&self, plan: &RowPlan, cursor: Cursor) -> (Vec<Placement>, Cursor) {
        let columns = &self.config.columns;
        let text = &self.config.text;
        let top = cursor.y();
        let base_style = text.base_style();

        let mut placements = Vec::with_capacity(6);

        placements.push(Placement::Block {
            rect: Rect {
                x: columns.name,
                y: top,
                width: columns.name_width(),
                height: plan.name_height,
            },
            lines: plan.name_lines.clone(),
            line_height: text.line_height,
            style: base_style.clone(),
        });

        if !plan.description_lines.is_empty() {
            let y = top + plan.name_height + text.description_gap;
            placements.push(Placement::Block {
                rect: Rect {
                    x: columns.name,
                    y,
                    width: columns.name_width(),
                    height: plan.description_lines.len() as f64 * text.line_height,
                },
                lines: plan.description_lines.clone(),
                line_height: text.line_height,
                style: text.description_style(),
            });
        }

        let cell = |x: f64, width: f64, value: &str| Placement::Cell {
            rect: Rect {
                x,
                y: top,
                width,
                height: plan.height,
            },
            text: value.to_string(),
            align: Align::Right,
            border: false,
            style: base_style.clone(),
        };

        let content = &plan.content;
        placements.push(cell(columns.unit_price, columns.unit_price_width(), &content.unit_price));
        placements.push(cell(columns.quantity, columns.quantity_width(), &content.quantity));
        if let Some(tax) = &content.tax {
            placements.push(cell(columns.tax, columns.tax_width(), tax));
        }
        placements.push(cell(columns.total, columns.total_width(), &content.total));

        let next = cursor.advanced_by(plan.height);
        debug!(
            name = %content.name,
            y = top,
            row_height = plan.height,
            next_y = next.y(),
            "Placed row"
        );

        (placements, next)
    }

    /// Measures every item, then places the rows in order from `cursor`.
    pub fn layout_rows(
        &self,
        items: &[PreparedLineItem],
        cursor: Cursor,
    ) -> (Vec<Placement>, Cursor) {
        let plans: Vec<RowPlan> = items.iter().map(|item| self.measure(item)).collect();

        let mut placements = Vec::new();
        let mut cursor = cursor;
        for plan in &plans {
            let (row, next) = self.place(plan, cursor);
            placements.extend(row);
            cursor = next;
        }
        (placements, cursor)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Draws a measured row on `surface` and returns the cursor below it.
    ///
    /// The surface's style is the same afterwards as before.
    pub fn render(&self, plan: &RowPlan, cursor: Cursor, surface: &mut dyn PageSurface) -> Cursor {
        let (placements, next) = self.place(plan, cursor);
        draw_placements(&placements, surface);
        next
    }

    /// Renders every item in order from `cursor`.
    pub fn render_rows(
        &self,
        items: &[PreparedLineItem],
        cursor: Cursor,
        surface: &mut dyn PageSurface,
    ) -> Cursor {
        let (placements, next) = self.layout_rows(items, cursor);
        draw_placements(&placements, surface);
        next
    }
}

fn draw_placements(placements: &[Placement], surface: &mut dyn PageSurface) {
    let saved = surface.style();

    for placement in placements {
        if &surface.style() != placement.style() {
            surface.set_style(placement.style().clone());
        }
        match placement {
            Placement::Block {
                rect,
                lines,
                line_height,
                ..
            } => surface.multi_cell(rect.x, rect.y, rect.width, *line_height, lines, Align::Left),
            Placement::Cell {
                rect,
                text,
                align,
                border,
                ..
            } => surface.cell(*rect, text, *border, *align),
        }
    }

    if surface.style() != saved {
        surface.set_style(saved);
    }
}
