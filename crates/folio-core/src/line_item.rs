//! # Line Items
//!
//! The line-item lifecycle and the computation engine.
//!
//! ## Two-State Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  RawLineItem (strings, straight from JSON)                              │
//! │       │                                                                 │
//! │       │  prepare()  ── first parse failure ──► CoreError (nothing kept)│
//! │       ▼                                                                 │
//! │  PreparedLineItem (exact decimals + totals, immutable)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal / discounted_subtotal / tax_amount / grand_total              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers that need to hold an item before it is prepared use the
//! [`LineItem`] enum, whose accessors fail with [`CoreError::NotPrepared`]
//! until [`LineItem::prepare`] succeeds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::adjustment::{
    resolve_discount, resolve_tax, Discount, PostBase, PreBase, RawAdjustment, Stage, Tax,
};
use crate::decimal::parse_field;
use crate::error::{CoreError, CoreResult, Field};
use crate::validation::validate_item_name;

// =============================================================================
// Raw Line Item
// =============================================================================

/// A billable entry exactly as supplied by the caller.
///
/// ## JSON Format
/// ```json
/// {
///   "name": "Website redesign",
///   "description": "Landing page and two templates",
///   "unit_cost": "1250.00",
///   "quantity": "2",
///   "discount": { "percent": "10" },
///   "tax": { "percent": "20" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLineItem {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub unit_cost: String,

    pub quantity: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<RawAdjustment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<RawAdjustment>,
}

impl RawLineItem {
    /// Creates a raw item with no description, discount or tax.
    pub fn new(
        name: impl Into<String>,
        unit_cost: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        RawLineItem {
            name: name.into(),
            description: None,
            unit_cost: unit_cost.into(),
            quantity: quantity.into(),
            discount: None,
            tax: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_discount(mut self, discount: RawAdjustment) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn with_tax(mut self, tax: RawAdjustment) -> Self {
        self.tax = Some(tax);
        self
    }

    /// Validates every field and computes the totals.
    ///
    /// ## Order
    /// name → unit_cost → quantity → discount → tax → totals.
    /// The first failure is returned.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::{RawAdjustment, RawLineItem};
    ///
    /// let item = RawLineItem::new("Hosting", "100", "1")
    ///     .with_discount(RawAdjustment::Percent("10".into()))
    ///     .with_tax(RawAdjustment::Percent("20".into()))
    ///     .prepare()
    ///     .unwrap();
    ///
    /// assert_eq!(item.discounted_subtotal().to_string(), "90");
    /// assert_eq!(item.tax_amount().to_string(), "18");
    /// assert_eq!(item.grand_total().to_string(), "108");
    /// ```
    pub fn prepare(&self) -> CoreResult<PreparedLineItem> {
        validate_item_name(&self.name)?;

        let unit_cost = parse_field(Field::UnitCost, &self.unit_cost)?;
        let quantity = parse_field(Field::Quantity, &self.quantity)?;
        let discount = self
            .discount
            .as_ref()
            .map(RawAdjustment::prepare::<PreBase>)
            .transpose()?;
        let tax = self
            .tax
            .as_ref()
            .map(RawAdjustment::prepare::<PostBase>)
            .transpose()?;

        let totals = Totals::compute(unit_cost, quantity, discount.as_ref(), tax.as_ref())?;

        debug!(
            name = %self.name,
            subtotal = %totals.subtotal,
            grand_total = %totals.grand_total,
            "Prepared line item"
        );

        Ok(PreparedLineItem {
            name: self.name.clone(),
            description: self.description.clone().filter(|d| !d.trim().is_empty()),
            unit_cost,
            quantity,
            discount,
            tax,
            totals,
        })
    }
}

impl TryFrom<&RawLineItem> for PreparedLineItem {
    type Error = CoreError;

    fn try_from(raw: &RawLineItem) -> CoreResult<Self> {
        raw.prepare()
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Every derived value of one line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// unit cost × quantity
    pub subtotal: Decimal,
    /// Resolved discount, zero when absent
    pub discount: Decimal,
    /// subtotal − discount
    pub discounted_subtotal: Decimal,
    /// Resolved tax on the discounted subtotal, zero when absent
    pub tax: Decimal,
    /// discounted subtotal + tax
    pub grand_total: Decimal,
}

impl Totals {
    /// Runs the pipeline: subtotal, then discount, then tax.
    pub fn compute(
        unit_cost: Decimal,
        quantity: Decimal,
        discount: Option<&Discount>,
        tax: Option<&Tax>,
    ) -> CoreResult<Totals> {
        let subtotal = unit_cost
            .checked_mul(quantity)
            .ok_or(CoreError::Overflow {
                operation: "subtotal",
            })?;

        // Discount: resolved against the subtotal, then subtracted
        let discount_amount = resolve_discount(discount, subtotal)?;
        let discounted_subtotal =
            PreBase::apply(subtotal, discount_amount).ok_or(CoreError::Overflow {
                operation: "discounted subtotal",
            })?;

        // Tax: resolved against the DISCOUNTED subtotal, then added
        let tax_amount = resolve_tax(tax, discounted_subtotal)?;
        let grand_total =
            PostBase::apply(discounted_subtotal, tax_amount).ok_or(CoreError::Overflow {
                operation: "grand total",
            })?;

        Ok(Totals {
            subtotal,
            discount: discount_amount,
            discounted_subtotal,
            tax: tax_amount,
            grand_total,
        })
    }
}

// =============================================================================
// Prepared Line Item
// =============================================================================

/// A validated line item. Only [`RawLineItem::prepare`] creates one.
///
/// All accessors are pure and return the same value on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedLineItem {
    name: String,
    description: Option<String>,
    unit_cost: Decimal,
    quantity: Decimal,
    discount: Option<Discount>,
    tax: Option<Tax>,
    totals: Totals,
}

impl PreparedLineItem {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description, `None` when absent or empty.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn discount(&self) -> Option<&Discount> {
        self.discount.as_ref()
    }

    pub fn tax(&self) -> Option<&Tax> {
        self.tax.as_ref()
    }

    /// unit cost × quantity, no discount, no tax.
    pub fn subtotal(&self) -> Decimal {
        self.totals.subtotal
    }

    /// The resolved discount amount (zero without a discount).
    pub fn discount_amount(&self) -> Decimal {
        self.totals.discount
    }

    /// Subtotal minus the resolved discount.
    pub fn discounted_subtotal(&self) -> Decimal {
        self.totals.discounted_subtotal
    }

    /// Tax resolved against the discounted subtotal.
    pub fn tax_amount(&self) -> Decimal {
        self.totals.tax
    }

    /// Discounted subtotal plus tax: the payable amount.
    pub fn grand_total(&self) -> Decimal {
        self.totals.grand_total
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }
}

// =============================================================================
// Line Item Lifecycle
// =============================================================================

/// A line item that may or may not have been prepared yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItem {
    Raw(RawLineItem),
    Prepared(PreparedLineItem),
}

impl From<RawLineItem> for LineItem {
    fn from(raw: RawLineItem) -> Self {
        LineItem::Raw(raw)
    }
}

impl LineItem {
    /// Moves a raw item to the prepared state.
    ///
    /// On failure the item stays raw. Preparing an already-prepared item
    /// is a no-op.
    pub fn prepare(&mut self) -> CoreResult<&PreparedLineItem> {
        if let LineItem::Raw(raw) = self {
            let prepared = raw.prepare()?;
            *self = LineItem::Prepared(prepared);
        }
        self.prepared()
    }

    pub fn is_prepared(&self) -> bool {
        matches!(self, LineItem::Prepared(_))
    }

    /// The prepared record, or `NotPrepared`.
    pub fn prepared(&self) -> CoreResult<&PreparedLineItem> {
        match self {
            LineItem::Prepared(prepared) => Ok(prepared),
            LineItem::Raw(_) => Err(CoreError::NotPrepared),
        }
    }

    pub fn subtotal(&self) -> CoreResult<Decimal> {
        Ok(self.prepared()?.subtotal())
    }

    pub fn discounted_subtotal(&self) -> CoreResult<Decimal> {
        Ok(self.prepared()?.discounted_subtotal())
    }

    pub fn tax_amount(&self) -> CoreResult<Decimal> {
        Ok(self.prepared()?.tax_amount())
    }

    pub fn grand_total(&self) -> CoreResult<Decimal> {
        Ok(self.prepared()?.grand_total())
    }
}

// =============================================================================
// Batch Preparation
// =============================================================================

/// Prepares every item of a document in order.
///
/// Fails on the first unpreparable item: an invoice with a skipped or
/// zero-valued line must not be produced.
pub fn prepare_all(items: &[RawLineItem]) -> CoreResult<Vec<PreparedLineItem>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.prepare().map_err(|source| {
                warn!(index, name = %item.name, error = %source, "Line item rejected");
                CoreError::Item {
                    index,
                    source: Box::new(source),
                }
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
