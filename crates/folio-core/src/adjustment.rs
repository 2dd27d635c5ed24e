//! # Adjustments: Discount and Tax
//!
//! A discount and a tax share one resolution algorithm (flat amount or
//! percentage of a base) but sit at different points of the pipeline.
//!
//! ## Pipeline Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  subtotal ──► Discount (PreBase)  ──► discounted subtotal               │
//! │               resolve(subtotal)       subtotal - discount               │
//! │                                              │                          │
//! │                                              ▼                          │
//! │               Tax (PostBase)      ──► grand total                       │
//! │               resolve(discounted)     discounted + tax                  │
//! │                                                                         │
//! │  Tax is NEVER resolved against the pre-discount subtotal.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The stage is a type parameter, so a `Tax` cannot be passed where a
//! `Discount` is expected and vice versa.

use std::fmt;
use std::marker::PhantomData;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::parse_field;
use crate::error::{CoreError, CoreResult, Field};

// =============================================================================
// Stages
// =============================================================================

/// Where an adjustment is applied relative to its base.
pub trait Stage {
    /// Field reported when the magnitude fails to parse.
    const FIELD: Field;

    /// Human-readable role, used in logs and overflow errors.
    const ROLE: &'static str;

    /// Combines the base with a resolved adjustment amount.
    fn apply(base: Decimal, amount: Decimal) -> Option<Decimal>;
}

/// Applied before the base is final: the amount is subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreBase;

/// Applied after the base is final: the amount is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostBase;

impl Stage for PreBase {
    const FIELD: Field = Field::DiscountMagnitude;
    const ROLE: &'static str = "discount";

    fn apply(base: Decimal, amount: Decimal) -> Option<Decimal> {
        base.checked_sub(amount)
    }
}

impl Stage for PostBase {
    const FIELD: Field = Field::TaxMagnitude;
    const ROLE: &'static str = "tax";

    fn apply(base: Decimal, amount: Decimal) -> Option<Decimal> {
        base.checked_add(amount)
    }
}

// =============================================================================
// Adjustment
// =============================================================================

/// Flat amount or percentage of the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    Amount,
    Percent,
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustmentKind::Amount => write!(f, "amount"),
            AdjustmentKind::Percent => write!(f, "percent"),
        }
    }
}

/// A validated adjustment for pipeline stage `S`.
///
/// Percentages are not clamped: `Percent(150)` on a discount produces a
/// negative discounted subtotal, exactly as written.
#[derive(Debug, Serialize)]
#[serde(bound = "")]
pub struct Adjustment<S> {
    kind: AdjustmentKind,
    magnitude: Decimal,
    #[serde(skip)]
    stage: PhantomData<S>,
}

/// Subtracted from the subtotal.
pub type Discount = Adjustment<PreBase>;

/// Added to the discounted subtotal.
pub type Tax = Adjustment<PostBase>;

// Manual impls: derives would demand `S: Clone`/`S: PartialEq`.
impl<S> Clone for Adjustment<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Adjustment<S> {}

impl<S> PartialEq for Adjustment<S> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.magnitude == other.magnitude
    }
}

impl<S> Eq for Adjustment<S> {}

impl<S: Stage> Adjustment<S> {
    /// Creates an adjustment from an already-exact magnitude.
    pub fn new(kind: AdjustmentKind, magnitude: Decimal) -> Self {
        Adjustment {
            kind,
            magnitude,
            stage: PhantomData,
        }
    }

    /// Flat amount adjustment.
    pub fn amount(magnitude: Decimal) -> Self {
        Self::new(AdjustmentKind::Amount, magnitude)
    }

    /// Percentage adjustment (`10` means 10%).
    pub fn percent(magnitude: Decimal) -> Self {
        Self::new(AdjustmentKind::Percent, magnitude)
    }

    pub fn kind(&self) -> AdjustmentKind {
        self.kind
    }

    pub fn magnitude(&self) -> Decimal {
        self.magnitude
    }

    /// Resolves this adjustment into a concrete amount against `base`.
    ///
    /// - `Amount`: the magnitude, independent of the base
    /// - `Percent`: `base × magnitude / 100`, or `base × (magnitude / 100)`
    ///   when the product alone would exceed the decimal range
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::adjustment::Discount;
    /// use rust_decimal::Decimal;
    ///
    /// let ten_percent = Discount::percent(Decimal::from(10));
    /// let amount = ten_percent.resolve(Decimal::from(250)).unwrap();
    /// assert_eq!(amount, Decimal::from(25));
    /// ```
    pub fn resolve(&self, base: Decimal) -> CoreResult<Decimal> {
        match self.kind {
            AdjustmentKind::Amount => Ok(self.magnitude),
            // base × magnitude first keeps every digit; near the top of the
            // range the product overflows, so scale the rate down first.
            AdjustmentKind::Percent => base
                .checked_mul(self.magnitude)
                .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
                .or_else(|| {
                    self.magnitude
                        .checked_div(Decimal::ONE_HUNDRED)
                        .and_then(|rate| base.checked_mul(rate))
                })
                .ok_or(CoreError::Overflow {
                    operation: S::ROLE,
                }),
        }
    }
}

/// Resolves an optional adjustment: absent means exactly zero.
fn resolve_optional<S: Stage>(
    adjustment: Option<&Adjustment<S>>,
    base: Decimal,
) -> CoreResult<Decimal> {
    match adjustment {
        Some(adjustment) => adjustment.resolve(base),
        None => Ok(Decimal::ZERO),
    }
}

/// Amount to subtract from `subtotal`.
pub fn resolve_discount(discount: Option<&Discount>, subtotal: Decimal) -> CoreResult<Decimal> {
    resolve_optional(discount, subtotal)
}

/// Amount to add to `discounted_subtotal`.
///
/// Callers must pass the subtotal AFTER discount.
pub fn resolve_tax(tax: Option<&Tax>, discounted_subtotal: Decimal) -> CoreResult<Decimal> {
    resolve_optional(tax, discounted_subtotal)
}

// =============================================================================
// Raw Adjustment
// =============================================================================

/// An adjustment as supplied by the caller: kind plus unparsed magnitude.
///
/// ## JSON Format
/// ```json
/// { "percent": "10" }
/// { "amount": "15.50" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawAdjustment {
    Amount(String),
    Percent(String),
}

impl RawAdjustment {
    pub fn kind(&self) -> AdjustmentKind {
        match self {
            RawAdjustment::Amount(_) => AdjustmentKind::Amount,
            RawAdjustment::Percent(_) => AdjustmentKind::Percent,
        }
    }

    pub fn magnitude(&self) -> &str {
        match self {
            RawAdjustment::Amount(m) | RawAdjustment::Percent(m) => m,
        }
    }

    /// Parses the magnitude for stage `S`.
    pub fn prepare<S: Stage>(&self) -> CoreResult<Adjustment<S>> {
        let magnitude = parse_field(S::FIELD, self.magnitude())?;
        Ok(Adjustment::new(self.kind(), magnitude))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_ignores_base() {
        let discount = Discount::amount(dec!(15));
        assert_eq!(discount.resolve(dec!(100)).unwrap(), dec!(15));
        assert_eq!(discount.resolve(dec!(0)).unwrap(), dec!(15));
    }

    #[test]
    fn test_percent_of_base() {
        let tax = Tax::percent(dec!(20));
        assert_eq!(tax.resolve(dec!(90)).unwrap(), dec!(18));

        // 8.25% of 10.00 stays exact, no rounding to cents
        let tax = Tax::percent(dec!(8.25));
        assert_eq!(tax.resolve(dec!(10.00)).unwrap(), dec!(0.825));
    }

    #[test]
    fn test_percent_is_not_clamped() {
        let discount = Discount::percent(dec!(150));
        assert_eq!(discount.resolve(dec!(10)).unwrap(), dec!(15));
    }

    #[test]
    fn test_absent_resolves_to_zero() {
        assert_eq!(resolve_discount(None, dec!(42)).unwrap(), Decimal::ZERO);
        assert_eq!(resolve_tax(None, dec!(42)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_stage_application() {
        assert_eq!(PreBase::apply(dec!(100), dec!(10)), Some(dec!(90)));
        assert_eq!(PostBase::apply(dec!(90), dec!(18)), Some(dec!(108)));
    }

    #[test]
    fn test_percent_near_decimal_max() {
        let base = dec!(1000000000000000000000000000); // 1e27, about MAX / 79
        assert_eq!(Discount::percent(dec!(100)).resolve(base).unwrap(), base);
        assert_eq!(
            Tax::percent(dec!(5)).resolve(base).unwrap(),
            dec!(50000000000000000000000000)
        );

        let near_max = dec!(7922816251426433759354395033); // MAX / 10, truncated
        let half = Discount::percent(dec!(50)).resolve(near_max).unwrap();
        assert_eq!(half, dec!(3961408125713216879677197516.5));
    }

    #[test]
    fn test_percent_overflow_is_an_error() {
        let tax = Tax::percent(Decimal::MAX);
        let err = tax.resolve(Decimal::MAX).unwrap_err();
        assert!(matches!(err, CoreError::Overflow { operation: "tax" }));
    }

    #[test]
    fn test_raw_json_shape() {
        let raw: RawAdjustment = serde_json::from_str(r#"{"percent":"10"}"#).unwrap();
        assert_eq!(raw, RawAdjustment::Percent("10".to_string()));

        let raw: RawAdjustment = serde_json::from_str(r#"{"amount":"15.50"}"#).unwrap();
        assert_eq!(raw.kind(), AdjustmentKind::Amount);
        assert_eq!(raw.magnitude(), "15.50");
    }

    #[test]
    fn test_raw_prepare_uses_stage_field() {
        let raw = RawAdjustment::Percent("ten".to_string());

        let err = raw.prepare::<PreBase>().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Parse {
                field: Field::DiscountMagnitude,
                source: ParseError::InvalidCharacter { .. }
            }
        ));

        let err = raw.prepare::<PostBase>().unwrap_err();
        assert!(matches!(err, CoreError::Parse { field: Field::TaxMagnitude, .. }));
    }

    #[test]
    fn test_raw_prepare_keeps_kind() {
        let tax: Tax = RawAdjustment::Amount("4.00".to_string()).prepare().unwrap();
        assert_eq!(tax.kind(), AdjustmentKind::Amount);
        assert_eq!(tax.magnitude().to_string(), "4.00");
    }
}
