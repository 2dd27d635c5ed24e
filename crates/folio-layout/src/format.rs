//! # Render-Time Formatting
//!
//! Collaborators that turn core values into display strings. They run only
//! while a row is being laid out, so totals stay full-precision decimals
//! everywhere else.

use folio_core::Decimal;
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

// =============================================================================
// Money Formatting
// =============================================================================

/// Turns an exact amount into display text.
pub trait MoneyFormatter {
    fn format_money(&self, amount: Decimal) -> String;
}

/// Currency display settings.
///
/// Defaults match the classic invoice generator output: `"€ 1 234.50"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// Printed before the amount, including any spacing.
    pub symbol: String,
    /// Fractional digits shown.
    pub precision: u32,
    /// Separator between integer and fractional digits.
    pub decimal: String,
    /// Separator between groups of three integer digits.
    pub thousand: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig {
            symbol: "€ ".to_string(),
            precision: 2,
            decimal: ".".to_string(),
            thousand: " ".to_string(),
        }
    }
}

/// [`MoneyFormatter`] driven by a [`CurrencyConfig`].
///
/// Rounds half away from zero to `precision` digits, for display only.
#[derive(Debug, Clone, Default)]
pub struct CurrencyFormatter {
    config: CurrencyConfig,
}

impl CurrencyFormatter {
    pub fn new(config: CurrencyConfig) -> Self {
        CurrencyFormatter { config }
    }

    pub fn config(&self) -> &CurrencyConfig {
        &self.config
    }

    fn group_thousands(&self, digits: &str) -> String {
        digits
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join(&self.config.thousand)
    }
}

impl MoneyFormatter for CurrencyFormatter {
    fn format_money(&self, amount: Decimal) -> String {
        let precision = self.config.precision;
        let rounded = amount.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        let plain = format!("{:.*}", precision as usize, rounded.abs());
        let (integer, fraction) = match plain.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (plain.as_str(), None),
        };

        let mut out = format!("{}{}{}", sign, self.config.symbol, self.group_thousands(integer));
        if let Some(fraction) = fraction {
            out.push_str(&self.config.decimal);
            out.push_str(fraction);
        }
        out
    }
}

// =============================================================================
// Text Encoding
// =============================================================================

/// Converts text into whatever the page backend can render.
///
/// Layout treats the output as opaque and hands it straight to the surface.
pub trait TextEncoder {
    fn encode(&self, text: &str) -> String;
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughEncoder;

impl TextEncoder for PassthroughEncoder {
    fn encode(&self, text: &str) -> String {
        text.to_string()
    }
}
