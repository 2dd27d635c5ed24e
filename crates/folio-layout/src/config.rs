//! # Layout Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FOLIO_CURRENCY_SYMBOL="$"                                          │
//! │     FOLIO_LINE_HEIGHT=4                                                │
//! │                                                                         │
//! │  2. TOML Config File (--config layout.toml)                            │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     A4 portrait table, Helvetica 8pt, "€ " with two digits             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # layout.toml
//! [columns]
//! name = 10
//! unit_price = 80
//! quantity = 110
//! tax = 130
//! total = 160
//! right_edge = 200
//!
//! [text]
//! font = "Helvetica"
//! base_font_size = 8
//! small_font_size = 7
//! line_height = 3
//! description_gap = 1
//! base_color = [35, 35, 35]
//! grey_color = [82, 82, 82]
//!
//! [currency]
//! symbol = "€ "
//! precision = 2
//! decimal = "."
//! thousand = " "
//! ```
//!
//! Every section and key is optional.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{LayoutError, LayoutResult};
use crate::format::CurrencyConfig;
use crate::geometry::ColumnGeometry;
use crate::surface::{Rgb, TextStyle};
use crate::text::UniformMetrics;

/// Largest number of fractional digits a decimal can carry.
const MAX_PRECISION: u32 = 28;

// =============================================================================
// Text Settings
// =============================================================================

/// Fonts, sizes and spacing for a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub font: String,

    /// Size of the name and the numeric cells.
    pub base_font_size: f64,

    /// Size of the de-emphasized description.
    pub small_font_size: f64,

    /// Height of one wrapped line.
    pub line_height: f64,

    /// Space between the name block and the description.
    pub description_gap: f64,

    pub base_color: Rgb,
    pub grey_color: Rgb,

    /// Advance of one character per point of font size.
    pub char_width_per_point: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        TextConfig {
            font: "Helvetica".to_string(),
            base_font_size: 8.0,
            small_font_size: 7.0,
            line_height: 3.0,
            description_gap: 1.0,
            base_color: Rgb(35, 35, 35),
            grey_color: Rgb(82, 82, 82),
            char_width_per_point: UniformMetrics::default().char_width_per_point,
        }
    }
}

impl TextConfig {
    /// Style of the name and numeric cells.
    pub fn base_style(&self) -> TextStyle {
        TextStyle {
            font: self.font.clone(),
            font_size: self.base_font_size,
            color: self.base_color,
        }
    }

    /// Style of the description.
    pub fn description_style(&self) -> TextStyle {
        TextStyle {
            font: self.font.clone(),
            font_size: self.small_font_size,
            color: self.grey_color,
        }
    }

    pub fn metrics(&self) -> UniformMetrics {
        UniformMetrics::new(self.char_width_per_point)
    }
}

// =============================================================================
// Layout Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub columns: ColumnGeometry,
    pub text: TextConfig,
    pub currency: CurrencyConfig,
}

impl LayoutConfig {
    /// Loads configuration from file and environment.
    ///
    /// Without a path, or when the file does not exist, defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> LayoutResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading layout config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                warn!(?path, "Layout config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses and validates a TOML document. Environment is not consulted.
    pub fn from_toml_str(contents: &str) -> LayoutResult<Self> {
        let config: LayoutConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LayoutResult<()> {
        self.columns.validate()?;

        let text = &self.text;
        for (label, value) in [
            ("line_height", text.line_height),
            ("base_font_size", text.base_font_size),
            ("small_font_size", text.small_font_size),
            ("char_width_per_point", text.char_width_per_point),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::InvalidConfig(format!(
                    "{} must be greater than 0, got {}",
                    label, value
                )));
            }
        }

        if !(text.description_gap.is_finite() && text.description_gap >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "description_gap must not be negative, got {}",
                text.description_gap
            )));
        }

        if self.currency.precision > MAX_PRECISION {
            return Err(LayoutError::InvalidConfig(format!(
                "currency precision must be at most {}, got {}",
                MAX_PRECISION, self.currency.precision
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`, skipping values that do not parse.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(symbol) = lookup("FOLIO_CURRENCY_SYMBOL") {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.currency.symbol = symbol;
        }

        if let Some(precision) = lookup("FOLIO_CURRENCY_PRECISION") {
            match precision.parse::<u32>() {
                Ok(p) => self.currency.precision = p,
                Err(_) => warn!(value = %precision, "Ignoring invalid FOLIO_CURRENCY_PRECISION"),
            }
        }

        if let Some(font) = lookup("FOLIO_FONT") {
            self.text.font = font;
        }

        if let Some(height) = lookup("FOLIO_LINE_HEIGHT") {
            match height.parse::<f64>() {
                Ok(h) => {
                    debug!(line_height = h, "Overriding line height from environment");
                    self.text.line_height = h;
                }
                Err(_) => warn!(value = %height, "Ignoring invalid FOLIO_LINE_HEIGHT"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.text.line_height, 3.0);
        assert_eq!(config.currency.symbol, "€ ");
        assert_eq!(config.columns.total, 160.0);
    }

    #[test]
    fn test_partial_toml() {
        let config = LayoutConfig::from_toml_str(
            r#"
            [text]
            line_height = 4.5

            [currency]
            symbol = "$"
            thousand = ","
            "#,
        )
        .unwrap();

        assert_eq!(config.text.line_height, 4.5);
        assert_eq!(config.text.font, "Helvetica");
        assert_eq!(config.currency.symbol, "$");
        assert_eq!(config.currency.thousand, ",");
        assert_eq!(config.currency.precision, 2);
        assert_eq!(config.columns, ColumnGeometry::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = LayoutConfig::from_toml_str("").unwrap();
        assert_eq!(config, LayoutConfig::default());
    }

    #[test]
    fn test_colors_parse_from_arrays() {
        let config = LayoutConfig::from_toml_str("[text]\ngrey_color = [100, 100, 100]").unwrap();
        assert_eq!(config.text.grey_color, Rgb(100, 100, 100));
        assert_eq!(config.text.description_style().color, Rgb(100, 100, 100));
        assert_eq!(config.text.description_style().font_size, 7.0);
    }

    #[test]
    fn test_rejects_bad_columns() {
        let err = LayoutConfig::from_toml_str("[columns]\ntotal = 100").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidGeometry(_)));
    }

    #[test]
    fn test_rejects_bad_text_settings() {
        let err = LayoutConfig::from_toml_str("[text]\nline_height = 0").unwrap_err();
        assert!(err.to_string().contains("line_height must be greater than 0"));

        let err = LayoutConfig::from_toml_str("[text]\ndescription_gap = -1").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_excess_precision() {
        let err = LayoutConfig::from_toml_str("[currency]\nprecision = 29").unwrap_err();
        assert!(err.to_string().contains("at most 28"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = LayoutConfig::from_toml_str("[text\nfont = 1").unwrap_err();
        assert!(matches!(err, LayoutError::Toml(_)));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("FOLIO_CURRENCY_SYMBOL", "CHF "),
            ("FOLIO_CURRENCY_PRECISION", "3"),
            ("FOLIO_FONT", "Courier"),
            ("FOLIO_LINE_HEIGHT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = LayoutConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.currency.symbol, "CHF ");
        assert_eq!(config.currency.precision, 3);
        assert_eq!(config.text.font, "Courier");
        assert_eq!(config.text.line_height, 3.0);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = LayoutConfig::load(Some(PathBuf::from("/nonexistent/folio/layout.toml")));
        assert!(config.is_ok());
    }
}
