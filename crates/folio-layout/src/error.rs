//! # Layout Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Layout Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Input       │  │      Core               │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidGeometry│  │  Io             │  │  CoreError (prepare)    │ │
//! │  │  InvalidConfig  │  │  Json / Toml    │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Laying out an already-prepared item never fails. Everything that can go
//! wrong is caught when the configuration or the engine is built.

use folio_core::CoreError;
use thiserror::Error;

/// Result type alias for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

#[derive(Debug, Error)]
pub enum LayoutError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Column bands are out of order or have no width.
    #[error("Invalid column geometry: {0}")]
    InvalidGeometry(String),

    /// Any other rejected configuration value.
    #[error("Invalid layout configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Core Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LayoutError::InvalidGeometry("quantity must start after unit_price".into());
        assert_eq!(
            err.to_string(),
            "Invalid column geometry: quantity must start after unit_price"
        );
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: LayoutError = CoreError::NotPrepared.into();
        assert_eq!(err.to_string(), "line item has not been prepared");
    }
}
