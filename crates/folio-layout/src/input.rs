//! # Line-Item Input
//!
//! Reads a JSON array of raw line items and prepares every one of them.
//! Malformed JSON surfaces as [`LayoutError::Json`](crate::LayoutError::Json),
//! an item that cannot be prepared as
//! [`LayoutError::Core`](crate::LayoutError::Core) carrying its index.

use std::path::Path;

use folio_core::{prepare_all, PreparedLineItem, RawLineItem};
use tracing::info;

use crate::error::LayoutResult;

/// Parses and prepares a JSON array of line items.
pub fn parse_items(json: &str) -> LayoutResult<Vec<PreparedLineItem>> {
    let raw: Vec<RawLineItem> = serde_json::from_str(json)?;
    Ok(prepare_all(&raw)?)
}

/// Reads `path` and prepares its line items.
pub fn read_items(path: &Path) -> LayoutResult<Vec<PreparedLineItem>> {
    let contents = std::fs::read_to_string(path)?;
    let items = parse_items(&contents)?;
    info!(?path, count = items.len(), "Loaded line items");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use folio_core::{CoreError, Decimal, Field};

    #[test]
    fn test_parse_items() {
        let items = parse_items(
            r#"[
                { "name": "Widget", "unit_cost": "10.00", "quantity": "3" },
                { "name": "Consulting", "unit_cost": "50", "quantity": "2",
                  "discount": { "percent": "15" }, "tax": { "percent": "20" } }
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].grand_total().to_string(), "30.00");
        assert_eq!(items[1].tax_amount(), Decimal::from(17));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_items(r#"[{ "name": "Widget" "#).unwrap_err();
        assert!(matches!(err, LayoutError::Json(_)));
    }

    #[test]
    fn test_bad_item_reports_index() {
        let err = parse_items(
            r#"[
                { "name": "Widget", "unit_cost": "10", "quantity": "1" },
                { "name": "Gadget", "unit_cost": "10", "quantity": "abc" }
            ]"#,
        )
        .unwrap_err();

        match err {
            LayoutError::Core(CoreError::Item { index, source }) => {
                assert_eq!(index, 1);
                assert!(matches!(
                    *source,
                    CoreError::Parse {
                        field: Field::Quantity,
                        ..
                    }
                ));
            }
            other => panic!("expected item error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = read_items(Path::new("/nonexistent/folio/items.json")).unwrap_err();
        assert!(matches!(err, LayoutError::Io(_)));
    }
}
