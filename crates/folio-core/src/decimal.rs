//! # Decimal Parsing
//!
//! Converts the string-encoded numeric fields of a line item into exact
//! [`Decimal`] values.
//!
//! ## Accepted Grammar
//! ```text
//! numeral  = [ "+" | "-" ] digits [ "." [ digits ] ]
//!          | [ "+" | "-" ] "." digits
//! digits   = "0".."9" { "0".."9" }
//! ```
//!
//! No whitespace, thousands separators, currency symbols, exponents or
//! underscores. The scale of the input is preserved: `"10.00"` parses to a
//! decimal that prints as `"10.00"`, not `"10"`.
//!
//! ## Why Not `Decimal::from_str`?
//! `from_str` accepts underscores and silently rounds inputs with more than
//! 28 fractional digits. A line item must fail instead of being rounded.

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, Field, ParseError};

/// Parses a decimal numeral without any rounding.
///
/// ## Example
/// ```rust
/// use folio_core::decimal::parse_decimal;
///
/// assert_eq!(parse_decimal("10.00").unwrap().to_string(), "10.00");
/// assert_eq!(parse_decimal("-.5").unwrap().to_string(), "-0.5");
/// assert!(parse_decimal("1.2.3").is_err());
/// assert!(parse_decimal("").is_err());
/// ```
pub fn parse_decimal(input: &str) -> Result<Decimal, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut negative = false;
    let mut seen_point = false;
    let mut digits = 0usize;
    let mut scale = 0u32;
    let mut mantissa: i128 = 0;
    let mut overflowed = false;

    for (position, ch) in input.chars().enumerate() {
        match ch {
            '+' | '-' if position == 0 => negative = ch == '-',
            '.' => {
                if seen_point {
                    return Err(ParseError::MultipleDecimalPoints);
                }
                seen_point = true;
            }
            '0'..='9' => {
                digits += 1;
                if seen_point {
                    scale = scale.saturating_add(1);
                }
                let digit = i128::from(ch as u8 - b'0');
                match mantissa.checked_mul(10).and_then(|m| m.checked_add(digit)) {
                    Some(next) => mantissa = next,
                    None => overflowed = true,
                }
            }
            _ => return Err(ParseError::InvalidCharacter { ch, position }),
        }
    }

    if digits == 0 {
        return Err(ParseError::NoDigits);
    }

    let out_of_range = || ParseError::OutOfRange {
        input: input.to_string(),
    };
    if overflowed {
        return Err(out_of_range());
    }

    let signed = if negative { -mantissa } else { mantissa };
    Decimal::try_from_i128_with_scale(signed, scale).map_err(|_| out_of_range())
}

/// Parses a numeric line-item field, tagging failures with the field.
pub fn parse_field(field: Field, input: &str) -> CoreResult<Decimal> {
    parse_decimal(input).map_err(|source| CoreError::Parse { field, source })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_parses_plain_numerals() {
        assert_eq!(parse_decimal("12").unwrap(), dec!(12));
        assert_eq!(parse_decimal("-3.5").unwrap(), dec!(-3.5));
        assert_eq!(parse_decimal("+0.25").unwrap(), dec!(0.25));
        assert_eq!(parse_decimal(".5").unwrap(), dec!(0.5));
        assert_eq!(parse_decimal("5.").unwrap(), dec!(5));
    }

    #[test]
    fn test_keeps_input_scale() {
        let value = parse_decimal("10.00").unwrap();
        assert_eq!(value.scale(), 2);
        assert_eq!(value.to_string(), "10.00");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(parse_decimal(""), Err(ParseError::Empty));
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert_eq!(
            parse_decimal("abc"),
            Err(ParseError::InvalidCharacter { ch: 'a', position: 0 })
        );
        assert_eq!(
            parse_decimal("1,50"),
            Err(ParseError::InvalidCharacter { ch: ',', position: 1 })
        );
        assert_eq!(
            parse_decimal("€10"),
            Err(ParseError::InvalidCharacter { ch: '€', position: 0 })
        );
        assert!(parse_decimal(" 10").is_err());
        assert!(parse_decimal("1e3").is_err());
        assert!(parse_decimal("1_000").is_err());
        assert!(parse_decimal("1-").is_err());
    }

    #[test]
    fn test_rejects_multiple_points() {
        assert_eq!(parse_decimal("1.2.3"), Err(ParseError::MultipleDecimalPoints));
    }

    #[test]
    fn test_rejects_sign_without_digits() {
        assert_eq!(parse_decimal("-"), Err(ParseError::NoDigits));
        assert_eq!(parse_decimal("."), Err(ParseError::NoDigits));
        assert_eq!(parse_decimal("+."), Err(ParseError::NoDigits));
    }

    #[test]
    fn test_rejects_unrepresentable_values() {
        // 29 fractional digits: more than the decimal type can hold exactly
        let too_fine = format!("0.{}", "1".repeat(29));
        assert!(matches!(
            parse_decimal(&too_fine),
            Err(ParseError::OutOfRange { .. })
        ));

        let too_large = "9".repeat(40);
        assert!(matches!(
            parse_decimal(&too_large),
            Err(ParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_field_tags_the_field() {
        let err = parse_field(Field::Quantity, "abc").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Parse {
                field: Field::Quantity,
                source: ParseError::InvalidCharacter { .. }
            }
        ));
    }

    proptest! {
        #[test]
        fn prop_canonical_numerals_round_trip(s in "-?[1-9][0-9]{0,12}(\\.[0-9]{1,10})?") {
            let parsed = parse_decimal(&s).unwrap();
            prop_assert_eq!(parsed.to_string(), s);
        }

        #[test]
        fn prop_agrees_with_from_str(s in "[+-]?[0-9]{1,15}(\\.[0-9]{1,12})?") {
            let ours = parse_decimal(&s).unwrap();
            let theirs = Decimal::from_str(s.trim_start_matches('+')).unwrap();
            prop_assert_eq!(ours, theirs);
        }
    }
}
