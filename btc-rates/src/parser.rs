//! Multi-schema quote parser.
//!
//! Upstream price APIs disagree on response shape. Recognizers run in a fixed
//! priority order and the first one that yields a decimal wins:
//!
//! 1. `{ "rate": 12345.67 }` (coinapi style)
//! 2. `{ "symbols": [ { "last": "70446.94" } ] }` (freecryptoapi style)
//! 3. `{ "bitcoin": { "usd": 12345.67 } }` (CoinGecko simple price)
//! 4. first top-level property named `price`, `last_price`, `last` or
//!    `price_usd`, in document order
//!
//! A field that is present but not a decimal does not fail the document; the
//! parser just moves on to the next recognizer.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

/// Property names accepted by the fallback scan.
const FALLBACK_FIELDS: [&str; 4] = ["price", "last_price", "last", "price_usd"];

/// Why a response body did not produce a rate.
#[derive(Debug, thiserror::Error)]
pub enum RateParseError {
    #[error("response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("no recognized rate field in response")]
    UnrecognizedSchema,
}

/// Parses a raw response body into a rate.
pub fn parse_rate_bytes(body: &[u8]) -> Result<Decimal, RateParseError> {
    let doc: Value = serde_json::from_slice(body)?;
    parse_rate(&doc).ok_or(RateParseError::UnrecognizedSchema)
}

/// Extracts a rate from a parsed document, `None` if no schema matches.
pub fn parse_rate(doc: &Value) -> Option<Decimal> {
    let root = doc.as_object()?;

    if let Some(rate) = root.get("rate").and_then(decimal_from_json) {
        return Some(rate);
    }

    if let Some(last) = root
        .get("symbols")
        .and_then(Value::as_array)
        .and_then(|symbols| symbols.first())
        .and_then(|first| first.get("last"))
        .and_then(decimal_from_json)
    {
        return Some(last);
    }

    if let Some(usd) = root
        .get("bitcoin")
        .filter(|b| b.is_object())
        .and_then(|b| b.get("usd"))
        .and_then(decimal_from_json)
    {
        return Some(usd);
    }

    root.iter()
        .filter(|(name, _)| FALLBACK_FIELDS.contains(&name.as_str()))
        .find_map(|(_, value)| decimal_from_json(value))
}

/// Accepts a JSON number or a string holding a dot-decimal literal.
fn decimal_from_json(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal_literal(&n.to_string()),
        Value::String(s) => parse_decimal_literal(s.trim()),
        _ => None,
    }
}

fn parse_decimal_literal(s: &str) -> Option<Decimal> {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (mantissa, exponent) = match digits.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (digits, None),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let well_formed = !(int_part.is_empty() && frac_part.is_empty())
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit())
        && exponent.is_none_or(|e| {
            let e = e.strip_prefix(['-', '+']).unwrap_or(e);
            !e.is_empty() && e.bytes().all(|b| b.is_ascii_digit())
        });
    if !well_formed {
        return None;
    }

    match exponent {
        Some(_) => Decimal::from_scientific(s).ok(),
        None => Decimal::from_str(s).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_direct_rate_field() {
        assert_eq!(parse_rate(&json!({ "rate": 12345.67 })), Some(dec("12345.67")));
        assert_eq!(parse_rate(&json!({ "rate": "12345.67" })), Some(dec("12345.67")));
    }

    #[test]
    fn test_symbols_array_takes_first_element() {
        let doc = json!({
            "status": "success",
            "symbols": [
                { "symbol": "BTC", "last": "70446.94" },
                { "symbol": "ETH", "last": "3500.00" }
            ]
        });
        assert_eq!(parse_rate(&doc), Some(dec("70446.94")));
    }

    #[test]
    fn test_coingecko_nested_shape() {
        let doc = json!({ "bitcoin": { "usd": "65000.00" } });
        assert_eq!(parse_rate(&doc), Some(dec("65000.00")));
    }

    #[test]
    fn test_rate_field_beats_nested_shape() {
        let doc = json!({ "bitcoin": { "usd": 1 }, "rate": 2 });
        assert_eq!(parse_rate(&doc), Some(dec("2")));
    }

    #[test]
    fn test_fallback_scan_uses_document_order() {
        let doc: Value = serde_json::from_str(r#"{"price_usd": "100.5", "last": "200"}"#).unwrap();
        assert_eq!(parse_rate(&doc), Some(dec("100.5")));

        let doc: Value = serde_json::from_str(r#"{"last": "200", "price_usd": "100.5"}"#).unwrap();
        assert_eq!(parse_rate(&doc), Some(dec("200")));
    }

    #[test]
    fn test_unparseable_field_falls_through_to_next_schema() {
        let doc = json!({ "rate": "n/a", "bitcoin": { "usd": 42 } });
        assert_eq!(parse_rate(&doc), Some(dec("42")));

        let doc = json!({ "symbols": [], "price": "7.5" });
        assert_eq!(parse_rate(&doc), Some(dec("7.5")));

        let doc = json!({ "price": "1,000.00", "last_price": "999.99" });
        assert_eq!(parse_rate(&doc), Some(dec("999.99")));
    }

    #[test]
    fn test_unrecognized_documents() {
        assert_eq!(parse_rate(&json!({ "usd": 1 })), None);
        assert_eq!(parse_rate(&json!([{ "rate": 1 }])), None);
        assert_eq!(parse_rate(&json!("65000")), None);
        assert_eq!(parse_rate(&json!({ "rate": null, "price": true })), None);
    }

    #[test]
    fn test_decimal_literal_rules() {
        assert_eq!(parse_decimal_literal("65000.00"), Some(dec("65000.00")));
        assert_eq!(parse_decimal_literal("-1"), Some(dec("-1")));
        assert_eq!(parse_decimal_literal("1e3"), Some(dec("1000")));
        assert_eq!(parse_decimal_literal("65000,00"), None);
        assert_eq!(parse_decimal_literal("$5"), None);
        assert_eq!(parse_decimal_literal(""), None);
        assert_eq!(parse_decimal_literal("."), None);
    }

    #[test]
    fn test_parse_bytes_errors() {
        assert!(matches!(
            parse_rate_bytes(b"<html>502</html>"),
            Err(RateParseError::Malformed(_))
        ));
        assert!(matches!(
            parse_rate_bytes(br#"{"error":"limit"}"#),
            Err(RateParseError::UnrecognizedSchema)
        ));
        assert_eq!(parse_rate_bytes(br#"{"rate":"1.5"}"#).unwrap(), dec("1.5"));
    }
}
