//! Raw input tokens.
//!
//! Every element of the request array is kept as the JSON value it arrived
//! as and turned into text by [`stringify`] before classification.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Magnitudes at or above this print in exponent form.
const EXPONENT_UPPER_LIMIT: f64 = 1e21;

/// Non-zero magnitudes below this print in exponent form.
const EXPONENT_LOWER_LIMIT: f64 = 1e-6;

// =============================================================================
// RawToken
// =============================================================================

/// One element of the input array, of unknown type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawToken(Value);

impl RawToken {
    /// Wraps a JSON value.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the wrapped JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Returns the string form used for classification.
    #[must_use]
    pub fn to_token_string(&self) -> String {
        stringify(&self.0)
    }
}

impl From<Value> for RawToken {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for RawToken {
    fn from(text: &str) -> Self {
        Self(Value::String(text.to_string()))
    }
}

impl From<String> for RawToken {
    fn from(text: String) -> Self {
        Self(Value::String(text))
    }
}

impl From<i64> for RawToken {
    fn from(number: i64) -> Self {
        Self(Value::from(number))
    }
}

// =============================================================================
// Stringify
// =============================================================================

/// Converts any JSON value into the text the classifier sees.
///
/// - strings are returned unchanged
/// - numbers use their shortest round-trip form, integral floats without `.0`;
///   magnitudes from `1e21` up and below `1e-6` use exponent form (`1e+21`,
///   `1e-7`)
/// - `true`, `false` and `null` become their literal names
/// - arrays and objects become compact JSON text
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => stringify_number(number),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn stringify_number(number: &Number) -> String {
    if let Some(integer) = number.as_i64() {
        return integer.to_string();
    }
    if let Some(integer) = number.as_u64() {
        return integer.to_string();
    }
    number.as_f64().map_or_else(|| number.to_string(), stringify_float)
}

fn stringify_float(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(EXPONENT_LOWER_LIMIT..EXPONENT_UPPER_LIMIT).contains(&magnitude) {
        return exponent_form(value);
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    value.to_string()
}

/// Shortest mantissa with an explicitly signed exponent: `1.5e+300`, `1e-7`.
fn exponent_form(value: f64) -> String {
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("abc"), "abc")]
    #[case(json!(""), "")]
    #[case(json!(" 12 "), " 12 ")]
    #[case(json!(45), "45")]
    #[case(json!(-5), "-5")]
    #[case(json!(u64::MAX), "18446744073709551615")]
    #[case(json!(3.0), "3")]
    #[case(json!(-0.0), "0")]
    #[case(json!(3.7), "3.7")]
    #[case(json!(true), "true")]
    #[case(json!(false), "false")]
    #[case(json!(null), "null")]
    #[case(json!([1, "a"]), "[1,\"a\"]")]
    #[case(json!({"k": 1}), "{\"k\":1}")]
    fn test_stringify(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(stringify(&value), expected);
    }

    #[rstest]
    #[case(json!(1e20), "100000000000000000000")]
    #[case(json!(0.000_001), "0.000001")]
    #[case(json!(123.456), "123.456")]
    fn test_float_inside_plain_range(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(stringify(&value), expected);
    }

    #[rstest]
    #[case(json!(1e21), "1e+21")]
    #[case(json!(1e-7), "1e-7")]
    #[case(json!(1.5e300), "1.5e+300")]
    #[case(json!(-2.5e-8), "-2.5e-8")]
    fn test_float_outside_plain_range_uses_exponent_form(
        #[case] value: Value,
        #[case] expected: &str,
    ) {
        assert_eq!(stringify(&value), expected);
    }

    #[rstest]
    fn test_raw_token_deserializes_transparently() {
        let tokens: Vec<RawToken> = serde_json::from_value(json!(["a", 1, null])).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].to_token_string(), "a");
        assert_eq!(tokens[1].to_token_string(), "1");
        assert_eq!(tokens[2].as_value(), &Value::Null);
    }

    #[rstest]
    fn test_raw_token_from_conversions() {
        assert_eq!(RawToken::from("x").to_token_string(), "x");
        assert_eq!(RawToken::from(String::from("y")).to_token_string(), "y");
        assert_eq!(RawToken::from(-7_i64).to_token_string(), "-7");
        assert_eq!(RawToken::new(json!(2.5)).to_token_string(), "2.5");
    }
}
