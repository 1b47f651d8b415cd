//! JSON field extraction with typed failures.
//!
//! Upstream APIs disagree on whether big integers arrive as JSON numbers or
//! decimal strings; [`u128_field`] accepts both and parses exactly, so
//! nano-unit stakes never round-trip through `f64`.

use serde_json::Value;

use crate::error::{AdapterError, Result};

/// A required sub-object or scalar.
pub fn field<'a>(value: &'a Value, name: &'static str) -> Result<&'a Value> {
    value.get(name).ok_or(AdapterError::MissingField(name))
}

/// A required string field.
pub fn str_field<'a>(value: &'a Value, name: &'static str) -> Result<&'a str> {
    field(value, name)?
        .as_str()
        .ok_or_else(|| malformed(value, name))
}

/// A required array field.
pub fn array_field<'a>(value: &'a Value, name: &'static str) -> Result<&'a Vec<Value>> {
    field(value, name)?
        .as_array()
        .ok_or_else(|| malformed(value, name))
}

/// A required unsigned integer, from a JSON number or a decimal string.
pub fn u64_field(value: &Value, name: &'static str) -> Result<u64> {
    let v = field(value, name)?;
    match v {
        Value::Number(n) => n.as_u64().ok_or_else(|| malformed(v, name)),
        Value::String(s) => s.parse().map_err(|_| malformed(v, name)),
        _ => Err(malformed(v, name)),
    }
}

/// A required big unsigned integer, from a JSON number or a decimal string.
///
/// Parses into `u128` without any float intermediate: values like
/// `"248976452104328745"` (nano-units) exceed the 2^53 mantissa and must
/// not lose low digits before concentration math runs.
pub fn u128_field(value: &Value, name: &'static str) -> Result<u128> {
    let v = field(value, name)?;
    match v {
        Value::Number(n) => n
            .as_u64()
            .map(u128::from)
            .ok_or_else(|| malformed(v, name)),
        Value::String(s) => s.parse().map_err(|_| malformed(v, name)),
        _ => Err(malformed(v, name)),
    }
}

/// Convert an exact integer amount in `10^exponent` sub-units to whole
/// tokens. Integer division first, fractional remainder second - the only
/// float loss is in the displayed fraction, never in the magnitude.
pub fn subunits_to_whole(amount: u128, exponent: u32) -> f64 {
    let divisor = 10u128.pow(exponent);
    (amount / divisor) as f64 + (amount % divisor) as f64 / divisor as f64
}

fn malformed(value: &Value, field: &'static str) -> AdapterError {
    AdapterError::Malformed {
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn u128_parses_string_beyond_f64_precision() {
        // 2^64 + 1: unrepresentable in u64 and would round in f64.
        let v = json!({"tokens": "18446744073709551617"});
        assert_eq!(u128_field(&v, "tokens").unwrap(), 18_446_744_073_709_551_617);
    }

    #[test]
    fn u128_accepts_plain_numbers() {
        let v = json!({"power": 4200});
        assert_eq!(u128_field(&v, "power").unwrap(), 4200);
    }

    #[test]
    fn missing_and_malformed_are_distinct() {
        let v = json!({"tokens": "12.5"});
        assert!(matches!(
            u128_field(&v, "tokens"),
            Err(AdapterError::Malformed { field: "tokens", .. })
        ));
        assert!(matches!(
            u128_field(&v, "absent"),
            Err(AdapterError::MissingField("absent"))
        ));
    }

    #[test]
    fn subunit_conversion_is_exact_in_the_integer_part() {
        // 1_234_567.890123 tokens at 6 decimals.
        assert_eq!(subunits_to_whole(1_234_567_890_123, 6), 1_234_567.890_123);
        // A stake too big for f64 to hold in sub-units keeps its whole part.
        let huge = 987_654_321_987_654_321_987u128;
        let whole = subunits_to_whole(huge, 9);
        assert_eq!(whole.trunc(), 987_654_321_987.0);
    }
}
