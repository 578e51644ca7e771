//! Conversion of raw ledger entries into amounts.
//!
//! Entries arrive as arbitrary JSON values. They are converted with the usual
//! loose "to number" rules (`"12.5"` is 12.5, `true` is 1, `null` is 0, `[7]`
//! is 7, objects are NaN) and only finite, strictly positive results count as
//! amounts.

use serde_json::Value;

/// Returns the entry as an amount when it converts to a finite number above zero.
pub fn coerce_amount(entry: &Value) -> Option<f64> {
    Some(coerce_number(entry)).filter(|value| value.is_finite() && *value > 0.0)
}

/// Loose numeric conversion of a raw value; NaN when no number can be read.
pub fn coerce_number(entry: &Value) -> f64 {
    match entry {
        Value::Null => 0.0,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => parse_number(text),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [single] => coerce_joined(single),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

// A one-element list converts through its element's string form, under which
// `null` is empty (0) and booleans are words (NaN).
fn coerce_joined(item: &Value) -> f64 {
    match item {
        Value::Null => 0.0,
        Value::Bool(_) | Value::Object(_) => f64::NAN,
        other => coerce_number(other),
    }
}

/// Parses trimmed text as a number: empty is 0, decimal literals with optional
/// sign and exponent, unsigned `0x`/`0o`/`0b` integers and `Infinity`.
/// Anything else is NaN.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&trimmed[2..], radix);
    }

    // `str::parse::<f64>` also accepts "inf", "nan" and friends.
    let is_decimal = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'));
    if !is_decimal {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, ch| {
            ch.to_digit(radix)
                .map(|digit| acc * f64::from(radix) + f64::from(digit))
        })
        .unwrap_or(f64::NAN)
}
