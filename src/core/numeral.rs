//! # Numerals
//!
//! Parsing and rendering of the value line. The keypad only ever produces
//! digits, one `.`, and a leading `-`. Fragments such as a lone `-` left behind
//! by backspace fail with `ParseError`, which callers treat as a silent no-op.

use std::fmt;

/// The display string could not be read as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a number: {:?}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Parse a display numeral. Trailing `.` is accepted (`"5."` is 5).
///
/// `"NaN"` is rejected: it is what the value line shows after an undefined
/// result, and there is nothing meaningful to submit. `"Infinity"` still
/// parses.
pub fn parse_numeral(text: &str) -> Result<f64, ParseError> {
    let trimmed = text.trim();
    // f64::from_str rejects a bare sign or dot but accepts "5." and ".5"
    match trimmed.parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(ParseError(text.to_string())),
    }
}

/// Render a number for the value line.
///
/// Integral values drop the fractional part, negative zero becomes `0`, and
/// non-finite values get the names a browser would show.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
