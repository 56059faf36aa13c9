//! Text encoding for the four scalar kinds a column can hold.
//!
//! | Kind | Encoded | Accepted on parse |
//! |------|---------|-------------------|
//! | integer | `-42` | optional `-`, digits, must fit in `i32` |
//! | boolean | `yes` / `no` | `yes`, `no`, `true`, `false` (any case) |
//! | string | `"text"` | leading and trailing `"`, no escapes |
//! | integer sequence | `[1,2,3]` | brackets, comma-separated integers, `[]` |
//!
//! Parsing never panics: malformed input yields `None`. Encoding is total.

use std::fmt;

use serde::Serialize;

use crate::segment::StringSegment;

/// The closed set of value kinds a column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Integer,
    Boolean,
    Text,
    IntSequence,
}

impl ScalarKind {
    /// Human-readable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Text => "string",
            Self::IntSequence => "integer sequence",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for bool {}
    impl Sealed for String {}
    impl Sealed for Vec<i32> {}
}

/// A value type the codec knows how to encode and parse.
///
/// Implemented for `i32`, `bool`, `String` and `Vec<i32>` only.
pub trait Scalar: sealed::Sealed + Clone + PartialEq + Default + 'static {
    /// The kind tag for this type.
    const KIND: ScalarKind;

    /// Encode to the fixture text form.
    fn encode(&self) -> String;

    /// Parse from a fixture token.
    fn parse(segment: StringSegment<'_>) -> Option<Self>;
}

impl Scalar for i32 {
    const KIND: ScalarKind = ScalarKind::Integer;

    fn encode(&self) -> String {
        encode_int(*self)
    }

    fn parse(segment: StringSegment<'_>) -> Option<Self> {
        parse_int(segment)
    }
}

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn encode(&self) -> String {
        encode_bool(*self).to_string()
    }

    fn parse(segment: StringSegment<'_>) -> Option<Self> {
        parse_bool(segment)
    }
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn encode(&self) -> String {
        encode_text(self)
    }

    fn parse(segment: StringSegment<'_>) -> Option<Self> {
        parse_text(segment)
    }
}

impl Scalar for Vec<i32> {
    const KIND: ScalarKind = ScalarKind::IntSequence;

    fn encode(&self) -> String {
        encode_int_sequence(self)
    }

    fn parse(segment: StringSegment<'_>) -> Option<Self> {
        parse_int_sequence(segment)
    }
}

const POS_OVERFLOW_GUARD: i32 = i32::MAX / 10;
const POS_LAST_DIGIT_GUARD: i32 = i32::MAX % 10;
const NEG_OVERFLOW_GUARD: i32 = i32::MIN / 10;
const NEG_LAST_DIGIT_GUARD: i32 = i32::MIN % 10;

/// Encode an integer as decimal digits.
pub fn encode_int(value: i32) -> String {
    let mut out = String::with_capacity(11);
    push_int(&mut out, value);
    out
}

fn push_int(out: &mut String, value: i32) {
    use std::fmt::Write;
    // Writing to a String cannot fail.
    let _ = write!(out, "{value}");
}

/// Parse a signed 32-bit integer, rejecting overflow instead of wrapping.
pub fn parse_int(mut segment: StringSegment<'_>) -> Option<i32> {
    segment.trim();
    if segment.is_empty() {
        return None;
    }

    let sign = if segment.first_char() == Some('-') {
        segment.remove_prefix(1);
        if segment.is_empty() {
            return None;
        }
        -1
    } else {
        1
    };

    let mut result: i32 = 0;
    while let Some(c) = segment.read_left() {
        let digit = c.to_digit(10)? as i32 * sign;

        if result > POS_OVERFLOW_GUARD
            || result < NEG_OVERFLOW_GUARD
            || (result == POS_OVERFLOW_GUARD && digit > POS_LAST_DIGIT_GUARD)
            || (result == NEG_OVERFLOW_GUARD && digit < NEG_LAST_DIGIT_GUARD)
        {
            return None;
        }
        result = result * 10 + digit;
    }
    Some(result)
}

/// Encode a boolean as `yes`/`no`.
pub const fn encode_bool(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Parse `yes`/`no`/`true`/`false` in any case.
pub fn parse_bool(mut segment: StringSegment<'_>) -> Option<bool> {
    segment.trim();
    if segment.matches("true", false) || segment.matches("yes", false) {
        Some(true)
    } else if segment.matches("false", false) || segment.matches("no", false) {
        Some(false)
    } else {
        None
    }
}

/// Wrap text in double quotes. Embedded quotes are not escaped.
pub fn encode_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    out.push_str(value);
    out.push('"');
    out
}

/// Parse a double-quoted string, stripping the quotes.
pub fn parse_text(mut segment: StringSegment<'_>) -> Option<String> {
    segment.trim();
    if segment.len() < 2 {
        return None;
    }
    if segment.first_char() != Some('"') || segment.last_char() != Some('"') {
        return None;
    }
    segment.remove_prefix(1);
    segment.remove_suffix(1);
    Some(segment.as_str().to_string())
}

/// Encode an integer sequence as `[v1,v2,...]`.
pub fn encode_int_sequence(values: &[i32]) -> String {
    let mut out = String::with_capacity(values.len() * 4 + 2);
    out.push('[');
    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        push_int(&mut out, *value);
    }
    out.push(']');
    out
}

/// Parse a bracketed, comma-separated integer sequence.
pub fn parse_int_sequence(mut segment: StringSegment<'_>) -> Option<Vec<i32>> {
    segment.trim();
    if segment.read_left()? != '[' || segment.read_right()? != ']' {
        return None;
    }

    segment.trim();
    if segment.is_empty() {
        return Some(Vec::new());
    }

    let mut values = Vec::with_capacity(segment.count_chars(',') + 1);
    while let Some(token) = segment.split(',') {
        values.push(parse_int(token)?);
    }
    Some(values)
}
