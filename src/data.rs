//! Typed field values and the per-field classification ladder.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Calendar date as written in the source text.
///
/// Range checks are shape-level only: day 31 is accepted for every month, so
/// this is deliberately not a validated calendar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeValue {
    pub date: DateValue,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}:{:02}",
            self.date, self.hour, self.minute, self.second
        )
    }
}

/// Decoded representation of one field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Null,
    Integer(i128),
    Float(f64),
    Date(DateValue),
    DateTime(DateTimeValue),
    String(String),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Value::Date(d) => d.to_string(),
            Value::DateTime(dt) => dt.to_string(),
            Value::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Raw classification of a single field before column unification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Null,
    Integer,
    Float,
    Date,
    DateTime,
    String,
}

/// Classifies one field and decodes it into its native value.
///
/// The ladder runs in order: empty text is null; text opening with a digit
/// or sign tries integer then float; a 10-character `YYYY-MM-DD` shape is a
/// date; `YYYY-MM-DD[ T]HH:MM:SS` with any trailing bytes ignored is a
/// datetime; everything else (including range-check failures) is a string.
/// With `force_string` set, non-empty text is tagged string verbatim and
/// empty text still classifies as null.
pub fn classify_field(text: &str, force_string: bool) -> (FieldKind, Value) {
    if text.is_empty() {
        return (FieldKind::Null, Value::Null);
    }
    if force_string {
        return (FieldKind::String, Value::String(text.to_string()));
    }

    let first = text.as_bytes()[0];
    if first.is_ascii_digit() || first == b'+' || first == b'-' {
        if let Ok(parsed) = text.parse::<i128>() {
            return (FieldKind::Integer, Value::Integer(parsed));
        }
        if let Ok(parsed) = text.parse::<f64>() {
            return (FieldKind::Float, Value::Float(parsed));
        }
    }

    if let Some(date) = parse_date_literal(text) {
        return (FieldKind::Date, Value::Date(date));
    }
    if let Some(datetime) = parse_datetime_literal(text) {
        return (FieldKind::DateTime, Value::DateTime(datetime));
    }

    (FieldKind::String, Value::String(text.to_string()))
}

pub fn parse_date_literal(text: &str) -> Option<DateValue> {
    let bytes = text.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    date_from_bytes(bytes)
}

pub fn parse_datetime_literal(text: &str) -> Option<DateTimeValue> {
    let bytes = text.as_bytes();
    if bytes.len() < 19 {
        return None;
    }
    let date = date_from_bytes(&bytes[..10])?;
    if bytes[10] != b' ' && bytes[10] != b'T' {
        return None;
    }
    if bytes[13] != b':' || bytes[16] != b':' {
        return None;
    }
    let hour = two_digits(bytes, 11)?;
    let minute = two_digits(bytes, 14)?;
    let second = two_digits(bytes, 17)?;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    // Trailing bytes after the seconds field (offsets, fractional seconds)
    // do not affect classification.
    Some(DateTimeValue {
        date,
        hour,
        minute,
        second,
    })
}

fn date_from_bytes(bytes: &[u8]) -> Option<DateValue> {
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let mut year = 0u16;
    for &b in &bytes[..4] {
        if !b.is_ascii_digit() {
            return None;
        }
        year = year * 10 + u16::from(b - b'0');
    }
    let month = two_digits(bytes, 5)?;
    let day = two_digits(bytes, 8)?;
    if !(1000..=2500).contains(&year) || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(DateValue { year, month, day })
}

fn two_digits(bytes: &[u8], index: usize) -> Option<u8> {
    let high = bytes[index];
    let low = bytes[index + 1];
    if !high.is_ascii_digit() || !low.is_ascii_digit() {
        return None;
    }
    Some((high - b'0') * 10 + (low - b'0'))
}
