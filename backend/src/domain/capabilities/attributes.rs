//! Attribute access for records shaped by the capability pipeline.
//!
//! Records expose their fields by name through [`Attributes`], so the parsers
//! and the pipeline stay generic over any record type.

use std::cmp::Ordering;

use chrono::{DateTime, TimeZone, Utc};

/// A comparable attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
    Instant(DateTime<Utc>),
}

impl AttributeValue {
    /// Whether a query operand denotes exactly this value.
    ///
    /// An operand that cannot be read as this value's kind never matches.
    pub fn equals_operand(&self, operand: &str) -> bool {
        self.compare_operand(operand) == Some(Ordering::Equal)
    }

    /// Orders this value against a query operand, `None` when the operand is
    /// not readable as this value's kind.
    pub fn compare_operand(&self, operand: &str) -> Option<Ordering> {
        match self {
            AttributeValue::Number(value) => {
                let operand: f64 = operand.parse().ok()?;
                value.partial_cmp(&operand)
            }
            AttributeValue::Text(value) => Some(value.as_str().cmp(operand)),
            AttributeValue::Instant(value) => parse_instant(operand).map(|operand| value.cmp(&operand)),
        }
    }

    /// Total order used by sorting. Values of different kinds order by kind.
    pub fn total_cmp(&self, other: &AttributeValue) -> Ordering {
        match (self, other) {
            (AttributeValue::Number(a), AttributeValue::Number(b)) => a.total_cmp(b),
            (AttributeValue::Text(a), AttributeValue::Text(b)) => a.cmp(b),
            (AttributeValue::Instant(a), AttributeValue::Instant(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            AttributeValue::Number(_) => 0,
            AttributeValue::Text(_) => 1,
            AttributeValue::Instant(_) => 2,
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value as f64)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        AttributeValue::Instant(value)
    }
}

/// Reads an instant operand: integer Unix epoch seconds or RFC 3339.
pub fn parse_instant(operand: &str) -> Option<DateTime<Utc>> {
    if let Ok(seconds) = operand.parse::<i64>() {
        return Utc.timestamp_opt(seconds, 0).single();
    }
    DateTime::parse_from_rfc3339(operand)
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

/// Named, comparable fields of a record.
pub trait Attributes {
    /// Every attribute name a client may reference in `select`, `sort` or `filter`.
    const VOCABULARY: &'static [&'static str];

    /// Attribute the `interval` capability windows on, if the record has one.
    const TIME_ATTRIBUTE: Option<&'static str> = None;

    fn attribute(&self, name: &str) -> Option<AttributeValue>;

    fn point_in_time(&self) -> Option<DateTime<Utc>> {
        match Self::TIME_ATTRIBUTE.and_then(|name| self.attribute(name)) {
            Some(AttributeValue::Instant(instant)) => Some(instant),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_numerically() {
        let value = AttributeValue::Number(100.0);
        assert!(value.equals_operand("100"));
        assert!(value.equals_operand("100.00"));
        assert_eq!(value.compare_operand("99.5"), Some(Ordering::Greater));
        assert_eq!(value.compare_operand("1000"), Some(Ordering::Less));
        assert_eq!(value.compare_operand("abc"), None);
    }

    #[test]
    fn test_text_is_exact() {
        let value = AttributeValue::from("Savings");
        assert!(value.equals_operand("Savings"));
        assert!(!value.equals_operand("savings"));
    }

    #[test]
    fn test_instant_operands() {
        let instant = Utc.with_ymd_and_hms(2016, 10, 14, 0, 0, 0).unwrap();
        let value = AttributeValue::from(instant);
        assert!(value.equals_operand("1476403200"));
        assert!(value.equals_operand("2016-10-14T00:00:00Z"));
        assert_eq!(value.compare_operand("not-a-date"), None);
    }

    #[test]
    fn test_total_order_across_kinds() {
        let number = AttributeValue::Number(5.0);
        let text = AttributeValue::from("a");
        assert_eq!(number.total_cmp(&text), Ordering::Less);
        assert_eq!(text.total_cmp(&number), Ordering::Greater);
    }
}
