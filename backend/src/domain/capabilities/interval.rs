//! `interval` capability: temporal window on a record's time attribute.
//!
//! Bounds are `from`, `to` and `at` (an alias of `from`). Each operand is
//! `now`, a relative offset such as `-14d` (unsigned offsets lie in the past),
//! or an absolute Unix epoch in seconds. A lone `from` closes at `now`; a lone
//! `to` leaves the window open towards the past.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};

use super::clause::tokenize;
use super::error::{Capability, MalformedQuery, Reason, Result};

const DAY_UNIT: &str = "d";

/// One unresolved interval bound as written by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Now,
    /// Signed offset in days from `now`; negative lies in the past.
    Days(i64),
    /// Unix epoch seconds.
    Epoch(i64),
}

impl Bound {
    fn parse(operand: &str) -> std::result::Result<Bound, Reason> {
        if operand == "now" {
            return Ok(Bound::Now);
        }

        let (signed, negative, body) = match operand.as_bytes().first() {
            Some(b'-') => (true, true, &operand[1..]),
            Some(b'+') => (true, false, &operand[1..]),
            _ => (false, true, operand),
        };

        let unit_start = body
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_alphabetic())
            .last()
            .map_or(body.len(), |(index, _)| index);
        let (digits, unit) = body.split_at(unit_start);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(Reason::InvalidOffset);
        }
        let magnitude: i64 = digits.parse().map_err(|_| Reason::InvalidOffset)?;

        match unit {
            "" if signed => Err(Reason::MissingUnit),
            "" => Ok(Bound::Epoch(magnitude)),
            DAY_UNIT if negative => Ok(Bound::Days(-magnitude)),
            DAY_UNIT => Ok(Bound::Days(magnitude)),
            other => Err(Reason::UnknownUnit(other.to_string())),
        }
    }

    fn resolve(&self, now: DateTime<Utc>) -> std::result::Result<DateTime<Utc>, Reason> {
        match *self {
            Bound::Now => Ok(now),
            Bound::Days(days) => Duration::try_days(days)
                .and_then(|offset| now.checked_add_signed(offset))
                .ok_or(Reason::InstantOutOfRange),
            Bound::Epoch(seconds) => Utc
                .timestamp_opt(seconds, 0)
                .single()
                .ok_or(Reason::InstantOutOfRange),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Now => f.write_str("now"),
            Bound::Days(days) => write!(f, "{days:+}{DAY_UNIT}"),
            Bound::Epoch(seconds) => write!(f, "{seconds}"),
        }
    }
}

/// Resolved inclusive window. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemporalWindow {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TemporalWindow {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| instant >= from) && self.to.map_or(true, |to| instant <= to)
    }
}

/// Parsed `interval` value: the bounds as written plus the window they
/// resolve to against the request's `now`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Interval {
    from: Option<Bound>,
    to: Option<Bound>,
    window: TemporalWindow,
}

impl Interval {
    pub fn window(&self) -> &TemporalWindow {
        &self.window
    }

    pub fn is_unbounded(&self) -> bool {
        self.window.is_unbounded()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses = Vec::new();
        if let Some(from) = self.from {
            clauses.push(format!("from::{from}"));
        }
        if let Some(to) = self.to {
            clauses.push(format!("to::{to}"));
        }
        f.write_str(&clauses.join("|"))
    }
}

/// Parses an `interval` value, resolving relative bounds against `now`.
///
/// `now` is captured once by the caller so the window stays fixed for the
/// whole request.
pub fn parse_interval(raw: &str, now: DateTime<Utc>) -> Result<Interval> {
    let capability = Capability::Interval;
    let mut from: Option<(Bound, String)> = None;
    let mut to: Option<(Bound, String)> = None;

    for clause in tokenize(capability, raw)? {
        if clause.suffix.is_some() {
            return Err(clause.malformed(capability, Reason::UnexpectedSuffix));
        }
        if clause.operand.is_empty() {
            return Err(clause.malformed(capability, Reason::MissingOperand));
        }

        let slot = match clause.attribute.as_str() {
            "from" | "at" => &mut from,
            "to" => &mut to,
            _ => return Err(clause.malformed(capability, Reason::UnknownBound)),
        };
        if slot.is_some() {
            return Err(clause.malformed(capability, Reason::DuplicateBound));
        }

        let bound = Bound::parse(&clause.operand).map_err(|reason| clause.malformed(capability, reason))?;
        *slot = Some((bound, clause.raw().to_string()));
    }

    let resolve = |(bound, fragment): &(Bound, String)| {
        bound
            .resolve(now)
            .map_err(|reason| MalformedQuery::new(capability, fragment.clone(), reason))
    };

    let window_from = from.as_ref().map(resolve).transpose()?;
    let window_to = match to.as_ref() {
        Some(bound) => Some(resolve(bound)?),
        None if window_from.is_some() => Some(now),
        None => None,
    };

    if let (Some(start), Some(end)) = (window_from, window_to) {
        if start > end {
            return Err(MalformedQuery::new(capability, raw.trim(), Reason::InvertedWindow));
        }
    }

    Ok(Interval {
        from: from.map(|(bound, _)| bound),
        to: to.map(|(bound, _)| bound),
        window: TemporalWindow {
            from: window_from,
            to: window_to,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 10, 14, 0, 0, 0).unwrap()
    }

    fn day(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_window_on_fixed_clock() {
        let interval = parse_interval("from::-14d|to::now", now()).unwrap();
        assert_eq!(interval.window().from, Some(day(9, 30)));
        assert_eq!(interval.window().to, Some(now()));

        assert!(interval.window().contains(day(10, 5)));
        assert!(!interval.window().contains(day(9, 1)));
        assert!(interval.window().contains(day(9, 30)));
        assert!(interval.window().contains(now()));
    }

    #[test]
    fn test_unsigned_offset_lies_in_the_past() {
        let signed = parse_interval("from::-14d", now()).unwrap();
        let unsigned = parse_interval("from::14d", now()).unwrap();
        assert_eq!(signed, unsigned);
    }

    #[test]
    fn test_lone_from_closes_at_now() {
        let interval = parse_interval("from::1475280000", now()).unwrap();
        assert_eq!(interval.window().from, Some(day(10, 1)));
        assert_eq!(interval.window().to, Some(now()));
    }

    #[test]
    fn test_lone_to_is_open_towards_the_past() {
        let interval = parse_interval("to::-1d", now()).unwrap();
        assert_eq!(interval.window().from, None);
        assert_eq!(interval.window().to, Some(day(10, 13)));
        assert!(interval.window().contains(day(1, 1)));
        assert!(!interval.window().contains(now()));
    }

    #[test]
    fn test_at_is_an_alias_of_from() {
        let at = parse_interval("at::-2d", now()).unwrap();
        let from = parse_interval("from::-2d", now()).unwrap();
        assert_eq!(at, from);

        let err = parse_interval("at::-2d|from::-3d", now()).unwrap_err();
        assert_eq!(err.reason, Reason::DuplicateBound);
    }

    #[test]
    fn test_future_window() {
        let interval = parse_interval("from::now|to::+2d", now()).unwrap();
        assert_eq!(interval.window().to, Some(day(10, 16)));
    }

    #[test]
    fn test_absent_interval_is_unbounded() {
        let interval = parse_interval("", now()).unwrap();
        assert!(interval.is_unbounded());
        assert!(interval.window().contains(day(1, 1)));
    }

    #[test]
    fn test_malformed_operands() {
        let cases = [
            ("from::-14w", Reason::UnknownUnit("w".to_string())),
            ("from::-1.5d", Reason::InvalidOffset),
            ("from::yesterday", Reason::InvalidOffset),
            ("from::-14", Reason::MissingUnit),
            ("since::now", Reason::UnknownBound),
            ("from::", Reason::MissingOperand),
            ("to::now|to::-1d", Reason::DuplicateBound),
        ];
        for (raw, reason) in cases {
            let err = parse_interval(raw, now()).unwrap_err();
            assert_eq!(err.reason, reason, "{raw}");
            assert_eq!(err.capability, Capability::Interval);
        }
    }

    #[test]
    fn test_inverted_window_is_malformed() {
        let err = parse_interval("from::now|to::-1d", now()).unwrap_err();
        assert_eq!(err.reason, Reason::InvertedWindow);

        let err = parse_interval("from::+3d", now()).unwrap_err();
        assert_eq!(err.reason, Reason::InvertedWindow);
    }

    #[test]
    fn test_canonical_form_reparses() {
        for raw in ["from::-14d|to::now", "at::5d", "to::1476403200", "from::+0d|to::+1d"] {
            let interval = parse_interval(raw, now()).unwrap();
            let canonical = interval.to_string();
            assert_eq!(parse_interval(&canonical, now()).unwrap(), interval, "{canonical}");
        }
        assert_eq!(
            parse_interval("at::14d", now()).unwrap().to_string(),
            "from::-14d"
        );
    }
}
