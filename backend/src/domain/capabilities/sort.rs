//! `sort` capability: ordered multi-key comparator.
//!
//! `balance|lastUpdate-` orders ascending by balance, breaking ties by
//! descending lastUpdate. Rows that tie on every key keep their input order.

use std::cmp::Ordering;
use std::fmt;

use super::attributes::Attributes;
use super::clause::{tokenize, Suffix};
use super::error::{Capability, Reason, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub attribute: String,
    pub direction: Direction,
}

impl SortKey {
    /// Compares two records on this key. Missing values order after present
    /// ones when ascending.
    fn compare<R: Attributes>(&self, left: &R, right: &R) -> Ordering {
        let ordering = match (left.attribute(&self.attribute), right.attribute(&self.attribute)) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match self.direction {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

/// Parsed `sort` value. Earlier keys take priority.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sorting {
    keys: Vec<SortKey>,
}

impl Sorting {
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn compare<R: Attributes>(&self, left: &R, right: &R) -> Ordering {
        self.keys
            .iter()
            .map(|key| key.compare(left, right))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Stable in-place sort of record references.
    pub fn sort<R: Attributes>(&self, records: &mut [&R]) {
        if !self.keys.is_empty() {
            records.sort_by(|left, right| self.compare(*left, *right));
        }
    }
}

impl fmt::Display for Sorting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self
            .keys
            .iter()
            .map(|key| match key.direction {
                Direction::Ascending => key.attribute.clone(),
                Direction::Descending => format!("{}{}", key.attribute, Suffix::Minus),
            })
            .collect();
        f.write_str(&keys.join("|"))
    }
}

pub fn parse_sort(raw: &str) -> Result<Sorting> {
    let capability = Capability::Sort;
    let mut keys: Vec<SortKey> = Vec::new();

    for clause in tokenize(capability, raw)? {
        if clause.delimited {
            return Err(clause.malformed(capability, Reason::UnexpectedOperand));
        }
        if keys.iter().any(|key| key.attribute == clause.attribute) {
            return Err(clause.malformed(capability, Reason::DuplicateAttribute));
        }
        let direction = match clause.suffix {
            None | Some(Suffix::Plus) => Direction::Ascending,
            Some(Suffix::Minus) => Direction::Descending,
        };
        keys.push(SortKey {
            attribute: clause.attribute,
            direction,
        });
    }

    Ok(Sorting { keys })
}
