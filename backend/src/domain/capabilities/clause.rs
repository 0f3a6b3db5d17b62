//! Clause tokenizer shared by all capabilities.
//!
//! A capability value is a pipe-delimited list of clauses. Each clause is
//! `attribute::operand`, optionally followed directly by a `+` or `-` suffix.
//! `sort` additionally accepts a bare attribute name (`balance`, `lastUpdate-`).

use std::fmt;

use super::error::{Capability, MalformedQuery, Reason, Result};

pub const CLAUSE_SEPARATOR: char = '|';
pub const OPERAND_DELIMITER: &str = "::";

/// Trailing `+` / `-` marker that was peeled off a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suffix {
    Plus,
    Minus,
}

impl Suffix {
    fn peel(text: &str) -> (Option<Suffix>, &str) {
        if let Some(rest) = text.strip_suffix('+') {
            (Some(Suffix::Plus), rest.trim_end())
        } else if let Some(rest) = text.strip_suffix('-') {
            (Some(Suffix::Minus), rest.trim_end())
        } else {
            (None, text)
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suffix::Plus => f.write_str("+"),
            Suffix::Minus => f.write_str("-"),
        }
    }
}

/// One `key::value[suffix]` unit of a capability value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub attribute: String,
    pub operand: String,
    pub suffix: Option<Suffix>,
    /// Whether the clause carried a `::` delimiter, even with an empty operand.
    pub delimited: bool,
    raw: String,
}

impl Clause {
    /// The clause exactly as it appeared in the query, used in error reports.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn malformed(&self, capability: Capability, reason: Reason) -> MalformedQuery {
        MalformedQuery::new(capability, self.raw.clone(), reason)
    }
}

/// Splits a raw capability value on `|`, trimming each segment.
///
/// An empty (or all-whitespace) value yields no segments. An empty segment
/// between separators is malformed.
pub fn segments(capability: Capability, raw: &str) -> Result<Vec<&str>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    raw.split(CLAUSE_SEPARATOR)
        .map(str::trim)
        .map(|segment| {
            if segment.is_empty() {
                Err(MalformedQuery::new(capability, raw, Reason::EmptyClause))
            } else {
                Ok(segment)
            }
        })
        .collect()
}

/// Tokenizes a raw capability value into its ordered clauses.
pub fn tokenize(capability: Capability, raw: &str) -> Result<Vec<Clause>> {
    segments(capability, raw)?
        .into_iter()
        .map(|segment| tokenize_clause(capability, segment))
        .collect()
}

fn tokenize_clause(capability: Capability, segment: &str) -> Result<Clause> {
    let (attribute, operand, suffix, delimited) = match segment.split_once(OPERAND_DELIMITER) {
        Some((key, operand)) => {
            let (suffix, operand) = Suffix::peel(operand.trim());
            (key.trim(), operand, suffix, true)
        }
        None if capability == Capability::Sort => {
            let (suffix, attribute) = Suffix::peel(segment);
            (attribute, "", suffix, false)
        }
        None => {
            return Err(MalformedQuery::new(
                capability,
                segment,
                Reason::MissingDelimiter,
            ))
        }
    };

    if !is_attribute_name(attribute) {
        return Err(MalformedQuery::new(
            capability,
            segment,
            Reason::InvalidAttribute,
        ));
    }

    Ok(Clause {
        attribute: attribute.to_string(),
        operand: operand.to_string(),
        suffix,
        delimited,
        raw: segment.to_string(),
    })
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_yields_no_clauses() {
        assert!(tokenize(Capability::Select, "").unwrap().is_empty());
        assert!(tokenize(Capability::Select, "   ").unwrap().is_empty());
    }

    #[test]
    fn test_splits_clauses_in_order() {
        let clauses = tokenize(Capability::Select, "balance::100+|balance::1000-|name::savings").unwrap();
        assert_eq!(clauses.len(), 3);

        assert_eq!(clauses[0].attribute, "balance");
        assert_eq!(clauses[0].operand, "100");
        assert_eq!(clauses[0].suffix, Some(Suffix::Plus));

        assert_eq!(clauses[1].operand, "1000");
        assert_eq!(clauses[1].suffix, Some(Suffix::Minus));

        assert_eq!(clauses[2].attribute, "name");
        assert_eq!(clauses[2].operand, "savings");
        assert_eq!(clauses[2].suffix, None);
    }

    #[test]
    fn test_trims_whitespace() {
        let clauses = tokenize(Capability::Select, " balance :: 100 + | name::x ").unwrap();
        assert_eq!(clauses[0].attribute, "balance");
        assert_eq!(clauses[0].operand, "100");
        assert_eq!(clauses[0].suffix, Some(Suffix::Plus));
        assert_eq!(clauses[1].raw(), "name::x");
    }

    #[test]
    fn test_leading_sign_is_not_a_suffix() {
        let clauses = tokenize(Capability::Interval, "from::-14d").unwrap();
        assert_eq!(clauses[0].operand, "-14d");
        assert_eq!(clauses[0].suffix, None);
    }

    #[test]
    fn test_suffix_only_operand() {
        let clauses = tokenize(Capability::Filter, "balance::+").unwrap();
        assert_eq!(clauses[0].operand, "");
        assert_eq!(clauses[0].suffix, Some(Suffix::Plus));
    }

    #[test]
    fn test_bare_attribute_only_for_sort() {
        let clauses = tokenize(Capability::Sort, "balance|lastUpdate-").unwrap();
        assert_eq!(clauses[0].attribute, "balance");
        assert_eq!(clauses[0].suffix, None);
        assert_eq!(clauses[1].attribute, "lastUpdate");
        assert_eq!(clauses[1].suffix, Some(Suffix::Minus));
        assert!(!clauses[0].delimited);

        let clauses = tokenize(Capability::Sort, "balance::-").unwrap();
        assert!(clauses[0].delimited);
        assert_eq!(clauses[0].operand, "");

        let err = tokenize(Capability::Select, "balance").unwrap_err();
        assert_eq!(err.reason, Reason::MissingDelimiter);
        assert_eq!(err.fragment, "balance");
    }

    #[test]
    fn test_empty_clause_is_malformed() {
        let err = tokenize(Capability::Select, "a::1||a::2").unwrap_err();
        assert_eq!(err.reason, Reason::EmptyClause);

        let err = tokenize(Capability::Sort, "balance|").unwrap_err();
        assert_eq!(err.reason, Reason::EmptyClause);
    }

    #[test]
    fn test_invalid_attribute_names() {
        let err = tokenize(Capability::Sort, "balance*").unwrap_err();
        assert_eq!(err.reason, Reason::InvalidAttribute);
        assert_eq!(err.capability, Capability::Sort);

        let err = tokenize(Capability::Select, "::100").unwrap_err();
        assert_eq!(err.reason, Reason::InvalidAttribute);
    }

    #[test]
    fn test_segments_keep_raw_text() {
        let parts = segments(Capability::Elements, " 10 | 30 ").unwrap();
        assert_eq!(parts, vec!["10", "30"]);
    }
}
