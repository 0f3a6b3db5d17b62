//! `select` capability: row selection by exact values or inclusive ranges.
//!
//! `a::1|a::2` keeps rows whose `a` is 1 or 2. `balance::100+|balance::1000-`
//! keeps rows with `100 <= balance <= 1000`. Criteria on different attributes
//! must all hold.

use std::cmp::Ordering;
use std::fmt;

use super::attributes::Attributes;
use super::clause::{tokenize, Suffix};
use super::error::{Capability, Reason, Result};

/// How one attribute is matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// Value must equal one of the operands.
    Set(Vec<String>),
    /// Value must lie within the inclusive bounds that are present.
    Range {
        lower: Option<String>,
        upper: Option<String>,
    },
}

impl Criterion {
    fn admits(&self, value: &super::attributes::AttributeValue) -> bool {
        match self {
            Criterion::Set(operands) => operands.iter().any(|operand| value.equals_operand(operand)),
            Criterion::Range { lower, upper } => {
                let above = lower.as_deref().map_or(true, |bound| {
                    matches!(value.compare_operand(bound), Some(Ordering::Greater | Ordering::Equal))
                });
                let below = upper.as_deref().map_or(true, |bound| {
                    matches!(value.compare_operand(bound), Some(Ordering::Less | Ordering::Equal))
                });
                above && below
            }
        }
    }
}

/// Parsed `select` value: one criterion per attribute, in first-mention order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    criteria: Vec<(String, Criterion)>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn criterion(&self, attribute: &str) -> Option<&Criterion> {
        self.criteria
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, criterion)| criterion)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.criteria.iter().map(|(name, _)| name.as_str())
    }

    /// A record matches when every attribute's criterion holds. A record
    /// lacking a selected attribute does not match.
    pub fn matches<R: Attributes>(&self, record: &R) -> bool {
        self.criteria.iter().all(|(name, criterion)| {
            record
                .attribute(name)
                .map_or(false, |value| criterion.admits(&value))
        })
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses = Vec::new();
        for (name, criterion) in &self.criteria {
            match criterion {
                Criterion::Set(operands) => {
                    clauses.extend(operands.iter().map(|operand| format!("{name}::{operand}")));
                }
                Criterion::Range { lower, upper } => {
                    if let Some(lower) = lower {
                        clauses.push(format!("{name}::{lower}{}", Suffix::Plus));
                    }
                    if let Some(upper) = upper {
                        clauses.push(format!("{name}::{upper}{}", Suffix::Minus));
                    }
                }
            }
        }
        f.write_str(&clauses.join("|"))
    }
}

pub fn parse_select(raw: &str) -> Result<Selection> {
    let capability = Capability::Select;
    let mut selection = Selection::default();

    for clause in tokenize(capability, raw)? {
        if clause.operand.is_empty() {
            return Err(clause.malformed(capability, Reason::MissingOperand));
        }

        let position = selection
            .criteria
            .iter()
            .position(|(name, _)| *name == clause.attribute);
        let existing = position.map(|index| &mut selection.criteria[index].1);
        let operand = clause.operand.clone();

        match (clause.suffix, existing) {
            (None, None) => selection
                .criteria
                .push((clause.attribute.clone(), Criterion::Set(vec![operand]))),
            (None, Some(Criterion::Set(operands))) => {
                if !operands.contains(&operand) {
                    operands.push(operand);
                }
            }
            (Some(Suffix::Plus), None) => selection.criteria.push((
                clause.attribute.clone(),
                Criterion::Range {
                    lower: Some(operand),
                    upper: None,
                },
            )),
            (Some(Suffix::Minus), None) => selection.criteria.push((
                clause.attribute.clone(),
                Criterion::Range {
                    lower: None,
                    upper: Some(operand),
                },
            )),
            (Some(Suffix::Plus), Some(Criterion::Range { lower, .. })) => {
                if lower.is_some() {
                    return Err(clause.malformed(capability, Reason::DuplicateLowerBound));
                }
                *lower = Some(operand);
            }
            (Some(Suffix::Minus), Some(Criterion::Range { upper, .. })) => {
                if upper.is_some() {
                    return Err(clause.malformed(capability, Reason::DuplicateUpperBound));
                }
                *upper = Some(operand);
            }
            (None, Some(Criterion::Range { .. })) | (Some(_), Some(Criterion::Set(_))) => {
                return Err(clause.malformed(capability, Reason::MixedSetAndRange));
            }
        }
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capabilities::test_support::Row;

    fn rows() -> Vec<Row> {
        vec![
            Row::new(1).with("a", 1.0).with("balance", 50.0).with("name", "x"),
            Row::new(2).with("a", 2.0).with("balance", 100.0).with("name", "y"),
            Row::new(3).with("a", 3.0).with("balance", 1000.0).with("name", "x"),
            Row::new(4).with("a", 2.0).with("balance", 1000.01).with("name", "x"),
        ]
    }

    fn selected_ids(selection: &Selection) -> Vec<u32> {
        rows()
            .iter()
            .filter(|row| selection.matches(*row))
            .map(|row| row.id)
            .collect()
    }

    #[test]
    fn test_set_is_membership() {
        let selection = parse_select("a::1|a::2").unwrap();
        assert_eq!(selected_ids(&selection), vec![1, 2, 4]);
        assert_eq!(
            selection.criterion("a"),
            Some(&Criterion::Set(vec!["1".to_string(), "2".to_string()]))
        );
    }

    #[test]
    fn test_range_is_inclusive() {
        let selection = parse_select("balance::100+|balance::1000-").unwrap();
        assert_eq!(selected_ids(&selection), vec![2, 3]);
    }

    #[test]
    fn test_single_bound_is_a_ray() {
        let selection = parse_select("balance::1000+").unwrap();
        assert_eq!(selected_ids(&selection), vec![3, 4]);

        let selection = parse_select("balance::100-").unwrap();
        assert_eq!(selected_ids(&selection), vec![1, 2]);
    }

    #[test]
    fn test_attributes_are_conjoined() {
        let selection = parse_select("name::x|a::2|a::3").unwrap();
        assert_eq!(selected_ids(&selection), vec![3, 4]);
    }

    #[test]
    fn test_missing_attribute_never_matches() {
        let selection = parse_select("color::red").unwrap();
        assert!(selected_ids(&selection).is_empty());
    }

    #[test]
    fn test_empty_selection_matches_everything() {
        let selection = parse_select("").unwrap();
        assert!(selection.is_empty());
        assert_eq!(selected_ids(&selection), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_two_lower_bounds_are_malformed() {
        let err = parse_select("balance::100+|balance::200+").unwrap_err();
        assert_eq!(err.reason, Reason::DuplicateLowerBound);
        assert_eq!(err.capability, Capability::Select);
        assert_eq!(err.fragment, "balance::200+");

        let err = parse_select("balance::100-|balance::200-").unwrap_err();
        assert_eq!(err.reason, Reason::DuplicateUpperBound);
    }

    #[test]
    fn test_set_and_range_cannot_mix() {
        let err = parse_select("balance::100|balance::200+").unwrap_err();
        assert_eq!(err.reason, Reason::MixedSetAndRange);

        let err = parse_select("balance::200+|balance::100").unwrap_err();
        assert_eq!(err.reason, Reason::MixedSetAndRange);
    }

    #[test]
    fn test_missing_operand_is_malformed() {
        let err = parse_select("balance::+").unwrap_err();
        assert_eq!(err.reason, Reason::MissingOperand);
    }

    #[test]
    fn test_canonical_form_reparses() {
        for raw in ["a::1|a::2", "balance::100+|balance::1000-", " name :: x | balance::5- "] {
            let selection = parse_select(raw).unwrap();
            let canonical = selection.to_string();
            assert_eq!(parse_select(&canonical).unwrap(), selection, "{canonical}");
        }
        assert_eq!(
            parse_select("balance::1000-|balance::100+").unwrap().to_string(),
            "balance::100+|balance::1000-"
        );
    }
}
