//! `filter` capability: attribute projection for the representation layer.
//!
//! `balance::+|name::+` asks for only those attributes, `balance::-` for
//! everything except balance. The representation builder may honour this
//! fully, partially or not at all.

use std::collections::BTreeSet;
use std::fmt;

use super::clause::{tokenize, Suffix};
use super::error::{Capability, Reason, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProjectionSpec {
    /// No projection requested.
    #[default]
    All,
    Include(BTreeSet<String>),
    Exclude(BTreeSet<String>),
}

impl ProjectionSpec {
    pub fn is_all(&self) -> bool {
        matches!(self, ProjectionSpec::All)
    }

    /// Attributes named by the projection.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        let names = match self {
            ProjectionSpec::All => None,
            ProjectionSpec::Include(names) | ProjectionSpec::Exclude(names) => Some(names),
        };
        names.into_iter().flatten().map(String::as_str)
    }

    /// Whether an attribute survives the projection.
    pub fn admits(&self, attribute: &str) -> bool {
        match self {
            ProjectionSpec::All => true,
            ProjectionSpec::Include(names) => names.contains(attribute),
            ProjectionSpec::Exclude(names) => !names.contains(attribute),
        }
    }
}

impl fmt::Display for ProjectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (names, suffix) = match self {
            ProjectionSpec::All => return Ok(()),
            ProjectionSpec::Include(names) => (names, Suffix::Plus),
            ProjectionSpec::Exclude(names) => (names, Suffix::Minus),
        };
        let clauses: Vec<String> = names.iter().map(|name| format!("{name}::{suffix}")).collect();
        f.write_str(&clauses.join("|"))
    }
}

pub fn parse_filter(raw: &str) -> Result<ProjectionSpec> {
    let capability = Capability::Filter;
    let mut projection = ProjectionSpec::All;

    for clause in tokenize(capability, raw)? {
        if !clause.operand.is_empty() {
            return Err(clause.malformed(capability, Reason::UnexpectedOperand));
        }
        let Some(suffix) = clause.suffix else {
            return Err(clause.malformed(capability, Reason::MissingSuffix));
        };

        projection = match (projection, suffix) {
            (ProjectionSpec::All, Suffix::Plus) => {
                ProjectionSpec::Include(BTreeSet::from([clause.attribute]))
            }
            (ProjectionSpec::All, Suffix::Minus) => {
                ProjectionSpec::Exclude(BTreeSet::from([clause.attribute]))
            }
            (ProjectionSpec::Include(mut names), Suffix::Plus) => {
                names.insert(clause.attribute);
                ProjectionSpec::Include(names)
            }
            (ProjectionSpec::Exclude(mut names), Suffix::Minus) => {
                names.insert(clause.attribute);
                ProjectionSpec::Exclude(names)
            }
            _ => return Err(clause.malformed(capability, Reason::MixedProjection)),
        };
    }

    Ok(projection)
}
