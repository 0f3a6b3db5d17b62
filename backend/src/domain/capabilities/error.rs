//! Error type shared by every capability parser.

use std::fmt;

/// The six query-string capabilities a collection endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Select,
    Sort,
    Interval,
    Elements,
    Filter,
    Embed,
}

impl Capability {
    /// Name of the query parameter carrying this capability.
    pub fn param(&self) -> &'static str {
        match self {
            Capability::Select => "select",
            Capability::Sort => "sort",
            Capability::Interval => "interval",
            Capability::Elements => "elements",
            Capability::Filter => "filter",
            Capability::Embed => "embed",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param())
    }
}

/// Why a capability value was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Reason {
    #[error("empty clause")]
    EmptyClause,
    #[error("missing '::' between attribute and operand")]
    MissingDelimiter,
    #[error("invalid attribute name")]
    InvalidAttribute,
    #[error("unknown attribute")]
    UnknownAttribute,
    #[error("missing operand")]
    MissingOperand,
    #[error("operand not allowed here")]
    UnexpectedOperand,
    #[error("'+' or '-' suffix not allowed here")]
    UnexpectedSuffix,
    #[error("expected a '+' or '-' suffix")]
    MissingSuffix,
    #[error("more than one lower bound for the same attribute")]
    DuplicateLowerBound,
    #[error("more than one upper bound for the same attribute")]
    DuplicateUpperBound,
    #[error("exact values and range bounds mixed for the same attribute")]
    MixedSetAndRange,
    #[error("attribute appears more than once")]
    DuplicateAttribute,
    #[error("unknown interval bound, expected from, to or at")]
    UnknownBound,
    #[error("interval bound given more than once")]
    DuplicateBound,
    #[error("offset is not an integer")]
    InvalidOffset,
    #[error("unknown time unit '{0}'")]
    UnknownUnit(String),
    #[error("relative offset without a time unit")]
    MissingUnit,
    #[error("instant is out of range")]
    InstantOutOfRange,
    #[error("'from' lies after 'to'")]
    InvertedWindow,
    #[error("expected exactly two indices 'start|end'")]
    ElementsArity,
    #[error("index is not a non-negative integer")]
    InvalidIndex,
    #[error("start index lies after end index")]
    InvertedRange,
    #[error("include and exclude projections mixed")]
    MixedProjection,
}

/// A capability value that could not be parsed.
///
/// Raised only while parsing; applying already-parsed criteria never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed {capability} query at '{fragment}': {reason}")]
pub struct MalformedQuery {
    pub capability: Capability,
    pub fragment: String,
    pub reason: Reason,
}

impl MalformedQuery {
    pub fn new(capability: Capability, fragment: impl Into<String>, reason: Reason) -> Self {
        Self {
            capability,
            fragment: fragment.into(),
            reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, MalformedQuery>;
