//! `embed` capability: related objects to include in a representation.
//!
//! `transactions::sparse` asks for the related transactions in their sparse
//! projection. Only syntax is checked here; unknown concepts are left for
//! the representation builder to ignore.

use std::fmt;

use super::clause::tokenize;
use super::error::{Capability, Reason, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedRequest {
    pub concept: String,
    pub projection: String,
}

/// Ordered embed requests. The same concept may be requested more than once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmbedRequests {
    requests: Vec<EmbedRequest>,
}

impl EmbedRequests {
    pub fn iter(&self) -> impl Iterator<Item = &EmbedRequest> {
        self.requests.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Requests for one concept, in query order.
    pub fn for_concept<'a>(&'a self, concept: &'a str) -> impl Iterator<Item = &'a EmbedRequest> {
        self.requests.iter().filter(move |request| request.concept == concept)
    }
}

impl fmt::Display for EmbedRequests {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self
            .requests
            .iter()
            .map(|request| format!("{}::{}", request.concept, request.projection))
            .collect();
        f.write_str(&clauses.join("|"))
    }
}

pub fn parse_embed(raw: &str) -> Result<EmbedRequests> {
    let capability = Capability::Embed;
    let requests = tokenize(capability, raw)?
        .into_iter()
        .map(|clause| {
            if clause.suffix.is_some() {
                return Err(clause.malformed(capability, Reason::UnexpectedSuffix));
            }
            if clause.operand.is_empty() {
                return Err(clause.malformed(capability, Reason::MissingOperand));
            }
            Ok(EmbedRequest {
                concept: clause.attribute,
                projection: clause.operand,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(EmbedRequests { requests })
}
