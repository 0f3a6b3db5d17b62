//! `elements` capability: inclusive, 0-based index window over the shaped
//! result, capped at [`MAX_ELEMENTS`].

use std::fmt;

use super::clause::segments;
use super::error::{Capability, MalformedQuery, Reason, Result};

/// Largest number of records one `elements` window may return.
pub const MAX_ELEMENTS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRange {
    start: u32,
    end: u32,
}

impl ElementRange {
    /// Builds a range, clamping `end` so the window never exceeds the cap.
    pub fn new(start: u32, end: u32) -> Self {
        let last_allowed = start.saturating_add(MAX_ELEMENTS - 1);
        Self {
            start,
            end: end.min(last_allowed),
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Indices `start..=end` of `records`; fewer when the input runs out.
    pub fn slice<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        let start = (self.start as usize).min(records.len());
        let end = start.saturating_add(self.len()).min(records.len());
        &records[start..end]
    }
}

impl fmt::Display for ElementRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.start, self.end)
    }
}

/// Parses `start|end`. An empty value means no pagination.
pub fn parse_elements(raw: &str) -> Result<Option<ElementRange>> {
    let capability = Capability::Elements;
    let parts = segments(capability, raw)?;
    if parts.is_empty() {
        return Ok(None);
    }
    let [start, end] = parts.as_slice() else {
        return Err(MalformedQuery::new(capability, raw.trim(), Reason::ElementsArity));
    };

    let index = |text: &str| {
        if !text.chars().all(|c| c.is_ascii_digit()) {
            return Err(MalformedQuery::new(capability, text, Reason::InvalidIndex));
        }
        text.parse::<u32>()
            .map_err(|_| MalformedQuery::new(capability, text, Reason::InvalidIndex))
    };
    let start = index(*start)?;
    let end = index(*end)?;

    if start > end {
        return Err(MalformedQuery::new(capability, raw.trim(), Reason::InvertedRange));
    }

    Ok(Some(ElementRange::new(start, end)))
}
