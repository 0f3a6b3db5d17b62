//! Capability pipeline: select, then interval, then sort, then elements.
//!
//! Filter and embed do not touch the sequence; they are carried alongside the
//! result for the representation builder.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use super::attributes::Attributes;
use super::elements::{parse_elements, ElementRange};
use super::embed::{parse_embed, EmbedRequests};
use super::error::{Capability, MalformedQuery, Reason, Result};
use super::filter::{parse_filter, ProjectionSpec};
use super::interval::{parse_interval, Interval, TemporalWindow};
use super::select::{parse_select, Selection};
use super::sort::{parse_sort, Sorting};

/// Raw capability values as they arrive in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCapabilities {
    pub select: Option<String>,
    pub sort: Option<String>,
    pub interval: Option<String>,
    pub elements: Option<String>,
    pub filter: Option<String>,
    pub embed: Option<String>,
}

/// Every capability of one request, parsed and validated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapabilityQuery {
    pub selection: Selection,
    pub interval: Interval,
    pub sorting: Sorting,
    pub elements: Option<ElementRange>,
    pub projection: ProjectionSpec,
    pub embed: EmbedRequests,
}

impl CapabilityQuery {
    /// Parses all capability values. `now` is the request's single clock reading.
    pub fn parse(raw: &RawCapabilities, now: DateTime<Utc>) -> Result<Self> {
        let value = |field: &Option<String>| field.clone().unwrap_or_default();

        Ok(Self {
            selection: parse_select(&value(&raw.select))?,
            interval: parse_interval(&value(&raw.interval), now)?,
            sorting: parse_sort(&value(&raw.sort))?,
            elements: parse_elements(&value(&raw.elements))?,
            projection: parse_filter(&value(&raw.filter))?,
            embed: parse_embed(&value(&raw.embed))?,
        })
    }

    /// Rejects attribute names the record type does not expose. Embed
    /// concepts are not checked.
    pub fn validate_for<R: Attributes>(&self) -> Result<()> {
        let check = |capability: Capability, attribute: &str| {
            if R::VOCABULARY.contains(&attribute) {
                Ok(())
            } else {
                Err(MalformedQuery::new(capability, attribute, Reason::UnknownAttribute))
            }
        };

        for attribute in self.selection.attributes() {
            check(Capability::Select, attribute)?;
        }
        for key in self.sorting.keys() {
            check(Capability::Sort, &key.attribute)?;
        }
        for attribute in self.projection.attributes() {
            check(Capability::Filter, attribute)?;
        }
        Ok(())
    }

    pub fn apply<'a, R: Attributes>(&self, records: &'a [R]) -> Vec<&'a R> {
        apply(
            records,
            Some(&self.selection),
            Some(self.interval.window()),
            Some(&self.sorting),
            self.elements,
        )
    }
}

/// Shapes `records` without mutating them. Each stage is skipped when absent.
pub fn apply<'a, R: Attributes>(
    records: &'a [R],
    selection: Option<&Selection>,
    window: Option<&TemporalWindow>,
    sorting: Option<&Sorting>,
    elements: Option<ElementRange>,
) -> Vec<&'a R> {
    let window = window.filter(|window| !window.is_unbounded());

    let mut shaped: Vec<&R> = records
        .iter()
        .filter(|record| selection.map_or(true, |selection| selection.matches(*record)))
        .filter(|record| {
            window.map_or(true, |window| {
                record
                    .point_in_time()
                    .map_or(false, |instant| window.contains(instant))
            })
        })
        .collect();

    if let Some(sorting) = sorting {
        sorting.sort(&mut shaped);
    }

    let shaped = match elements {
        Some(range) => range.slice(&shaped).to_vec(),
        None => shaped,
    };

    debug!("capability pipeline kept {} of {} records", shaped.len(), records.len());
    shaped
}
