//! # API capability query engine
//!
//! Parses and applies the six query-string capabilities a collection
//! endpoint accepts:
//!
//! | param      | example                          |
//! |------------|----------------------------------|
//! | `select`   | `balance::100+\|balance::1000-`  |
//! | `sort`     | `balance\|lastUpdate-`           |
//! | `interval` | `from::-14d\|to::now`            |
//! | `elements` | `10\|30`                         |
//! | `filter`   | `balance::+\|name::+`            |
//! | `embed`    | `transactions::sparse`           |
//!
//! Parsing is the only step that can fail. Every parsed value prints back in
//! a canonical form that parses to an equal value.

pub mod attributes;
pub mod clause;
pub mod elements;
pub mod embed;
pub mod error;
pub mod filter;
pub mod interval;
pub mod pipeline;
pub mod select;
pub mod sort;

pub use attributes::{AttributeValue, Attributes};
pub use elements::{parse_elements, ElementRange, MAX_ELEMENTS};
pub use embed::{parse_embed, EmbedRequest, EmbedRequests};
pub use error::{Capability, MalformedQuery, Reason};
pub use filter::{parse_filter, ProjectionSpec};
pub use interval::{parse_interval, Bound, Interval, TemporalWindow};
pub use pipeline::{apply, CapabilityQuery, RawCapabilities};
pub use select::{parse_select, Criterion, Selection};
pub use sort::{parse_sort, Direction, SortKey, Sorting};
