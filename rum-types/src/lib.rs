//! This crate provides common types for working with the real user monitoring
//! agent's wire protocol and the browser performance timeline it observes.
//!
//! It is used by the `rum-core` engine and by hosts that feed it records, and
//! it can also be used by an ingestion endpoint to parse incoming payloads.
//!
//! # Example
//!
//! ```rust
//! use rum_types::protocol::MetricSnapshot;
//!
//! let mut snapshot = MetricSnapshot::new("https://example.com/");
//! snapshot.record_lcp(1200.0);
//! snapshot.record_lcp(800.0);
//! assert_eq!(snapshot.lcp, 1200.0);
//! ```

#![warn(missing_docs)]

pub mod protocol;

pub use crate::protocol::{
    EntryType, MetricSnapshot, ParseEntryTypeError, ParseReadyStateError,
    ParseVisibilityStateError, PerformanceEntry, ReadyState, VisibilityState,
};
