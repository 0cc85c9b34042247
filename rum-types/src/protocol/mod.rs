//! The payload and timeline record types.
//!
//! Field names on the wire follow the browser's own spelling (`camelCase`
//! for timeline records, short lowercase keys for the flushed payload).

mod entries;
mod snapshot;
mod states;

pub use self::entries::{
    EventTiming, LargestContentfulPaint, LayoutShift, NavigationTiming, PaintTiming,
    PerformanceEntry, FIRST_CONTENTFUL_PAINT,
};
pub use self::snapshot::MetricSnapshot;
pub use self::states::{
    EntryType, ParseEntryTypeError, ParseReadyStateError, ParseVisibilityStateError, ReadyState,
    VisibilityState,
};
