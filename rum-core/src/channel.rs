use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::host::PerformanceSource;
use crate::types::{EntryType, MetricSnapshot, PerformanceEntry};
use crate::Error;

/// The metrics the agent collects, one per observation channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// `dcl` and `load` from navigation timing.
    Navigation,
    /// `fcp`.
    FirstContentfulPaint,
    /// `lcp`.
    LargestContentfulPaint,
    /// `cls`.
    CumulativeLayoutShift,
    /// `fid`.
    FirstInputDelay,
}

impl MetricKind {
    /// All metric kinds.
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Navigation,
        MetricKind::FirstContentfulPaint,
        MetricKind::LargestContentfulPaint,
        MetricKind::CumulativeLayoutShift,
        MetricKind::FirstInputDelay,
    ];

    /// The timeline stream this metric is reduced from.
    pub fn entry_type(self) -> EntryType {
        match self {
            MetricKind::Navigation => EntryType::Navigation,
            MetricKind::FirstContentfulPaint => EntryType::Paint,
            MetricKind::LargestContentfulPaint => EntryType::LargestContentfulPaint,
            MetricKind::CumulativeLayoutShift => EntryType::LayoutShift,
            MetricKind::FirstInputDelay => EntryType::FirstInput,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            MetricKind::Navigation => "navigation",
            MetricKind::FirstContentfulPaint => "FCP",
            MetricKind::LargestContentfulPaint => "LCP",
            MetricKind::CumulativeLayoutShift => "CLS",
            MetricKind::FirstInputDelay => "FID",
        })
    }
}

/// Reduces one timeline stream into the metric snapshot.
///
/// Every reducer tolerates repeated and out of order batches: `lcp` keeps the
/// maximum, `cls` sums, everything else is last-write. A batch is applied all
/// or nothing; if any record in it is unusable the snapshot is left untouched
/// and the channel keeps accepting later batches.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ObservationChannel {
    kind: MetricKind,
}

impl ObservationChannel {
    /// Creates the channel for one metric.
    pub fn new(kind: MetricKind) -> ObservationChannel {
        ObservationChannel { kind }
    }

    /// The metric this channel produces.
    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Checks that every record in a batch can be reduced.
    pub fn validate(&self, records: &[PerformanceEntry]) -> Result<(), Error> {
        let expected = self.kind.entry_type();
        for record in records {
            let found = record.entry_type();
            if found != expected {
                return Err(Error::UnexpectedEntry { expected, found });
            }
            if !record.is_finite() {
                return Err(Error::MalformedRecord {
                    entry_type: found,
                    reason: "non-finite value",
                });
            }
            if let PerformanceEntry::LayoutShift(ref shift) = *record {
                if shift.value < 0.0 {
                    return Err(Error::MalformedRecord {
                        entry_type: found,
                        reason: "negative layout shift score",
                    });
                }
            }
        }
        Ok(())
    }

    /// Applies a batch of records to the snapshot.
    ///
    /// Returns how many records changed the snapshot.
    pub fn apply(
        &self,
        snapshot: &mut MetricSnapshot,
        records: &[PerformanceEntry],
    ) -> Result<usize, Error> {
        self.validate(records)?;

        let mut changed = 0;
        for record in records {
            match *record {
                PerformanceEntry::Navigation(ref nav) => {
                    snapshot.record_navigation(
                        nav.dom_content_loaded_event_start,
                        nav.load_event_start,
                    );
                    rum_debug!(
                        "Navigation Performance Timing: dcl={} load={}",
                        snapshot.dcl,
                        snapshot.load
                    );
                    changed += 1;
                }
                PerformanceEntry::Paint(ref paint) => {
                    if paint.is_first_contentful_paint() {
                        snapshot.record_fcp(paint.start_time);
                        rum_debug!("FCP: {}", snapshot.fcp);
                        changed += 1;
                    }
                }
                PerformanceEntry::LargestContentfulPaint(ref candidate) => {
                    if snapshot.record_lcp(candidate.start_time) {
                        rum_debug!("LCP: {}", snapshot.lcp);
                        changed += 1;
                    }
                }
                PerformanceEntry::LayoutShift(ref shift) => {
                    if snapshot.record_layout_shift(shift.value, shift.had_recent_input) {
                        rum_debug!("CLS: {}", snapshot.cls);
                        changed += 1;
                    }
                }
                PerformanceEntry::FirstInput(ref input) => {
                    snapshot.record_fid(input.delay());
                    rum_debug!("FID: {}", snapshot.fid);
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }

    /// Applies a batch to a shared snapshot.
    pub fn handle(
        &self,
        snapshot: &RefCell<MetricSnapshot>,
        records: &[PerformanceEntry],
    ) -> Result<usize, Error> {
        let mut snapshot = snapshot.try_borrow_mut().map_err(|_| Error::SnapshotBusy)?;
        self.apply(&mut snapshot, records)
    }

    /// Subscribes to the channel's stream with buffered delivery.
    ///
    /// Batches that cannot be applied are dropped and logged; the
    /// subscription itself stays active.
    pub fn subscribe<S>(self, source: &S, snapshot: Rc<RefCell<MetricSnapshot>>) -> Result<(), Error>
    where
        S: PerformanceSource + ?Sized,
    {
        let entry_type = self.kind.entry_type();
        source.observe(
            entry_type,
            true,
            Box::new(move |records: Vec<PerformanceEntry>| {
                if let Err(err) = self.handle(&snapshot, &records) {
                    rum_debug!(
                        "dropped {} batch of {} records: {}",
                        entry_type,
                        records.len(),
                        err
                    );
                }
            }),
        )
    }

    /// Reduces the records already on the timeline.
    ///
    /// The navigation channel reads only the first navigation entry; there is
    /// one per document.
    pub fn read_timeline<S>(
        &self,
        source: &S,
        snapshot: &RefCell<MetricSnapshot>,
    ) -> Result<usize, Error>
    where
        S: PerformanceSource + ?Sized,
    {
        let mut records = source.entries_by_type(self.kind.entry_type());
        if self.kind == MetricKind::Navigation {
            records.truncate(1);
        }
        self.handle(snapshot, &records)
    }
}
