use serde::{Deserialize, Serialize};

use super::states::EntryType;

/// The paint entry name that marks the first contentful paint.
pub const FIRST_CONTENTFUL_PAINT: &str = "first-contentful-paint";

/// Navigation timing of the current document.
///
/// Only the fields the agent reports are modelled. Times are milliseconds
/// relative to navigation start.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NavigationTiming {
    /// When the `DOMContentLoaded` handlers started running.
    pub dom_content_loaded_event_start: f64,
    /// When the `load` handlers started running.
    pub load_event_start: f64,
}

/// A paint timing record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaintTiming {
    /// `first-paint` or `first-contentful-paint`.
    pub name: String,
    /// When the paint happened.
    pub start_time: f64,
}

impl PaintTiming {
    /// Returns `true` if this record marks the first contentful paint.
    pub fn is_first_contentful_paint(&self) -> bool {
        self.name == FIRST_CONTENTFUL_PAINT
    }
}

/// A largest contentful paint candidate.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LargestContentfulPaint {
    /// When the candidate element was rendered.
    pub start_time: f64,
}

/// A single layout shift.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct LayoutShift {
    /// The layout shift score of this record.
    pub value: f64,
    /// Set when the shift happened shortly after user input.
    #[serde(default)]
    pub had_recent_input: bool,
}

/// Event timing of the first discrete user input.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventTiming {
    /// The event type, e.g. `click` or `keydown`.
    #[serde(default)]
    pub name: String,
    /// When the input happened.
    pub start_time: f64,
    /// When the first event handler started running.
    pub processing_start: f64,
}

impl EventTiming {
    /// The input delay: time between the input and its first handler.
    pub fn delay(&self) -> f64 {
        self.processing_start - self.start_time
    }
}

/// A record delivered by the browser's performance timeline.
///
/// The JSON representation matches what `PerformanceEntry.toJSON()` returns,
/// discriminated by `entryType`. Fields the agent does not use are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "entryType", rename_all = "kebab-case")]
pub enum PerformanceEntry {
    /// A `navigation` entry.
    Navigation(NavigationTiming),
    /// A `paint` entry.
    Paint(PaintTiming),
    /// A `largest-contentful-paint` entry.
    LargestContentfulPaint(LargestContentfulPaint),
    /// A `layout-shift` entry.
    LayoutShift(LayoutShift),
    /// A `first-input` entry.
    FirstInput(EventTiming),
}

impl PerformanceEntry {
    /// The timeline stream this record belongs to.
    pub fn entry_type(&self) -> EntryType {
        match *self {
            PerformanceEntry::Navigation(_) => EntryType::Navigation,
            PerformanceEntry::Paint(_) => EntryType::Paint,
            PerformanceEntry::LargestContentfulPaint(_) => EntryType::LargestContentfulPaint,
            PerformanceEntry::LayoutShift(_) => EntryType::LayoutShift,
            PerformanceEntry::FirstInput(_) => EntryType::FirstInput,
        }
    }

    /// Returns `true` if every timestamp and score on the record is finite.
    pub fn is_finite(&self) -> bool {
        match *self {
            PerformanceEntry::Navigation(ref nav) => {
                nav.dom_content_loaded_event_start.is_finite() && nav.load_event_start.is_finite()
            }
            PerformanceEntry::Paint(ref paint) => paint.start_time.is_finite(),
            PerformanceEntry::LargestContentfulPaint(ref lcp) => lcp.start_time.is_finite(),
            PerformanceEntry::LayoutShift(ref shift) => shift.value.is_finite(),
            PerformanceEntry::FirstInput(ref input) => {
                input.start_time.is_finite() && input.processing_start.is_finite()
            }
        }
    }
}

impl From<NavigationTiming> for PerformanceEntry {
    fn from(timing: NavigationTiming) -> Self {
        PerformanceEntry::Navigation(timing)
    }
}

impl From<PaintTiming> for PerformanceEntry {
    fn from(timing: PaintTiming) -> Self {
        PerformanceEntry::Paint(timing)
    }
}

impl From<LargestContentfulPaint> for PerformanceEntry {
    fn from(candidate: LargestContentfulPaint) -> Self {
        PerformanceEntry::LargestContentfulPaint(candidate)
    }
}

impl From<LayoutShift> for PerformanceEntry {
    fn from(shift: LayoutShift) -> Self {
        PerformanceEntry::LayoutShift(shift)
    }
}

impl From<EventTiming> for PerformanceEntry {
    fn from(timing: EventTiming) -> Self {
        PerformanceEntry::FirstInput(timing)
    }
}
