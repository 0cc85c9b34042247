use serde::{Deserialize, Serialize};

/// One page view's worth of metrics.
///
/// This is both the in-memory aggregate the agent mutates and the flat payload
/// it flushes. All numeric fields start at `0` and only move in the direction
/// their reducer allows:
///
/// * `dcl`, `load`, `fcp` and `fid` are last-write.
/// * `lcp` only grows.
/// * `cls` only grows, and never includes shifts caused by recent input.
///
/// # Examples
///
/// ```
/// use rum_types::protocol::MetricSnapshot;
///
/// let snapshot = MetricSnapshot::new("https://example.com/");
/// assert_eq!(
///     serde_json::to_string(&snapshot).unwrap(),
///     r#"{"url":"https://example.com/","dcl":0.0,"load":0.0,"fcp":0.0,"lcp":0.0,"cls":0.0,"fid":0.0}"#
/// );
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MetricSnapshot {
    /// The page this snapshot describes.
    pub url: String,
    /// `DOMContentLoaded` start in milliseconds.
    pub dcl: f64,
    /// `load` event start in milliseconds.
    pub load: f64,
    /// First contentful paint in milliseconds.
    pub fcp: f64,
    /// Largest contentful paint in milliseconds.
    pub lcp: f64,
    /// Cumulative layout shift score.
    pub cls: f64,
    /// First input delay in milliseconds.
    pub fid: f64,
}

impl MetricSnapshot {
    /// Creates an empty snapshot for the given page.
    pub fn new<S: Into<String>>(url: S) -> MetricSnapshot {
        MetricSnapshot {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Records the navigation milestones.
    pub fn record_navigation(&mut self, dcl: f64, load: f64) {
        self.dcl = dcl;
        self.load = load;
    }

    /// Records a first contentful paint. The last call wins.
    pub fn record_fcp(&mut self, start_time: f64) {
        self.fcp = start_time;
    }

    /// Offers a largest contentful paint candidate.
    ///
    /// Returns `true` if the candidate is later than the current value and
    /// replaced it.
    pub fn record_lcp(&mut self, start_time: f64) -> bool {
        if start_time > self.lcp {
            self.lcp = start_time;
            true
        } else {
            false
        }
    }

    /// Adds a layout shift to the running score.
    ///
    /// Shifts that happened right after user input are expected movement and
    /// are ignored, as is any shift that would push the score past the
    /// largest finite `f64`. Returns `true` if the shift was counted.
    pub fn record_layout_shift(&mut self, value: f64, had_recent_input: bool) -> bool {
        if had_recent_input {
            return false;
        }
        let cls = self.cls + value;
        if !cls.is_finite() {
            return false;
        }
        self.cls = cls;
        true
    }

    /// Records the first input delay. The last call wins.
    pub fn record_fid(&mut self, delay: f64) {
        self.fid = delay;
    }
}
