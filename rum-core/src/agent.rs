use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::channel::{MetricKind, ObservationChannel};
use crate::gate::ReadinessGate;
use crate::host::Host;
use crate::transport::{Beacon, Transport};
use crate::trigger::{FlushState, FlushTrigger};
use crate::types::{EntryType, MetricSnapshot};
use crate::AgentOptions;

/// Collects one page view's metrics and flushes them when the page is hidden.
///
/// Starting the agent subscribes every channel right away; they fill the
/// shared snapshot independently and in any order. Navigation timing waits
/// behind a [`ReadinessGate`]. A single [`FlushTrigger`] sends whatever has
/// accumulated the first time the page becomes hidden.
///
/// The agent lives as long as the page does. Nothing is ever unsubscribed.
pub struct Agent {
    options: AgentOptions,
    snapshot: Rc<RefCell<MetricSnapshot>>,
    gate: ReadinessGate,
    trigger: Rc<FlushTrigger>,
    unsupported: Vec<EntryType>,
}

impl Agent {
    /// Starts observing `host`.
    pub fn start<H>(host: Rc<H>, options: AgentOptions) -> Agent
    where
        H: Host + ?Sized + 'static,
    {
        let url = options.url.clone().unwrap_or_else(|| host.url());
        let snapshot = Rc::new(RefCell::new(MetricSnapshot::new(url.clone())));

        let mut unsupported = Vec::new();
        for kind in MetricKind::ALL {
            if kind == MetricKind::Navigation {
                continue;
            }
            if let Err(err) = ObservationChannel::new(kind).subscribe(&*host, snapshot.clone()) {
                rum_debug!("{} channel disabled: {}", kind, err);
                unsupported.push(kind.entry_type());
            }
        }

        let navigation = ObservationChannel::new(MetricKind::Navigation);
        let nav_host = Rc::downgrade(&host);
        let nav_snapshot = snapshot.clone();
        let gate = ReadinessGate::install(&host, move || {
            let host = match nav_host.upgrade() {
                Some(host) => host,
                None => return,
            };
            if let Err(err) = navigation.read_timeline(&*host, &nav_snapshot) {
                rum_debug!("dropped navigation timing: {}", err);
            }
        });

        let transport = options
            .transport
            .as_ref()
            .map(|factory| factory.create_transport(&options));
        let target = options.resolve_target(&url);
        let trigger = FlushTrigger::arm(&host, snapshot.clone(), move |snapshot: &MetricSnapshot| {
            flush(transport.as_deref(), target, snapshot)
        });

        Agent {
            options,
            snapshot,
            gate,
            trigger,
            unsupported,
        }
    }

    /// A copy of the metrics collected so far.
    pub fn snapshot(&self) -> MetricSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Whether the snapshot was already flushed.
    pub fn flush_state(&self) -> FlushState {
        self.trigger.state()
    }

    /// Whether the document finished loading and navigation timing was
    /// scheduled for capture.
    pub fn is_ready(&self) -> bool {
        self.gate.is_open()
    }

    /// The streams the host could not observe.
    pub fn unsupported(&self) -> &[EntryType] {
        &self.unsupported
    }

    /// The options the agent was started with.
    pub fn options(&self) -> &AgentOptions {
        &self.options
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("options", &self.options)
            .field("snapshot", &self.snapshot.borrow())
            .field("ready", &self.gate.is_open())
            .field("flush_state", &self.trigger.state())
            .field("unsupported", &self.unsupported)
            .finish()
    }
}

fn flush(transport: Option<&dyn Transport>, target: String, snapshot: &MetricSnapshot) {
    let beacon = match Beacon::from_snapshot(target, snapshot) {
        Ok(beacon) => beacon,
        Err(err) => {
            rum_debug!("failed to encode performance payload: {}", err);
            return;
        }
    };
    rum_debug!("Sending performance: {}", beacon.body_str().unwrap_or_default());
    match transport {
        Some(transport) => transport.send_beacon(beacon),
        None => rum_debug!("no transport configured, performance payload dropped"),
    }
}
