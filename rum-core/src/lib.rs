//! This crate provides the core of the real user monitoring agent.
//!
//! The agent observes one page view, reduces the browser's performance
//! timeline into a single [`MetricSnapshot`](types::MetricSnapshot) and flushes
//! that snapshot exactly once, when the page becomes hidden.
//!
//! `rum-core` is meant for host and transport authors. Applications should
//! use the `rum` crate, which comes with ready-made transports and the
//! browser binding.
//!
//! # Core Concepts
//!
//! The page is reached through the [`Host`] traits ([`PerformanceSource`],
//! [`DocumentLifecycle`] and [`Scheduler`]). On top of them:
//!
//! - one [`ObservationChannel`] per metric subscribes to its timeline stream
//!   with buffered delivery and reduces records into the snapshot,
//! - the [`ReadinessGate`] holds navigation timing back until one turn after
//!   the document has fully loaded,
//! - the [`FlushTrigger`] hands the snapshot to a [`Transport`] the first time
//!   the page is hidden.
//!
//! [`Agent::start`] wires all of these together.
//!
//! # Concurrency
//!
//! Everything runs on a single thread, one callback at a time. The snapshot is
//! shared through `Rc<RefCell<_>>` and every reducer is monotone or
//! last-write, so the channels can fire in any order and any number of times.
//! Nothing in here reports errors to the page: failures are logged through the
//! `log` crate under the `rum` target and the offending batch is dropped.
//!
//! # Features
//!
//! - `feature = "test"`: Activates the [`test`] module, which provides a
//!   scripted in-memory page and a transport that captures beacons.
//!
//! [`test`]: test/index.html

#![warn(missing_docs)]

// macros; these need to be first to be used by other modules
#[macro_use]
mod macros;

mod agent;
mod channel;
mod constants;
mod error;
mod gate;
mod host;
mod options;
mod scheduler;
mod transport;
mod trigger;


#[doc(hidden)]
pub use log as __log;

pub use rum_types as types;

pub use crate::agent::Agent;
pub use crate::channel::{MetricKind, ObservationChannel};
pub use crate::constants::{BEACON_CONTENT_TYPE, DEFAULT_ENDPOINT, USER_AGENT};
pub use crate::error::Error;
pub use crate::gate::ReadinessGate;
pub use crate::host::{
    DocumentLifecycle, Host, Listener, PerformanceSource, RecordCallback, Scheduler, Task,
};
pub use crate::options::AgentOptions;
pub use crate::scheduler::TurnQueue;
pub use crate::transport::{Beacon, Transport, TransportFactory};
pub use crate::trigger::{FlushCallback, FlushState, FlushTrigger};
