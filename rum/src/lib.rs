//! This crate provides a real user monitoring agent.
//!
//! The agent watches a single page view, reduces the browser's performance
//! timeline into one payload with the page's Web Vitals and delivers that
//! payload exactly once, when the page becomes hidden:
//!
//! | key | meaning |
//! |---|---|
//! | `url` | the page |
//! | `dcl` | `DOMContentLoaded` start (ms) |
//! | `load` | `load` event start (ms) |
//! | `fcp` | first contentful paint (ms) |
//! | `lcp` | largest contentful paint (ms) |
//! | `cls` | cumulative layout shift |
//! | `fid` | first input delay (ms) |
//!
//! # Quickstart
//!
//! In the browser, build for `wasm32` with the `web` feature and start the
//! agent once:
//!
//! ```rust,ignore
//! rum::web::start(rum::AgentOptions::default())?;
//! ```
//!
//! Any other environment provides its own [`Host`] and calls [`init`], which
//! fills in the default transport:
//!
//! ```
//! use rum::test::TestPage;
//!
//! let page = TestPage::loaded("https://example.com/");
//! let agent = rum::init(page.clone(), rum::AgentOptions::default());
//! assert_eq!(agent.snapshot().url, "https://example.com/");
//! ```
//!
//! # Features
//!
//! - `transport` (default): the `reqwest` transport with native TLS.
//! - `reqwest`, `native-tls`, `rustls`: pick the HTTP transport pieces
//!   individually.
//! - `web`: the browser binding in [`web`], built on `wasm-bindgen` and
//!   `web-sys`. Use with `default-features = false`.
//! - `test`: the [`test`] module with a scripted page and a capturing
//!   transport.

#![warn(missing_docs)]

mod defaults;
pub mod transports;
#[cfg(feature = "web")]
pub mod web;

use std::rc::Rc;

pub use rum_core::*;

pub use crate::defaults::apply_defaults;

/// Starts an agent on `host` with defaults applied to `options`.
///
/// This is [`Agent::start`] after [`apply_defaults`].
pub fn init<H>(host: Rc<H>, options: AgentOptions) -> Agent
where
    H: Host + ?Sized + 'static,
{
    Agent::start(host, apply_defaults(options))
}
