//! The provided transports.
//!
//! This module exposes all transports that are compiled into the crate. The
//! `reqwest` feature turns on the HTTP transport, the `web` feature the
//! browser's `navigator.sendBeacon`.

use std::rc::Rc;

use rum_core::{rum_debug, AgentOptions, Beacon, Transport, TransportFactory};

#[cfg(feature = "reqwest")]
mod thread;

#[cfg(feature = "reqwest")]
mod reqwest;
#[cfg(feature = "reqwest")]
pub use self::reqwest::ReqwestBeaconTransport;

#[cfg(feature = "web")]
pub use crate::web::SendBeaconTransport;

/// Drops every beacon.
///
/// Used when no delivery primitive was compiled in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTransport;

impl Transport for NoopTransport {
    fn send_beacon(&self, beacon: Beacon) {
        rum_debug!("no transport compiled in, beacon to {} dropped", beacon.target());
    }
}

/// Creates the default transport.
///
/// In the browser (`web` feature on `wasm32`) this is `navigator.sendBeacon`,
/// elsewhere the `reqwest` transport when compiled in, and a
/// [`NoopTransport`] otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTransportFactory;

impl TransportFactory for DefaultTransportFactory {
    fn create_transport(&self, options: &AgentOptions) -> Rc<dyn Transport> {
        let _ = options;
        #[cfg(all(feature = "web", target_arch = "wasm32"))]
        {
            match SendBeaconTransport::new() {
                Ok(transport) => Rc::new(transport) as Rc<dyn Transport>,
                Err(err) => {
                    rum_debug!("navigator.sendBeacon unavailable: {:?}", err);
                    Rc::new(NoopTransport)
                }
            }
        }
        #[cfg(all(
            feature = "reqwest",
            not(all(feature = "web", target_arch = "wasm32"))
        ))]
        {
            Rc::new(ReqwestBeaconTransport::new())
        }
        #[cfg(not(any(feature = "reqwest", all(feature = "web", target_arch = "wasm32"))))]
        {
            Rc::new(NoopTransport)
        }
    }
}
