use std::time::Duration;

use reqwest::blocking::Client as ReqwestClient;
use reqwest::header::CONTENT_TYPE;

use super::thread::TransportThread;

use rum_core::{rum_debug, Beacon, Error, Transport, USER_AGENT};

/// A [`Transport`] that posts beacons with the [`reqwest`] library.
///
/// When the `transport` feature is enabled this is the default transport
/// outside the browser. Requests run on a background thread; the response
/// status is logged and otherwise ignored.
///
/// [`reqwest`]: https://crates.io/crates/reqwest
pub struct ReqwestBeaconTransport {
    thread: TransportThread,
}

impl ReqwestBeaconTransport {
    /// Creates a new transport with a default client.
    pub fn new() -> Self {
        Self::new_internal(None)
    }

    /// Creates a new transport that uses the specified [`ReqwestClient`].
    pub fn with_client(client: ReqwestClient) -> Self {
        Self::new_internal(Some(client))
    }

    fn new_internal(client: Option<ReqwestClient>) -> Self {
        let mut client = client;
        let thread = TransportThread::new(move |beacon: Beacon| {
            // the blocking client owns a runtime, so it is built on the worker
            if client.is_none() {
                match ReqwestClient::builder().user_agent(USER_AGENT).build() {
                    Ok(built) => client = Some(built),
                    Err(err) => {
                        rum_debug!("{}", Error::Transport(err.to_string()));
                        return;
                    }
                }
            }
            let client = match client.as_ref() {
                Some(client) => client,
                None => return,
            };

            let target = beacon.target().to_owned();
            let content_type = beacon.content_type().to_owned();
            let request = client
                .post(&target)
                .header(CONTENT_TYPE, content_type)
                .body(beacon.into_body());
            match request.send() {
                Ok(response) => {
                    rum_debug!("beacon to {} answered with {}", target, response.status());
                }
                Err(err) => {
                    rum_debug!("{}", Error::Transport(err.to_string()));
                }
            }
        });
        Self { thread }
    }

    /// Waits until queued beacons were handed to the network.
    ///
    /// Returns `false` if that did not happen within `timeout`.
    pub fn flush(&self, timeout: Duration) -> bool {
        self.thread.flush(timeout)
    }
}

impl Default for ReqwestBeaconTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestBeaconTransport {
    fn send_beacon(&self, beacon: Beacon) {
        self.thread.send(beacon)
    }
}
