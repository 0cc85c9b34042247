use std::rc::Rc;

use crate::constants::BEACON_CONTENT_TYPE;
use crate::types::MetricSnapshot;
use crate::{AgentOptions, Error};

/// A serialized payload ready to be handed to a delivery primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Beacon {
    target: String,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Beacon {
    /// Creates a beacon with a text body.
    pub fn new<T: Into<String>>(target: T, body: Vec<u8>) -> Beacon {
        Beacon {
            target: target.into(),
            content_type: BEACON_CONTENT_TYPE,
            body,
        }
    }

    /// Serializes a snapshot into the flat JSON payload.
    pub fn from_snapshot<T: Into<String>>(
        target: T,
        snapshot: &MetricSnapshot,
    ) -> Result<Beacon, Error> {
        Ok(Beacon::new(target, serde_json::to_vec(snapshot)?))
    }

    /// Where the beacon is sent.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The content type of the body.
    pub fn content_type(&self) -> &str {
        self.content_type
    }

    /// The raw body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The body as text, if it is valid UTF-8.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Parses the body back into a snapshot.
    pub fn to_snapshot(&self) -> Result<MetricSnapshot, Error> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Consumes the beacon and returns the body.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

/// The delivery primitive the flushed payload is handed to.
///
/// Sending is fire-and-forget: implementations must not block, must keep the
/// delivery going after the caller is gone, and never report back whether it
/// arrived.
pub trait Transport {
    /// Queues a beacon for delivery.
    fn send_beacon(&self, beacon: Beacon);
}

impl<T: Transport + ?Sized> Transport for Rc<T> {
    fn send_beacon(&self, beacon: Beacon) {
        (**self).send_beacon(beacon)
    }
}

/// Creates the transport when the agent starts.
///
/// Implemented for closures returning a transport and for `Rc<T>` of any
/// transport, so a shared transport can be passed directly.
pub trait TransportFactory {
    /// Creates a transport for the given options.
    fn create_transport(&self, options: &AgentOptions) -> Rc<dyn Transport>;
}

impl<F> TransportFactory for F
where
    F: Fn(&AgentOptions) -> Rc<dyn Transport>,
{
    fn create_transport(&self, options: &AgentOptions) -> Rc<dyn Transport> {
        (*self)(options)
    }
}

impl<T: Transport + 'static> TransportFactory for Rc<T> {
    fn create_transport(&self, options: &AgentOptions) -> Rc<dyn Transport> {
        let _ = options;
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beacon_from_snapshot() {
        let mut snapshot = MetricSnapshot::new("https://example.com/");
        snapshot.record_fcp(95.0);
        let beacon = Beacon::from_snapshot("https://example.com/api/perf", &snapshot).unwrap();
        assert_eq!(beacon.target(), "https://example.com/api/perf");
        assert_eq!(beacon.content_type(), "text/plain;charset=UTF-8");
        assert_eq!(
            beacon.body_str().unwrap(),
            r#"{"url":"https://example.com/","dcl":0.0,"load":0.0,"fcp":95.0,"lcp":0.0,"cls":0.0,"fid":0.0}"#
        );
        assert_eq!(beacon.to_snapshot().unwrap(), snapshot);
    }
}
