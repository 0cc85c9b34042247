use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use url::Url;

use crate::constants::DEFAULT_ENDPOINT;
use crate::TransportFactory;

/// Wiring for an [`Agent`](crate::Agent).
///
/// # Examples
///
/// ```
/// let options = rum_core::AgentOptions {
///     endpoint: "/collect/vitals".into(),
///     ..Default::default()
/// };
/// assert_eq!(
///     options.resolve_target("https://example.com/shop/cart"),
///     "https://example.com/collect/vitals"
/// );
/// ```
#[derive(Clone)]
pub struct AgentOptions {
    /// The ingestion path, resolved against the page address.
    pub endpoint: Cow<'static, str>,
    /// Overrides the page address reported in the payload.
    pub url: Option<String>,
    /// Creates the transport. Without one, metrics are still collected but
    /// the flush is dropped.
    pub transport: Option<Rc<dyn TransportFactory>>,
}

impl AgentOptions {
    /// Creates default options.
    pub fn new() -> AgentOptions {
        AgentOptions::default()
    }

    /// Sets the ingestion path.
    #[must_use]
    pub fn with_endpoint<E: Into<Cow<'static, str>>>(mut self, endpoint: E) -> AgentOptions {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the reported page address.
    #[must_use]
    pub fn with_url<U: Into<String>>(mut self, url: U) -> AgentOptions {
        self.url = Some(url.into());
        self
    }

    /// Sets the transport factory.
    #[must_use]
    pub fn with_transport<T: TransportFactory + 'static>(mut self, transport: T) -> AgentOptions {
        self.transport = Some(Rc::new(transport));
        self
    }

    /// Resolves the endpoint against the page address.
    ///
    /// Falls back to the bare endpoint when the page address cannot serve as
    /// a base (for instance `about:blank`).
    pub fn resolve_target(&self, page_url: &str) -> String {
        match Url::parse(page_url).and_then(|base| base.join(&self.endpoint)) {
            Ok(target) => target.into(),
            Err(err) => {
                rum_debug!("cannot resolve {} against {:?}: {}", self.endpoint, page_url, err);
                self.endpoint.to_string()
            }
        }
    }
}

impl Default for AgentOptions {
    fn default() -> AgentOptions {
        AgentOptions {
            endpoint: Cow::Borrowed(DEFAULT_ENDPOINT),
            url: None,
            transport: None,
        }
    }
}

impl fmt::Debug for AgentOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[derive(Debug)]
        struct Factory;

        f.debug_struct("AgentOptions")
            .field("endpoint", &self.endpoint)
            .field("url", &self.url)
            .field("transport", &self.transport.as_ref().map(|_| Factory))
            .finish()
    }
}
