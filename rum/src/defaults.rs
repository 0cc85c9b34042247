use std::rc::Rc;

use rum_core::AgentOptions;

use crate::transports::DefaultTransportFactory;

/// Fills in defaults the caller left out.
///
/// Currently this only installs the [`DefaultTransportFactory`] when no
/// transport was configured.
///
/// # Examples
///
/// ```
/// let options = rum::apply_defaults(rum::AgentOptions::default());
/// assert!(options.transport.is_some());
/// ```
pub fn apply_defaults(mut opts: AgentOptions) -> AgentOptions {
    if opts.transport.is_none() {
        opts.transport = Some(Rc::new(DefaultTransportFactory));
    }
    opts
}
