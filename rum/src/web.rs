//! The browser binding.
//!
//! **Feature:** `web` (*disabled by default*)
//!
//! [`WebHost`] implements the host traits on top of `web-sys`, and
//! [`SendBeaconTransport`] delivers through `navigator.sendBeacon`, which the
//! browser keeps alive after the page is gone. [`start`] wires both into an
//! agent that lives for the rest of the page.
//!
//! ```rust,ignore
//! rum::web::start(rum::AgentOptions::default())?;
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, DocumentReadyState, EventTarget, Navigator, PerformanceEntry as JsPerformanceEntry,
    PerformanceObserver, PerformanceObserverEntryList, Window,
};

use rum_core::types::{EntryType, PerformanceEntry, ReadyState, VisibilityState};
use rum_core::{
    rum_debug, Agent, AgentOptions, Beacon, DocumentLifecycle, Error, Listener,
    PerformanceSource, RecordCallback, Scheduler, Task, Transport,
};

thread_local! {
    static AGENT: RefCell<Option<(Rc<WebHost>, Agent)>> = const { RefCell::new(None) };
}

/// The current browser page.
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// Binds to the global `window`.
    pub fn new() -> Result<WebHost, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        Ok(WebHost { window, document })
    }

    fn supports(&self, entry_type: EntryType) -> bool {
        let constructor = match Reflect::get(&self.window, &"PerformanceObserver".into()) {
            Ok(constructor) if constructor.is_function() => constructor,
            _ => return false,
        };
        match Reflect::get(&constructor, &"supportedEntryTypes".into())
            .ok()
            .and_then(|types| types.dyn_into::<Array>().ok())
        {
            Some(types) => types.includes(&entry_type.as_str().into(), 0),
            // older engines do not advertise; let `observe` decide
            None => true,
        }
    }
}

fn decode_entries(entries: Array) -> Result<Vec<PerformanceEntry>, Error> {
    entries
        .iter()
        .map(|value| {
            let entry: JsPerformanceEntry = value.unchecked_into();
            serde_wasm_bindgen::from_value(entry.to_json().into())
                .map_err(|err| Error::Decode(err.to_string()))
        })
        .collect()
}

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

fn add_listener(target: &EventTarget, event: &str, mut listener: Listener) {
    let closure = Closure::<dyn FnMut()>::new(move || listener());
    if let Err(err) =
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        rum_debug!("failed to listen for {}: {}", event, js_error(err));
    }
    closure.forget();
}

impl PerformanceSource for WebHost {
    fn observe(
        &self,
        entry_type: EntryType,
        buffered: bool,
        mut on_records: RecordCallback,
    ) -> Result<(), Error> {
        if !self.supports(entry_type) {
            return Err(Error::Unsupported(entry_type));
        }

        let callback = Closure::<dyn FnMut(PerformanceObserverEntryList)>::new(
            move |list: PerformanceObserverEntryList| match decode_entries(list.get_entries()) {
                Ok(records) => on_records(records),
                Err(err) => rum_debug!("dropped {} batch: {}", entry_type, err),
            },
        );
        let observer = PerformanceObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|_| Error::Unsupported(entry_type))?;

        let init = Object::new();
        Reflect::set(&init, &"type".into(), &entry_type.as_str().into())
            .and_then(|_| Reflect::set(&init, &"buffered".into(), &buffered.into()))
            .and_then(|_| Reflect::get(&observer, &"observe".into()))
            .and_then(|observe| observe.dyn_into::<Function>())
            .and_then(|observe| observe.call1(&observer, &init))
            .map_err(|_| Error::Unsupported(entry_type))?;

        // observers live as long as the page
        callback.forget();
        Ok(())
    }

    fn entries_by_type(&self, entry_type: EntryType) -> Vec<PerformanceEntry> {
        let performance = match self.window.performance() {
            Some(performance) => performance,
            None => return Vec::new(),
        };
        match decode_entries(performance.get_entries_by_type(entry_type.as_str())) {
            Ok(entries) => entries,
            Err(err) => {
                rum_debug!("failed to read {} entries: {}", entry_type, err);
                Vec::new()
            }
        }
    }
}

impl DocumentLifecycle for WebHost {
    fn url(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn ready_state(&self) -> ReadyState {
        match self.document.ready_state() {
            DocumentReadyState::Complete => ReadyState::Complete,
            DocumentReadyState::Interactive => ReadyState::Interactive,
            _ => ReadyState::Loading,
        }
    }

    fn on_ready_state_change(&self, listener: Listener) {
        add_listener(&self.document, "readystatechange", listener);
    }

    fn visibility_state(&self) -> VisibilityState {
        match self.document.visibility_state() {
            web_sys::VisibilityState::Hidden => VisibilityState::Hidden,
            _ => VisibilityState::Visible,
        }
    }

    fn on_visibility_change(&self, listener: Listener) {
        add_listener(&self.document, "visibilitychange", listener);
    }
}

impl Scheduler for WebHost {
    fn schedule(&self, task: Task) {
        let callback = Closure::once_into_js(move || task());
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
        {
            rum_debug!("failed to schedule task: {}", js_error(err));
        }
    }
}

/// A [`Transport`] that hands beacons to `navigator.sendBeacon`.
///
/// The browser queues the request and completes it even if the page is torn
/// down right after the call.
pub struct SendBeaconTransport {
    navigator: Navigator,
}

impl SendBeaconTransport {
    /// Binds to the global `navigator`.
    pub fn new() -> Result<SendBeaconTransport, JsValue> {
        let window = web_sys::window().ok_or("No window")?;
        Ok(SendBeaconTransport {
            navigator: window.navigator(),
        })
    }
}

impl Transport for SendBeaconTransport {
    fn send_beacon(&self, beacon: Beacon) {
        match self
            .navigator
            .send_beacon_with_opt_str(beacon.target(), beacon.body_str())
        {
            Ok(true) => {}
            Ok(false) => rum_debug!(
                "{}",
                Error::Transport(format!("{} was not queued", beacon.target()))
            ),
            Err(err) => rum_debug!("{}", Error::Transport(js_error(err))),
        }
    }
}

/// Starts the agent on the current page.
///
/// Without a configured transport, beacons go through
/// `navigator.sendBeacon`. Calling this again on the same page does nothing.
pub fn start(options: AgentOptions) -> Result<(), JsValue> {
    if AGENT.with(|slot| slot.borrow().is_some()) {
        rum_debug!("agent already running on this page");
        return Ok(());
    }

    let host = Rc::new(WebHost::new()?);
    let options = match options.transport {
        Some(_) => options,
        None => options.with_transport(Rc::new(SendBeaconTransport::new()?)),
    };
    let agent = Agent::start(host.clone(), options);
    AGENT.with(|slot| *slot.borrow_mut() = Some((host, agent)));
    Ok(())
}

/// Starts the agent with default options. Exported to JavaScript as
/// `startRum`.
#[wasm_bindgen(js_name = startRum)]
pub fn start_rum() -> Result<(), JsValue> {
    start(AgentOptions::default())
}
