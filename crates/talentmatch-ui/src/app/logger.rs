//! Browser-side client for the backend log stream.
//!
//! # Design
//! - One explicit client object owns the stream, the reconnect timer and the panel.
//! - Reconnect policy lives in [`ConnectionMachine`]; this module only arms timers and
//!   follows its decisions.
//! - Timer and panel callbacks defer their work through `spawn_local` so a timer or a
//!   component is never torn down from inside its own callback.
//! - Event listeners hold weak references; only the unload hook keeps the client alive.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::console;
use gloo::events::EventListener;
use gloo::utils::{document, window};
use gloo_timers::callback::Timeout;
use js_sys::Date;
use talentmatch_events::decode_event;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::Callback;
use yew::platform::spawn_local;
use yewdux::prelude::Dispatch;

use crate::app::console as log_console;
use crate::app::log_stream::{LogStreamHandle, StreamCallbacks, open_log_stream};
use crate::app::panel::PanelHost;
use crate::components::log_panel::{LogPanelProps, PanelLabels};
use crate::core::config::LoggerConfig;
use crate::core::connection::{
    AttemptId, ConnectionMachine, ConnectionState, ReconnectDecision, ReconnectTicket,
};
use crate::core::shortcuts::{LoggerShortcut, interpret_shortcut};
use crate::core::store::{EventOutcome, LogStore};
use crate::i18n::TranslationBundle;

/// Handle to the page's log stream client.
#[derive(Clone)]
pub struct FrontendLogger {
    inner: Rc<LoggerInner>,
}

struct LoggerInner {
    config: LoggerConfig,
    bundle: TranslationBundle,
    dispatch: Dispatch<LogStore>,
    machine: RefCell<ConnectionMachine>,
    stream: RefCell<Option<LogStreamHandle>>,
    reconnect: RefCell<Option<Timeout>>,
    panel: RefCell<PanelHost>,
    listeners: RefCell<Vec<EventListener>>,
}

impl FrontendLogger {
    /// Create a client without touching the page.
    #[must_use]
    pub fn new(config: LoggerConfig, bundle: TranslationBundle) -> Self {
        let dispatch = Dispatch::<LogStore>::new();
        let capacity = config.capacity;
        dispatch.reduce_mut(|store| store.set_capacity(capacity));
        Self {
            inner: Rc::new(LoggerInner {
                machine: RefCell::new(ConnectionMachine::new(config.reconnect_delay_ms)),
                config,
                bundle,
                dispatch,
                stream: RefCell::new(None),
                reconnect: RefCell::new(None),
                panel: RefCell::new(PanelHost::default()),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Create a client and attach it to the page.
    ///
    /// In verbose mode the keyboard shortcut is bound, the startup banner is printed
    /// once the page has loaded and the stream is opened. The unload hook is always
    /// registered.
    #[must_use]
    pub fn install(config: LoggerConfig, bundle: TranslationBundle) -> Self {
        let logger = Self::new(config, bundle);
        if logger.inner.config.verbose {
            bind_shortcut(&logger.inner);
            schedule_banner(&logger.inner);
            connect(&logger.inner);
        }
        let owner = Rc::clone(&logger.inner);
        EventListener::new(&window(), "beforeunload", move |_| disconnect(&owner)).forget();
        logger
    }

    /// Open a fresh stream, replacing any previous one and any pending reconnect.
    pub fn connect(&self) {
        connect(&self.inner);
    }

    /// Close the stream, cancel the reconnect timer and remove the panel.
    pub fn disconnect(&self) {
        disconnect(&self.inner);
    }

    /// Show or hide the log panel. Returns the new visibility.
    pub fn toggle_panel(&self) -> bool {
        toggle_panel(&self.inner)
    }

    /// Drop every buffered record and clear the developer console.
    pub fn clear_logs(&self) {
        clear_logs(&self.inner);
    }

    /// Current connection state.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.inner.machine.borrow().state()
    }

    /// Effective configuration.
    #[must_use]
    pub fn config(&self) -> &LoggerConfig {
        &self.inner.config
    }
}

/// Monotonic milliseconds for reconnect bookkeeping; wall-clock only without
/// `performance`.
fn now_ms() -> u64 {
    window()
        .performance()
        .map_or_else(Date::now, |performance| performance.now()) as u64
}

fn sync_connection(inner: &LoggerInner) {
    let state = inner.machine.borrow().state();
    inner.dispatch.reduce_mut(|store| store.set_connection(state));
}

fn bind_shortcut(inner: &Rc<LoggerInner>) {
    let weak = Rc::downgrade(inner);
    let listener = EventListener::new(&document(), "keydown", move |event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if interpret_shortcut(&event.key(), event.ctrl_key(), event.shift_key())
            == Some(LoggerShortcut::TogglePanel)
        {
            event.prevent_default();
            if let Some(inner) = weak.upgrade() {
                toggle_panel(&inner);
            }
        }
    });
    inner.listeners.borrow_mut().push(listener);
}

fn schedule_banner(inner: &Rc<LoggerInner>) {
    if document().ready_state() == "complete" {
        log_console::startup_banner(&inner.bundle);
        return;
    }
    let weak = Rc::downgrade(inner);
    let listener = EventListener::once(&window(), "load", move |_| {
        if let Some(inner) = weak.upgrade() {
            log_console::startup_banner(&inner.bundle);
        }
    });
    inner.listeners.borrow_mut().push(listener);
}

fn connect(inner: &Rc<LoggerInner>) {
    close_stream(inner);
    inner.reconnect.borrow_mut().take();
    let attempt = inner.machine.borrow_mut().begin_connect();
    sync_connection(inner);

    let weak = Rc::downgrade(inner);
    let callbacks = StreamCallbacks {
        on_open: with_logger(&weak, move |inner, ()| handle_open(inner, attempt)),
        on_payload: with_logger(&weak, |inner, payload: String| handle_payload(inner, &payload)),
        on_error: with_logger(&weak, move |inner, reason: String| {
            handle_error(inner, attempt, &reason);
        }),
    };
    match open_log_stream(inner.config.endpoint.clone(), callbacks) {
        Ok(handle) => *inner.stream.borrow_mut() = Some(handle),
        Err(err) => {
            console::error!(
                inner.bundle.text("logger.connect_failed", "Log stream connection failed"),
                err.to_string()
            );
            inner.machine.borrow_mut().disconnect();
            sync_connection(inner);
        }
    }
}

fn with_logger<T: 'static>(
    weak: &Weak<LoggerInner>,
    handler: impl Fn(&Rc<LoggerInner>, T) + 'static,
) -> Callback<T> {
    let weak = weak.clone();
    Callback::from(move |value: T| {
        if let Some(inner) = weak.upgrade() {
            handler(&inner, value);
        }
    })
}

fn close_stream(inner: &LoggerInner) {
    if let Some(handle) = inner.stream.borrow_mut().take() {
        handle.close();
    }
}

fn handle_open(inner: &Rc<LoggerInner>, attempt: AttemptId) {
    let opened = inner.machine.borrow_mut().on_open(attempt);
    if !opened {
        return;
    }
    sync_connection(inner);
    if inner.config.verbose {
        log_console::connected(&inner.bundle);
    }
}

fn handle_error(inner: &Rc<LoggerInner>, attempt: AttemptId, reason: &str) {
    let ticket = inner.machine.borrow_mut().on_error(attempt, now_ms());
    let Some(ticket) = ticket else {
        return;
    };
    inner.stream.borrow_mut().take();
    sync_connection(inner);
    if inner.config.verbose {
        log_console::interrupted(&inner.bundle, reason);
    }
    arm_reconnect(inner, ticket, ticket.delay_ms);
}

fn arm_reconnect(inner: &Rc<LoggerInner>, ticket: ReconnectTicket, delay_ms: u32) {
    let weak = Rc::downgrade(inner);
    let timer = Timeout::new(delay_ms, move || {
        spawn_local(async move {
            if let Some(inner) = weak.upgrade() {
                reconnect_fired(&inner, ticket);
            }
        });
    });
    *inner.reconnect.borrow_mut() = Some(timer);
}

fn reconnect_fired(inner: &Rc<LoggerInner>, ticket: ReconnectTicket) {
    let decision = inner.machine.borrow_mut().poll_reconnect(ticket, now_ms());
    match decision {
        ReconnectDecision::Reconnect => connect(inner),
        ReconnectDecision::Wait(remaining_ms) => arm_reconnect(inner, ticket, remaining_ms),
        ReconnectDecision::Skip => {
            inner.reconnect.borrow_mut().take();
        }
    }
}

fn handle_payload(inner: &Rc<LoggerInner>, payload: &str) {
    let event = match decode_event(payload) {
        Ok(event) => event,
        Err(err) => {
            console::error!(
                inner.bundle.text("logger.parse_failed", "Failed to parse log payload"),
                err.to_string(),
                payload
            );
            return;
        }
    };
    let verbose = inner.config.verbose;
    let mut outcome = EventOutcome::Ignored;
    inner
        .dispatch
        .reduce_mut(|store| outcome = store.apply_event(event, verbose));
    match outcome {
        EventOutcome::Banner(message) => log_console::init_banner(&message),
        EventOutcome::Appended { record, style } if verbose => {
            log_console::record(&record.message, style);
        }
        EventOutcome::Appended { .. } | EventOutcome::Ignored => {}
    }
}

fn toggle_panel(inner: &Rc<LoggerInner>) -> bool {
    let requested = !inner.dispatch.get().panel_visible;
    let mounted = if requested {
        let props = panel_props(inner);
        inner.panel.borrow_mut().open(props)
    } else {
        inner.panel.borrow_mut().close();
        false
    };
    let mut visible = false;
    inner
        .dispatch
        .reduce_mut(|store| visible = store.commit_panel(requested, mounted));
    if visible == requested {
        log_console::panel_toggled(&inner.bundle, visible);
    }
    visible
}

fn panel_props(inner: &Rc<LoggerInner>) -> LogPanelProps {
    let weak = Rc::downgrade(inner);
    let close_target = weak.clone();
    LogPanelProps {
        labels: PanelLabels {
            title: inner.bundle.text("panel.title", "Backend Logs"),
            clear: inner.bundle.text("panel.clear", "Clear"),
            close: inner.bundle.text("panel.close", "Close"),
        },
        on_clear: with_logger(&weak, |inner, ()| clear_logs(inner)),
        on_close: Callback::from(move |()| {
            let target = close_target.clone();
            spawn_local(async move {
                if let Some(inner) = target.upgrade()
                    && inner.dispatch.get().panel_visible
                {
                    toggle_panel(&inner);
                }
            });
        }),
    }
}

fn clear_logs(inner: &Rc<LoggerInner>) {
    inner.dispatch.reduce_mut(LogStore::clear_logs);
    log_console::cleared(&inner.bundle);
}

fn disconnect(inner: &Rc<LoggerInner>) {
    close_stream(inner);
    inner.reconnect.borrow_mut().take();
    inner.machine.borrow_mut().disconnect();
    sync_connection(inner);
    inner.panel.borrow_mut().close();
    inner.dispatch.reduce_mut(|store| {
        store.commit_panel(false, false);
    });
}
