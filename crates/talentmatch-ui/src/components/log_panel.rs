//! Floating log panel.
//!
//! # Design
//! - Subscribe to the log store and render every buffered record, oldest first.
//! - Scroll to the newest entry after each render.
//! - Messages are rendered as text nodes, so backend output is never parsed as markup.

use crate::core::connection::ConnectionState;
use crate::core::store::{LogStore, PanelRow};
use web_sys::HtmlElement;
use yew::prelude::*;
use yewdux::prelude::use_selector;

/// Localized labels for the panel chrome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PanelLabels {
    pub(crate) title: String,
    pub(crate) clear: String,
    pub(crate) close: String,
}

#[derive(Properties, PartialEq)]
pub(crate) struct LogPanelProps {
    pub(crate) labels: PanelLabels,
    pub(crate) on_clear: Callback<()>,
    pub(crate) on_close: Callback<()>,
}

#[function_component(LogPanel)]
pub(crate) fn log_panel(props: &LogPanelProps) -> Html {
    let rows = use_selector(LogStore::panel_rows);
    let connection = use_selector(|store: &LogStore| store.connection);
    let content_ref = use_node_ref();

    {
        let content_ref = content_ref.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(content) = content_ref.cast::<HtmlElement>() {
                    content.set_scroll_top(content.scroll_height());
                }
                || ()
            },
            rows.clone(),
        );
    }

    let on_clear = {
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| on_clear.emit(()))
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let status_class = match *connection {
        ConnectionState::Connected => "connected",
        ConnectionState::Connecting => "connecting",
        ConnectionState::Disconnected => "disconnected",
    };

    html! {
        <>
            <div class="log-header">
                <span class="log-title">
                    {props.labels.title.clone()}
                    <span class={classes!("log-status", status_class)} title={status_class}></span>
                </span>
                <div class="log-controls">
                    <button type="button" class="log-btn log-btn-clear" onclick={on_clear}>
                        {props.labels.clear.clone()}
                    </button>
                    <button
                        type="button"
                        class="log-btn log-btn-close"
                        aria-label={props.labels.close.clone()}
                        onclick={on_close}
                    >
                        {"×"}
                    </button>
                </div>
            </div>
            <div class="log-content" id="log-content-container" ref={content_ref}>
                {for rows.iter().map(render_row)}
            </div>
        </>
    }
}

fn render_row(row: &PanelRow) -> Html {
    html! {
        <div key={row.seq} class={classes!("log-entry", row.tone.class())}>
            <span class="log-timestamp">{row.timestamp.clone()}</span>
            <span class="log-message">{row.message.clone()}</span>
        </div>
    }
}
