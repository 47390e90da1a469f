//! Lifecycle of the floating log panel.
//!
//! # Design
//! - The host element and the Yew app exist only while the panel is visible.
//! - Opening is idempotent, and only the host element created here is ever removed.
//! - The stylesheet is injected once per page and survives panel close.

use gloo::console;
use gloo::utils::document;
use web_sys::Element;
use yew::AppHandle;

use crate::components::log_panel::{LogPanel, LogPanelProps};

pub(crate) const PANEL_ID: &str = "frontend-log-panel";
pub(crate) const STYLE_ID: &str = "frontend-logger-styles";

const PANEL_CSS: &str = r"
#frontend-log-panel {
    position: fixed;
    bottom: 20px;
    right: 20px;
    width: 600px;
    height: 400px;
    background: rgba(255, 255, 255, 0.95);
    border: 1px solid #dee2e6;
    border-radius: 8px;
    box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
    z-index: 9999;
    font-family: 'Consolas', 'Monaco', 'Courier New', monospace;
    font-size: 12px;
    backdrop-filter: blur(10px);
}
.log-header {
    background: #f8f9fa;
    padding: 8px 12px;
    border-bottom: 1px solid #dee2e6;
    border-radius: 8px 8px 0 0;
    display: flex;
    justify-content: space-between;
    align-items: center;
}
.log-title { font-weight: bold; color: #495057; }
.log-status {
    display: inline-block;
    width: 8px;
    height: 8px;
    margin-left: 8px;
    border-radius: 50%;
    background: #dc3545;
}
.log-status.connecting { background: #ffc107; }
.log-status.connected { background: #28a745; }
.log-controls { display: flex; gap: 8px; }
.log-btn {
    background: none;
    border: 1px solid #dee2e6;
    border-radius: 4px;
    padding: 2px 8px;
    font-size: 11px;
    cursor: pointer;
    transition: all 0.2s;
}
.log-btn:hover { background: #e9ecef; }
.log-btn-close { font-size: 14px; font-weight: bold; color: #dc3545; }
.log-content {
    height: calc(100% - 40px);
    overflow-y: auto;
    padding: 8px;
    background: #000;
    color: #fff;
    border-radius: 0 0 8px 8px;
}
.log-entry { margin-bottom: 2px; line-height: 1.3; word-wrap: break-word; }
.log-timestamp { color: #6c757d; margin-right: 8px; font-size: 10px; }
.log-message { color: #fff; }
.log-entry.log-error .log-message { color: #ff6b6b; }
.log-entry.log-success .log-message { color: #51cf66; }
.log-entry.log-start .log-message { color: #74c0fc; }
.log-content::-webkit-scrollbar { width: 6px; }
.log-content::-webkit-scrollbar-track { background: #2d3748; }
.log-content::-webkit-scrollbar-thumb { background: #4a5568; border-radius: 3px; }
.log-content::-webkit-scrollbar-thumb:hover { background: #68767e; }
";

/// Owner of the mounted panel, if any.
#[derive(Default)]
pub(crate) struct PanelHost {
    handle: Option<AppHandle<LogPanel>>,
    host: Option<Element>,
}

impl PanelHost {
    /// Mount the panel. Returns whether it is mounted afterwards.
    ///
    /// A `#frontend-log-panel` element this host did not create is left alone and the
    /// panel stays unmounted.
    pub(crate) fn open(&mut self, props: LogPanelProps) -> bool {
        if self.handle.is_some() {
            return true;
        }
        let document = document();
        if document.get_element_by_id(PANEL_ID).is_some() {
            console::warn!(format!("log panel: #{PANEL_ID} already exists on the page"));
            return false;
        }
        ensure_styles();
        let Some(body) = document.body() else {
            console::error!("log panel: document body unavailable");
            return false;
        };
        let host = match document.create_element("div") {
            Ok(host) => host,
            Err(err) => {
                console::error!("log panel: create host failed", err);
                return false;
            }
        };
        host.set_id(PANEL_ID);
        if let Err(err) = body.append_child(&host) {
            console::error!("log panel: attach host failed", err);
            return false;
        }
        let handle =
            yew::Renderer::<LogPanel>::with_root_and_props(host.clone(), props).render();
        self.handle = Some(handle);
        self.host = Some(host);
        true
    }

    /// Destroy the panel and remove the host element this host created.
    pub(crate) fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.destroy();
        }
        if let Some(host) = self.host.take() {
            host.remove();
        }
    }
}

fn ensure_styles() {
    let document = document();
    if document.get_element_by_id(STYLE_ID).is_some() {
        return;
    }
    let Some(head) = document.head() else {
        return;
    };
    match document.create_element("style") {
        Ok(style) => {
            style.set_id(STYLE_ID);
            style.set_text_content(Some(PANEL_CSS));
            if let Err(err) = head.append_child(&style) {
                console::error!("log panel: style injection failed", err);
            }
        }
        Err(err) => console::error!("log panel: create style failed", err),
    }
}
