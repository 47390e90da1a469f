//! Styled developer-console output for the log client.

use gloo::console;

use crate::core::console_style::ConsoleStyle;
use crate::i18n::TranslationBundle;

const BANNER_TITLE: &str = "color: #28a745; font-weight: bold; font-size: 14px;";
const BANNER_STREAM: &str = "color: #17a2b8; font-size: 12px;";
const BANNER_HINT: &str = "color: #6c757d; font-size: 11px;";
const RULE: &str = "color: #dee2e6;";
const CONNECTED: &str = "color: #28a745; font-weight: bold;";
const WARNING: &str = "color: #ffc107; font-weight: bold;";
const INIT: &str = "color: #17a2b8;";
const PANEL_OPENED: &str = "color: #28a745; font-weight: bold;";
const PANEL_CLOSED: &str = "color: #6c757d;";
const CLEARED: &str = "color: #28a745;";

fn styled(text: &str, css: &str) {
    console::log!(format!("%c{text}"), css);
}

pub(crate) fn startup_banner(bundle: &TranslationBundle) {
    styled(&bundle.text("logger.banner_title", "TalentMatch Frontend Logger"), BANNER_TITLE);
    styled(&bundle.text("logger.banner_stream", ""), BANNER_STREAM);
    styled(&bundle.text("logger.banner_shortcut", ""), BANNER_HINT);
    styled(&"=".repeat(60), RULE);
}

pub(crate) fn connected(bundle: &TranslationBundle) {
    styled(&bundle.text("logger.connected", "Log stream connected"), CONNECTED);
}

pub(crate) fn interrupted(bundle: &TranslationBundle, reason: &str) {
    console::warn!(
        format!("%c{}", bundle.text("logger.disconnected", "Log stream interrupted")),
        WARNING,
        reason
    );
}

pub(crate) fn init_banner(message: &str) {
    styled(&format!("🔗 {message}"), INIT);
}

pub(crate) fn record(message: &str, style: ConsoleStyle) {
    styled(message, style.css());
}

pub(crate) fn panel_toggled(bundle: &TranslationBundle, visible: bool) {
    if visible {
        styled(&bundle.text("logger.panel_opened", "Log panel opened"), PANEL_OPENED);
    } else {
        styled(&bundle.text("logger.panel_closed", "Log panel closed"), PANEL_CLOSED);
    }
}

pub(crate) fn cleared(bundle: &TranslationBundle) {
    web_sys::console::clear();
    styled(&bundle.text("logger.cleared", "Logs cleared"), CLEARED);
}
