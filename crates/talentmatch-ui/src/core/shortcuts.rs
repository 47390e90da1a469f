//! Keyboard shortcuts understood by the log client.

/// Semantic action behind a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoggerShortcut {
    /// Show or hide the log panel.
    TogglePanel,
}

/// Map a `keydown` to a shortcut. Only Ctrl+Shift+L is bound.
#[must_use]
pub fn interpret_shortcut(key: &str, ctrl: bool, shift: bool) -> Option<LoggerShortcut> {
    match key {
        "L" | "l" if ctrl && shift => Some(LoggerShortcut::TogglePanel),
        _ => None,
    }
}
