//! Alert and toast presentation tokens (Bootstrap contextual classes and icons).

/// Auto-dismiss delay for transient alerts.
pub const ALERT_DISMISS_MS: u32 = 5_000;
/// Default toast lifetime.
pub const DEFAULT_TOAST_MS: u32 = 2_000;

/// Severity of an alert or toast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NoticeKind {
    /// Positive confirmation.
    Success,
    /// Failure.
    Danger,
    /// Needs attention.
    Warning,
    /// Neutral information.
    #[default]
    Info,
    /// Background work in progress.
    Primary,
}

impl NoticeKind {
    /// Bootstrap contextual suffix (`alert-*`, `bg-*`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Primary => "primary",
        }
    }

    /// Parse a loose kind name; `error` is accepted as an alias of `danger`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "danger" | "error" => Self::Danger,
            "warning" => Self::Warning,
            "primary" => Self::Primary,
            _ => Self::Info,
        }
    }

    /// Bootstrap Icons class shown in toasts.
    #[must_use]
    pub const fn icon_class(self) -> &'static str {
        match self {
            Self::Success => "bi bi-check-circle-fill me-2",
            Self::Danger => "bi bi-x-octagon-fill me-2",
            Self::Warning => "bi bi-exclamation-triangle-fill me-2",
            Self::Info => "bi bi-info-circle-fill me-2",
            Self::Primary => "bi bi-gear-wide-connected me-2",
        }
    }

    /// Class list for a dismissible alert banner.
    #[must_use]
    pub fn alert_class(self) -> String {
        format!("alert alert-{} alert-dismissible fade show", self.as_str())
    }

    /// Class list for a toast.
    #[must_use]
    pub fn toast_class(self) -> String {
        format!(
            "toast align-items-center text-white bg-{} border-0 fade-in",
            self.as_str()
        )
    }
}

/// Toast lifetime for an optional caller request.
///
/// `None` selects [`DEFAULT_TOAST_MS`]; `Some(0)` keeps the toast until it is dismissed.
#[must_use]
pub fn toast_duration(requested: Option<u32>) -> u32 {
    requested.unwrap_or(DEFAULT_TOAST_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_error_alias() {
        assert_eq!(NoticeKind::parse("error"), NoticeKind::Danger);
        assert_eq!(NoticeKind::parse(" Success "), NoticeKind::Success);
        assert_eq!(NoticeKind::parse("unknown"), NoticeKind::Info);
    }

    #[test]
    fn classes_use_contextual_suffix() {
        assert_eq!(
            NoticeKind::Warning.alert_class(),
            "alert alert-warning alert-dismissible fade show"
        );
        assert_eq!(
            NoticeKind::Danger.toast_class(),
            "toast align-items-center text-white bg-danger border-0 fade-in"
        );
    }

    #[test]
    fn toast_duration_defaults_to_two_seconds() {
        assert_eq!(toast_duration(None), 2_000);
        assert_eq!(toast_duration(Some(0)), 0);
        assert_eq!(toast_duration(Some(750)), 750);
    }

    #[test]
    fn every_kind_has_an_icon() {
        for kind in [
            NoticeKind::Success,
            NoticeKind::Danger,
            NoticeKind::Warning,
            NoticeKind::Info,
            NoticeKind::Primary,
        ] {
            assert!(kind.icon_class().starts_with("bi bi-"));
        }
    }
}
