//! Locale-aware date formatting for server-rendered timestamps.
//!
//! Timestamps carrying an offset keep their wall-clock time; the pages render
//! backend times as recorded rather than converting to the viewer's zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::i18n::LocaleCode;

/// Text shown for unparseable input.
pub const INVALID_DATE: &str = "Invalid Date";

const NAIVE_FORMATS: [&str; 7] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse the date shapes the backend emits.
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let raw = input.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Format a timestamp as year, month, day, hour and minute for the locale.
#[must_use]
pub fn format_date(input: &str, locale: LocaleCode) -> String {
    let Some(parsed) = parse_date(input) else {
        return INVALID_DATE.to_string();
    };
    let pattern = match locale {
        LocaleCode::Zh => "%Y/%m/%d %H:%M",
        LocaleCode::En => "%m/%d/%Y, %H:%M",
    };
    parsed.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chinese_locale_uses_year_first() {
        assert_eq!(
            format_date("2024-03-05T09:07:00", LocaleCode::Zh),
            "2024/03/05 09:07"
        );
        assert_eq!(
            format_date("2024-03-05 18:30:12.123", LocaleCode::Zh),
            "2024/03/05 18:30"
        );
    }

    #[test]
    fn english_locale_uses_month_first() {
        assert_eq!(
            format_date("2024-12-31 23:59", LocaleCode::En),
            "12/31/2024, 23:59"
        );
    }

    #[test]
    fn offsets_keep_wall_clock_time() {
        assert_eq!(
            format_date("2024-03-05T09:07:00+08:00", LocaleCode::Zh),
            "2024/03/05 09:07"
        );
    }

    #[test]
    fn date_only_is_midnight() {
        assert_eq!(format_date("2024-01-02", LocaleCode::Zh), "2024/01/02 00:00");
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(format_date("yesterday", LocaleCode::En), INVALID_DATE);
        assert_eq!(format_date("", LocaleCode::Zh), INVALID_DATE);
    }
}
