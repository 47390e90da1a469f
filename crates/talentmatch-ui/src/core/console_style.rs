//! Cosmetic classification of backend log lines.
//!
//! # Design
//! - Classification is substring matching on the backend's tag markers, not parsing.
//! - Rules are data: an ordered table where the first matching marker claims the line.
//! - A claimed line only consults its own qualifiers; unmatched qualifiers fall back
//!   to the rule's fallback style instead of continuing down the table.

/// Marker emitted by the backend before a model request.
pub const MODEL_REQUEST: &str = "🤖 MODEL REQUEST";
/// Marker emitted by the backend for a model response.
pub const MODEL_RESPONSE: &str = "🤖 MODEL RESPONSE";
/// Marker for long-running processing steps (two spaces after the emoji).
pub const PROCESSING: &str = "⚙️  PROCESSING";
/// Marker for batch jobs.
pub const BATCH: &str = "📦 BATCH";
/// Marker for personal-data redaction steps.
pub const DESENSITIZATION: &str = "🔒 DESENSITIZATION";
/// Success qualifier for responses.
pub const SUCCESS: &str = "✅ SUCCESS";
/// Error qualifier shared by responses and processing steps.
pub const ERROR: &str = "❌ ERROR";
/// Start qualifier for processing steps.
pub const START: &str = "🚀 START";
/// Completion qualifier for processing steps.
pub const COMPLETE: &str = "✅ COMPLETE";

/// Console style bucket for a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleStyle {
    /// Outgoing model request.
    Request,
    /// Successful model response.
    ResponseSuccess,
    /// Failed model response.
    ResponseError,
    /// Processing step started.
    ProcessingStart,
    /// Processing step completed.
    ProcessingComplete,
    /// Processing step failed.
    ProcessingError,
    /// Batch job line.
    Batch,
    /// Redaction step line.
    Redaction,
    /// Anything else.
    Neutral,
}

impl ConsoleStyle {
    /// CSS passed to `console.log` through the `%c` directive.
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Request => "color: #007bff; font-weight: bold;",
            Self::ResponseSuccess => "color: #28a745; font-weight: bold;",
            Self::ResponseError => "color: #dc3545; font-weight: bold;",
            Self::ProcessingStart => "color: #17a2b8;",
            Self::ProcessingComplete => "color: #28a745;",
            Self::ProcessingError => "color: #dc3545;",
            Self::Batch => "color: #6f42c1;",
            Self::Redaction => "color: #fd7e14;",
            Self::Neutral => "color: #6c757d;",
        }
    }
}

/// One row of the classification table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Marker that claims the line for this rule.
    pub marker: &'static str,
    /// Qualifiers checked in order once the marker matched.
    pub qualifiers: &'static [(&'static str, ConsoleStyle)],
    /// Style used when no qualifier matched.
    pub fallback: ConsoleStyle,
}

impl StyleRule {
    fn resolve(&self, message: &str) -> Option<ConsoleStyle> {
        if !message.contains(self.marker) {
            return None;
        }
        let style = self
            .qualifiers
            .iter()
            .find(|(qualifier, _)| message.contains(qualifier))
            .map_or(self.fallback, |(_, style)| *style);
        Some(style)
    }
}

/// Priority-ordered classification table.
pub const CONSOLE_RULES: &[StyleRule] = &[
    StyleRule {
        marker: MODEL_REQUEST,
        qualifiers: &[],
        fallback: ConsoleStyle::Request,
    },
    StyleRule {
        marker: MODEL_RESPONSE,
        qualifiers: &[
            (SUCCESS, ConsoleStyle::ResponseSuccess),
            (ERROR, ConsoleStyle::ResponseError),
        ],
        fallback: ConsoleStyle::Neutral,
    },
    StyleRule {
        marker: PROCESSING,
        qualifiers: &[
            (START, ConsoleStyle::ProcessingStart),
            (COMPLETE, ConsoleStyle::ProcessingComplete),
            (ERROR, ConsoleStyle::ProcessingError),
        ],
        fallback: ConsoleStyle::Neutral,
    },
    StyleRule {
        marker: BATCH,
        qualifiers: &[],
        fallback: ConsoleStyle::Batch,
    },
    StyleRule {
        marker: DESENSITIZATION,
        qualifiers: &[],
        fallback: ConsoleStyle::Redaction,
    },
];

/// Pick the console style for a message using [`CONSOLE_RULES`].
#[must_use]
pub fn classify(message: &str) -> ConsoleStyle {
    classify_with(CONSOLE_RULES, message)
}

/// Pick a style from an arbitrary rule table, first match wins.
#[must_use]
pub fn classify_with(rules: &[StyleRule], message: &str) -> ConsoleStyle {
    rules
        .iter()
        .find_map(|rule| rule.resolve(message))
        .unwrap_or(ConsoleStyle::Neutral)
}

/// Colour tone of a rendered panel entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryTone {
    /// Contains an error qualifier.
    Error,
    /// Contains a success or completion qualifier.
    Success,
    /// Contains a start qualifier.
    Start,
    /// No tone.
    Plain,
}

impl EntryTone {
    /// Extra CSS class for the entry, if any.
    #[must_use]
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Error => Some("log-error"),
            Self::Success => Some("log-success"),
            Self::Start => Some("log-start"),
            Self::Plain => None,
        }
    }
}

/// Pick the panel tone for a message.
#[must_use]
pub fn entry_tone(message: &str) -> EntryTone {
    if message.contains(ERROR) {
        EntryTone::Error
    } else if message.contains(SUCCESS) || message.contains(COMPLETE) {
        EntryTone::Success
    } else if message.contains(START) {
        EntryTone::Start
    } else {
        EntryTone::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_map_to_their_buckets() {
        assert_eq!(classify("🤖 MODEL REQUEST | gpt"), ConsoleStyle::Request);
        assert_eq!(
            classify("🤖 MODEL RESPONSE | ✅ SUCCESS"),
            ConsoleStyle::ResponseSuccess
        );
        assert_eq!(
            classify("🤖 MODEL RESPONSE | ❌ ERROR"),
            ConsoleStyle::ResponseError
        );
        assert_eq!(
            classify("⚙️  PROCESSING | 🚀 START"),
            ConsoleStyle::ProcessingStart
        );
        assert_eq!(
            classify("⚙️  PROCESSING | ✅ COMPLETE"),
            ConsoleStyle::ProcessingComplete
        );
        assert_eq!(
            classify("⚙️  PROCESSING | ❌ ERROR"),
            ConsoleStyle::ProcessingError
        );
        assert_eq!(classify("📦 BATCH 3/10"), ConsoleStyle::Batch);
        assert_eq!(classify("🔒 DESENSITIZATION done"), ConsoleStyle::Redaction);
        assert_eq!(classify("plain line"), ConsoleStyle::Neutral);
    }

    #[test]
    fn response_error_never_selects_success_or_default() {
        let markers = [MODEL_REQUEST, PROCESSING, BATCH, DESENSITIZATION, SUCCESS];
        for extra in markers {
            let message = format!("🤖 MODEL RESPONSE ❌ ERROR {extra}");
            let style = classify(&message);
            if extra == MODEL_REQUEST {
                assert_eq!(style, ConsoleStyle::Request, "{message}");
            } else if extra == SUCCESS {
                // success qualifier is listed before error for responses
                assert_eq!(style, ConsoleStyle::ResponseSuccess, "{message}");
            } else {
                assert_eq!(style, ConsoleStyle::ResponseError, "{message}");
            }
        }
    }

    #[test]
    fn earlier_rules_win_across_marker_combinations() {
        let ordered = [MODEL_REQUEST, MODEL_RESPONSE, PROCESSING, BATCH, DESENSITIZATION];
        for (high_idx, high) in ordered.iter().enumerate() {
            for low in &ordered[high_idx + 1..] {
                let both = format!("{low} {high}");
                let alone = classify(high);
                assert_eq!(classify(&both), alone, "{both}");
            }
        }
    }

    #[test]
    fn claimed_rule_does_not_fall_through() {
        assert_eq!(
            classify("🤖 MODEL RESPONSE pending 📦 BATCH"),
            ConsoleStyle::Neutral
        );
        assert_eq!(
            classify("⚙️  PROCESSING queued 🔒 DESENSITIZATION"),
            ConsoleStyle::Neutral
        );
    }

    #[test]
    fn processing_requires_two_space_marker() {
        assert_eq!(classify("⚙️ PROCESSING 🚀 START"), ConsoleStyle::Neutral);
    }

    #[test]
    fn custom_tables_are_respected() {
        const RULES: &[StyleRule] = &[StyleRule {
            marker: "WARN",
            qualifiers: &[],
            fallback: ConsoleStyle::Batch,
        }];
        assert_eq!(classify_with(RULES, "WARN disk"), ConsoleStyle::Batch);
        assert_eq!(classify_with(RULES, "🤖 MODEL REQUEST"), ConsoleStyle::Neutral);
    }

    #[test]
    fn entry_tone_prefers_errors() {
        assert_eq!(entry_tone("🚀 START ❌ ERROR"), EntryTone::Error);
        assert_eq!(entry_tone("✅ COMPLETE"), EntryTone::Success);
        assert_eq!(entry_tone("✅ SUCCESS 🚀 START"), EntryTone::Success);
        assert_eq!(entry_tone("🚀 START"), EntryTone::Start);
        assert_eq!(entry_tone("idle"), EntryTone::Plain);
        assert_eq!(EntryTone::Error.class(), Some("log-error"));
        assert_eq!(EntryTone::Plain.class(), None);
    }
}
