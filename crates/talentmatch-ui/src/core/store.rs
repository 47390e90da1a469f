//! Log client yewdux store.
//!
//! # Design
//! - One store holds the scrollback, the connection badge state and panel visibility.
//! - Reducers are plain methods so the record rules are testable natively.
//! - The panel renders straight from the buffer, so it can never hold more rows than
//!   the buffer or show a record twice.

use talentmatch_events::{LogEvent, LogRecord};
use yewdux::store::Store;

use crate::core::buffer::LogBuffer;
use crate::core::connection::ConnectionState;
use crate::core::console_style::{ConsoleStyle, EntryTone, classify, entry_tone};

/// Shared state for the log stream client and its panel.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct LogStore {
    /// Bounded scrollback.
    pub buffer: LogBuffer,
    /// Mirrored connection state.
    pub connection: ConnectionState,
    /// Whether the floating panel is mounted.
    pub panel_visible: bool,
}

/// What the client should do after an event was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// Print the stream greeting.
    Banner(String),
    /// A record was buffered and should be mirrored.
    Appended {
        /// The buffered record.
        record: LogRecord,
        /// Console bucket for the record.
        style: ConsoleStyle,
    },
    /// Nothing to show.
    Ignored,
}

/// Render-ready panel row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelRow {
    /// Arrival sequence number, stable while the record stays buffered.
    pub seq: u64,
    /// Backend timestamp.
    pub timestamp: String,
    /// Message text (rendered as text, never markup).
    pub message: String,
    /// Colour tone.
    pub tone: EntryTone,
}

impl LogStore {
    /// Empty store with a custom scrollback capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: LogBuffer::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Change the capacity, keeping the most recent records.
    pub fn set_capacity(&mut self, capacity: usize) {
        if self.buffer.capacity() == capacity.max(1) {
            return;
        }
        self.buffer = self.buffer.resized(capacity);
    }

    /// Apply one decoded stream event.
    pub fn apply_event(&mut self, event: LogEvent, verbose: bool) -> EventOutcome {
        match event {
            LogEvent::Init { message } if verbose => EventOutcome::Banner(message),
            LogEvent::Init { .. } | LogEvent::Heartbeat => EventOutcome::Ignored,
            LogEvent::Log(record) => {
                let style = classify(&record.message);
                self.buffer.push(record.clone());
                EventOutcome::Appended { record, style }
            }
        }
    }

    /// Empty the scrollback; the connection is left alone.
    pub fn clear_logs(&mut self) {
        self.buffer.clear();
    }

    /// Flip panel visibility and return the new value.
    pub fn toggle_panel(&mut self) -> bool {
        self.panel_visible = !self.panel_visible;
        self.panel_visible
    }

    /// Commit the result of a visibility request.
    ///
    /// The panel only counts as visible when it was requested and actually mounted, so
    /// a failed mount leaves it hidden and the next toggle tries to open it again.
    pub fn commit_panel(&mut self, requested: bool, mounted: bool) -> bool {
        self.panel_visible = requested && mounted;
        self.panel_visible
    }

    /// Mirror the connection machine's state.
    pub fn set_connection(&mut self, state: ConnectionState) {
        self.connection = state;
    }

    /// Rows the panel renders, oldest first.
    #[must_use]
    pub fn panel_rows(&self) -> Vec<PanelRow> {
        if !self.panel_visible {
            return Vec::new();
        }
        self.buffer
            .iter_sequenced()
            .map(|(seq, record)| PanelRow {
                seq,
                timestamp: record.timestamp.clone(),
                message: record.message.clone(),
                tone: entry_tone(&record.message),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talentmatch_events::decode_event;

    fn log(idx: usize) -> LogEvent {
        LogEvent::Log(LogRecord::new(format!("T{idx}"), format!("line {idx}")))
    }

    #[test]
    fn heartbeat_never_reaches_buffer_or_panel() {
        let mut store = LogStore::default();
        store.toggle_panel();
        assert_eq!(store.apply_event(LogEvent::Heartbeat, true), EventOutcome::Ignored);
        assert!(store.buffer.is_empty());
        assert!(store.panel_rows().is_empty());
    }

    #[test]
    fn init_banner_only_in_verbose_mode() {
        let mut store = LogStore::default();
        let init = LogEvent::Init {
            message: "stream ready".to_string(),
        };
        assert_eq!(
            store.apply_event(init.clone(), true),
            EventOutcome::Banner("stream ready".to_string())
        );
        assert_eq!(store.apply_event(init, false), EventOutcome::Ignored);
        assert!(store.buffer.is_empty());
    }

    #[test]
    fn log_records_are_buffered_with_style() {
        let mut store = LogStore::default();
        let outcome = store.apply_event(
            LogEvent::Log(LogRecord::new("t", "🤖 MODEL RESPONSE ❌ ERROR")),
            false,
        );
        assert_eq!(
            outcome,
            EventOutcome::Appended {
                record: LogRecord::new("t", "🤖 MODEL RESPONSE ❌ ERROR"),
                style: ConsoleStyle::ResponseError,
            }
        );
        assert_eq!(store.buffer.len(), 1);
    }

    #[test]
    fn toggle_on_off_on_renders_buffer_once() {
        let mut store = LogStore::default();
        for idx in 1..=3 {
            store.apply_event(log(idx), true);
        }
        assert!(store.toggle_panel());
        assert!(!store.toggle_panel());
        assert!(store.panel_rows().is_empty());
        assert!(store.toggle_panel());
        let stamps: Vec<_> = store.panel_rows().into_iter().map(|row| row.timestamp).collect();
        assert_eq!(stamps, vec!["T1", "T2", "T3"]);
    }

    #[test]
    fn panel_is_capped_like_the_buffer() {
        let mut store = LogStore::with_capacity(500);
        store.toggle_panel();
        for idx in 1..=505 {
            store.apply_event(log(idx), true);
        }
        let rows = store.panel_rows();
        assert_eq!(rows.len(), 500);
        assert_eq!(rows[0].timestamp, "T6");
        assert_eq!(rows[499].timestamp, "T505");
    }

    #[test]
    fn clear_keeps_connection_and_later_records_show() {
        let mut store = LogStore::default();
        store.set_connection(ConnectionState::Connected);
        store.apply_event(log(1), true);
        store.toggle_panel();
        store.clear_logs();
        assert!(store.buffer.is_empty());
        assert!(store.panel_rows().is_empty());
        assert_eq!(store.connection, ConnectionState::Connected);

        store.toggle_panel();
        store.apply_event(log(2), true);
        store.toggle_panel();
        let rows = store.panel_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].timestamp, "T2");
    }

    #[test]
    fn malformed_payload_does_not_block_next_record() {
        let mut store = LogStore::default();
        let payloads = [
            r#"{"type":"log","timestamp":"T1","message":"a"}"#,
            "{not json",
            r#"{"type":"log","timestamp":"T2","message":"b"}"#,
        ];
        let mut failures = 0;
        for payload in payloads {
            match decode_event(payload) {
                Ok(event) => {
                    store.apply_event(event, true);
                }
                Err(_) => failures += 1,
            }
        }
        assert_eq!(failures, 1);
        let stamps: Vec<_> = store.buffer.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(stamps, vec!["T1", "T2"]);
    }

    #[test]
    fn set_capacity_keeps_recent_records() {
        let mut store = LogStore::default();
        for idx in 1..=4 {
            store.apply_event(log(idx), true);
        }
        store.set_capacity(2);
        let stamps: Vec<_> = store.buffer.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(stamps, vec!["T3", "T4"]);
    }

    #[test]
    fn failed_mount_keeps_panel_hidden_and_retries_open() {
        let mut store = LogStore::default();
        store.apply_event(log(1), true);
        let requested = !store.panel_visible;
        assert!(!store.commit_panel(requested, false));
        assert!(store.panel_rows().is_empty());

        let requested = !store.panel_visible;
        assert!(requested);
        assert!(store.commit_panel(requested, true));
        assert_eq!(store.panel_rows().len(), 1);

        let requested = !store.panel_visible;
        assert!(!store.commit_panel(requested, true));
    }

    #[test]
    fn panel_row_keys_stay_stable_when_the_oldest_is_evicted() {
        let mut store = LogStore::with_capacity(3);
        store.toggle_panel();
        for idx in 1..=3 {
            store.apply_event(log(idx), true);
        }
        let before: Vec<(u64, String)> = store
            .panel_rows()
            .into_iter()
            .map(|row| (row.seq, row.timestamp))
            .collect();
        store.apply_event(log(4), true);
        let after: Vec<(u64, String)> = store
            .panel_rows()
            .into_iter()
            .map(|row| (row.seq, row.timestamp))
            .collect();
        assert_eq!(&after[..2], &before[1..]);
        assert_eq!(after[2], (3, "T4".to_string()));
    }

    #[test]
    fn panel_rows_carry_tone() {
        let mut store = LogStore::default();
        store.toggle_panel();
        store.apply_event(
            LogEvent::Log(LogRecord::new("t", "⚙️  PROCESSING 🚀 START")),
            true,
        );
        assert_eq!(store.panel_rows()[0].tone, EntryTone::Start);
    }
}
