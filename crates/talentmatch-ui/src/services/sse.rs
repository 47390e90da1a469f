//! SSE frame parser (transport-only).
//!
//! # Design
//! - Accept partial chunks and emit complete SSE frames when a blank line is received.
//! - Keep this module DOM-free so it can run in tests and non-wasm contexts.
//! - Payload decoding belongs to the caller; frames carry raw `data` text.

/// Parsed SSE frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SseFrame {
    /// Optional event name.
    pub event: Option<String>,
    /// Optional event id.
    pub id: Option<String>,
    /// Optional retry hint in milliseconds.
    pub retry: Option<u64>,
    /// Concatenated data payload.
    pub data: String,
}

impl SseFrame {
    /// Whether the frame is a default `message` event (unnamed or named `message`).
    ///
    /// Named events are meant for listeners registered by name and carry no log payload.
    #[must_use]
    pub fn is_message(&self) -> bool {
        self.event.as_deref().is_none_or(|name| name == "message")
    }

    fn is_empty(&self) -> bool {
        self.event.is_none() && self.id.is_none() && self.retry.is_none() && self.data.is_empty()
    }
}

/// Incremental SSE parser for streamed chunks.
#[derive(Debug, Default)]
pub struct SseParser {
    line: String,
    pending_cr: bool,
    builder: FrameBuilder,
}

impl SseParser {
    /// Feed a decoded text chunk, returning every frame it completed.
    pub fn push(&mut self, chunk: &str) -> Vec<SseFrame> {
        let mut frames = Vec::new();
        for ch in chunk.chars() {
            if self.pending_cr {
                self.pending_cr = false;
                if ch == '\n' {
                    continue;
                }
            }
            match ch {
                '\n' => self.finish_line(&mut frames),
                '\r' => {
                    self.pending_cr = true;
                    self.finish_line(&mut frames);
                }
                _ => self.line.push(ch),
            }
        }
        frames
    }

    /// Flush the trailing frame at end of stream.
    pub fn finish(&mut self) -> Option<SseFrame> {
        if !self.line.is_empty() {
            self.finish_line(&mut Vec::new());
        }
        self.builder.take_frame()
    }

    fn finish_line(&mut self, frames: &mut Vec<SseFrame>) {
        let line = std::mem::take(&mut self.line);
        if line.is_empty() {
            if let Some(frame) = self.builder.take_frame() {
                frames.push(frame);
            }
            return;
        }
        if line.starts_with(':') {
            return;
        }
        let (field, value) = line
            .split_once(':')
            .map(|(field, value)| (field, value.strip_prefix(' ').unwrap_or(value)))
            .unwrap_or((line.as_str(), ""));
        self.builder.apply_field(field, value);
    }
}

#[derive(Debug, Default)]
struct FrameBuilder {
    event: Option<String>,
    id: Option<String>,
    retry: Option<u64>,
    data: String,
    has_data: bool,
}

impl FrameBuilder {
    fn apply_field(&mut self, field: &str, value: &str) {
        match field {
            "event" => self.event = Some(value.to_string()),
            "id" => self.id = Some(value.to_string()),
            "retry" => self.retry = value.parse::<u64>().ok(),
            "data" => {
                if self.has_data {
                    self.data.push('\n');
                }
                self.has_data = true;
                self.data.push_str(value);
            }
            _ => {}
        }
    }

    fn take_frame(&mut self) -> Option<SseFrame> {
        let frame = SseFrame {
            event: self.event.take(),
            id: self.id.take(),
            retry: self.retry.take(),
            data: std::mem::take(&mut self.data),
        };
        self.has_data = false;
        if frame.is_empty() { None } else { Some(frame) }
    }
}
