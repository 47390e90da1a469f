//! Log stream connector.
//!
//! # Design
//! - Use fetch streaming so the connection can be aborted deterministically.
//! - One call is one attempt: open, deliver frames, report the first failure or the
//!   end of the stream. Reconnect policy lives with the caller.
//! - Only default `message` frames are delivered; named events are dropped.
//! - Nothing is reported once the handle has been closed.

use crate::services::sse::{SseFrame, SseParser};
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortController, AbortSignal, Headers, ReadableStream, ReadableStreamDefaultReader, Request,
    RequestInit, Response, TextDecodeOptions, TextDecoder,
};
use yew::Callback;

/// Callbacks for one stream attempt.
pub(crate) struct StreamCallbacks {
    /// The endpoint answered with a readable body.
    pub(crate) on_open: Callback<()>,
    /// Raw `data` payload of one SSE frame.
    pub(crate) on_payload: Callback<String>,
    /// The attempt failed or the stream ended.
    pub(crate) on_error: Callback<String>,
}

/// Active log stream handle for cancellation.
pub(crate) struct LogStreamHandle {
    controller: AbortController,
}

impl LogStreamHandle {
    pub(crate) fn close(&self) {
        self.controller.abort();
    }
}

/// Start one streaming attempt and return a cancellable handle.
pub(crate) fn open_log_stream(
    url: String,
    callbacks: StreamCallbacks,
) -> Result<LogStreamHandle, ConnectError> {
    let controller = AbortController::new().map_err(|_| ConnectError::Controller)?;
    let signal = controller.signal();
    yew::platform::spawn_local(async move {
        run_log_stream(url, signal, callbacks).await;
    });
    Ok(LogStreamHandle { controller })
}

async fn run_log_stream(url: String, signal: AbortSignal, callbacks: StreamCallbacks) {
    let report = |message: String| {
        if !signal.aborted() {
            callbacks.on_error.emit(message);
        }
    };

    let mut reader = match open_stream(&url, &signal).await {
        Ok(reader) => reader,
        Err(err) => {
            report(err.to_string());
            return;
        }
    };
    let Ok(decoder) = TextDecoder::new() else {
        report(ConnectError::Decoder.to_string());
        return;
    };
    let options = TextDecodeOptions::new();
    options.set_stream(true);
    if signal.aborted() {
        return;
    }
    callbacks.on_open.emit(());

    let mut parser = SseParser::default();
    loop {
        if signal.aborted() {
            return;
        }
        match read_chunk(&mut reader).await {
            Ok(Some(bytes)) => {
                let text = match decoder.decode_with_js_u8_array_and_options(&bytes, &options) {
                    Ok(text) => text,
                    Err(err) => {
                        report(format!("decode error: {err:?}"));
                        return;
                    }
                };
                for frame in parser.push(&text) {
                    emit_frame(&callbacks, &signal, &frame);
                }
            }
            Ok(None) => {
                if let Some(frame) = parser.finish() {
                    emit_frame(&callbacks, &signal, &frame);
                }
                report("log stream ended".to_string());
                return;
            }
            Err(err) => {
                report(err);
                return;
            }
        }
    }
}

fn emit_frame(callbacks: &StreamCallbacks, signal: &AbortSignal, frame: &SseFrame) {
    if !frame.is_message() {
        return;
    }
    let data = frame.data.trim();
    if !data.is_empty() && !signal.aborted() {
        callbacks.on_payload.emit(data.to_string());
    }
}

async fn open_stream(
    url: &str,
    signal: &AbortSignal,
) -> Result<ReadableStreamDefaultReader, ConnectError> {
    let response = fetch_stream(url, signal).await?;
    stream_reader(response)
}

fn stream_reader(response: Response) -> Result<ReadableStreamDefaultReader, ConnectError> {
    let stream: ReadableStream = response.body().ok_or(ConnectError::Stream)?;
    let reader = stream
        .get_reader()
        .dyn_into::<ReadableStreamDefaultReader>()
        .map_err(|_| ConnectError::Reader)?;
    Ok(reader)
}

async fn fetch_stream(url: &str, signal: &AbortSignal) -> Result<Response, ConnectError> {
    let window = web_sys::window().ok_or(ConnectError::Window)?;
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_signal(Some(signal));

    let headers = Headers::new().map_err(|_| ConnectError::Headers)?;
    headers
        .set("Accept", "text/event-stream")
        .map_err(|_| ConnectError::Headers)?;
    headers
        .set("Cache-Control", "no-cache")
        .map_err(|_| ConnectError::Headers)?;
    init.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &init).map_err(|_| ConnectError::Request)?;
    let resp = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| ConnectError::Fetch)?;
    let response: Response = resp.dyn_into().map_err(|_| ConnectError::Fetch)?;
    if !response.ok() {
        return Err(ConnectError::Status(response.status()));
    }
    Ok(response)
}

async fn read_chunk(
    reader: &mut ReadableStreamDefaultReader,
) -> Result<Option<Uint8Array>, String> {
    let chunk = JsFuture::from(reader.read())
        .await
        .map_err(|err| format!("read failed: {err:?}"))?;
    let done = Reflect::get(&chunk, &JsValue::from_str("done"))
        .map_err(|err| format!("chunk done lookup failed: {err:?}"))?
        .as_bool()
        .unwrap_or(false);
    if done {
        return Ok(None);
    }
    let value = Reflect::get(&chunk, &JsValue::from_str("value"))
        .map_err(|err| format!("chunk value lookup failed: {err:?}"))?;
    Ok(Some(Uint8Array::new(&value)))
}

#[derive(Debug)]
pub(crate) enum ConnectError {
    Controller,
    Window,
    Headers,
    Request,
    Fetch,
    Status(u16),
    Stream,
    Reader,
    Decoder,
}

impl std::fmt::Display for ConnectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Controller => write!(f, "failed to construct abort controller"),
            Self::Window => write!(f, "browser window unavailable"),
            Self::Headers => write!(f, "failed to construct headers"),
            Self::Request => write!(f, "failed to construct request"),
            Self::Fetch => write!(f, "fetch failed"),
            Self::Status(code) => write!(f, "unexpected status {code}"),
            Self::Stream => write!(f, "response stream missing"),
            Self::Reader => write!(f, "failed to read response stream"),
            Self::Decoder => write!(f, "text decoder unavailable"),
        }
    }
}
