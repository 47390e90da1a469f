//! Transport helpers: SSE framing everywhere, HTTP on wasm32.

pub mod sse;

#[cfg(target_arch = "wasm32")]
pub mod api;
