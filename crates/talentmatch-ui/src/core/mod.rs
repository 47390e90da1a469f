//! Core, DOM-free primitives and helpers for the front-end.
pub mod buffer;
pub mod config;
pub mod connection;
pub mod console_style;
pub mod format;
pub mod forms;
pub mod http;
pub mod notify;
pub mod shortcuts;
pub mod store;
