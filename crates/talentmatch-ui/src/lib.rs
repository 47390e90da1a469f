#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! TalentMatch browser front-end.
//!
//! DOM-free modules (`core`, `i18n`, the SSE parser) build on every target and carry
//! the unit tests. The page shell, the log panel and the HTTP helpers only exist on
//! `wasm32`.

pub mod core;
pub mod i18n;
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::dom::{
    LoadingGuard, ToastHandle, copy_to_clipboard, show_alert, show_loading, show_toast,
    validate_form,
};
#[cfg(target_arch = "wasm32")]
pub use app::logger::FrontendLogger;
#[cfg(target_arch = "wasm32")]
pub use app::page::init_page;
#[cfg(target_arch = "wasm32")]
pub use app::run_app;
#[cfg(target_arch = "wasm32")]
pub use services::api::api_request;

pub use crate::core::config::LoggerConfig;
pub use crate::core::format::format_date;
pub use crate::core::notify::NoticeKind;
pub use crate::i18n::{LocaleCode, TranslationBundle};
