//! Browser shell: page wiring and the log stream client.

pub(crate) mod bootstrap;
mod console;
pub(crate) mod dom;
mod log_stream;
pub(crate) mod logger;
pub(crate) mod page;
mod panel;
mod preferences;

use crate::i18n::TranslationBundle;
use logger::FrontendLogger;

/// Start the page script: panic hook, page wiring and the log stream client.
///
/// The returned client stays alive for the page's lifetime through its unload hook.
pub fn run_app() -> FrontendLogger {
    console_error_panic_hook::set_once();
    let bundle = TranslationBundle::new(preferences::load_locale());
    page::install(&bundle);
    let config = preferences::load_logger_config(&bundle);
    FrontendLogger::install(config, bundle)
}
