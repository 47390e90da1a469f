//! Environment lookups for the page shell: locale and logger configuration.

use crate::core::config::{LoggerConfig, LoggerOverrides, VERBOSE_STORAGE_KEY};
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::{document, window};

pub(crate) const LOGGER_CONFIG_ATTR: &str = "data-logger-config";

/// Locale from `<html lang>`, then the browser language, then the default.
pub(crate) fn load_locale() -> LocaleCode {
    let from_document = document()
        .document_element()
        .and_then(|root| root.get_attribute("lang"))
        .and_then(|tag| LocaleCode::from_lang_tag(&tag));
    from_document
        .or_else(|| {
            window()
                .navigator()
                .language()
                .and_then(|tag| LocaleCode::from_lang_tag(&tag))
        })
        .unwrap_or(DEFAULT_LOCALE)
}

/// Logger configuration for the current host, page overrides and stored flag.
pub(crate) fn load_logger_config(bundle: &TranslationBundle) -> LoggerConfig {
    let hostname = window().location().hostname().unwrap_or_default();
    LoggerConfig::resolve(&hostname, &load_overrides(bundle), stored_verbose().as_deref())
}

fn load_overrides(bundle: &TranslationBundle) -> LoggerOverrides {
    let Some(raw) = document()
        .body()
        .and_then(|body| body.get_attribute(LOGGER_CONFIG_ATTR))
    else {
        return LoggerOverrides::default();
    };
    match LoggerOverrides::parse(&raw) {
        Ok(overrides) => overrides,
        Err(err) => {
            console::warn!(
                bundle.text("logger.config_invalid", "Ignoring invalid logger configuration"),
                err.to_string()
            );
            LoggerOverrides::default()
        }
    }
}

fn stored_verbose() -> Option<String> {
    LocalStorage::raw()
        .get_item(VERBOSE_STORAGE_KEY)
        .ok()
        .flatten()
}
