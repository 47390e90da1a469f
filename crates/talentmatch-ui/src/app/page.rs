//! Page-wide wiring for the server-rendered templates.

use gloo::console;
use gloo::dialogs::confirm;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::utils::{document, window};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlFormElement};
use yew::platform::spawn_local;

use crate::app::bootstrap;
use crate::app::dom::{copy_to_clipboard, elements, select_all, validate_form};
use crate::core::format::{format_date, parse_date};
use crate::i18n::TranslationBundle;

const CARD_STAGGER_MS: u32 = 100;

/// Wire every page behaviour once the DOM is ready, and animate cards on load.
pub(crate) fn install(bundle: &TranslationBundle) {
    let ready_bundle = bundle.clone();
    if document().ready_state() == "loading" {
        EventListener::once(&document(), "DOMContentLoaded", move |_| {
            init_page(&ready_bundle);
        })
        .forget();
    } else {
        init_page(&ready_bundle);
    }
    if document().ready_state() == "complete" {
        animate_cards();
    } else {
        EventListener::once(&window(), "load", |_| animate_cards()).forget();
    }
}

/// Attach Bootstrap widgets, confirmations, validation, copy buttons and date rendering.
pub fn init_page(bundle: &TranslationBundle) {
    console::log!(bundle.text("page.loaded", "Talent Match loaded"));
    if bootstrap::available() {
        init_tooltips();
        init_modals();
    } else {
        console::warn!(bundle.text("page.bootstrap_missing", "Bootstrap is not loaded"));
    }
    guard_delete_buttons(bundle);
    guard_validated_forms();
    wire_copy_buttons(bundle);
    render_dates(bundle);
}

fn init_tooltips() {
    for trigger in select_all(r#"[data-bs-toggle="tooltip"]"#) {
        if let Err(err) = bootstrap::construct("Tooltip", &trigger, None) {
            console::warn!("tooltip init failed", err);
        }
    }
}

fn init_modals() {
    for modal in select_all(".modal") {
        if let Err(err) = bootstrap::construct("Modal", &modal, None) {
            console::warn!("modal init failed", err);
            continue;
        }
        let target = modal.clone();
        EventListener::new(&target, "hidden.bs.modal", move |_| reset_forms(&modal)).forget();
    }
}

fn reset_forms(root: &Element) {
    let Ok(forms) = root.query_selector_all("form") else {
        return;
    };
    for form in elements(&forms) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }
}

fn guard_delete_buttons(bundle: &TranslationBundle) {
    let prompt = bundle.text("page.confirm_delete", "Delete this item?");
    for button in select_all(r#"[onclick*="delete"]"#) {
        let prompt = prompt.clone();
        EventListener::new_with_options(
            &button,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if !confirm(&prompt) {
                    event.prevent_default();
                    event.stop_propagation();
                }
            },
        )
        .forget();
    }
}

fn guard_validated_forms() {
    for form in select_all("form[data-validate]") {
        let target = form.clone();
        EventListener::new_with_options(
            &target,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if !validate_form(&form) {
                    event.prevent_default();
                }
            },
        )
        .forget();
    }
}

fn wire_copy_buttons(bundle: &TranslationBundle) {
    for button in select_all("[data-copy-text]") {
        let bundle = bundle.clone();
        let target = button.clone();
        EventListener::new(&target, "click", move |_| {
            if let Some(text) = button.get_attribute("data-copy-text") {
                copy_to_clipboard(&text, &bundle);
            }
        })
        .forget();
    }
}

fn render_dates(bundle: &TranslationBundle) {
    for element in select_all("time[data-format-date]") {
        let raw = element
            .get_attribute("datetime")
            .or_else(|| element.text_content())
            .unwrap_or_default();
        if parse_date(&raw).is_some() {
            element.set_text_content(Some(&format_date(&raw, bundle.locale)));
        }
    }
}

fn animate_cards() {
    for (index, card) in select_all(".card").into_iter().enumerate() {
        let Ok(card) = card.dyn_into::<HtmlElement>() else {
            continue;
        };
        let delay = u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_mul(CARD_STAGGER_MS);
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            let style = card.style();
            if let Err(err) = style
                .set_property("opacity", "1")
                .and_then(|()| style.set_property("transform", "translateY(0)"))
            {
                console::warn!("card animation failed", err);
            }
        });
    }
}
