//! DOM helpers shared by the server-rendered pages.
//!
//! # Design
//! - Helpers log failures to the console and degrade to a no-op; a broken widget must
//!   never take the page script down.
//! - Message text is inserted as text nodes, never parsed as markup.

use gloo::console;
use gloo::events::EventListener;
use gloo::utils::{document, window};
use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Promise, Reflect};
use uuid::Uuid;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlButtonElement, NodeList};
use yew::platform::spawn_local;

use crate::app::bootstrap;
use crate::core::forms::{FieldStatus, INVALID_CLASS, check_required};
use crate::core::notify::{ALERT_DISMISS_MS, NoticeKind, toast_duration};
use crate::i18n::TranslationBundle;

const LOADING_ICON: &str = "bi bi-arrow-repeat me-1";

/// Collect the elements of a `NodeList`.
pub(crate) fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Elements in the document matching `selector`.
pub(crate) fn select_all(selector: &str) -> Vec<Element> {
    match document().query_selector_all(selector) {
        Ok(list) => elements(&list),
        Err(err) => {
            console::error!(format!("invalid selector {selector}"), err);
            Vec::new()
        }
    }
}

fn element_with_class(tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = document().create_element(tag)?;
    element.set_class_name(class);
    Ok(element)
}

fn close_button(class: &str, dismiss: &str) -> Result<Element, JsValue> {
    let button = element_with_class("button", class)?;
    button.set_attribute("type", "button")?;
    button.set_attribute("data-bs-dismiss", dismiss)?;
    button.set_attribute("aria-label", "Close")?;
    Ok(button)
}

/// Insert a dismissible alert at the top of the first `.container`.
///
/// The alert removes itself after five seconds. Pages without a container get nothing.
pub fn show_alert(message: &str, kind: NoticeKind) {
    if let Err(err) = try_show_alert(message, kind) {
        console::error!("show_alert failed", err);
    }
}

fn try_show_alert(message: &str, kind: NoticeKind) -> Result<(), JsValue> {
    let Some(container) = document().query_selector(".container")? else {
        return Ok(());
    };
    let alert = element_with_class("div", &kind.alert_class())?;
    alert.set_attribute("role", "alert")?;
    alert.append_with_str_1(message)?;
    alert.append_child(&close_button("btn-close", "alert")?)?;
    container.insert_before(&alert, container.first_child().as_ref())?;
    spawn_local(async move {
        TimeoutFuture::new(ALERT_DISMISS_MS).await;
        alert.remove();
    });
    Ok(())
}

/// A toast shown through `bootstrap.Toast`.
pub struct ToastHandle {
    element: Element,
    instance: Option<JsValue>,
}

impl ToastHandle {
    /// Element id of the toast.
    #[must_use]
    pub fn id(&self) -> String {
        self.element.id()
    }

    /// Hide and remove the toast immediately.
    pub fn dismiss(&self) {
        dismiss_toast(&self.element, self.instance.as_ref());
    }
}

fn dismiss_toast(element: &Element, instance: Option<&JsValue>) {
    if let Some(instance) = instance
        && let Err(err) = bootstrap::invoke(instance, "hide")
    {
        console::warn!("toast hide failed", err);
    }
    element.remove();
}

/// Append a toast to `#toast-container` and show it.
///
/// The toast fades out after `duration_ms` (two seconds when `None`) and is removed once
/// the fade animation ends; `Some(0)` keeps it until dismissed. Returns `None` when the
/// page has no toast container or the toast could not be built.
pub fn show_toast(
    message: &str,
    kind: NoticeKind,
    duration_ms: Option<u32>,
) -> Option<ToastHandle> {
    let container = document().get_element_by_id("toast-container")?;
    match build_toast(&container, message, kind) {
        Ok(handle) => {
            let duration_ms = toast_duration(duration_ms);
            if duration_ms > 0 {
                schedule_fade_out(&handle, duration_ms);
            }
            Some(handle)
        }
        Err(err) => {
            console::error!("show_toast failed", err);
            None
        }
    }
}

fn build_toast(
    container: &Element,
    message: &str,
    kind: NoticeKind,
) -> Result<ToastHandle, JsValue> {
    let toast = element_with_class("div", &kind.toast_class())?;
    toast.set_id(&format!("toast-{}", Uuid::new_v4()));
    toast.set_attribute("role", "alert")?;
    toast.set_attribute("aria-live", "assertive")?;
    toast.set_attribute("aria-atomic", "true")?;

    let row = element_with_class("div", "d-flex")?;
    let body = element_with_class("div", "toast-body")?;
    body.append_child(&element_with_class("i", kind.icon_class())?)?;
    body.append_with_str_1(message)?;
    row.append_child(&body)?;
    row.append_child(&close_button("btn-close btn-close-white me-2 m-auto", "toast")?)?;
    toast.append_child(&row)?;
    container.append_child(&toast)?;

    let instance = if bootstrap::available() {
        let options = bootstrap::flags(&[("autohide", false)])?;
        let instance = bootstrap::construct("Toast", &toast, Some(&options))?;
        bootstrap::invoke(&instance, "show")?;
        Some(instance)
    } else {
        toast.class_list().add_1("show")?;
        None
    };
    Ok(ToastHandle {
        element: toast,
        instance,
    })
}

fn schedule_fade_out(handle: &ToastHandle, duration_ms: u32) {
    let element = handle.element.clone();
    let instance = handle.instance.clone();
    spawn_local(async move {
        TimeoutFuture::new(duration_ms).await;
        let classes = element.class_list();
        if let Err(err) = classes
            .remove_1("fade-in")
            .and_then(|()| classes.add_1("fade-out"))
        {
            console::warn!("toast fade-out failed", err);
            dismiss_toast(&element, instance.as_ref());
            return;
        }
        let target = element.clone();
        EventListener::once(&target, "animationend", move |_| {
            dismiss_toast(&element, instance.as_ref());
        })
        .forget();
    });
}

/// Restores a button swapped into its loading state.
///
/// Dropping the guard restores the button as well.
#[must_use = "dropping the guard restores the button immediately"]
pub struct LoadingGuard {
    button: HtmlButtonElement,
    original: Option<String>,
}

impl LoadingGuard {
    /// Put back the original label and re-enable the button.
    pub fn restore(mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        if let Some(original) = self.original.take() {
            self.button.set_inner_html(&original);
            self.button.set_disabled(false);
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.reset();
    }
}

/// Swap a button's label for a spinner and `text`, disabling it until the guard
/// is restored.
pub fn show_loading(button: &HtmlButtonElement, text: &str) -> LoadingGuard {
    let original = button.inner_html();
    button.set_inner_html("");
    match element_with_class("i", LOADING_ICON) {
        Ok(icon) => {
            if let Err(err) = button.append_child(&icon) {
                console::warn!("loading icon failed", err);
            }
        }
        Err(err) => console::warn!("loading icon failed", err),
    }
    if let Err(err) = button.append_with_str_1(text) {
        console::warn!("loading label failed", err);
    }
    button.set_disabled(true);
    LoadingGuard {
        button: button.clone(),
        original: Some(original),
    }
}

/// Mark blank `[required]` fields of `form` with `is-invalid` and report validity.
pub fn validate_form(form: &Element) -> bool {
    let fields = match form.query_selector_all("[required]") {
        Ok(list) => elements(&list),
        Err(err) => {
            console::error!("validate_form: field lookup failed", err);
            return false;
        }
    };
    let values: Vec<String> = fields.iter().map(field_value).collect();
    let (statuses, valid) = check_required(values.iter().map(String::as_str));
    for (field, status) in fields.iter().zip(statuses) {
        let classes = field.class_list();
        let outcome = match status {
            FieldStatus::Missing => classes.add_1(INVALID_CLASS),
            FieldStatus::Filled => classes.remove_1(INVALID_CLASS),
        };
        if let Err(err) = outcome {
            console::warn!("validate_form: class update failed", err);
        }
    }
    valid
}

fn field_value(field: &Element) -> String {
    Reflect::get(field, &JsValue::from_str("value"))
        .ok()
        .and_then(|value| value.as_string())
        .unwrap_or_default()
}

/// Copy `text` through the async clipboard API and report the result with an alert.
pub fn copy_to_clipboard(text: &str, bundle: &TranslationBundle) {
    let text = text.to_owned();
    let bundle = bundle.clone();
    spawn_local(async move {
        match write_clipboard(&text).await {
            Ok(()) => show_alert(
                &bundle.text("clipboard.copied", "Copied to clipboard"),
                NoticeKind::Success,
            ),
            Err(err) => {
                console::warn!("clipboard write failed", err);
                show_alert(&bundle.text("clipboard.failed", "Copy failed"), NoticeKind::Danger);
            }
        }
    });
}

async fn write_clipboard(text: &str) -> Result<(), JsValue> {
    let clipboard = Reflect::get(&window().navigator(), &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() {
        return Err(JsValue::from_str("clipboard API unavailable"));
    }
    let write: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
    let promise: Promise = write.call1(&clipboard, &JsValue::from_str(text))?.dyn_into()?;
    JsFuture::from(promise).await.map(|_| ())
}
