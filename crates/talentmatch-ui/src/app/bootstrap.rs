//! Thin bridge to the page's global `bootstrap` object.

use gloo::utils::window;
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

/// Whether Bootstrap's bundle is present on the page.
pub(crate) fn available() -> bool {
    namespace().is_ok_and(|value| !value.is_undefined() && !value.is_null())
}

fn namespace() -> Result<JsValue, JsValue> {
    Reflect::get(&window(), &JsValue::from_str("bootstrap"))
}

/// `new bootstrap.<widget>(element, options)`.
pub(crate) fn construct(
    widget: &str,
    element: &Element,
    options: Option<&Object>,
) -> Result<JsValue, JsValue> {
    let namespace = namespace()?;
    if namespace.is_undefined() {
        return Err(JsValue::from_str("bootstrap is not loaded"));
    }
    let constructor: Function = Reflect::get(&namespace, &JsValue::from_str(widget))?.dyn_into()?;
    let options = options.map_or(JsValue::UNDEFINED, |options| options.clone().into());
    Reflect::construct(&constructor, &Array::of2(element, &options))
}

/// Invoke a zero-argument method on a widget instance (`show`, `hide`).
pub(crate) fn invoke(instance: &JsValue, method: &str) -> Result<(), JsValue> {
    let method: Function = Reflect::get(instance, &JsValue::from_str(method))?.dyn_into()?;
    method.call0(instance).map(|_| ())
}

/// Build a plain options object from boolean flags.
pub(crate) fn flags(entries: &[(&str, bool)]) -> Result<Object, JsValue> {
    let options = Object::new();
    for (key, value) in entries {
        Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_bool(*value))?;
    }
    Ok(options)
}
