//! Conversions from thrown JavaScript values

use camview_core::{CaptureDenial, DenialKind};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::DomException;

/// Best human-readable text for a thrown value
pub(crate) fn js_reason(value: &JsValue) -> String {
    if let Some(exception) = value.dyn_ref::<DomException>() {
        return format!("{}: {}", exception.name(), exception.message());
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(error.name()), String::from(error.message()));
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Classify a `getUserMedia` rejection
pub(crate) fn denial_from_js(value: &JsValue) -> CaptureDenial {
    if let Some(exception) = value.dyn_ref::<DomException>() {
        return CaptureDenial::from_dom_exception(&exception.name(), &exception.message());
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return CaptureDenial::from_dom_exception(
            &String::from(error.name()),
            &String::from(error.message()),
        );
    }
    CaptureDenial::new(DenialKind::Other, js_reason(value))
}
