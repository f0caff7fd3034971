//! `navigator.mediaDevices.getUserMedia` as a [`MediaDevices`] host

use crate::js::{denial_from_js, js_reason};
use async_trait::async_trait;
use camview_core::{CaptureDenial, DenialKind, MediaDevices, StreamConstraints};
use js_sys::{Object, Reflect};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{MediaStream, MediaStreamConstraints};

/// Camera access through the page's `navigator.mediaDevices`
#[derive(Debug, Default, Clone, Copy)]
pub struct WebMediaDevices;

impl WebMediaDevices {
    /// Create new browser media devices handle
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl MediaDevices for WebMediaDevices {
    type Stream = MediaStream;

    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<MediaStream, CaptureDenial> {
        let window = web_sys::window()
            .ok_or_else(|| CaptureDenial::new(DenialKind::Unsupported, "No window object"))?;
        let media_devices = window
            .navigator()
            .media_devices()
            .map_err(|e| CaptureDenial::new(DenialKind::Unsupported, js_reason(&e)))?;

        let js_constraints = to_js_constraints(constraints)
            .map_err(|e| CaptureDenial::new(DenialKind::Other, js_reason(&e)))?;
        let promise = media_devices
            .get_user_media_with_constraints(&js_constraints)
            .map_err(|e| denial_from_js(&e))?;

        debug!("getUserMedia issued, waiting for the user");
        let granted = JsFuture::from(promise)
            .await
            .map_err(|e| denial_from_js(&e))?;

        granted.dyn_into::<MediaStream>().map_err(|value| {
            CaptureDenial::new(
                DenialKind::Other,
                format!("getUserMedia resolved to a non-stream value: {:?}", value),
            )
        })
    }
}

/// Build the `MediaStreamConstraints` dictionary
///
/// `video` stays a plain boolean unless a resolution or facing mode is set.
fn to_js_constraints(constraints: &StreamConstraints) -> Result<MediaStreamConstraints, JsValue> {
    let js = MediaStreamConstraints::new();
    js.set_audio(&JsValue::from_bool(constraints.audio));

    if !constraints.has_video_refinements() {
        js.set_video(&JsValue::from_bool(constraints.video));
        return Ok(js);
    }

    let video = Object::new();
    if let Some(width) = constraints.ideal_width {
        Reflect::set(&video, &"width".into(), &ideal(width)?)?;
    }
    if let Some(height) = constraints.ideal_height {
        Reflect::set(&video, &"height".into(), &ideal(height)?)?;
    }
    if let Some(facing) = constraints.facing_mode {
        Reflect::set(
            &video,
            &"facingMode".into(),
            &JsValue::from_str(facing.as_constraint()),
        )?;
    }
    js.set_video(&video);
    Ok(js)
}

fn ideal(value: u32) -> Result<JsValue, JsValue> {
    let range = Object::new();
    Reflect::set(&range, &"ideal".into(), &JsValue::from(value))?;
    Ok(range.into())
}
