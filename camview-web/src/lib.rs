//! # camview web
//!
//! Browser host for the camera binder. Built for `wasm32-unknown-unknown`;
//! on other targets this crate is empty.
//!
//! With the default `autostart` feature the module binds the camera to the
//! page's single `<video>` element as soon as it loads. Pages can instead call
//! the exported `bindCamera(configJson)` themselves.

#![deny(missing_docs)]
#![warn(clippy::all)]

#[cfg(target_arch = "wasm32")]
pub mod console;
#[cfg(target_arch = "wasm32")]
pub mod devices;
#[cfg(target_arch = "wasm32")]
pub mod element;
#[cfg(target_arch = "wasm32")]
mod js;

#[cfg(target_arch = "wasm32")]
pub use console::{init_console_logging, ConsoleMakeWriter, ConsoleSink, ConsoleWriter};
#[cfg(target_arch = "wasm32")]
pub use devices::WebMediaDevices;
#[cfg(target_arch = "wasm32")]
pub use element::{DocumentLocator, VideoElement};

#[cfg(target_arch = "wasm32")]
mod entry {
    use crate::{ConsoleSink, DocumentLocator, WebMediaDevices};
    use camview_core::{
        BindResult, BindState, BinderConfig, BinderSlot, CameraBinder, Diagnostic, DiagnosticSink,
    };
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;

    thread_local! {
        static PAGE_BINDER: BinderSlot<WebMediaDevices, ConsoleSink> = BinderSlot::new();
    }

    /// Locate the configured element in the current document and bind to it
    ///
    /// All calls on a page share one binder, so only the first one requests
    /// the camera; later calls report `AlreadyBound` while that stream is
    /// requested or bound, and reuse the first call's configuration.
    pub async fn bind_page_camera(config: BinderConfig) -> BindResult<BindState> {
        let locator = DocumentLocator::from_window()?;
        let binder = PAGE_BINDER.with(|slot| {
            slot.get_or_try_init(|| {
                CameraBinder::new(WebMediaDevices::new(), ConsoleSink::new(), config)
            })
        })?;
        Ok(binder.bind_camera_to(&locator).await)
    }

    /// Module start hook
    #[cfg_attr(feature = "autostart", wasm_bindgen(start))]
    pub fn start() {
        let config = BinderConfig::default();
        let _ = crate::init_console_logging(&config);
        spawn_local(async move {
            if let Err(error) = bind_page_camera(config).await {
                ConsoleSink::new().emit(&Diagnostic::from_error(&error));
            }
        });
    }

    /// Bind the camera from page script
    ///
    /// `config` is an optional JSON `BinderConfig`. Resolves to the state
    /// reached (`"playing"`, `"bound"` or `"unbound"`); rejects only when the
    /// configuration is invalid or the page has no document.
    #[wasm_bindgen(js_name = bindCamera)]
    pub async fn bind_camera(config: Option<String>) -> Result<String, JsValue> {
        let config = match config {
            Some(json) => BinderConfig::from_json(&json),
            None => Ok(BinderConfig::default()),
        }
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let _ = crate::init_console_logging(&config);
        bind_page_camera(config)
            .await
            .map(|state| state.as_str().to_string())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
pub use entry::{bind_camera, bind_page_camera, start};
