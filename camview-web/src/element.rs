//! `<video>` elements as display targets

use crate::js::js_reason;
use async_trait::async_trait;
use camview_core::{BindError, BindResult, DisplayElement, ElementLocator};
use futures::channel::oneshot;
use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Event, HtmlMediaElement, HtmlVideoElement, MediaStream};

const LOADED_METADATA: &str = "loadedmetadata";

/// A page `<video>` element
#[derive(Debug, Clone)]
pub struct VideoElement {
    inner: HtmlVideoElement,
}

impl VideoElement {
    /// Wrap an existing element
    pub fn new(inner: HtmlVideoElement) -> Self {
        Self { inner }
    }
}

#[async_trait(?Send)]
impl DisplayElement for VideoElement {
    type Stream = MediaStream;

    fn set_source(&self, stream: Option<&MediaStream>) {
        self.inner.set_src_object(stream);
    }

    fn source(&self) -> Option<MediaStream> {
        self.inner.src_object()
    }

    async fn metadata_loaded(&self) -> BindResult<()> {
        if self.inner.ready_state() >= HtmlMediaElement::HAVE_METADATA {
            return Ok(());
        }

        let (tx, rx) = oneshot::channel::<()>();
        let on_loaded = Closure::once(move |_: Event| {
            let _ = tx.send(());
        });
        self.inner
            .add_event_listener_with_callback(LOADED_METADATA, on_loaded.as_ref().unchecked_ref())
            .map_err(|e| BindError::MetadataUnavailable {
                reason: js_reason(&e),
            })?;

        let loaded = rx.await;
        let _ = self
            .inner
            .remove_event_listener_with_callback(LOADED_METADATA, on_loaded.as_ref().unchecked_ref());
        drop(on_loaded);

        loaded.map_err(|_| BindError::MetadataUnavailable {
            reason: "loadedmetadata listener dropped".to_string(),
        })
    }

    async fn play(&self) -> BindResult<()> {
        let promise = self.inner.play().map_err(|e| BindError::PlaybackFailed {
            reason: js_reason(&e),
        })?;
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| BindError::PlaybackFailed {
                reason: js_reason(&e),
            })
    }
}

/// Finds `<video>` elements with `querySelectorAll`
#[derive(Debug, Clone)]
pub struct DocumentLocator {
    document: Document,
}

impl DocumentLocator {
    /// Search the given document
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Search the current window's document
    pub fn from_window() -> BindResult<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or_else(|| BindError::ElementNotFound {
                selector: "document".to_string(),
            })
    }
}

impl ElementLocator for DocumentLocator {
    type Element = VideoElement;

    fn locate_all(&self, selector: &str) -> BindResult<Vec<VideoElement>> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|e| BindError::InvalidConfiguration {
                message: format!("Invalid display selector {}: {}", selector, js_reason(&e)),
            })?;

        let mut found = Vec::new();
        for index in 0..nodes.length() {
            let Some(node) = nodes.item(index) else {
                continue;
            };
            match node.dyn_into::<HtmlVideoElement>() {
                Ok(video) => found.push(VideoElement::new(video)),
                Err(_) => debug!(selector, index, "Skipping non-video match"),
            }
        }
        Ok(found)
    }
}
