//! Collaborators supplied by the host environment
//!
//! The binder never talks to a browser, an OS camera API or a page directly.
//! It is handed implementations of these traits instead. All of them are
//! `?Send` because browser handles are bound to the thread that created them.

use crate::config::StreamConstraints;
use crate::error::{BindResult, CaptureDenial};
use async_trait::async_trait;

/// The host's "request video capture" capability
#[async_trait(?Send)]
pub trait MediaDevices {
    /// Opaque handle to a live stream, owned by the host
    type Stream: Clone;

    /// Ask the host for a stream matching `constraints`
    ///
    /// May wait indefinitely, e.g. while a permission prompt is open.
    async fn request_stream(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<Self::Stream, CaptureDenial>;
}

/// A pre-existing element able to render a stream
#[async_trait(?Send)]
pub trait DisplayElement {
    /// Stream type this element accepts as its source
    type Stream;

    /// Replace the element's media source
    fn set_source(&self, stream: Option<&Self::Stream>);

    /// Current media source, if any
    fn source(&self) -> Option<Self::Stream>;

    /// Resolve once the element has loaded the source's metadata
    async fn metadata_loaded(&self) -> BindResult<()>;

    /// Start playback
    async fn play(&self) -> BindResult<()>;
}

/// Finds display elements by query
pub trait ElementLocator {
    /// Element type produced by the lookup
    type Element;

    /// All elements matching `selector`, in document order
    fn locate_all(&self, selector: &str) -> BindResult<Vec<Self::Element>>;
}
