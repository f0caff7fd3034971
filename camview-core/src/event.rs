//! Binding progress events

use crate::error::DenialKind;

/// Steps of the binding sequence, published in causal order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinderEvent {
    /// The capture request was issued
    CaptureRequested,
    /// The host granted a stream
    CaptureGranted,
    /// The stream was set as the element's source
    SourceBound,
    /// The element reported loaded metadata
    MetadataLoaded,
    /// The element accepted the play command
    PlaybackStarted,
    /// The element rejected the play command
    PlaybackFailed {
        /// Host-supplied reason
        reason: String,
    },
    /// The host refused the capture request
    CaptureDenied {
        /// Classified cause
        kind: DenialKind,
        /// Host-supplied reason
        reason: String,
    },
    /// No unique display element could be found
    ElementUnavailable {
        /// Query used for the lookup
        selector: String,
    },
    /// A bind was attempted while a stream was already requested or bound
    RebindRejected,
}
