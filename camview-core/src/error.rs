//! Error types for camera binding
//!
//! Every failure the binder can observe is described here. None of them reach
//! the caller of [`CameraBinder::bind_camera`](crate::CameraBinder::bind_camera):
//! they are turned into diagnostics at the boundary of the binding sequence.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for camera binding operations
#[derive(Error, Debug)]
pub enum BindError {
    /// The host refused or could not provide a camera stream
    #[error("Camera capture denied ({kind}): {reason}")]
    CaptureDenied {
        /// Classified cause of the denial
        kind: DenialKind,
        /// Host-supplied reason
        reason: String,
    },

    /// No element matched the display query
    #[error("Display element not found: {selector}")]
    ElementNotFound {
        /// Query used to locate the element
        selector: String,
    },

    /// More than one element matched the display query
    #[error("Display query {selector} matched {count} elements, expected exactly one")]
    AmbiguousElement {
        /// Query used to locate the element
        selector: String,
        /// Number of matching elements
        count: usize,
    },

    /// A stream is already bound by this binder
    #[error("A camera stream is already bound")]
    AlreadyBound,

    /// The element can no longer report that metadata has loaded
    #[error("Metadata never became available: {reason}")]
    MetadataUnavailable {
        /// Failure reason
        reason: String,
    },

    /// The element rejected the play command
    #[error("Playback failed to start: {reason}")]
    PlaybackFailed {
        /// Host-supplied reason
        reason: String,
    },

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Error message
        message: String,
    },

    /// Configuration could not be parsed
    #[error("Configuration parse error: {source}")]
    Config {
        /// Underlying parser error
        #[from]
        source: serde_json::Error,
    },
}

/// Result type alias for binding operations
pub type BindResult<T> = Result<T, BindError>;

impl BindError {
    /// Check if the error could go away on a later attempt
    ///
    /// The binder itself never retries; this is advice for callers that own
    /// a fresh binder.
    pub fn is_recoverable(&self) -> bool {
        match self {
            BindError::CaptureDenied { kind, .. } => kind.is_transient(),
            BindError::ElementNotFound { .. } => true,
            BindError::MetadataUnavailable { .. } => true,
            BindError::PlaybackFailed { .. } => true,
            BindError::AmbiguousElement { .. } => false,
            BindError::AlreadyBound => false,
            BindError::InvalidConfiguration { .. } => false,
            BindError::Config { .. } => false,
        }
    }

    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            BindError::CaptureDenied { kind, .. } => match kind {
                DenialKind::PermissionDenied => ErrorCategory::Permission,
                DenialKind::NoDevice | DenialKind::DeviceBusy => ErrorCategory::Device,
                DenialKind::Unsupported => ErrorCategory::Platform,
                DenialKind::Other => ErrorCategory::Device,
            },
            BindError::ElementNotFound { .. } => ErrorCategory::Element,
            BindError::AmbiguousElement { .. } => ErrorCategory::Element,
            BindError::AlreadyBound => ErrorCategory::State,
            BindError::MetadataUnavailable { .. } => ErrorCategory::Playback,
            BindError::PlaybackFailed { .. } => ErrorCategory::Playback,
            BindError::InvalidConfiguration { .. } => ErrorCategory::Configuration,
            BindError::Config { .. } => ErrorCategory::Configuration,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// The user or host policy refused access
    Permission,
    /// Camera hardware missing, busy or failing
    Device,
    /// Host does not expose a capture capability
    Platform,
    /// Display element lookup problems
    Element,
    /// Metadata or playback problems on the element
    Playback,
    /// Binder lifecycle misuse
    State,
    /// Configuration and parameter errors
    Configuration,
}

/// Classified cause of a capture denial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// The user dismissed or refused the permission prompt
    PermissionDenied,
    /// No camera matches the requested constraints
    NoDevice,
    /// A camera exists but could not be opened
    DeviceBusy,
    /// The host exposes no capture capability at all
    Unsupported,
    /// Anything the host reported that we do not recognise
    Other,
}

impl DenialKind {
    /// Classify a DOM exception name as reported by `getUserMedia`
    pub fn from_dom_name(name: &str) -> Self {
        match name {
            "NotAllowedError" | "SecurityError" | "PermissionDeniedError" => {
                DenialKind::PermissionDenied
            }
            "NotFoundError" | "OverconstrainedError" | "DevicesNotFoundError" => {
                DenialKind::NoDevice
            }
            "NotReadableError" | "AbortError" | "TrackStartError" => DenialKind::DeviceBusy,
            "TypeError" | "NotSupportedError" => DenialKind::Unsupported,
            _ => DenialKind::Other,
        }
    }

    fn is_transient(&self) -> bool {
        matches!(self, DenialKind::DeviceBusy | DenialKind::Other)
    }

    /// Short stable name, used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            DenialKind::PermissionDenied => "permission_denied",
            DenialKind::NoDevice => "no_device",
            DenialKind::DeviceBusy => "device_busy",
            DenialKind::Unsupported => "unsupported",
            DenialKind::Other => "other",
        }
    }
}

impl std::fmt::Display for DenialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host's refusal to hand out a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureDenial {
    /// Classified cause
    pub kind: DenialKind,
    /// Host-supplied reason, kept verbatim
    pub reason: String,
}

impl CaptureDenial {
    /// Create a denial with an explicit classification
    pub fn new(kind: DenialKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// Create a denial from a DOM exception name and message
    pub fn from_dom_exception(name: &str, message: &str) -> Self {
        let reason = if message.is_empty() {
            name.to_string()
        } else {
            format!("{}: {}", name, message)
        };
        Self::new(DenialKind::from_dom_name(name), reason)
    }
}

impl From<CaptureDenial> for BindError {
    fn from(denial: CaptureDenial) -> Self {
        BindError::CaptureDenied {
            kind: denial.kind,
            reason: denial.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let denied = BindError::from(CaptureDenial::new(
            DenialKind::PermissionDenied,
            "permission denied",
        ));
        assert_eq!(denied.category(), ErrorCategory::Permission);
        assert!(!denied.is_recoverable());

        let busy = BindError::from(CaptureDenial::new(DenialKind::DeviceBusy, "in use"));
        assert_eq!(busy.category(), ErrorCategory::Device);
        assert!(busy.is_recoverable());

        assert_eq!(BindError::AlreadyBound.category(), ErrorCategory::State);
    }

    #[test]
    fn test_error_display() {
        let error = BindError::AmbiguousElement {
            selector: "video".to_string(),
            count: 2,
        };
        assert_eq!(
            error.to_string(),
            "Display query video matched 2 elements, expected exactly one"
        );

        let denied = BindError::CaptureDenied {
            kind: DenialKind::NoDevice,
            reason: "NotFoundError: Requested device not found".to_string(),
        };
        assert_eq!(
            denied.to_string(),
            "Camera capture denied (no_device): NotFoundError: Requested device not found"
        );
    }

    #[test]
    fn test_dom_exception_classification() {
        assert_eq!(
            DenialKind::from_dom_name("NotAllowedError"),
            DenialKind::PermissionDenied
        );
        assert_eq!(
            DenialKind::from_dom_name("OverconstrainedError"),
            DenialKind::NoDevice
        );
        assert_eq!(
            DenialKind::from_dom_name("NotReadableError"),
            DenialKind::DeviceBusy
        );
        assert_eq!(DenialKind::from_dom_name("Whatever"), DenialKind::Other);

        let denial = CaptureDenial::from_dom_exception("NotAllowedError", "Permission denied");
        assert_eq!(denial.kind, DenialKind::PermissionDenied);
        assert_eq!(denial.reason, "NotAllowedError: Permission denied");

        let bare = CaptureDenial::from_dom_exception("AbortError", "");
        assert_eq!(bare.reason, "AbortError");
    }

    #[test]
    fn test_error_from_json() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        match BindError::from(parse) {
            BindError::Config { .. } => (),
            _ => panic!("Expected Config error variant"),
        }
    }
}
