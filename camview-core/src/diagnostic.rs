//! Developer-facing diagnostic records
//!
//! A [`Diagnostic`] is what is left of a [`BindError`] once it crosses the
//! binder boundary. Sinks decide where the line ends up.

use crate::error::{BindError, DenialKind, ErrorCategory};
use serde::Serialize;
use std::sync::Arc;

/// Fixed message written when the camera request is rejected
pub const CAPTURE_REJECTED_MESSAGE: &str = "WebCam access rejected by the user!";

/// A single diagnostic line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Fixed human-readable message
    pub message: &'static str,
    /// Detail: the host's reason for denials, the error text otherwise
    pub reason: String,
    /// Error category
    pub category: ErrorCategory,
    /// Denial classification, for capture rejections only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denial: Option<DenialKind>,
}

impl Diagnostic {
    /// Build the diagnostic for `error`
    pub fn from_error(error: &BindError) -> Self {
        let (message, reason, denial) = match error {
            BindError::CaptureDenied { kind, reason } => {
                (CAPTURE_REJECTED_MESSAGE, reason.clone(), Some(*kind))
            }
            BindError::ElementNotFound { .. } | BindError::AmbiguousElement { .. } => {
                ("No unique display element for the camera stream", error.to_string(), None)
            }
            BindError::AlreadyBound => ("Camera already bound, ignoring", error.to_string(), None),
            BindError::MetadataUnavailable { .. } => {
                ("Camera stream metadata never loaded", error.to_string(), None)
            }
            BindError::PlaybackFailed { reason } => {
                ("Camera playback could not start", reason.clone(), None)
            }
            BindError::InvalidConfiguration { .. } | BindError::Config { .. } => {
                ("Camera binder misconfigured", error.to_string(), None)
            }
        };

        Self {
            message,
            reason,
            category: error.category(),
            denial,
        }
    }
}

/// Line-oriented destination for diagnostics
pub trait DiagnosticSink {
    /// Write one diagnostic
    fn emit(&self, diagnostic: &Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Arc<S> {
    fn emit(&self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic)
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn emit(&self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CaptureDenial;

    #[test]
    fn test_denial_keeps_host_reason() {
        let error = BindError::from(CaptureDenial::new(
            DenialKind::PermissionDenied,
            "permission denied",
        ));
        let diagnostic = Diagnostic::from_error(&error);

        assert_eq!(diagnostic.message, CAPTURE_REJECTED_MESSAGE);
        assert_eq!(diagnostic.reason, "permission denied");
        assert_eq!(diagnostic.denial, Some(DenialKind::PermissionDenied));
    }

    #[test]
    fn test_element_errors_carry_selector() {
        let diagnostic = Diagnostic::from_error(&BindError::ElementNotFound {
            selector: "#camera".to_string(),
        });
        assert!(diagnostic.reason.contains("#camera"));
        assert_eq!(diagnostic.category, ErrorCategory::Element);
        assert!(diagnostic.denial.is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let diagnostic = Diagnostic::from_error(&BindError::PlaybackFailed {
            reason: "NotAllowedError".to_string(),
        });
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["message"], "Camera playback could not start");
        assert_eq!(json["reason"], "NotAllowedError");
        assert_eq!(json["category"], "Playback");
        assert!(json.get("denial").is_none());
    }
}
