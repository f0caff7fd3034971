//! # camview core
//!
//! Request a camera stream from the host and play it on a display element.
//!
//! The host is abstracted behind [`MediaDevices`], [`DisplayElement`] and
//! [`ElementLocator`]; failures are written to a [`DiagnosticSink`] rather
//! than returned. See `camview-web` for the browser implementation.
//!
//! ```rust,ignore
//! let binder = CameraBinder::with_defaults(devices, sink);
//! let state = binder.bind_camera(&video).await;
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod binder;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod event;
pub mod host;

// Re-export main types
pub use binder::{BindState, BinderSlot, CameraBinder};
pub use config::{BinderConfig, FacingMode, PlaybackPolicy, StreamConstraints, DEFAULT_SELECTOR};
pub use diagnostic::{Diagnostic, DiagnosticSink, CAPTURE_REJECTED_MESSAGE};
pub use error::{BindError, BindResult, CaptureDenial, DenialKind, ErrorCategory};
pub use event::BinderEvent;
pub use host::{DisplayElement, ElementLocator, MediaDevices};
