//! The camera binder
//!
//! Drives the sequence `request → bind source → await metadata → play` and
//! turns every failure along the way into a [`Diagnostic`].

use crate::config::{BinderConfig, PlaybackPolicy};
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::error::{BindError, BindResult};
use crate::event::BinderEvent;
use crate::host::{DisplayElement, ElementLocator, MediaDevices};
use parking_lot::RwLock;
use std::cell::OnceCell;
use std::rc::Rc;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Where a binder is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindState {
    /// Nothing requested, or the last request was denied
    Unbound,
    /// A capture request is outstanding
    Requesting,
    /// Source set; metadata pending or play rejected
    Bound,
    /// Play accepted
    Playing,
}

impl BindState {
    /// Lower-case name, as exposed to page scripts
    pub fn as_str(&self) -> &'static str {
        match self {
            BindState::Unbound => "unbound",
            BindState::Requesting => "requesting",
            BindState::Bound => "bound",
            BindState::Playing => "playing",
        }
    }
}

/// Binds one camera stream to one display element
pub struct CameraBinder<D, S> {
    devices: D,
    sink: S,
    config: BinderConfig,
    state: RwLock<BindState>,
    event_tx: broadcast::Sender<BinderEvent>,
}

impl<D, S> CameraBinder<D, S>
where
    D: MediaDevices,
    S: DiagnosticSink,
{
    /// Create a binder with a validated configuration
    pub fn new(devices: D, sink: S, config: BinderConfig) -> BindResult<Self> {
        config.validate()?;
        Ok(Self::from_parts(devices, sink, config))
    }

    /// Create a binder with the default video-only configuration
    pub fn with_defaults(devices: D, sink: S) -> Self {
        Self::from_parts(devices, sink, BinderConfig::default())
    }

    fn from_parts(devices: D, sink: S, config: BinderConfig) -> Self {
        let (event_tx, _) = broadcast::channel(32);

        Self {
            devices,
            sink,
            config,
            state: RwLock::new(BindState::Unbound),
            event_tx,
        }
    }

    /// Current state
    pub fn state(&self) -> BindState {
        *self.state.read()
    }

    /// Active configuration
    pub fn config(&self) -> &BinderConfig {
        &self.config
    }

    /// Subscribe to binding events
    pub fn subscribe(&self) -> broadcast::Receiver<BinderEvent> {
        self.event_tx.subscribe()
    }

    /// Request a camera stream and play it on `element`
    ///
    /// Returns the state reached. Failures never propagate: each one is
    /// written to the diagnostic sink and the binder stays where it stopped.
    pub async fn bind_camera<E>(&self, element: &E) -> BindState
    where
        E: DisplayElement<Stream = D::Stream>,
    {
        if let Err(error) = self.try_bind(element).await {
            self.report(&error);
        }
        self.state()
    }

    /// Locate the configured display element, then bind to it
    ///
    /// The lookup happens before the camera is requested, so a page without
    /// a unique element never shows a permission prompt.
    pub async fn bind_camera_to<L>(&self, locator: &L) -> BindState
    where
        L: ElementLocator,
        L::Element: DisplayElement<Stream = D::Stream>,
    {
        if self.state() != BindState::Unbound {
            self.publish(BinderEvent::RebindRejected);
            self.report(&BindError::AlreadyBound);
            return self.state();
        }

        match self.locate_unique(locator) {
            Ok(element) => self.bind_camera(&element).await,
            Err(error) => {
                self.publish(BinderEvent::ElementUnavailable {
                    selector: self.config.selector.clone(),
                });
                self.report(&error);
                self.state()
            }
        }
    }

    async fn try_bind<E>(&self, element: &E) -> BindResult<()>
    where
        E: DisplayElement<Stream = D::Stream>,
    {
        self.begin_request()?;
        self.publish(BinderEvent::CaptureRequested);
        debug!(constraints = ?self.config.constraints, "Requesting camera stream");

        let stream = match self.devices.request_stream(&self.config.constraints).await {
            Ok(stream) => stream,
            Err(denial) => {
                self.set_state(BindState::Unbound);
                self.publish(BinderEvent::CaptureDenied {
                    kind: denial.kind,
                    reason: denial.reason.clone(),
                });
                return Err(denial.into());
            }
        };
        self.publish(BinderEvent::CaptureGranted);

        element.set_source(Some(&stream));
        self.set_state(BindState::Bound);
        self.publish(BinderEvent::SourceBound);
        info!("Camera stream bound to display element");

        element.metadata_loaded().await?;
        self.publish(BinderEvent::MetadataLoaded);
        debug!("Display element metadata loaded, starting playback");

        match element.play().await {
            Ok(()) => {
                self.set_state(BindState::Playing);
                self.publish(BinderEvent::PlaybackStarted);
                info!("Camera playback started");
                Ok(())
            }
            Err(error) => {
                let reason = match &error {
                    BindError::PlaybackFailed { reason } => reason.clone(),
                    other => other.to_string(),
                };
                self.publish(BinderEvent::PlaybackFailed {
                    reason: reason.clone(),
                });
                match self.config.playback_policy {
                    PlaybackPolicy::Ignore => {
                        debug!(%reason, "Play rejected, ignored by policy");
                        Ok(())
                    }
                    PlaybackPolicy::Log => Err(BindError::PlaybackFailed { reason }),
                }
            }
        }
    }

    fn begin_request(&self) -> BindResult<()> {
        let mut state = self.state.write();
        if *state != BindState::Unbound {
            drop(state);
            self.publish(BinderEvent::RebindRejected);
            return Err(BindError::AlreadyBound);
        }
        *state = BindState::Requesting;
        Ok(())
    }

    fn locate_unique<L: ElementLocator>(&self, locator: &L) -> BindResult<L::Element> {
        let selector = &self.config.selector;
        let mut found = locator.locate_all(selector)?;
        match found.len() {
            0 => Err(BindError::ElementNotFound {
                selector: selector.clone(),
            }),
            1 => found.pop().ok_or_else(|| BindError::ElementNotFound {
                selector: selector.clone(),
            }),
            count => Err(BindError::AmbiguousElement {
                selector: selector.clone(),
                count,
            }),
        }
    }

    fn set_state(&self, new_state: BindState) {
        let mut state = self.state.write();
        debug!(from = ?*state, to = ?new_state, "Bind state change");
        *state = new_state;
    }

    fn publish(&self, event: BinderEvent) {
        let _ = self.event_tx.send(event);
    }

    fn report(&self, error: &BindError) {
        debug!(category = ?error.category(), "Binding stopped: {}", error);
        self.sink.emit(&Diagnostic::from_error(error));
    }
}

/// Holds the one binder a page is allowed to have
///
/// Every entry point that binds the page's camera goes through the same slot,
/// so a second call meets the first binder's state and is rejected with
/// [`BindError::AlreadyBound`] instead of requesting another stream. The
/// configuration of the first call wins.
pub struct BinderSlot<D, S> {
    binder: OnceCell<Rc<CameraBinder<D, S>>>,
}

impl<D, S> Default for BinderSlot<D, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, S> BinderSlot<D, S> {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self {
            binder: OnceCell::new(),
        }
    }

    /// The binder, if one was created
    pub fn get(&self) -> Option<Rc<CameraBinder<D, S>>> {
        self.binder.get().cloned()
    }
}

impl<D, S> BinderSlot<D, S>
where
    D: MediaDevices,
    S: DiagnosticSink,
{
    /// Return the existing binder, or create it with `init`
    ///
    /// `init` only runs while the slot is empty; a failed `init` leaves it
    /// empty.
    pub fn get_or_try_init<F>(&self, init: F) -> BindResult<Rc<CameraBinder<D, S>>>
    where
        F: FnOnce() -> BindResult<CameraBinder<D, S>>,
    {
        if let Some(binder) = self.binder.get() {
            debug!("Reusing page camera binder");
            return Ok(Rc::clone(binder));
        }
        let created = Rc::new(init()?);
        Ok(Rc::clone(self.binder.get_or_init(|| created)))
    }
}
