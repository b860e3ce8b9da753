//! Gamepad hardware abstraction.
//!
//! A backend owns device enumeration and raw polling. The session hands it
//! a [`HardwareSender`] in [`GamepadBackend::init`]; from then on every
//! [`GamepadBackend::update`] pushes whatever changed since the last frame
//! into that channel.
//!
//! ```text
//! PollLoop ──update()──► Backend ──HardwareEvent──► Session ──InputEvent──► subscribers
//! ```

#[cfg(feature = "gilrs-backend")]
pub mod gilrs_backend;
pub mod scripted;

#[cfg(feature = "gilrs-backend")]
pub use gilrs_backend::GilrsBackend;
pub use scripted::ScriptedBackend;

use crate::input::axis::GamepadAxis;
use crate::input::button::PadIndex;
use crate::input::mapping::GamepadControl;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Identity of a connected pad, passed through verbatim on connect and
/// disconnect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamepadInfo {
    pub index: PadIndex,
    pub name: String,
}

/// Raw event as the hardware abstraction reports it.
#[derive(Debug, Clone, PartialEq)]
pub enum HardwareEvent {
    Connected(GamepadInfo),
    Disconnected(GamepadInfo),
    ButtonDown {
        control: GamepadControl,
        pad: PadIndex,
    },
    ButtonUp {
        control: GamepadControl,
        pad: PadIndex,
    },
    AxisChanged {
        axis: GamepadAxis,
        value: f32,
        pad: PadIndex,
    },
}

pub type HardwareSender = mpsc::UnboundedSender<HardwareEvent>;
pub type HardwareReceiver = mpsc::UnboundedReceiver<HardwareEvent>;

/// Device handle shared between a session and its poll loop.
pub type SharedBackend = Arc<Mutex<dyn GamepadBackend>>;

/// Per-frame callback. Receives the number of attached pads, which is 0 when
/// the poll driver fired the tick itself.
pub type TickListener = Box<dyn FnMut(usize) + Send>;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to initialize gamepad backend: {0}")]
    InitializationError(String),
}

pub trait GamepadBackend: Send {
    /// Binds the event channel and brings the hardware up. Calling it again
    /// replaces the previous channel.
    fn init(&mut self, events: HardwareSender) -> Result<(), BackendError>;

    /// Refreshes internal state and delivers pending events. Backends fire
    /// their own per-frame tick here, but only while a pad is attached.
    fn update(&mut self);

    /// Number of pads currently attached.
    fn connected_count(&self) -> usize;

    /// Registers a listener for the per-frame tick. Listeners survive
    /// re-initialization of the backend.
    fn on_tick(&mut self, listener: TickListener);

    /// Calls every registered tick listener once.
    fn fire_tick(&mut self);

    fn name(&self) -> &str;
}
