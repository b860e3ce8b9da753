//! Keyboard and hardware event handlers.
//!
//! Handlers resolve the physical source, run axis readings through
//! [`AxisTranslator`], and route every resulting press or release through
//! the [`ButtonStateTracker`]. Only genuine edges reach the [`EventSink`].

use super::axis::AxisTranslator;
use super::button::{ButtonStateKey, LogicalButton, PadIndex};
use super::keys::{self, KeyCode};
use super::mapping::MappingTable;
use super::sink::{EventSink, InputEvent};
use super::state::ButtonStateTracker;
use crate::backend::HardwareEvent;
use tracing::{debug, trace};

/// What the shell should do with a key event after translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The key is bound; suppress default handling.
    Consumed,
    /// Unbound; let the shell handle it.
    PassThrough,
}

impl KeyDisposition {
    pub fn is_consumed(self) -> bool {
        self == KeyDisposition::Consumed
    }
}

#[derive(Debug)]
pub struct EventTranslator {
    mapping: &'static MappingTable,
    tracker: ButtonStateTracker,
    debug_keys: bool,
}

impl EventTranslator {
    pub fn new(mapping: &'static MappingTable, debug_keys: bool) -> Self {
        Self {
            mapping,
            tracker: ButtonStateTracker::new(),
            debug_keys,
        }
    }

    pub fn tracker(&self) -> &ButtonStateTracker {
        &self.tracker
    }

    /// Clears all button state, as at the start of a session.
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    fn resolve_key(&self, code: KeyCode) -> Option<LogicalButton> {
        self.mapping
            .key(code)
            .filter(|button| self.debug_keys || !button.is_debug())
    }

    pub fn key_down(&mut self, code: KeyCode, sink: &mut EventSink) -> KeyDisposition {
        match self.resolve_key(code) {
            Some(button) => {
                self.pressed(button, None, sink);
                KeyDisposition::Consumed
            }
            None => {
                trace!("Unbound key down: {} ({:?})", code, keys::name(code));
                KeyDisposition::PassThrough
            }
        }
    }

    pub fn key_up(&mut self, code: KeyCode, sink: &mut EventSink) -> KeyDisposition {
        match self.resolve_key(code) {
            Some(button) => {
                self.released(button, None, sink);
                KeyDisposition::Consumed
            }
            None => KeyDisposition::PassThrough,
        }
    }

    pub fn handle_hardware(&mut self, event: HardwareEvent, sink: &mut EventSink) {
        match event {
            HardwareEvent::Connected(info) => {
                sink.emit(InputEvent::GamepadConnected(info));
            }
            HardwareEvent::Disconnected(info) => {
                sink.emit(InputEvent::GamepadDisconnected(info));
            }
            HardwareEvent::ButtonDown { control, pad } => {
                if let Some(button) = self.mapping.control(control) {
                    self.pressed(button, Some(pad), sink);
                }
            }
            HardwareEvent::ButtonUp { control, pad } => {
                if let Some(button) = self.mapping.control(control) {
                    self.released(button, Some(pad), sink);
                }
            }
            HardwareEvent::AxisChanged { axis, value, pad } => {
                let Some(stick) = axis.stick_axis() else {
                    return;
                };
                for change in AxisTranslator::translate(stick, value) {
                    let Some(button) = self.mapping.control(change.control) else {
                        continue;
                    };
                    if change.pressed {
                        self.pressed(button, Some(pad), sink);
                    } else {
                        self.released(button, Some(pad), sink);
                    }
                }
            }
        }
    }

    /// Emits `button_down` if this is a new press for `(button, pad)`.
    pub fn pressed(&mut self, button: LogicalButton, pad: Option<PadIndex>, sink: &mut EventSink) {
        if self.tracker.set_state(ButtonStateKey::new(button, pad), true) {
            debug!("button_down {} (pad {:?})", button, pad);
            sink.emit(InputEvent::ButtonDown { button, pad });
        }
    }

    /// Emits `button_up` if `(button, pad)` was held.
    pub fn released(&mut self, button: LogicalButton, pad: Option<PadIndex>, sink: &mut EventSink) {
        if self.tracker.set_state(ButtonStateKey::new(button, pad), false) {
            debug!("button_up {} (pad {:?})", button, pad);
            sink.emit(InputEvent::ButtonUp { button, pad });
        }
    }
}
