//! gilrs-backed hardware abstraction.
//!
//! gilrs is polled, not callback driven, so this backend is always used in
//! manual-update mode: every [`GamepadBackend::update`] drains the gilrs
//! event queue and forwards what the session understands.

use super::{
    BackendError, GamepadBackend, GamepadInfo, HardwareEvent, HardwareSender, TickListener,
};
use crate::input::axis::GamepadAxis;
use crate::input::mapping::GamepadControl;
use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use tracing::{debug, error, info, warn};

pub struct GilrsBackend {
    gilrs: Option<Gilrs>,
    events: Option<HardwareSender>,
    deadzone: f32,
    tick_listeners: Vec<TickListener>,
}

impl GilrsBackend {
    pub fn new(deadzone: f32) -> Self {
        Self {
            gilrs: None,
            events: None,
            deadzone: deadzone.clamp(0.0, 0.95),
            tick_listeners: Vec::new(),
        }
    }

    fn info(gilrs: &Gilrs, id: GamepadId) -> GamepadInfo {
        GamepadInfo {
            index: usize::from(id),
            name: gilrs.gamepad(id).name().to_string(),
        }
    }

    fn convert(&self, gilrs: &Gilrs, id: GamepadId, event: EventType) -> Option<HardwareEvent> {
        let pad = usize::from(id);
        match event {
            EventType::Connected => {
                let info = Self::info(gilrs, id);
                info!("Gamepad connected: [{}] {}", info.index, info.name);
                Some(HardwareEvent::Connected(info))
            }
            EventType::Disconnected => {
                let info = Self::info(gilrs, id);
                warn!("Gamepad disconnected: [{}] {}", info.index, info.name);
                Some(HardwareEvent::Disconnected(info))
            }
            EventType::ButtonPressed(button, _) => {
                map_button(button).map(|control| HardwareEvent::ButtonDown { control, pad })
            }
            EventType::ButtonReleased(button, _) => {
                map_button(button).map(|control| HardwareEvent::ButtonUp { control, pad })
            }
            EventType::AxisChanged(axis, value, _) => {
                let (axis, value) = match axis {
                    Axis::LeftStickX => (GamepadAxis::LeftStickX, value),
                    // gilrs reports up as positive; downstream expects up negative
                    Axis::LeftStickY => (GamepadAxis::LeftStickY, -value),
                    Axis::RightStickX => (GamepadAxis::RightStickX, value),
                    Axis::RightStickY => (GamepadAxis::RightStickY, -value),
                    _ => {
                        debug!("Ignoring unsupported axis: {:?}", axis);
                        return None;
                    }
                };
                Some(HardwareEvent::AxisChanged {
                    axis,
                    value: apply_deadzone(value, self.deadzone),
                    pad,
                })
            }
            EventType::ButtonRepeated(button, _) => {
                debug!("Button repeat ignored: {:?}", button);
                None
            }
            _ => None,
        }
    }
}

impl GamepadBackend for GilrsBackend {
    fn init(&mut self, events: HardwareSender) -> Result<(), BackendError> {
        if self.gilrs.is_none() {
            info!("Initializing gilrs controller interface");
            let gilrs = match Gilrs::new() {
                Ok(g) => g,
                Err(gilrs::Error::NotImplemented(dummy)) => {
                    warn!("Gamepads are not supported on this platform, keyboard only");
                    dummy
                }
                Err(e) => {
                    error!("Failed to initialize gilrs: {}", e);
                    return Err(BackendError::InitializationError(e.to_string()));
                }
            };

            for (id, gamepad) in gilrs.gamepads() {
                info!("  [{}] {} ({:?})", id, gamepad.name(), gamepad.uuid());
            }
            self.gilrs = Some(gilrs);
        }

        self.events = Some(events);
        Ok(())
    }

    fn update(&mut self) {
        let Some(mut gilrs) = self.gilrs.take() else {
            return;
        };

        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            let Some(hardware_event) = self.convert(&gilrs, id, event) else {
                continue;
            };
            let Some(events) = &self.events else {
                continue;
            };
            if events.send(hardware_event).is_err() {
                debug!("Session channel closed, dropping gilrs events");
                self.events = None;
            }
        }
        gilrs.inc();

        let attached = gilrs.gamepads().count();
        self.gilrs = Some(gilrs);

        if attached > 0 {
            self.fire_tick();
        }
    }

    fn connected_count(&self) -> usize {
        self.gilrs
            .as_ref()
            .map(|gilrs| gilrs.gamepads().count())
            .unwrap_or(0)
    }

    fn on_tick(&mut self, listener: TickListener) {
        self.tick_listeners.push(listener);
    }

    fn fire_tick(&mut self) {
        let attached = self.connected_count();
        for listener in self.tick_listeners.iter_mut() {
            listener(attached);
        }
    }

    fn name(&self) -> &str {
        "gilrs"
    }
}

fn map_button(button: Button) -> Option<GamepadControl> {
    match button {
        Button::South => Some(GamepadControl::Face1),
        Button::East => Some(GamepadControl::Face2),
        Button::West => Some(GamepadControl::Face3),
        Button::North => Some(GamepadControl::Face4),
        Button::LeftTrigger => Some(GamepadControl::LeftTopShoulder),
        Button::RightTrigger => Some(GamepadControl::RightTopShoulder),
        Button::LeftTrigger2 => Some(GamepadControl::LeftBottomShoulder),
        Button::RightTrigger2 => Some(GamepadControl::RightBottomShoulder),
        Button::Select => Some(GamepadControl::SelectBack),
        Button::Start => Some(GamepadControl::StartForward),
        Button::LeftThumb => Some(GamepadControl::LeftStick),
        Button::RightThumb => Some(GamepadControl::RightStick),
        Button::DPadUp => Some(GamepadControl::DpadUp),
        Button::DPadDown => Some(GamepadControl::DpadDown),
        Button::DPadLeft => Some(GamepadControl::DpadLeft),
        Button::DPadRight => Some(GamepadControl::DpadRight),
        Button::Mode => Some(GamepadControl::Home),
        _ => None,
    }
}

/// Snaps readings inside `deadzone` to 0 and rescales the rest to the full
/// range.
///
/// This runs on top of the deadzone gilrs's default filters already apply,
/// so `axis_deadzone = 0.0` leaves the gilrs values untouched.
fn apply_deadzone(value: f32, deadzone: f32) -> f32 {
    let magnitude = value.abs();
    if magnitude < deadzone {
        return 0.0;
    }
    value.signum() * (magnitude - deadzone) / (1.0 - deadzone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn face_buttons_follow_positions() {
        assert_eq!(map_button(Button::South), Some(GamepadControl::Face1));
        assert_eq!(map_button(Button::North), Some(GamepadControl::Face4));
        assert_eq!(
            map_button(Button::RightTrigger),
            Some(GamepadControl::RightTopShoulder)
        );
        assert_eq!(map_button(Button::Unknown), None);
    }

    #[test]
    fn deadzone_snaps_and_rescales() {
        assert_eq!(apply_deadzone(0.03, 0.05), 0.0);
        assert_eq!(apply_deadzone(-0.04, 0.05), 0.0);
        assert_eq!(apply_deadzone(1.0, 0.05), 1.0);
        assert_eq!(apply_deadzone(-1.0, 0.05), -1.0);
        assert!(apply_deadzone(0.5, 0.05) > 0.0);
    }

    #[test]
    fn zero_deadzone_passes_values_through() {
        assert_eq!(apply_deadzone(0.03, 0.0), 0.03);
        assert_eq!(apply_deadzone(-0.7, 0.0), -0.7);
        assert_eq!(apply_deadzone(0.0, 0.0), 0.0);
    }

    #[test]
    fn tick_listeners_fire_through_the_trait() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = ticks.clone();
        let mut backend = GilrsBackend::new(0.0);
        backend.on_tick(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        backend.fire_tick();
        assert_eq!(ticks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn uninitialized_backend_is_inert() {
        let mut backend = GilrsBackend::new(0.05);
        backend.update();
        assert_eq!(backend.connected_count(), 0);
    }
}
