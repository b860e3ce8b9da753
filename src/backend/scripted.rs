//! Queue-driven backend with no hardware behind it.
//!
//! Events are queued with the builder-style helpers and only delivered on
//! the next [`GamepadBackend::update`], the same way a polled device
//! behaves.

use super::{
    BackendError, GamepadBackend, GamepadInfo, HardwareEvent, HardwareSender, TickListener,
};
use crate::input::axis::GamepadAxis;
use crate::input::button::PadIndex;
use crate::input::mapping::GamepadControl;
use std::collections::VecDeque;
use std::fmt;
use tracing::{debug, warn};

#[derive(Default)]
pub struct ScriptedBackend {
    name: String,
    events: Option<HardwareSender>,
    queue: VecDeque<HardwareEvent>,
    connected: Vec<GamepadInfo>,
    tick_listeners: Vec<TickListener>,
    init_count: usize,
    update_count: u64,
    tick_count: u64,
    fail_init: bool,
}

impl ScriptedBackend {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Makes the next `init` fail, for exercising error paths.
    pub fn failing(name: &str) -> Self {
        Self {
            fail_init: true,
            ..Self::new(name)
        }
    }

    pub fn queue(&mut self, event: HardwareEvent) -> &mut Self {
        self.queue.push_back(event);
        self
    }

    pub fn connect(&mut self, index: PadIndex, name: &str) -> &mut Self {
        self.queue(HardwareEvent::Connected(GamepadInfo {
            index,
            name: name.to_string(),
        }))
    }

    pub fn disconnect(&mut self, index: PadIndex) -> &mut Self {
        let name = self
            .connected
            .iter()
            .chain(self.queued_connections())
            .find(|info| info.index == index)
            .map(|info| info.name.clone())
            .unwrap_or_default();
        self.queue(HardwareEvent::Disconnected(GamepadInfo { index, name }))
    }

    pub fn press(&mut self, control: GamepadControl, pad: PadIndex) -> &mut Self {
        self.queue(HardwareEvent::ButtonDown { control, pad })
    }

    pub fn release(&mut self, control: GamepadControl, pad: PadIndex) -> &mut Self {
        self.queue(HardwareEvent::ButtonUp { control, pad })
    }

    pub fn move_axis(&mut self, axis: GamepadAxis, value: f32, pad: PadIndex) -> &mut Self {
        self.queue(HardwareEvent::AxisChanged { axis, value, pad })
    }

    pub fn init_count(&self) -> usize {
        self.init_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    fn queued_connections(&self) -> impl Iterator<Item = &GamepadInfo> {
        self.queue.iter().filter_map(|event| match event {
            HardwareEvent::Connected(info) => Some(info),
            _ => None,
        })
    }
}

impl fmt::Debug for ScriptedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedBackend")
            .field("name", &self.name)
            .field("queue", &self.queue)
            .field("connected", &self.connected)
            .field("tick_listeners", &self.tick_listeners.len())
            .field("update_count", &self.update_count)
            .field("tick_count", &self.tick_count)
            .finish_non_exhaustive()
    }
}

impl GamepadBackend for ScriptedBackend {
    fn init(&mut self, events: HardwareSender) -> Result<(), BackendError> {
        if self.fail_init {
            return Err(BackendError::InitializationError(format!(
                "{} refused to start",
                self.name
            )));
        }
        self.init_count += 1;
        self.events = Some(events);
        debug!("Scripted backend {} initialized", self.name);
        Ok(())
    }

    fn update(&mut self) {
        self.update_count += 1;
        let Some(events) = &self.events else {
            return;
        };

        while let Some(event) = self.queue.pop_front() {
            match &event {
                HardwareEvent::Connected(info) => self.connected.push(info.clone()),
                HardwareEvent::Disconnected(info) => {
                    self.connected.retain(|pad| pad.index != info.index)
                }
                _ => {}
            }
            if events.send(event).is_err() {
                warn!("Scripted backend {}: session channel closed", self.name);
                self.events = None;
                break;
            }
        }

        if !self.connected.is_empty() {
            self.fire_tick();
        }
    }

    fn connected_count(&self) -> usize {
        self.connected.len()
    }

    fn on_tick(&mut self, listener: TickListener) {
        self.tick_listeners.push(listener);
    }

    fn fire_tick(&mut self) {
        self.tick_count += 1;
        let attached = self.connected.len();
        for listener in self.tick_listeners.iter_mut() {
            listener(attached);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    #[test]
    fn events_wait_for_update() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut backend = ScriptedBackend::new("pad");
        backend.init(tx).unwrap();
        backend.press(GamepadControl::Face1, 0);
        assert!(rx.try_recv().is_err());

        backend.update();
        assert_eq!(
            rx.try_recv().ok(),
            Some(HardwareEvent::ButtonDown {
                control: GamepadControl::Face1,
                pad: 0
            })
        );
    }

    #[test]
    fn ticks_only_with_a_pad_attached() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut backend = ScriptedBackend::new("pad");
        backend.init(tx).unwrap();

        backend.update();
        assert_eq!(backend.tick_count(), 0);

        backend.connect(0, "Arcade Stick");
        backend.update();
        assert_eq!(backend.connected_count(), 1);
        assert_eq!(backend.tick_count(), 1);

        backend.disconnect(0);
        backend.update();
        assert_eq!(backend.connected_count(), 0);
        assert_eq!(backend.tick_count(), 1);
    }

    #[test]
    fn tick_listeners_see_the_attached_pads() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut backend = ScriptedBackend::new("pad");
        backend.init(tx).unwrap();
        let sink = seen.clone();
        backend.on_tick(Box::new(move |attached| sink.lock().unwrap().push(attached)));

        backend.fire_tick();
        backend.connect(0, "Arcade Stick").connect(1, "Trackball");
        backend.update();

        assert_eq!(*seen.lock().unwrap(), vec![0, 2]);
        assert_eq!(backend.tick_count(), 2);
    }

    #[test]
    fn disconnect_reuses_the_connected_name() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut backend = ScriptedBackend::new("pad");
        backend.init(tx).unwrap();
        backend.connect(3, "Arcade Stick").disconnect(3);
        backend.update();

        let _connected = rx.try_recv().unwrap();
        assert_eq!(
            rx.try_recv().ok(),
            Some(HardwareEvent::Disconnected(GamepadInfo {
                index: 3,
                name: "Arcade Stick".to_string()
            }))
        );
    }

    #[test]
    fn failing_backend_reports_init_error() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut backend = ScriptedBackend::failing("broken");
        assert!(matches!(
            backend.init(tx),
            Err(BackendError::InitializationError(_))
        ));
        assert_eq!(backend.init_count(), 0);
    }
}
