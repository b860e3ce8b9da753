//! Session lifecycle: one bound device, one state table, one set of
//! subscriptions.
//!
//! The owning application constructs a [`Session`] and keeps it; there is no
//! process-wide instance. Re-initializing tears the previous session down
//! first, so a fresh device always starts with every button released.

use super::button::ButtonStateKey;
use super::keys::KeyCode;
use super::mapping::MappingTable;
use super::poll::{self, Frame, PollLoop};
use super::sink::{EventSink, Subscription, Topic};
use super::translate::{EventTranslator, KeyDisposition};
use crate::backend::{BackendError, HardwareReceiver, SharedBackend};
use crate::config::InputConfig;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Device handle is unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("No device bound to the session")]
    NotInitialized,

    #[error("Poll loop needs a tokio runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

struct BoundDevice {
    backend: SharedBackend,
    events: HardwareReceiver,
    name: String,
}

pub struct Session {
    frame_interval: Duration,
    translator: EventTranslator,
    sink: EventSink,
    device: Option<BoundDevice>,
    poll: Option<PollLoop>,
    keyboard_bound: bool,
}

impl Session {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            frame_interval: config.frame_interval(),
            translator: EventTranslator::new(MappingTable::standard(), config.debug_keys),
            sink: EventSink::new(),
            device: None,
            poll: None,
            keyboard_bound: false,
        }
    }

    /// Binds `backend` and initializes it. An active session is torn down
    /// first; button state always starts released.
    pub fn init(&mut self, backend: SharedBackend) -> Result<(), SessionError> {
        if self.device.is_some() {
            info!("Reinitializing input session, tearing down previous device");
            self.teardown();
        }

        self.translator.reset();
        self.keyboard_bound = true;

        let (sender, events) = mpsc::unbounded_channel();
        let name = {
            let mut guard = backend
                .lock()
                .map_err(|e| SessionError::DeviceUnavailable(e.to_string()))?;
            guard.init(sender)?;
            guard.name().to_string()
        };

        info!("Input session bound to {}", name);
        self.device = Some(BoundDevice {
            backend,
            events,
            name,
        });
        Ok(())
    }

    /// Drops every subscription on the session's topics, stops the poll
    /// loop and releases the device. Safe to call at any time.
    ///
    /// Keyboard handling stays active afterwards.
    pub fn teardown(&mut self) {
        for topic in Topic::ALL {
            self.sink.remove_all_listeners(topic);
        }
        if let Some(poll) = self.poll.take() {
            poll.cancel();
        }
        if let Some(device) = self.device.take() {
            info!("Input session released {}", device.name);
        }
    }

    pub fn is_active(&self) -> bool {
        self.device.is_some()
    }

    pub fn device_name(&self) -> Option<&str> {
        self.device.as_ref().map(|device| device.name.as_str())
    }

    pub fn subscribe(&mut self, topic: Topic) -> Subscription {
        self.sink.subscribe(topic)
    }

    pub fn subscribe_many(&mut self, topics: &[Topic]) -> Subscription {
        self.sink.subscribe_many(topics)
    }

    pub fn listener_count(&self, topic: Topic) -> usize {
        self.sink.listener_count(topic)
    }

    /// Registers a per-frame callback on the bound device. It fires once per
    /// driver frame, including frames where no pad is attached.
    pub fn on_tick<F>(&mut self, listener: F) -> Result<(), SessionError>
    where
        F: FnMut(usize) + Send + 'static,
    {
        let device = self.device.as_ref().ok_or(SessionError::NotInitialized)?;
        let mut backend = device
            .backend
            .lock()
            .map_err(|e| SessionError::DeviceUnavailable(e.to_string()))?;
        backend.on_tick(Box::new(listener));
        Ok(())
    }

    pub fn is_pressed(&self, key: ButtonStateKey) -> bool {
        self.translator.tracker().is_pressed(key)
    }

    /// Keyboard key-down from the shell. Inert until the first `init`.
    pub fn key_down(&mut self, code: KeyCode) -> KeyDisposition {
        if !self.keyboard_bound {
            return KeyDisposition::PassThrough;
        }
        self.translator.key_down(code, &mut self.sink)
    }

    pub fn key_up(&mut self, code: KeyCode) -> KeyDisposition {
        if !self.keyboard_bound {
            return KeyDisposition::PassThrough;
        }
        self.translator.key_up(code, &mut self.sink)
    }

    /// Dispatches every hardware event delivered so far. Returns how many
    /// were handled.
    pub fn pump(&mut self) -> usize {
        let Some(device) = self.device.as_mut() else {
            return 0;
        };
        let mut handled = 0;
        while let Ok(event) = device.events.try_recv() {
            self.translator.handle_hardware(event, &mut self.sink);
            handled += 1;
        }
        handled
    }

    /// Waits for the next hardware event and dispatches it. Returns `false`
    /// when no device is bound or the device went away.
    pub async fn dispatch_next(&mut self) -> bool {
        let Some(device) = self.device.as_mut() else {
            return false;
        };
        match device.events.recv().await {
            Some(event) => {
                self.translator.handle_hardware(event, &mut self.sink);
                true
            }
            None => false,
        }
    }

    /// Runs one driver iteration and dispatches what it produced, for hosts
    /// that own the frame loop. Without a device this is a no-op.
    pub fn poll_once(&mut self) -> Frame {
        let Some(device) = self.device.as_ref() else {
            return Frame::Skipped;
        };
        let frame = poll::poll_shared(&device.backend);
        self.pump();
        frame
    }

    /// Spawns the frame-paced poll loop for the bound device on the current
    /// tokio runtime. A loop from an earlier call is replaced.
    pub fn start_polling(&mut self) -> Result<(), SessionError> {
        let device = self.device.as_ref().ok_or(SessionError::NotInitialized)?;
        let poll = PollLoop::spawn(device.backend.clone(), self.frame_interval)?;
        if let Some(previous) = self.poll.replace(poll) {
            warn!("Poll loop already running, restarting it");
            previous.cancel();
        }
        Ok(())
    }

    pub fn is_polling(&self) -> bool {
        self.poll
            .as_ref()
            .is_some_and(|poll| !poll.is_cancelled() && !poll.is_finished())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!("Dropping input session");
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ScriptedBackend;
    use crate::input::button::LogicalButton;
    use crate::input::keys;
    use crate::input::sink::InputEvent;
    use std::sync::{Arc, Mutex};

    fn session() -> Session {
        Session::new(&InputConfig::default())
    }

    #[test]
    fn teardown_without_init_is_a_no_op() {
        let mut session = session();
        session.teardown();
        session.teardown();
        assert!(!session.is_active());
        assert_eq!(session.pump(), 0);
    }

    #[test]
    fn keyboard_is_inert_before_init_and_survives_teardown() {
        let mut session = session();
        assert_eq!(session.key_down(keys::SPACE), KeyDisposition::PassThrough);

        session
            .init(Arc::new(Mutex::new(ScriptedBackend::new("pad"))))
            .unwrap();
        session.teardown();

        let mut downs = session.subscribe(Topic::ButtonDown);
        assert_eq!(session.key_down(keys::SPACE), KeyDisposition::Consumed);
        assert_eq!(
            downs.try_recv().ok(),
            Some(InputEvent::ButtonDown {
                button: LogicalButton::Action,
                pad: None
            })
        );
    }

    #[test]
    fn failed_init_leaves_session_inactive() {
        let mut session = session();
        let result = session.init(Arc::new(Mutex::new(ScriptedBackend::failing("broken"))));
        assert!(matches!(result, Err(SessionError::Backend(_))));
        assert!(!session.is_active());
    }

    #[test]
    fn teardown_removes_all_subscriptions() {
        let mut session = session();
        session
            .init(Arc::new(Mutex::new(ScriptedBackend::new("pad"))))
            .unwrap();
        let _all = session.subscribe_many(&Topic::ALL);
        let _downs = session.subscribe(Topic::ButtonDown);
        assert_eq!(session.listener_count(Topic::ButtonDown), 2);

        session.teardown();
        for topic in Topic::ALL {
            assert_eq!(session.listener_count(topic), 0);
        }
    }

    #[test]
    fn polling_requires_a_device() {
        let mut session = session();
        assert!(matches!(
            session.start_polling(),
            Err(SessionError::NotInitialized)
        ));
        assert_eq!(session.poll_once(), Frame::Skipped);
        assert!(matches!(
            session.on_tick(|_| {}),
            Err(SessionError::NotInitialized)
        ));
    }

    #[test]
    fn polling_without_a_runtime_is_an_error() {
        let mut session = session();
        session
            .init(Arc::new(Mutex::new(ScriptedBackend::new("pad"))))
            .unwrap();
        assert!(matches!(
            session.start_polling(),
            Err(SessionError::NoRuntime(_))
        ));
        assert!(!session.is_polling());
        assert!(session.is_active());
    }
}
