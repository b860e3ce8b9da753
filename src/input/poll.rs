//! Frame-paced driver for manual-update backends.
//!
//! Backends only fire their per-frame tick while a pad is attached. Consumers
//! that hang per-frame work off that tick would stall on a cabinet with no
//! pads plugged in, so the driver fires it itself in that case.

use crate::backend::{GamepadBackend, SharedBackend};
use std::time::Duration;
use tokio::runtime::{Handle, TryCurrentError};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Outcome of a single driver iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// The backend was updated; `synthesized_tick` is set when no pad was
    /// attached and the driver fired the tick itself.
    Polled { synthesized_tick: bool },
    /// The device handle was unavailable; nothing happened.
    Skipped,
}

/// One driver iteration against an already locked backend.
pub fn poll_once(backend: &mut dyn GamepadBackend) -> Frame {
    backend.update();
    let synthesized_tick = backend.connected_count() == 0;
    if synthesized_tick {
        backend.fire_tick();
    }
    Frame::Polled { synthesized_tick }
}

/// One driver iteration against the shared device handle.
///
/// A poisoned handle is treated as a missing device: the frame is skipped.
pub fn poll_shared(backend: &SharedBackend) -> Frame {
    match backend.lock() {
        Ok(mut guard) => poll_once(&mut *guard),
        Err(_) => {
            trace!("Device handle unavailable, skipping frame");
            Frame::Skipped
        }
    }
}

/// Handle to a running poll loop. Cancelled on [`PollLoop::cancel`] or drop.
#[derive(Debug)]
pub struct PollLoop {
    cancel: CancellationToken,
    task: Option<JoinHandle<u64>>,
}

impl PollLoop {
    /// Spawns the loop on the current tokio runtime. Fails when called from
    /// outside one.
    pub fn spawn(
        backend: SharedBackend,
        frame_interval: Duration,
    ) -> Result<Self, TryCurrentError> {
        let runtime = Handle::try_current()?;
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        info!("Starting poll loop every {:?}", frame_interval);
        let task = runtime.spawn(async move { run(backend, frame_interval, token).await });
        Ok(Self {
            cancel,
            task: Some(task),
        })
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }

    /// Cancels the loop and waits for it, returning the number of frames polled.
    pub async fn stop(mut self) -> u64 {
        self.cancel.cancel();
        let Some(task) = self.task.take() else {
            return 0;
        };
        match task.await {
            Ok(frames) => frames,
            Err(e) => {
                warn!("Poll loop task failed: {}", e);
                0
            }
        }
    }
}

impl Drop for PollLoop {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(backend: SharedBackend, frame_interval: Duration, cancel: CancellationToken) -> u64 {
    let mut ticker = interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frames = 0u64;

    loop {
        if cancel.is_cancelled() {
            break;
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }
        if cancel.is_cancelled() {
            break;
        }
        if let Frame::Polled { .. } = poll_shared(&backend) {
            frames += 1;
        }
    }

    debug!("Poll loop stopped after {} frames", frames);
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, HardwareSender, ScriptedBackend, TickListener};
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    #[test]
    fn tick_is_synthesized_without_pads() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut backend = ScriptedBackend::new("pad");
        backend.init(tx).unwrap();

        assert_eq!(
            poll_once(&mut backend),
            Frame::Polled {
                synthesized_tick: true
            }
        );
        assert_eq!(backend.update_count(), 1);
        assert_eq!(backend.tick_count(), 1);
    }

    #[test]
    fn backend_ticks_itself_with_pads() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut backend = ScriptedBackend::new("pad");
        backend.init(tx).unwrap();
        backend.connect(0, "Arcade Stick");

        assert_eq!(
            poll_once(&mut backend),
            Frame::Polled {
                synthesized_tick: false
            }
        );
        assert_eq!(backend.tick_count(), 1);
    }

    #[test]
    fn poisoned_handle_skips_the_frame() {
        let backend = Arc::new(Mutex::new(ScriptedBackend::new("pad")));
        let poisoner = backend.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the handle");
        })
        .join();

        let shared: SharedBackend = backend;
        assert_eq!(poll_shared(&shared), Frame::Skipped);
    }

    #[test]
    fn spawning_outside_a_runtime_is_an_error() {
        let backend = Arc::new(Mutex::new(ScriptedBackend::new("pad")));
        assert!(PollLoop::spawn(backend, Duration::from_millis(16)).is_err());
    }

    /// Blows up on its first frame.
    struct Faulty;

    impl GamepadBackend for Faulty {
        fn init(&mut self, _events: HardwareSender) -> Result<(), BackendError> {
            Ok(())
        }

        fn update(&mut self) {
            panic!("device fault");
        }

        fn connected_count(&self) -> usize {
            0
        }

        fn on_tick(&mut self, _listener: TickListener) {}

        fn fire_tick(&mut self) {}

        fn name(&self) -> &str {
            "faulty"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stop_reports_zero_frames_after_a_panicking_loop() {
        let backend = Arc::new(Mutex::new(Faulty));
        let poll = PollLoop::spawn(backend, Duration::from_millis(16)).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(poll.is_finished());
        assert_eq!(poll.stop().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn loop_polls_every_frame_until_cancelled() {
        let backend = Arc::new(Mutex::new(ScriptedBackend::new("pad")));
        let poll = PollLoop::spawn(backend.clone(), Duration::from_millis(16)).unwrap();

        tokio::time::sleep(Duration::from_millis(16 * 10)).await;
        let polled = backend.lock().unwrap().update_count();
        assert!(polled >= 5, "expected several frames, got {polled}");

        let frames = poll.stop().await;
        let after_stop = backend.lock().unwrap().update_count();
        assert_eq!(frames, after_stop);

        tokio::time::sleep(Duration::from_millis(16 * 10)).await;
        assert_eq!(backend.lock().unwrap().update_count(), after_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_the_loop() {
        let backend = Arc::new(Mutex::new(ScriptedBackend::new("pad")));
        let poll = PollLoop::spawn(backend.clone(), Duration::from_millis(16)).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(poll);

        tokio::task::yield_now().await;
        let count = backend.lock().unwrap().update_count();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(backend.lock().unwrap().update_count(), count);
    }
}
