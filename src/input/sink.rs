//! Publish/subscribe channel for normalized input events.
//!
//! Every subscriber gets its own unbounded tokio receiver. A receiver may
//! cover several topics and then observes them in emission order, which is
//! what consumers that care about down/up ordering should use.

use super::button::{LogicalButton, PadIndex};
use crate::backend::GamepadInfo;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    GamepadConnected,
    GamepadDisconnected,
    ButtonDown,
    ButtonUp,
}

impl Topic {
    /// The fixed topic set a session owns.
    pub const ALL: [Topic; 4] = [
        Topic::GamepadConnected,
        Topic::GamepadDisconnected,
        Topic::ButtonDown,
        Topic::ButtonUp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Topic::GamepadConnected => "gamepad_connected",
            Topic::GamepadDisconnected => "gamepad_disconnected",
            Topic::ButtonDown => "button_down",
            Topic::ButtonUp => "button_up",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Event delivered to subscribers.
///
/// `pad == None` on button events means the keyboard produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    GamepadConnected(GamepadInfo),
    GamepadDisconnected(GamepadInfo),
    ButtonDown {
        button: LogicalButton,
        pad: Option<PadIndex>,
    },
    ButtonUp {
        button: LogicalButton,
        pad: Option<PadIndex>,
    },
}

impl InputEvent {
    pub fn topic(&self) -> Topic {
        match self {
            InputEvent::GamepadConnected(_) => Topic::GamepadConnected,
            InputEvent::GamepadDisconnected(_) => Topic::GamepadDisconnected,
            InputEvent::ButtonDown { .. } => Topic::ButtonDown,
            InputEvent::ButtonUp { .. } => Topic::ButtonUp,
        }
    }
}

pub type Subscription = mpsc::UnboundedReceiver<InputEvent>;

#[derive(Debug, Default)]
pub struct EventSink {
    subscribers: HashMap<Topic, Vec<mpsc::UnboundedSender<InputEvent>>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, topic: Topic) -> Subscription {
        self.subscribe_many(&[topic])
    }

    /// One receiver for several topics.
    pub fn subscribe_many(&mut self, topics: &[Topic]) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        for topic in topics {
            self.subscribers
                .entry(*topic)
                .or_default()
                .push(sender.clone());
        }
        receiver
    }

    /// Delivers `event` to every live subscriber of its topic and returns
    /// how many received it. Subscribers whose receiver was dropped are
    /// forgotten.
    pub fn emit(&mut self, event: InputEvent) -> usize {
        let topic = event.topic();
        let Some(senders) = self.subscribers.get_mut(&topic) else {
            return 0;
        };
        senders.retain(|sender| sender.send(event.clone()).is_ok());
        senders.len()
    }

    pub fn remove_all_listeners(&mut self, topic: Topic) {
        if let Some(senders) = self.subscribers.remove(&topic) {
            debug!("Removed {} listener(s) from {}", senders.len(), topic);
        }
    }

    pub fn listener_count(&self, topic: Topic) -> usize {
        self.subscribers
            .get(&topic)
            .map(|senders| senders.iter().filter(|s| !s.is_closed()).count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(button: LogicalButton) -> InputEvent {
        InputEvent::ButtonDown { button, pad: None }
    }

    #[test]
    fn events_reach_every_subscriber_of_their_topic() {
        let mut sink = EventSink::new();
        let mut first = sink.subscribe(Topic::ButtonDown);
        let mut second = sink.subscribe(Topic::ButtonDown);
        let mut ups = sink.subscribe(Topic::ButtonUp);

        assert_eq!(sink.emit(down(LogicalButton::Action)), 2);
        assert_eq!(first.try_recv().ok(), Some(down(LogicalButton::Action)));
        assert_eq!(second.try_recv().ok(), Some(down(LogicalButton::Action)));
        assert!(ups.try_recv().is_err());
    }

    #[test]
    fn shared_receiver_preserves_order() {
        let mut sink = EventSink::new();
        let mut all = sink.subscribe_many(&Topic::ALL);
        let up = InputEvent::ButtonUp {
            button: LogicalButton::Left,
            pad: Some(1),
        };

        sink.emit(down(LogicalButton::Left));
        sink.emit(up.clone());

        assert_eq!(all.try_recv().ok(), Some(down(LogicalButton::Left)));
        assert_eq!(all.try_recv().ok(), Some(up));
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let mut sink = EventSink::new();
        let receiver = sink.subscribe(Topic::ButtonDown);
        assert_eq!(sink.listener_count(Topic::ButtonDown), 1);
        drop(receiver);
        assert_eq!(sink.emit(down(LogicalButton::Coin1)), 0);
        assert_eq!(sink.listener_count(Topic::ButtonDown), 0);
    }

    #[test]
    fn removing_listeners_closes_receivers() {
        let mut sink = EventSink::new();
        let mut receiver = sink.subscribe(Topic::ButtonUp);
        sink.remove_all_listeners(Topic::ButtonUp);
        sink.remove_all_listeners(Topic::ButtonUp);
        assert_eq!(sink.listener_count(Topic::ButtonUp), 0);
        assert!(matches!(
            receiver.try_recv(),
            Err(mpsc::error::TryRecvError::Disconnected)
        ));
    }
}
