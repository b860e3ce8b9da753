//! Edge detection for logical buttons.

use super::button::ButtonStateKey;
use std::collections::HashMap;
use tracing::trace;

/// Last known state per (button, pad).
///
/// This is the only place that decides whether a press or release is an
/// edge. Keys that were never seen read as released.
#[derive(Debug, Default)]
pub struct ButtonStateTracker {
    pressed: HashMap<ButtonStateKey, bool>,
}

impl ButtonStateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `state` for `key` and reports whether it differed from the
    /// previous value. `false` means the caller must not emit anything.
    pub fn set_state(&mut self, key: ButtonStateKey, state: bool) -> bool {
        let current = self.pressed.entry(key).or_insert(false);
        if *current == state {
            trace!(
                "Redundant {} for {} (pad {:?}) absorbed",
                if state { "press" } else { "release" },
                key.button,
                key.pad
            );
            return false;
        }
        *current = state;
        true
    }

    pub fn is_pressed(&self, key: ButtonStateKey) -> bool {
        self.pressed.get(&key).copied().unwrap_or(false)
    }

    /// Forgets every key; all buttons read as released afterwards.
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}
