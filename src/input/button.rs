//! Logical buttons - the game-facing names every physical input resolves to.

use std::fmt;

/// Semantic button identifier consumed by the front-end.
///
/// The set is closed and compiled in. `Fullscreen`, `Quit` and `Inspector`
/// only exist for development builds of the cabinet and are bound to
/// keyboard keys exclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalButton {
    Action,
    Start1,
    Start2,
    Start3,
    Start4,
    Coin1,
    Coin2,
    Left,
    Right,
    Up,
    Down,
    Button1,
    Button2,
    Button3,
    Button4,
    Button5,
    Button6,
    Fullscreen,
    Quit,
    Inspector,
}

impl LogicalButton {
    pub const ALL: [LogicalButton; 20] = [
        LogicalButton::Action,
        LogicalButton::Start1,
        LogicalButton::Start2,
        LogicalButton::Start3,
        LogicalButton::Start4,
        LogicalButton::Coin1,
        LogicalButton::Coin2,
        LogicalButton::Left,
        LogicalButton::Right,
        LogicalButton::Up,
        LogicalButton::Down,
        LogicalButton::Button1,
        LogicalButton::Button2,
        LogicalButton::Button3,
        LogicalButton::Button4,
        LogicalButton::Button5,
        LogicalButton::Button6,
        LogicalButton::Fullscreen,
        LogicalButton::Quit,
        LogicalButton::Inspector,
    ];

    /// Name carried by `button_down` / `button_up` events.
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalButton::Action => "action",
            LogicalButton::Start1 => "start1",
            LogicalButton::Start2 => "start2",
            LogicalButton::Start3 => "start3",
            LogicalButton::Start4 => "start4",
            LogicalButton::Coin1 => "coin1",
            LogicalButton::Coin2 => "coin2",
            LogicalButton::Left => "left",
            LogicalButton::Right => "right",
            LogicalButton::Up => "up",
            LogicalButton::Down => "down",
            LogicalButton::Button1 => "button1",
            LogicalButton::Button2 => "button2",
            LogicalButton::Button3 => "button3",
            LogicalButton::Button4 => "button4",
            LogicalButton::Button5 => "button5",
            LogicalButton::Button6 => "button6",
            LogicalButton::Fullscreen => "fullscreen",
            LogicalButton::Quit => "quit",
            LogicalButton::Inspector => "inspector",
        }
    }

    /// Looks a button up by its event name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|button| button.as_str() == name)
    }

    /// Debug-only buttons (window/shell controls rather than game input).
    pub fn is_debug(self) -> bool {
        matches!(
            self,
            LogicalButton::Fullscreen | LogicalButton::Quit | LogicalButton::Inspector
        )
    }
}

impl fmt::Display for LogicalButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of a connected pad as reported by the hardware abstraction.
pub type PadIndex = usize;

/// Key into the button state table.
///
/// `pad == None` marks keyboard-origin input, which is pad-agnostic: the
/// keyboard `left` and pad 0's `left` are tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonStateKey {
    pub button: LogicalButton,
    pub pad: Option<PadIndex>,
}

impl ButtonStateKey {
    pub fn new(button: LogicalButton, pad: Option<PadIndex>) -> Self {
        Self { button, pad }
    }

    pub fn keyboard(button: LogicalButton) -> Self {
        Self { button, pad: None }
    }
}
