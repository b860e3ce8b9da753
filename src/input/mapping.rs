//! Static binding table from physical sources to logical buttons.

use super::button::LogicalButton;
use super::keys::{self, KeyCode};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::debug;

/// Named gamepad control, following the standard-gamepad naming scheme.
///
/// `Axis*` entries are the virtual directions derived from the left stick,
/// not buttons the hardware reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadControl {
    Face1,
    Face2,
    Face3,
    Face4,
    LeftTopShoulder,
    RightTopShoulder,
    LeftBottomShoulder,
    RightBottomShoulder,
    SelectBack,
    StartForward,
    LeftStick,
    RightStick,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    Home,
    AxisLeft,
    AxisUp,
    AxisRight,
    AxisDown,
}

impl GamepadControl {
    pub const ALL: [GamepadControl; 21] = [
        GamepadControl::Face1,
        GamepadControl::Face2,
        GamepadControl::Face3,
        GamepadControl::Face4,
        GamepadControl::LeftTopShoulder,
        GamepadControl::RightTopShoulder,
        GamepadControl::LeftBottomShoulder,
        GamepadControl::RightBottomShoulder,
        GamepadControl::SelectBack,
        GamepadControl::StartForward,
        GamepadControl::LeftStick,
        GamepadControl::RightStick,
        GamepadControl::DpadUp,
        GamepadControl::DpadDown,
        GamepadControl::DpadLeft,
        GamepadControl::DpadRight,
        GamepadControl::Home,
        GamepadControl::AxisLeft,
        GamepadControl::AxisUp,
        GamepadControl::AxisRight,
        GamepadControl::AxisDown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GamepadControl::Face1 => "FACE_1",
            GamepadControl::Face2 => "FACE_2",
            GamepadControl::Face3 => "FACE_3",
            GamepadControl::Face4 => "FACE_4",
            GamepadControl::LeftTopShoulder => "LEFT_TOP_SHOULDER",
            GamepadControl::RightTopShoulder => "RIGHT_TOP_SHOULDER",
            GamepadControl::LeftBottomShoulder => "LEFT_BOTTOM_SHOULDER",
            GamepadControl::RightBottomShoulder => "RIGHT_BOTTOM_SHOULDER",
            GamepadControl::SelectBack => "SELECT_BACK",
            GamepadControl::StartForward => "START_FORWARD",
            GamepadControl::LeftStick => "LEFT_STICK",
            GamepadControl::RightStick => "RIGHT_STICK",
            GamepadControl::DpadUp => "DPAD_UP",
            GamepadControl::DpadDown => "DPAD_DOWN",
            GamepadControl::DpadLeft => "DPAD_LEFT",
            GamepadControl::DpadRight => "DPAD_RIGHT",
            GamepadControl::Home => "HOME",
            GamepadControl::AxisLeft => "AXIS_LEFT",
            GamepadControl::AxisUp => "AXIS_UP",
            GamepadControl::AxisRight => "AXIS_RIGHT",
            GamepadControl::AxisDown => "AXIS_DOWN",
        }
    }
}

impl fmt::Display for GamepadControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gamepad control: {0}")]
pub struct UnknownControl(pub String);

impl FromStr for GamepadControl {
    type Err = UnknownControl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GamepadControl::ALL
            .iter()
            .copied()
            .find(|control| control.name() == s)
            .ok_or_else(|| UnknownControl(s.to_string()))
    }
}

/// Where a button event physically came from. The pad index travels with
/// the event, not with the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalSource {
    Key(KeyCode),
    Control(GamepadControl),
}

/// Compiled-in bindings, in declaration order.
///
/// Order matters: [`MappingTable::from_bindings`] lets a later entry replace
/// an earlier one for the same source.
pub const STANDARD_BINDINGS: &[(PhysicalSource, LogicalButton)] = &[
    // Start, coin, action keys
    (PhysicalSource::Key(keys::SPACE), LogicalButton::Action),
    (PhysicalSource::Key(keys::RIGHT_BRACKET), LogicalButton::Action),
    (PhysicalSource::Key(keys::DIGIT_1), LogicalButton::Start1),
    (PhysicalSource::Key(keys::DIGIT_2), LogicalButton::Start2),
    (PhysicalSource::Key(keys::DIGIT_3), LogicalButton::Start3),
    (PhysicalSource::Key(keys::DIGIT_4), LogicalButton::Start4),
    (PhysicalSource::Key(keys::DIGIT_9), LogicalButton::Coin1),
    (PhysicalSource::Key(keys::DIGIT_0), LogicalButton::Coin2),
    // Debugging keys
    (PhysicalSource::Key(keys::F), LogicalButton::Fullscreen),
    (PhysicalSource::Key(keys::Q), LogicalButton::Quit),
    (PhysicalSource::Key(keys::I), LogicalButton::Inspector),
    (PhysicalSource::Key(keys::LEFT_ARROW), LogicalButton::Left),
    (PhysicalSource::Key(keys::RIGHT_ARROW), LogicalButton::Right),
    (PhysicalSource::Key(keys::UP_ARROW), LogicalButton::Up),
    (PhysicalSource::Key(keys::DOWN_ARROW), LogicalButton::Down),
    // Gamepad
    (PhysicalSource::Control(GamepadControl::AxisLeft), LogicalButton::Left),
    (PhysicalSource::Control(GamepadControl::AxisUp), LogicalButton::Up),
    (PhysicalSource::Control(GamepadControl::AxisRight), LogicalButton::Right),
    (PhysicalSource::Control(GamepadControl::AxisDown), LogicalButton::Down),
    (PhysicalSource::Control(GamepadControl::Face1), LogicalButton::Button1),
    (PhysicalSource::Control(GamepadControl::Face2), LogicalButton::Button2),
    (PhysicalSource::Control(GamepadControl::Face3), LogicalButton::Button3),
    (PhysicalSource::Control(GamepadControl::Face4), LogicalButton::Button4),
    (PhysicalSource::Control(GamepadControl::LeftTopShoulder), LogicalButton::Button5),
    (PhysicalSource::Control(GamepadControl::RightTopShoulder), LogicalButton::Button6),
];

/// Immutable lookup from physical source to logical button.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    bindings: HashMap<PhysicalSource, LogicalButton>,
}

impl MappingTable {
    /// Builds a table from an ordered binding list. On duplicate sources the
    /// last entry wins.
    pub fn from_bindings<I>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (PhysicalSource, LogicalButton)>,
    {
        let mut table = HashMap::new();
        for (source, button) in bindings {
            if let Some(previous) = table.insert(source, button) {
                debug!(
                    "Binding for {:?} replaced: {} -> {}",
                    source, previous, button
                );
            }
        }
        Self { bindings: table }
    }

    /// The process-wide compiled-in table, built on first use.
    pub fn standard() -> &'static MappingTable {
        static STANDARD: OnceLock<MappingTable> = OnceLock::new();
        STANDARD.get_or_init(|| MappingTable::from_bindings(STANDARD_BINDINGS.iter().copied()))
    }

    /// `None` means "no binding", which is never an error.
    pub fn lookup(&self, source: PhysicalSource) -> Option<LogicalButton> {
        self.bindings.get(&source).copied()
    }

    pub fn key(&self, code: KeyCode) -> Option<LogicalButton> {
        self.lookup(PhysicalSource::Key(code))
    }

    pub fn control(&self, control: GamepadControl) -> Option<LogicalButton> {
        self.lookup(PhysicalSource::Control(control))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
