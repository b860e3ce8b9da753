//! Analog stick to digital direction translation.

use super::mapping::GamepadControl;
use std::fmt;

/// Analog axis as reported by the hardware abstraction.
///
/// Values are signed; negative means left on X and up on Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftStickX,
    LeftStickY,
    RightStickX,
    RightStickY,
}

impl GamepadAxis {
    pub fn name(self) -> &'static str {
        match self {
            GamepadAxis::LeftStickX => "LEFT_STICK_X",
            GamepadAxis::LeftStickY => "LEFT_STICK_Y",
            GamepadAxis::RightStickX => "RIGHT_STICK_X",
            GamepadAxis::RightStickY => "RIGHT_STICK_Y",
        }
    }

    /// Only the left stick drives directions.
    pub fn stick_axis(self) -> Option<StickAxis> {
        match self {
            GamepadAxis::LeftStickX => Some(StickAxis::Horizontal),
            GamepadAxis::LeftStickY => Some(StickAxis::Vertical),
            GamepadAxis::RightStickX | GamepadAxis::RightStickY => None,
        }
    }
}

impl fmt::Display for GamepadAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickAxis {
    Horizontal,
    Vertical,
}

impl StickAxis {
    /// Virtual controls for the (negative, positive) ends of the axis.
    pub fn ends(self) -> (GamepadControl, GamepadControl) {
        match self {
            StickAxis::Horizontal => (GamepadControl::AxisLeft, GamepadControl::AxisRight),
            StickAxis::Vertical => (GamepadControl::AxisUp, GamepadControl::AxisDown),
        }
    }
}

/// Desired state of one axis end after a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionChange {
    pub control: GamepadControl,
    pub pressed: bool,
}

/// Splits a signed axis reading into its two complementary directions.
///
/// The threshold is exactly zero; any deadzone is the hardware layer's job.
/// The negative end is always reported first, so a negative to positive
/// swing releases before it presses.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisTranslator;

impl AxisTranslator {
    pub fn translate(axis: StickAxis, value: f32) -> [DirectionChange; 2] {
        let (negative, positive) = axis.ends();
        [
            DirectionChange {
                control: negative,
                pressed: value < 0.0,
            },
            DirectionChange {
                control: positive,
                pressed: value > 0.0,
            },
        ]
    }
}
