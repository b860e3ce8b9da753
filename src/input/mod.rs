//! Input normalization subsystem
//!
//! Turns keyboard codes, gamepad buttons and stick axes into edge-triggered
//! logical button events:
//!
//! 1. [`mapping`] - static physical source to logical button table
//! 2. [`axis`] - stick readings to digital directions
//! 3. [`state`] - per (button, pad) edge detection
//! 4. [`translate`] - keyboard and hardware event handlers
//! 5. [`sink`] - publish/subscribe delivery
//! 6. [`poll`] - frame-paced driver for the hardware abstraction
//! 7. [`session`] - lifecycle tying it together
//!
//! # Architecture
//!
//! ```text
//! Keyboard ─────────────┐
//!                       ├─► Translator ──► StateTracker ──► EventSink ──► subscribers
//! Backend ─(Hardware)───┘     (mapping,      (dedup)
//!    ▲                         axis)
//!    └── PollLoop (update + tick every frame)
//! ```
//!
//! Everything runs on one task; the only suspension point is the wait
//! between frames in the poll loop.

pub mod axis;
pub mod button;
pub mod keys;
pub mod mapping;
pub mod poll;
pub mod session;
pub mod sink;
pub mod state;
pub mod translate;

pub use axis::{AxisTranslator, DirectionChange, GamepadAxis, StickAxis};
pub use button::{ButtonStateKey, LogicalButton, PadIndex};
pub use mapping::{GamepadControl, MappingTable, PhysicalSource};
pub use poll::{Frame, PollLoop};
pub use session::{Session, SessionError};
pub use sink::{EventSink, InputEvent, Subscription, Topic};
pub use state::ButtonStateTracker;
pub use translate::{EventTranslator, KeyDisposition};
