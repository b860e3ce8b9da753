//! Input normalization for cabinet-style game front-ends.
//!
//! Keyboard codes and gamepad buttons/axes from any number of pads become a
//! single stream of `button_down` / `button_up` events on logical buttons
//! (`action`, `start1`, `left`, `button3`, ...), with redundant transitions
//! suppressed.
//!
//! ```rust,no_run
//! use cabinet_input::backend::ScriptedBackend;
//! use cabinet_input::config::InputConfig;
//! use cabinet_input::input::{Session, Topic};
//! use std::sync::{Arc, Mutex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new(&InputConfig::default());
//! session.init(Arc::new(Mutex::new(ScriptedBackend::new("panel"))))?;
//! let mut events = session.subscribe_many(&Topic::ALL);
//!
//! session.key_down(32);
//! while let Ok(event) = events.try_recv() {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod input;

pub use backend::{
    BackendError, GamepadBackend, GamepadInfo, HardwareEvent, SharedBackend, TickListener,
};
pub use config::{ConfigError, InputConfig, UpdateStrategy};
pub use input::{InputEvent, KeyDisposition, LogicalButton, Session, SessionError, Topic};
