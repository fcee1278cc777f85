//! Input handling: event types, key actions, and the input processor that
//! converts raw window events into camera commands.

/// Platform-agnostic input events.
pub mod event;
/// Key-bindable viewer actions.
mod keyboard;
/// Converts raw events into camera commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
