use evdev::Key;

pub mod mapper;
pub mod parser;

pub use mapper::keymap::{KeyCharMap, FALLBACK};
pub use parser::EventParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardEvent {
    KeyPressed(Key),
    KeyReleased(Key),
    KeyHeld(Key),
}

impl KeyboardEvent {
    pub fn key(&self) -> Key {
        match *self {
            KeyboardEvent::KeyPressed(key)
            | KeyboardEvent::KeyReleased(key)
            | KeyboardEvent::KeyHeld(key) => key,
        }
    }

    /// True for presses and auto-repeats, i.e. every event that produces text.
    pub fn is_down(&self) -> bool {
        !matches!(self, KeyboardEvent::KeyReleased(_))
    }
}
