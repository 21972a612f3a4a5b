pub mod error;
pub mod evdev;
pub mod keymap;
