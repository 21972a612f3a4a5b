use evdev::{EventType, InputEvent, Key};
use log::trace;

use crate::{mapper::error::EventMappingError, KeyboardEvent};

impl From<KeyboardEvent> for InputEvent {
    fn from(value: KeyboardEvent) -> Self {
        InputEvent::new(EventType::KEY, value.key().code(), to_evdev_value(value))
    }
}

impl TryFrom<InputEvent> for KeyboardEvent {
    type Error = EventMappingError;

    fn try_from(value: InputEvent) -> Result<Self, Self::Error> {
        if value.event_type() != EventType::KEY {
            trace!("Skipping non-keyboard event: {value:?}");
            return Err(EventMappingError::UnsupportedEventError(value.event_type()));
        }

        let key = Key::new(value.code());
        // 1 is a press and 2 an auto-repeat, but any nonzero value means the key is down
        Ok(match value.value() {
            0 => KeyboardEvent::KeyReleased(key),
            1 => KeyboardEvent::KeyPressed(key),
            _ => KeyboardEvent::KeyHeld(key),
        })
    }
}

fn to_evdev_value(event: KeyboardEvent) -> i32 {
    match event {
        KeyboardEvent::KeyPressed(_) => 1,
        KeyboardEvent::KeyReleased(_) => 0,
        KeyboardEvent::KeyHeld(_) => 2,
    }
}
