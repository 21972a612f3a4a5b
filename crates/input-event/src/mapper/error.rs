use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventMappingError {
    #[error("Event type {0:?} is not a keyboard event")]
    UnsupportedEventError(evdev::EventType),
}
