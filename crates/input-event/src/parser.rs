use std::borrow::Borrow;

use evdev::InputEvent;

use crate::{KeyCharMap, KeyboardEvent};

/// Turns raw events into text. Holds no state between calls, so one parser
/// can be shared by any number of batches.
#[derive(Debug, Clone, Copy)]
pub struct EventParser<'m> {
    map: &'m KeyCharMap,
}

impl Default for EventParser<'static> {
    fn default() -> Self {
        EventParser::new(KeyCharMap::global())
    }
}

impl<'m> EventParser<'m> {
    pub fn new(map: &'m KeyCharMap) -> Self {
        EventParser { map }
    }

    /// Concatenates the text of every key press and auto-repeat in `events`,
    /// in order. Releases and non-keyboard events produce nothing.
    pub fn parse<I>(&self, events: I) -> String
    where
        I: IntoIterator,
        I::Item: Borrow<InputEvent>,
    {
        events
            .into_iter()
            .filter_map(|event| KeyboardEvent::try_from(*event.borrow()).ok())
            .filter(KeyboardEvent::is_down)
            .map(|event| self.map.get(event.key()))
            .collect()
    }
}
