use std::{fmt, iter, slice};

use evdev::InputEvent;
use libc::input_event;

pub type Events<'a> = iter::Map<slice::Iter<'a, input_event>, fn(&input_event) -> InputEvent>;

/// The events filled in by one [`DeviceReader::read_batch`](crate::DeviceReader::read_batch).
///
/// Borrows the reader's buffer, so it has to be dropped before the next read.
/// It can be iterated any number of times.
#[derive(Clone, Copy)]
pub struct EventBatch<'a> {
    events: &'a [input_event],
}

impl<'a> EventBatch<'a> {
    pub(crate) fn new(events: &'a [input_event]) -> Self {
        EventBatch { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> Events<'a> {
        self.events.iter().map(to_event as fn(&input_event) -> InputEvent)
    }
}

fn to_event(raw: &input_event) -> InputEvent {
    InputEvent::from(*raw)
}

impl<'a> IntoIterator for EventBatch<'a> {
    type Item = InputEvent;
    type IntoIter = Events<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &EventBatch<'a> {
    type Item = InputEvent;
    type IntoIter = Events<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for EventBatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
