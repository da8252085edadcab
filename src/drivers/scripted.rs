use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::Event;

use super::InputDriver;

/// Deterministic driver that replays a prepared event sequence. Used by
/// tests to exercise the event loop and the surfaces without a terminal.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    queue: VecDeque<Event>,
}

impl ScriptedDriver {
    pub fn new<I: IntoIterator<Item = Event>>(events: I) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

impl InputDriver for ScriptedDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.queue.is_empty())
    }

    fn read(&mut self) -> io::Result<Event> {
        self.queue
            .pop_front()
            .ok_or_else(|| io::Error::other("scripted event queue exhausted"))
    }
}
