use std::io;
use std::time::Duration;

use crossterm::event::Event;

use super::InputDriver;

/// Crossterm-backed console input. Mouse capture is toggled through the
/// driver so the event loop owns all terminal mode changes.
#[derive(Debug, Default)]
pub struct ConsoleDriver;

impl ConsoleDriver {
    pub fn new() -> Self {
        Self
    }
}

impl InputDriver for ConsoleDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        crossterm::event::read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            crossterm::execute!(io::stdout(), crossterm::event::EnableMouseCapture)
        } else {
            crossterm::execute!(io::stdout(), crossterm::event::DisableMouseCapture)
        }
    }
}
