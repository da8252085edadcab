use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// Centralized event loop that drives the single UI thread.
///
/// All model mutation happens synchronously inside the handler, so ordering
/// between rapid sequential events is guaranteed without any locking. The
/// handler is invoked with `None` once per iteration when the poll interval
/// elapses — that tick is what advances timers and transition pacing.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Run the loop until the handler requests quit.
    ///
    /// The handler is called with `Some(event)` for each input event and
    /// `None` on every idle tick. Bursty input (mouse drags in particular)
    /// is drained before the next tick so reorder gestures stay responsive.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.poll_interval)? {
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::scripted::ScriptedDriver;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn run_delivers_ticks_and_events() {
        let driver = ScriptedDriver::new(vec![
            Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
            Event::Key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE)),
        ]);
        let mut seen = Vec::new();
        let mut ticks = 0usize;
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(0));
        event_loop
            .run(|_, event| {
                match event {
                    Some(Event::Key(k)) => seen.push(k.code),
                    Some(_) => {}
                    None => ticks += 1,
                }
                // quit once the script is exhausted
                if seen.len() == 2 && ticks > 0 {
                    Ok(ControlFlow::Quit)
                } else {
                    Ok(ControlFlow::Continue)
                }
            })
            .unwrap();
        assert_eq!(seen, vec![KeyCode::Char('a'), KeyCode::Char('b')]);
    }

    #[test]
    fn handler_can_queue_followup_events() {
        let driver = ScriptedDriver::new(vec![Event::Key(KeyEvent::new(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
        ))]);
        let mut seen = Vec::new();
        let mut event_loop = EventLoop::new(driver, Duration::from_millis(0));
        event_loop
            .run(|driver, event| {
                if let Some(Event::Key(k)) = event {
                    // the first key schedules a second one mid-run
                    if k.code == KeyCode::Char('a') {
                        driver.push(Event::Key(KeyEvent::new(
                            KeyCode::Char('b'),
                            KeyModifiers::NONE,
                        )));
                    }
                    seen.push(k.code);
                }
                if seen.last() == Some(&KeyCode::Char('b')) {
                    Ok(ControlFlow::Quit)
                } else {
                    Ok(ControlFlow::Continue)
                }
            })
            .unwrap();
        assert_eq!(seen, vec![KeyCode::Char('a'), KeyCode::Char('b')]);
    }
}
