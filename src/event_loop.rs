use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// Frame-paced event pump that owns the UI thread.
///
/// The handler is called two ways:
/// - `Some(event)` for every input event (keyboard, mouse, resize, focus).
/// - `None` once per frame interval. This is the frame boundary: the place
///   to flush the engine's coalesced pointer move and redraw.
///
/// Bursts of input (fast mouse drags in particular) are drained completely
/// between frames, so a storm of move events ends up buffered in the engine
/// and costs a single recomputation at the next `None` tick.
pub struct EventLoop<D> {
    driver: D,
    frame_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, frame_interval: Duration) -> Self {
        Self {
            driver,
            frame_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.frame_interval)? {
                // Drain the queue so the frame tick observes the latest
                // pointer position instead of a position from several
                // frames ago.
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
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct ScriptedDriver {
        script: VecDeque<Event>,
    }

    impl InputDriver for ScriptedDriver {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.script.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.script
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    #[test]
    fn drains_bursts_between_frame_ticks() {
        let script: VecDeque<Event> = ('a'..='c')
            .map(|c| Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)))
            .collect();
        let mut event_loop =
            EventLoop::new(ScriptedDriver { script }, Duration::from_millis(0));
        let mut ticks = 0;
        let mut events = Vec::new();
        event_loop
            .run(|_driver, event| match event {
                Some(Event::Key(key)) => {
                    events.push(key.code);
                    Ok(ControlFlow::Continue)
                }
                Some(_) => Ok(ControlFlow::Continue),
                None => {
                    ticks += 1;
                    if ticks > 1 {
                        Ok(ControlFlow::Quit)
                    } else {
                        Ok(ControlFlow::Continue)
                    }
                }
            })
            .unwrap();
        // The whole burst lands between the first and second tick.
        assert_eq!(ticks, 2);
        assert_eq!(
            events,
            vec![KeyCode::Char('a'), KeyCode::Char('b'), KeyCode::Char('c')]
        );
    }
}
