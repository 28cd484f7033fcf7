//! Input boundary.
//!
//! The session polls for one logical input event per cycle with a bounded
//! timeout. Key codes and terminal handling live entirely outside the
//! core; only the three event classes cross the boundary.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use std::collections::VecDeque;
use std::io::BufRead;
use std::thread;
use std::time::Duration;

/// Logical input classes the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// No input this cycle; keep running.
    None,
    /// Any non-stop key: restart the run from the initial prior.
    Reset,
    /// Designated stop key: terminate the session.
    Stop,
}

/// Source of per-cycle input events.
pub trait InputSource {
    /// Poll for the next event, blocking at most `timeout`.
    fn poll(&mut self, timeout: Duration) -> InputEvent;
}

/// Input source backed by a crossbeam channel.
///
/// A disconnected channel is treated as a stop request so the session
/// shuts down when its producers are gone.
#[derive(Debug, Clone)]
pub struct ChannelInput {
    rx: Receiver<InputEvent>,
}

impl ChannelInput {
    /// Wrap a receiver.
    pub fn new(rx: Receiver<InputEvent>) -> Self {
        Self { rx }
    }
}

impl InputSource for ChannelInput {
    fn poll(&mut self, timeout: Duration) -> InputEvent {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => InputEvent::None,
            Err(RecvTimeoutError::Disconnected) => InputEvent::Stop,
        }
    }
}

/// Scripted input source for tests: replays a fixed sequence, then
/// reports `None` without ever blocking.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    /// Build from an event sequence.
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> InputEvent {
        self.events.pop_front().unwrap_or(InputEvent::None)
    }
}

/// Spawn a thread translating stdin lines into input events.
///
/// `q`, `Q`, `quit` and `exit` stop the session; any other line resets
/// the tracking, matching the classic demo's key bindings. The thread
/// ends when stdin closes or the channel is dropped.
pub fn spawn_stdin_input(tx: Sender<InputEvent>) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("stdin-input".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        log::warn!("stdin read failed: {}", e);
                        break;
                    }
                };
                let event = match line.trim() {
                    "q" | "Q" | "quit" | "exit" => InputEvent::Stop,
                    _ => InputEvent::Reset,
                };
                if tx.send(event).is_err() {
                    break;
                }
                if event == InputEvent::Stop {
                    break;
                }
            }
        })
        .expect("failed to spawn stdin input thread")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn test_channel_input_timeout_is_none() {
        let (_tx, rx) = bounded::<InputEvent>(1);
        let mut input = ChannelInput::new(rx);
        assert_eq!(input.poll(Duration::from_millis(1)), InputEvent::None);
    }

    #[test]
    fn test_channel_input_delivers_events() {
        let (tx, rx) = bounded(2);
        tx.send(InputEvent::Reset).unwrap();
        tx.send(InputEvent::Stop).unwrap();
        let mut input = ChannelInput::new(rx);
        assert_eq!(input.poll(Duration::from_millis(1)), InputEvent::Reset);
        assert_eq!(input.poll(Duration::from_millis(1)), InputEvent::Stop);
    }

    #[test]
    fn test_channel_input_disconnect_stops() {
        let (tx, rx) = bounded::<InputEvent>(1);
        drop(tx);
        let mut input = ChannelInput::new(rx);
        assert_eq!(input.poll(Duration::from_millis(1)), InputEvent::Stop);
    }

    #[test]
    fn test_scripted_input_replays_then_idles() {
        let mut input = ScriptedInput::new([InputEvent::None, InputEvent::Reset]);
        assert_eq!(input.poll(Duration::ZERO), InputEvent::None);
        assert_eq!(input.poll(Duration::ZERO), InputEvent::Reset);
        assert_eq!(input.poll(Duration::ZERO), InputEvent::None);
    }
}
