//! Background terminal event pump.
//!
//! A single thread polls crossterm and forwards key presses, resizes and
//! periodic ticks over a crossbeam channel. The UI thread only ever sees
//! plain [`AppEvent`] values; dashboard state never leaves the UI thread.

use std::io;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

pub struct EventPump {
    receiver: Receiver<AppEvent>,
    tick_rate: Duration,
}

impl EventPump {
    /// Spawns the polling thread.
    pub fn spawn(tick_rate: Duration) -> io::Result<Self> {
        let (sender, receiver) = unbounded();
        thread::Builder::new()
            .name("coachdesk-events".into())
            .spawn(move || poll_loop(sender, tick_rate))?;
        debug!(tick_ms = tick_rate.as_millis() as u64, "event thread started");
        Ok(Self {
            receiver,
            tick_rate,
        })
    }

    /// Builds a pump fed from an existing channel instead of the terminal.
    pub fn from_receiver(receiver: Receiver<AppEvent>, tick_rate: Duration) -> Self {
        Self {
            receiver,
            tick_rate,
        }
    }

    /// Waits up to one tick for the next event.
    ///
    /// Returns `None` once the sending side has gone away.
    pub fn next(&self) -> Option<AppEvent> {
        match self.receiver.recv_timeout(self.tick_rate) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => Some(AppEvent::Tick),
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

fn poll_loop(sender: Sender<AppEvent>, tick_rate: Duration) {
    loop {
        let forwarded = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                // Only presses; release/repeat events would double-fire actions.
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    sender.send(AppEvent::Key(key))
                }
                Ok(Event::Resize(w, h)) => sender.send(AppEvent::Resize(w, h)),
                Ok(_) => Ok(()),
                Err(e) => {
                    warn!(error = %e, "failed to read terminal event");
                    Ok(())
                }
            },
            Ok(false) => sender.send(AppEvent::Tick),
            Err(e) => {
                warn!(error = %e, "failed to poll terminal events");
                return;
            }
        };
        if forwarded.is_err() {
            debug!("event receiver dropped, stopping pump");
            return;
        }
    }
}
