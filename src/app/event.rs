//! Terminal event abstraction.
//!
//! A background task turns crossterm events into [`AppEvent`]s and forwards
//! them over a channel; quiet periods produce ticks that drive the search
//! debounce.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// No input for one tick period.
    Tick(Instant),
}

impl AppEvent {
    /// Map a raw terminal event.  Key releases and focus/paste events are
    /// dropped.
    fn from_terminal(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(k) if k.kind != KeyEventKind::Release => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Spawns the reader task and returns its channel.  The task ends when the
/// receiver is dropped.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let next = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(ev) => AppEvent::from_terminal(ev),
                    Err(err) => {
                        tracing::warn!(error = %err, "terminal read failed");
                        None
                    }
                },
                Ok(false) => Some(AppEvent::Tick(Instant::now())),
                Err(err) => {
                    tracing::warn!(error = %err, "terminal poll failed");
                    Some(AppEvent::Tick(Instant::now()))
                }
            };
            if let Some(ev) = next {
                if tx.send(ev).is_err() {
                    break; // receiver dropped
                }
            }
        }
    });

    rx
}
