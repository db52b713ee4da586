use std::time::{Duration, Instant};

use tokio::{sync::mpsc, task::JoinHandle};

use crate::core::config::AppConfig;

/// Holds the latest value until no new value arrives for `quiet`.
///
/// Time is passed in by the caller, which keeps the discipline testable
/// without a clock.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// Releases the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if !due {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Search box input: the echo updates on every keystroke, the applied query
/// only after the quiet period.
#[derive(Debug, Clone)]
pub struct SearchInput {
    echo: String,
    applied: String,
    debouncer: Debouncer<String>,
}

impl SearchInput {
    pub fn new(quiet: Duration) -> Self {
        Self {
            echo: String::new(),
            applied: String::new(),
            debouncer: Debouncer::new(quiet),
        }
    }

    /// Uses the configured search quiet period.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.search_debounce)
    }

    pub fn keystroke(&mut self, value: impl Into<String>, now: Instant) {
        self.echo = value.into();
        self.debouncer.push(self.echo.clone(), now);
    }

    /// Returns the new query when a filter pass is due.
    pub fn tick(&mut self, now: Instant) -> Option<&str> {
        let settled = self.debouncer.poll(now)?;
        self.applied = settled;
        Some(&self.applied)
    }

    pub fn echo(&self) -> &str {
        &self.echo
    }

    pub fn applied(&self) -> &str {
        &self.applied
    }
}

/// Runs `on_settle` with the latest value from `rx` once `quiet` passes with
/// no newer value. A pending value is dropped when the sender closes.
pub fn spawn_debounced<T, F>(quiet: Duration, mut rx: mpsc::Receiver<T>, mut on_settle: F) -> JoinHandle<()>
where
    T: Send + 'static,
    F: FnMut(T) + Send + 'static,
{
    tokio::spawn(async move {
        let mut pending: Option<T> = None;
        loop {
            match pending.take() {
                None => match rx.recv().await {
                    Some(value) => pending = Some(value),
                    None => break,
                },
                Some(value) => {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(newer) => pending = Some(newer),
                            None => break,
                        },
                        _ = tokio::time::sleep(quiet) => on_settle(value),
                    }
                }
            }
        }
    })
}
