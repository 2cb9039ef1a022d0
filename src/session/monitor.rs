use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::MissedTickBehavior,
};

use crate::session::engine::PlaybackClock;

/// Playhead snapshot published by a [`PlaybackMonitor`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct PlaybackStatus {
    /// Playhead position in seconds.
    pub current_time: f64,
    /// Total length reported by the engine, in seconds.
    pub duration: f64,
}

/// Fixed-interval poll of a [`PlaybackClock`].
///
/// The poll task is aborted by [`shutdown`](Self::shutdown) or on drop; no sample is taken
/// after either returns.
pub struct PlaybackMonitor {
    status: watch::Receiver<PlaybackStatus>,
    handle: Option<JoinHandle<()>>,
}

impl PlaybackMonitor {
    /// Start polling `clock` every `every` on the current tokio runtime.
    pub fn spawn<C>(clock: Arc<C>, every: Duration) -> Self
    where
        C: PlaybackClock + 'static,
    {
        let (tx, status) = watch::channel(PlaybackStatus::default());
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let sample = PlaybackStatus {
                    current_time: clock.current_time(),
                    duration: clock.duration(),
                };
                if tx.send(sample).is_err() {
                    break;
                }
            }
        });
        tracing::debug!(interval_ms = every.as_millis() as u64, "playback monitor started");
        Self {
            status,
            handle: Some(handle),
        }
    }

    /// Most recent sample.
    pub fn status(&self) -> PlaybackStatus {
        *self.status.borrow()
    }

    /// Receiver that is notified on every sample.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackStatus> {
        self.status.clone()
    }

    /// Stop polling and wait for the poll task to finish.
    pub async fn shutdown(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
            tracing::debug!("playback monitor stopped");
        }
    }
}

impl Drop for PlaybackMonitor {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/monitor.rs"]
mod tests;
