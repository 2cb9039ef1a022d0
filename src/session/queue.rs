use std::collections::BTreeSet;

use tokio::sync::watch;

#[derive(Debug, Default)]
struct QueueState {
    issued: u64,
    serving: u64,
    abandoned: BTreeSet<u64>,
}

/// Serializes sequential appends in request order.
///
/// Each request takes a [`Ticket`] up front. A ticket's turn comes once every earlier ticket
/// has been dropped, whether its request appended, failed or was cancelled.
#[derive(Debug)]
pub(crate) struct AppendQueue {
    state: watch::Sender<QueueState>,
}

impl Default for AppendQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl AppendQueue {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(QueueState::default());
        Self { state }
    }

    pub(crate) fn ticket(&self) -> Ticket<'_> {
        let mut number = 0;
        self.state.send_modify(|s| {
            number = s.issued;
            s.issued += 1;
        });
        Ticket {
            queue: self,
            number,
        }
    }

    fn release(&self, number: u64) {
        self.state.send_modify(|s| {
            if s.serving == number {
                s.serving += 1;
                while s.abandoned.remove(&s.serving) {
                    s.serving += 1;
                }
            } else {
                s.abandoned.insert(number);
            }
        });
    }
}

/// Place in an [`AppendQueue`]; dropping it hands the turn on.
#[derive(Debug)]
pub(crate) struct Ticket<'q> {
    queue: &'q AppendQueue,
    number: u64,
}

impl Ticket<'_> {
    pub(crate) fn number(&self) -> u64 {
        self.number
    }

    pub(crate) fn is_turn(&self) -> bool {
        self.queue.state.borrow().serving == self.number
    }

    /// Wait until every earlier ticket has been released.
    pub(crate) async fn turn(&self) {
        let mut rx = self.queue.state.subscribe();
        // The sender lives in `self.queue`, which the ticket borrows, so the wait only ends
        // once this ticket is served.
        let served = rx.wait_for(|s| s.serving == self.number).await.is_ok();
        debug_assert!(served, "append queue closed while ticket {} waited", self.number);
    }
}

impl Drop for Ticket<'_> {
    fn drop(&mut self) {
        self.queue.release(self.number);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/queue.rs"]
mod tests;
