//! Cancellable grace-clear timers, one slot per modal.

use std::collections::HashMap;
use std::time::Duration;

use fabu_core::{GraceTicket, ModalKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// A fired timer: the modal and the ticket it was scheduled with.
pub type Fired = (ModalKind, GraceTicket);

/// Each slot remembers the ticket its timer carries, so a late delivery
/// from an older timer never releases a newer one.
pub struct GraceTimers {
    grace: Duration,
    fired: mpsc::UnboundedSender<Fired>,
    pending: HashMap<ModalKind, (GraceTicket, JoinHandle<()>)>,
}

impl GraceTimers {
    pub fn new(grace: Duration, fired: mpsc::UnboundedSender<Fired>) -> Self {
        Self {
            grace,
            fired,
            pending: HashMap::new(),
        }
    }

    /// Start the grace timer for `modal`, replacing any pending one.
    pub fn schedule(&mut self, modal: ModalKind, ticket: GraceTicket) {
        self.cancel(modal);

        let grace = self.grace;
        let fired = self.fired.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            // The store is gone if this fails; nothing left to clear.
            let _ = fired.send((modal, ticket));
        });
        self.pending.insert(modal, (ticket, handle));
    }

    /// Abort the pending timer for `modal`, if any.
    pub fn cancel(&mut self, modal: ModalKind) {
        if let Some((_, handle)) = self.pending.remove(&modal) {
            if !handle.is_finished() {
                debug!(%modal, "grace clear cancelled");
            }
            handle.abort();
        }
    }

    /// Forget the slot for a timer that has delivered `ticket`.
    ///
    /// A slot holding a different ticket belongs to a newer timer and stays.
    pub fn complete(&mut self, modal: ModalKind, ticket: GraceTicket) {
        if self
            .pending
            .get(&modal)
            .is_some_and(|(scheduled, _)| *scheduled == ticket)
        {
            self.pending.remove(&modal);
        }
    }

    /// Number of timers that have not fired yet.
    #[cfg(test)]
    fn pending(&self) -> usize {
        self.pending
            .values()
            .filter(|(_, handle)| !handle.is_finished())
            .count()
    }
}

impl Drop for GraceTimers {
    fn drop(&mut self) {
        for (_, (_, handle)) in self.pending.drain() {
            handle.abort();
        }
    }
}
