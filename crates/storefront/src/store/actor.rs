//! The visitor store actor.
//!
//! One task per visitor owns the [`UiState`] and applies actions in the order
//! they arrive on its channel. Grace timers report back on a second channel,
//! so a timer firing is just another action in the same sequence.

use std::time::Duration;

use chrono::Utc;
use fabu_core::{Action, Catalog, Effect, UiSnapshot, UiState};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

use super::timers::{Fired, GraceTimers};

/// Command queue depth per visitor.
const MAILBOX_CAPACITY: usize = 32;

/// The visitor's store task has stopped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("visitor store is not running")]
    Closed,
}

/// Result of one dispatched action.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// State after the action.
    pub snapshot: UiSnapshot,
    /// Effects the reducer produced. Timer effects have already been
    /// carried out; the rest are for the page.
    pub effects: Vec<Effect>,
}

enum Command {
    Dispatch {
        action: Action,
        reply: oneshot::Sender<Outcome>,
    },
    Snapshot {
        reply: oneshot::Sender<UiSnapshot>,
    },
}

/// Cheap, cloneable handle to a visitor's store task.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    commands: mpsc::Sender<Command>,
}

impl StoreHandle {
    /// Spawn a store task for `visitor` starting from `initial`.
    ///
    /// The task stops once every handle is dropped.
    #[must_use]
    pub fn spawn(visitor: Uuid, catalog: Catalog, grace: Duration, initial: UiState) -> Self {
        let (commands, inbox) = mpsc::channel(MAILBOX_CAPACITY);
        let (fired_tx, fired) = mpsc::unbounded_channel();

        let actor = StoreActor {
            state: initial,
            catalog,
            timers: GraceTimers::new(grace, fired_tx),
            inbox,
            fired,
        };
        tokio::spawn(actor.run().instrument(info_span!("visitor_store", %visitor)));

        Self { commands }
    }

    /// Apply `action` and wait for the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`] if the store task has stopped.
    pub async fn dispatch(&self, action: Action) -> Result<Outcome, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Dispatch { action, reply })
            .await
            .map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)
    }

    /// Current state without changing it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Closed`] if the store task has stopped.
    pub async fn snapshot(&self) -> Result<UiSnapshot, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Snapshot { reply })
            .await
            .map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

struct StoreActor {
    state: UiState,
    catalog: Catalog,
    timers: GraceTimers,
    inbox: mpsc::Receiver<Command>,
    fired: mpsc::UnboundedReceiver<Fired>,
}

impl StoreActor {
    async fn run(mut self) {
        debug!("visitor store started");
        loop {
            tokio::select! {
                command = self.inbox.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                Some((modal, ticket)) = self.fired.recv() => {
                    self.timers.complete(modal, ticket);
                    self.apply(Action::GraceElapsed(modal, ticket));
                }
            }
        }
        debug!("visitor store stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Dispatch { action, reply } => {
                let effects = self.apply(action);
                let outcome = Outcome {
                    snapshot: self.state.snapshot(),
                    effects,
                };
                // The requester may have gone away; the action still applied.
                let _ = reply.send(outcome);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.state.snapshot());
            }
        }
    }

    fn apply(&mut self, action: Action) -> Vec<Effect> {
        let effects = self.state.apply(&self.catalog, action, Utc::now());
        for effect in &effects {
            match effect {
                Effect::ScheduleGraceClear { modal, ticket } => {
                    self.timers.schedule(*modal, *ticket);
                }
                Effect::CancelGraceClear(modal) => self.timers.cancel(*modal),
                Effect::ScrollLock(_) | Effect::Scroll(_) => {}
            }
        }
        effects
    }
}
