//! Modal lifecycle with a deferred payload clear.
//!
//! A modal goes `Closed -> Open -> ClosingGrace -> Closed`. Closing hides it
//! immediately but keeps the payload around for the exit transition; the
//! payload is dropped when the grace period ends. The grace timer itself
//! lives outside this crate. Here it is represented by a [`GraceTicket`]
//! that is only honored if no newer `open` happened in between.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModalPhase {
    #[default]
    Closed,
    Open,
    ClosingGrace,
}

/// Proof that a close was requested at a particular generation.
///
/// Handed out by [`Modal::request_close`] and redeemed by
/// [`Modal::grace_elapsed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraceTicket {
    generation: u64,
}

impl GraceTicket {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// A modal and its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modal<T> {
    phase: ModalPhase,
    payload: Option<T>,
    generation: u64,
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Self {
            phase: ModalPhase::Closed,
            payload: None,
            generation: 0,
        }
    }
}

impl<T> Modal<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn phase(&self) -> ModalPhase {
        self.phase
    }

    /// Whether the modal is currently shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == ModalPhase::Open
    }

    /// Payload, present while open and during the grace period.
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Incremented on every `open`.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Show the modal with `payload`.
    ///
    /// Works from any phase. Opening during the grace period replaces the
    /// payload and invalidates the outstanding [`GraceTicket`]. Returns
    /// `true` in that case, so the caller can cancel its timer.
    pub fn open(&mut self, payload: T) -> bool {
        let superseded = self.phase == ModalPhase::ClosingGrace;
        self.phase = ModalPhase::Open;
        self.payload = Some(payload);
        self.generation = self.generation.wrapping_add(1);
        superseded
    }

    /// Hide the modal and start the grace period.
    ///
    /// Only meaningful while `Open`; returns `None` (and changes nothing)
    /// otherwise.
    pub fn request_close(&mut self) -> Option<GraceTicket> {
        if self.phase != ModalPhase::Open {
            return None;
        }
        self.phase = ModalPhase::ClosingGrace;
        Some(GraceTicket {
            generation: self.generation,
        })
    }

    /// End the grace period for `ticket`, dropping the payload.
    ///
    /// Stale tickets (issued before a newer `open`) are ignored. Returns
    /// whether the modal was cleared.
    pub fn grace_elapsed(&mut self, ticket: GraceTicket) -> bool {
        if self.phase != ModalPhase::ClosingGrace || ticket.generation != self.generation {
            return false;
        }
        self.phase = ModalPhase::Closed;
        self.payload = None;
        true
    }
}
