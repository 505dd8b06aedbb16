//! Per-visitor store runtime.
//!
//! Every visitor owns one [`fabu_core::UiState`], held by a dedicated tokio
//! task. Handlers talk to it through a [`StoreHandle`]; the
//! [`VisitorRegistry`] maps session visitor ids to handles and evicts idle
//! visitors.

mod actor;
mod registry;
mod timers;

pub use actor::{Outcome, StoreError, StoreHandle};
pub use registry::VisitorRegistry;
