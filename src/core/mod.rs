//! Core state machine engine.
//!
//! This module contains the transition-resolution and execution engine:
//! - `State` values and the `Stateful` entity capability
//! - `Guard` predicates and their negation
//! - Transition events and `Listener` observers
//! - The ordered `TransitionTable` and its matching algorithm
//! - The `Fsm` driver with its `refresh`/`signal`/`is_signal` protocol
//!
//! Everything here works with already-resolved capability values; name
//! resolution and configuration parsing live in [`crate::builder`].

mod entity;
mod guard;
mod history;
mod listener;
mod machine;
mod state;
mod transition;

pub use entity::Stateful;
pub use guard::{Guard, Not, NullGuard};
pub use history::{History, Recorder, TransitionRecord};
pub use listener::{Event, Listener, ListenerError, Params};
pub use machine::{Fsm, ListenerPhase, TransitionError};
pub use state::{State, StateKind};
pub use transition::{Transition, TransitionTable};
