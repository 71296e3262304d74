//! Turnstile: a configuration-driven finite state machine engine.
//!
//! Turnstile drives arbitrary stateful entities through state changes in
//! response to explicit signals or automatic ("free") transitions. The
//! caller supplies a declarative description of states and transitions,
//! guard predicates, and transition listeners; the engine supplies
//! lookup, guard evaluation, and transition execution semantics.
//!
//! # Core Concepts
//!
//! - **State**: a named, immutable point in the machine, equal by name
//! - **Guard**: a predicate over the driven entity, negatable via `!`
//! - **Listener**: an observer fired before and after each state change
//! - **Free transition**: fires automatically whenever it matches
//! - **Signal**: a named external trigger for one specific transition
//!
//! Every public driving operation settles the entity first: free
//! transitions are applied until none match. This includes the
//! [`Fsm::is_signal`](crate::core::Fsm::is_signal) query, which can
//! therefore move the entity as a documented side effect.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use turnstile::builder::{Config, FsmFactory, GuardRegistry, ListenerRegistry};
//! use turnstile::core::{State, Stateful};
//!
//! struct Document {
//!     state: State,
//!     is_valid: bool,
//! }
//!
//! impl Stateful for Document {
//!     fn state(&self) -> &State {
//!         &self.state
//!     }
//!
//!     fn set_state(&mut self, state: State) {
//!         self.state = state;
//!     }
//! }
//!
//! let config = Config::from_json(r#"{
//!     "Document": {
//!         "states": {
//!             "init": { "type": "regular" },
//!             "created": { "type": "regular" },
//!             "valid": { "type": "regular" },
//!             "invalid": { "type": "regular" }
//!         },
//!         "transitions": [
//!             { "from": "init", "to": "created" },
//!             { "from": "created", "to": "valid", "guards": ["IsValid"] },
//!             { "from": "created", "to": "invalid", "guards": ["!IsValid"] }
//!         ]
//!     }
//! }"#).unwrap();
//!
//! let mut guards = GuardRegistry::new();
//! guards.register("IsValid", Arc::new(|doc: &Document| doc.is_valid));
//!
//! let factory = FsmFactory::new(config, guards, ListenerRegistry::new());
//! let fsm = factory.get_fsm("Document").unwrap();
//!
//! let mut doc = Document {
//!     state: State::new("init"),
//!     is_valid: true,
//! };
//! fsm.refresh(&mut doc).unwrap();
//! assert_eq!(doc.state().name(), "valid");
//! ```
//!
//! # Concurrency
//!
//! The engine is single-threaded and synchronous: each driving operation
//! runs to completion before returning, and the only mutable state is
//! the entity's current-state field, which the engine assumes is owned
//! by the driving thread. Callers needing concurrent access serialize
//! externally.

pub mod builder;
pub mod core;

// Re-export commonly used types
pub use crate::builder::{BuildError, Config, FsmFactory, GuardRegistry, ListenerRegistry};
pub use crate::core::{
    Event, Fsm, Guard, Listener, ListenerError, Params, State, StateKind, Stateful, Transition,
    TransitionError, TransitionTable,
};
