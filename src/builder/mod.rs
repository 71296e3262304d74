//! Configuration and build phase.
//!
//! This module turns declarative configuration into runnable machines:
//! parsing the nested config structure, resolving guard and listener
//! names (including the `!` negation prefix) against registries, and
//! assembling the immutable transition table. Everything name-shaped is
//! resolved here, once, so the core matching path only ever touches
//! capability values.

pub mod config;
pub mod error;
pub mod factory;
pub mod registry;

pub use config::{Config, MachineConfig, StateConfig, TransitionConfig};
pub use error::BuildError;
pub use factory::FsmFactory;
pub use registry::{GuardRegistry, ListenerRegistry};
