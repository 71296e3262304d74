//! Named states for configuration-driven state machines.
//!
//! States are immutable values identified by name. Two states compare
//! equal when their names are equal, regardless of kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Kind of a state.
///
/// Only `Regular` is recognized today; the enum exists so that future
/// kinds extend configuration without changing the `State` type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    #[default]
    Regular,
}

impl StateKind {
    /// Get the kind's configuration spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named point in a state machine.
///
/// Immutable once constructed. The driven entity holds its current
/// `State`; the engine only ever reads and overwrites that value.
///
/// # Example
///
/// ```rust
/// use turnstile::core::State;
///
/// let a = State::new("created");
/// let b = State::new("created");
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "created");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct State {
    name: String,
    kind: StateKind,
}

impl State {
    /// Create a regular state with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name, StateKind::Regular)
    }

    /// Create a state with an explicit kind.
    pub fn with_kind(name: impl Into<String>, kind: StateKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Get the state's name, its identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the state's kind.
    pub fn kind(&self) -> StateKind {
        self.kind
    }
}

// Equality and hashing go by name only so that states with future kinds
// still compare by identity.
impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for State {}

impl Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
