//! In-memory transition history.
//!
//! An optional audit trail of executed transitions. [`History`] is an
//! immutable record list; [`Recorder`] plugs it into a machine as an
//! after-listener. Nothing here persists across process restarts.

use super::listener::{Event, Listener, ListenerError};
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Record of a single executed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// State the entity left.
    pub from: State,
    /// State the entity entered.
    pub to: State,
    /// Triggering signal, `None` for free transitions.
    pub signal: Option<String>,
    /// When the transition executed.
    pub at: DateTime<Utc>,
}

impl TransitionRecord {
    /// Build a record from a transition event.
    pub fn from_event(event: &Event) -> Self {
        Self {
            from: event.state_from.clone(),
            to: event.state_to.clone(),
            signal: event.signal.clone(),
            at: event.fired_at,
        }
    }
}

/// Ordered history of executed transitions.
///
/// `record` returns a new history instead of mutating the receiver, so a
/// snapshot taken at any point stays valid.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{History, State, TransitionRecord};
/// use chrono::Utc;
///
/// let history = History::new();
/// let history = history.record(TransitionRecord {
///     from: State::new("init"),
///     to: State::new("created"),
///     signal: None,
///     at: Utc::now(),
/// });
///
/// assert_eq!(history.len(), 1);
/// assert_eq!(history.path(), vec!["init", "created"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct History {
    transitions: Vec<TransitionRecord>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(record);
        Self { transitions }
    }

    /// All records in execution order.
    pub fn transitions(&self) -> &[TransitionRecord] {
        &self.transitions
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.last()
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether anything has been recorded.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// The state names traversed: the first record's source followed by
    /// every record's destination. Empty for an empty history.
    pub fn path(&self) -> Vec<&str> {
        let Some(first) = self.transitions.first() else {
            return Vec::new();
        };

        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        path.push(first.from.name());
        path.extend(self.transitions.iter().map(|record| record.to.name()));
        path
    }
}

/// Listener that appends a [`TransitionRecord`] per event to a shared
/// history.
///
/// Register it as an after-listener so only transitions that actually
/// committed their state write are recorded.
#[derive(Clone, Default)]
pub struct Recorder {
    history: Arc<Mutex<History>>,
}

impl Recorder {
    /// Create a recorder with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the history recorded so far.
    pub fn history(&self) -> History {
        self.history.lock().expect("history lock poisoned").clone()
    }
}

impl<E: ?Sized> Listener<E> for Recorder {
    fn on_event(&self, _entity: &mut E, event: &Event) -> Result<(), ListenerError> {
        let mut history = self.history.lock().expect("history lock poisoned");
        *history = history.record(TransitionRecord::from_event(event));
        Ok(())
    }
}
