//! Transition events and the listeners that observe them.
//!
//! A single [`Event`] is built per executed transition and handed,
//! unchanged, to every before-listener and every after-listener of that
//! transition. The entity's state write happens strictly between the two
//! phases.

use super::state::State;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Arbitrary parameter mapping supplied by the caller of `signal`.
pub type Params = Map<String, Value>;

/// Error a listener may raise; it propagates unmodified to the caller of
/// the driving operation.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Immutable snapshot of one transition execution.
///
/// Created immediately before the before-listeners fire, seen unchanged
/// by both listener phases, and discarded once the transition completes.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// State the entity is leaving.
    pub state_from: State,
    /// State the entity is entering.
    pub state_to: State,
    /// Signal that triggered the transition, `None` for free transitions.
    pub signal: Option<String>,
    /// Caller-supplied parameters, empty for free transitions.
    pub params: Params,
    /// When the transition started executing.
    pub fired_at: DateTime<Utc>,
}

impl Event {
    /// Build an event for one transition execution, stamped with the
    /// current time.
    pub fn new(
        state_from: State,
        state_to: State,
        signal: Option<String>,
        params: Params,
    ) -> Self {
        Self {
            state_from,
            state_to,
            signal,
            params,
            fired_at: Utc::now(),
        }
    }
}

/// Observer notified immediately before and after a transition's state
/// change.
///
/// The entity is passed alongside the event so listeners can read it, or
/// even mutate it; the engine does not protect against listeners that
/// rewrite the entity's state directly. A failing listener aborts the
/// driving operation mid-transition: a before-listener failure prevents
/// the state write, an after-listener failure happens after it.
///
/// Any matching closure is a listener:
///
/// ```rust
/// use turnstile::core::{Event, Listener, ListenerError};
///
/// struct Order;
///
/// let echo = |_order: &mut Order, event: &Event| -> Result<(), ListenerError> {
///     println!("{} -> {}", event.state_from, event.state_to);
///     Ok(())
/// };
///
/// # let _: &dyn Listener<Order> = &echo;
/// ```
pub trait Listener<E: ?Sized>: Send + Sync {
    /// Process one transition event.
    fn on_event(&self, entity: &mut E, event: &Event) -> Result<(), ListenerError>;
}

impl<E: ?Sized> std::fmt::Debug for dyn Listener<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Listener")
    }
}

impl<E: ?Sized, F> Listener<E> for F
where
    F: Fn(&mut E, &Event) -> Result<(), ListenerError> + Send + Sync,
{
    fn on_event(&self, entity: &mut E, event: &Event) -> Result<(), ListenerError> {
        self(entity, event)
    }
}
