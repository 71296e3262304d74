//! The state machine driver.
//!
//! `Fsm` orchestrates repeated matching and execution against a
//! transition table. All mutable state lives in the driven entity; the
//! machine itself is stateless between calls.

use super::entity::Stateful;
use super::listener::{Event, Listener, ListenerError, Params};
use super::transition::{Transition, TransitionTable};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Phase of listener execution, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerPhase {
    Before,
    After,
}

impl ListenerPhase {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
        }
    }
}

impl std::fmt::Display for ListenerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while driving an entity.
///
/// The engine defines no failures of its own at run time; the only
/// source of errors is a caller-supplied listener. A `before` failure
/// aborts the transition before the state write, an `after` failure
/// after it; neither is rolled back.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("{phase} listener failed on transition '{from}' -> '{to}': {source}")]
    ListenerFailed {
        phase: ListenerPhase,
        from: String,
        to: String,
        #[source]
        source: ListenerError,
    },
}

/// A finite state machine driving external entities through a
/// [`TransitionTable`].
///
/// The machine holds no per-entity state: one `Fsm` can drive any number
/// of entities, one at a time. The table is immutable after
/// construction, so sharing the machine is cheap.
///
/// Free transitions (those with no signal) fire automatically: every
/// public operation first *settles* the entity by applying free
/// transitions until none match. This means [`Fsm::is_signal`], despite
/// being a query, can move the entity; that side effect is part of the
/// contract, not an accident.
pub struct Fsm<E: ?Sized> {
    name: String,
    table: Arc<TransitionTable<E>>,
}

impl<E: ?Sized> std::fmt::Debug for Fsm<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsm")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<E: Stateful + ?Sized> Fsm<E> {
    /// Create a machine over a transition table. The name is diagnostic
    /// only.
    pub fn new(name: impl Into<String>, table: Arc<TransitionTable<E>>) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    /// The machine's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The machine's transition table.
    pub fn table(&self) -> &TransitionTable<E> {
        &self.table
    }

    /// Apply free transitions until the entity settles.
    ///
    /// Repeatedly takes the first matching free transition in
    /// declaration order and performs it; terminates when no free
    /// transition matches. A configuration with an unconditional
    /// free-transition cycle never settles and this call will not
    /// return; the engine does not detect cycles.
    pub fn refresh(&self, entity: &mut E) -> Result<(), TransitionError> {
        while let Some(transition) = self.table.first_match(entity, None) {
            self.perform(entity, transition, Params::new())?;
        }

        Ok(())
    }

    /// Send a signal to the entity.
    ///
    /// Settles the entity first, then performs the first transition
    /// matching `signal` in declaration order with the supplied
    /// parameters (empty if `None`), then settles again to apply any
    /// free transitions the signaled transition unlocked. When no
    /// transition matches the signal, the entity is left unchanged and
    /// no listener fires; that is a no-op, not an error.
    pub fn signal(
        &self,
        entity: &mut E,
        signal: &str,
        params: Option<Params>,
    ) -> Result<(), TransitionError> {
        self.refresh(entity)?;

        let Some(transition) = self.table.first_match(entity, Some(signal)) else {
            debug!(fsm = %self.name, state = %entity.state(), signal, "no transition for signal");
            return Ok(());
        };

        self.perform(entity, transition, params.unwrap_or_default())?;
        self.refresh(entity)
    }

    /// Check whether a transition for `signal` is currently possible,
    /// without performing it.
    ///
    /// The entity is settled first, so the question is answered against
    /// a settled state. Any pending free transitions are applied to the
    /// entity even though this is a query.
    pub fn is_signal(&self, entity: &mut E, signal: &str) -> Result<bool, TransitionError> {
        self.refresh(entity)?;

        Ok(self.table.first_match(entity, Some(signal)).is_some())
    }

    /// Execute one matched transition.
    ///
    /// Builds the event, fires before-listeners in order, writes the new
    /// state, fires after-listeners in order with the same event. Not
    /// transactional: a failing before-listener leaves the entity in its
    /// prior state with no after-listeners run.
    fn perform(
        &self,
        entity: &mut E,
        transition: &Transition<E>,
        params: Params,
    ) -> Result<(), TransitionError> {
        trace!(
            fsm = %self.name,
            from = %transition.state_from,
            to = %transition.state_to,
            signal = transition.signal.as_deref().unwrap_or("-"),
            "performing transition"
        );

        let event = Event::new(
            transition.state_from.clone(),
            transition.state_to.clone(),
            transition.signal.clone(),
            params,
        );

        Self::notify(entity, &transition.before, &event, ListenerPhase::Before)?;
        entity.set_state(transition.state_to.clone());
        Self::notify(entity, &transition.after, &event, ListenerPhase::After)?;

        Ok(())
    }

    fn notify(
        entity: &mut E,
        listeners: &[Arc<dyn Listener<E>>],
        event: &Event,
        phase: ListenerPhase,
    ) -> Result<(), TransitionError> {
        for listener in listeners {
            listener
                .on_event(entity, event)
                .map_err(|source| TransitionError::ListenerFailed {
                    phase,
                    from: event.state_from.name().to_string(),
                    to: event.state_to.name().to_string(),
                    source,
                })?;
        }

        Ok(())
    }
}

impl<E: ?Sized> Clone for Fsm<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            table: Arc::clone(&self.table),
        }
    }
}
