//! Transitions and the ordered table they live in.

use super::entity::Stateful;
use super::guard::Guard;
use super::listener::Listener;
use super::state::State;
use std::sync::Arc;

/// One edge of the state machine.
///
/// Immutable once constructed. Guard and listener lists are ordered and
/// hold their members by `Arc`, so the same guard or listener value can
/// be shared across transitions by identity.
///
/// A transition with `signal: None` is a *free* transition: it is
/// eligible whenever its source state and guards match, with no external
/// trigger.
pub struct Transition<E: ?Sized> {
    /// Source state, always present.
    pub state_from: State,
    /// Destination state, always present.
    pub state_to: State,
    /// Triggering signal, `None` for free transitions.
    pub signal: Option<String>,
    /// Guards evaluated in declaration order; all must be satisfied.
    pub guards: Vec<Arc<dyn Guard<E>>>,
    /// Listeners fired, in order, before the state write.
    pub before: Vec<Arc<dyn Listener<E>>>,
    /// Listeners fired, in order, after the state write.
    pub after: Vec<Arc<dyn Listener<E>>>,
}

impl<E: Stateful + ?Sized> Transition<E> {
    /// Create a free transition with no guards or listeners.
    pub fn free(state_from: State, state_to: State) -> Self {
        Self {
            state_from,
            state_to,
            signal: None,
            guards: Vec::new(),
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Create a signaled transition with no guards or listeners.
    pub fn on_signal(state_from: State, state_to: State, signal: impl Into<String>) -> Self {
        Self {
            signal: Some(signal.into()),
            ..Self::free(state_from, state_to)
        }
    }

    /// Check whether this transition matches the entity and queried
    /// signal.
    ///
    /// Matching requires all three of: source state equal to the
    /// entity's current state (by name), stored signal equal to the
    /// query (`None` matches only free transitions, a named signal only
    /// transitions carrying exactly that signal), and every guard
    /// satisfied in declaration order. Guard evaluation short-circuits
    /// on the first unsatisfied guard; an empty list is vacuously
    /// satisfied.
    pub fn matches(&self, entity: &E, signal: Option<&str>) -> bool {
        if self.state_from != *entity.state() {
            return false;
        }

        if self.signal.as_deref() != signal {
            return false;
        }

        self.guards.iter().all(|guard| guard.is_satisfied(entity))
    }
}

impl<E: ?Sized> Clone for Transition<E> {
    fn clone(&self) -> Self {
        Self {
            state_from: self.state_from.clone(),
            state_to: self.state_to.clone(),
            signal: self.signal.clone(),
            guards: self.guards.clone(),
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

/// Ordered, immutable collection of transitions.
///
/// Order is configuration order and is significant: when several
/// transitions match the same query, the one declared first wins.
pub struct TransitionTable<E: ?Sized> {
    transitions: Vec<Transition<E>>,
}

impl<E: Stateful + ?Sized> TransitionTable<E> {
    /// Build a table from transitions in declaration order.
    pub fn new(transitions: Vec<Transition<E>>) -> Self {
        Self { transitions }
    }

    /// Find every transition matching the entity's current state and the
    /// queried signal, preserving declaration order.
    ///
    /// Each call computes the sequence afresh; there is no shared cursor
    /// between calls.
    pub fn find_transitions(&self, entity: &E, signal: Option<&str>) -> Vec<&Transition<E>> {
        self.transitions
            .iter()
            .filter(|transition| transition.matches(entity, signal))
            .collect()
    }

    /// Find the first matching transition in declaration order, if any.
    pub fn first_match(&self, entity: &E, signal: Option<&str>) -> Option<&Transition<E>> {
        self.transitions
            .iter()
            .find(|transition| transition.matches(entity, signal))
    }

    /// All transitions in declaration order.
    pub fn transitions(&self) -> &[Transition<E>] {
        &self.transitions
    }

    /// Number of transitions in the table.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether the table holds no transitions.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::Not;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Doc {
        state: State,
        is_valid: bool,
    }

    impl Doc {
        fn at(name: &str) -> Self {
            Self {
                state: State::new(name),
                is_valid: true,
            }
        }
    }

    impl Stateful for Doc {
        fn state(&self) -> &State {
            &self.state
        }

        fn set_state(&mut self, state: State) {
            self.state = state;
        }
    }

    fn valid_guard() -> Arc<dyn Guard<Doc>> {
        Arc::new(|doc: &Doc| doc.is_valid)
    }

    #[test]
    fn matches_requires_source_state() {
        let transition = Transition::<Doc>::free(State::new("init"), State::new("created"));

        assert!(transition.matches(&Doc::at("init"), None));
        assert!(!transition.matches(&Doc::at("created"), None));
    }

    #[test]
    fn signal_matching_is_exact() {
        let free = Transition::<Doc>::free(State::new("a"), State::new("b"));
        let signaled = Transition::<Doc>::on_signal(State::new("a"), State::new("b"), "go");
        let entity = Doc::at("a");

        assert!(free.matches(&entity, None));
        assert!(!free.matches(&entity, Some("go")));
        assert!(signaled.matches(&entity, Some("go")));
        assert!(!signaled.matches(&entity, None));
        assert!(!signaled.matches(&entity, Some("stop")));
    }

    #[test]
    fn empty_guard_list_is_vacuously_satisfied() {
        let transition = Transition::<Doc>::free(State::new("a"), State::new("b"));
        assert!(transition.matches(&Doc::at("a"), None));
    }

    #[test]
    fn all_guards_must_be_satisfied() {
        let mut transition = Transition::<Doc>::free(State::new("a"), State::new("b"));
        transition.guards = vec![valid_guard(), Arc::new(Not::new(valid_guard()))];

        assert!(!transition.matches(&Doc::at("a"), None));
    }

    #[test]
    fn guards_evaluate_in_order_and_short_circuit() {
        let order = Arc::new(AtomicUsize::new(0));

        let first = {
            let order = Arc::clone(&order);
            move |_: &Doc| {
                order.compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst).ok();
                false
            }
        };
        let second = {
            let order = Arc::clone(&order);
            move |_: &Doc| {
                order.store(99, Ordering::SeqCst);
                true
            }
        };

        let mut transition = Transition::<Doc>::free(State::new("a"), State::new("b"));
        transition.guards = vec![Arc::new(first), Arc::new(second)];

        assert!(!transition.matches(&Doc::at("a"), None));
        // second guard never ran
        assert_eq!(order.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn find_transitions_preserves_declaration_order() {
        let table = TransitionTable::new(vec![
            Transition::<Doc>::free(State::new("a"), State::new("b")),
            Transition::<Doc>::free(State::new("a"), State::new("c")),
            Transition::<Doc>::free(State::new("x"), State::new("y")),
        ]);
        let entity = Doc::at("a");

        let matches = table.find_transitions(&entity, None);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].state_to.name(), "b");
        assert_eq!(matches[1].state_to.name(), "c");

        let first = table.first_match(&entity, None).unwrap();
        assert_eq!(first.state_to.name(), "b");
    }

    #[test]
    fn find_transitions_is_restartable() {
        let table = TransitionTable::new(vec![Transition::<Doc>::free(
            State::new("a"),
            State::new("b"),
        )]);
        let entity = Doc::at("a");

        assert_eq!(table.find_transitions(&entity, None).len(), 1);
        assert_eq!(table.find_transitions(&entity, None).len(), 1);
    }

    #[test]
    fn unsatisfied_guard_excludes_transition() {
        let mut guarded = Transition::<Doc>::free(State::new("a"), State::new("b"));
        guarded.guards = vec![valid_guard()];
        let table = TransitionTable::new(vec![guarded]);

        let mut entity = Doc::at("a");
        entity.is_valid = false;

        assert!(table.first_match(&entity, None).is_none());
        entity.is_valid = true;
        assert!(table.first_match(&entity, None).is_some());
    }
}
