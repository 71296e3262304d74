//! Guard predicates gating transition eligibility.
//!
//! Guards are boolean predicates over the driven entity. A transition is
//! eligible only when every guard in its list is satisfied, evaluated in
//! declaration order.

use std::sync::Arc;

/// Predicate that determines whether a transition may execute.
///
/// `is_satisfied` should be a pure function of the entity's observable
/// state; the engine assumes no side effects but does not enforce that.
///
/// Any `Fn(&E) -> bool + Send + Sync` closure is a guard:
///
/// ```rust
/// use turnstile::core::Guard;
///
/// struct Order {
///     paid: bool,
/// }
///
/// let paid = |order: &Order| order.paid;
/// assert!(paid.is_satisfied(&Order { paid: true }));
/// assert!(!paid.is_satisfied(&Order { paid: false }));
/// ```
pub trait Guard<E: ?Sized>: Send + Sync {
    /// Check the guard condition against the entity.
    fn is_satisfied(&self, entity: &E) -> bool;
}

impl<E: ?Sized, F> Guard<E> for F
where
    F: Fn(&E) -> bool + Send + Sync,
{
    fn is_satisfied(&self, entity: &E) -> bool {
        self(entity)
    }
}

/// Guard that is always satisfied.
///
/// Used as the fallback when a configuration names a guard that was never
/// registered, and as the implicit guard of an empty guard list.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullGuard;

impl<E: ?Sized> Guard<E> for NullGuard {
    fn is_satisfied(&self, _entity: &E) -> bool {
        true
    }
}

/// Negation decorator over another guard.
///
/// `is_satisfied` invokes the wrapped guard exactly once per call and
/// returns the logical negation of its result. The wrapper holds the
/// inner guard by `Arc`, so negating a registered guard shares it by
/// identity rather than copying it.
pub struct Not<E: ?Sized> {
    inner: Arc<dyn Guard<E>>,
}

impl<E: ?Sized> Not<E> {
    /// Wrap a guard in its logical negation.
    pub fn new(inner: Arc<dyn Guard<E>>) -> Self {
        Self { inner }
    }
}

impl<E: ?Sized> Guard<E> for Not<E> {
    fn is_satisfied(&self, entity: &E) -> bool {
        !self.inner.is_satisfied(entity)
    }
}
