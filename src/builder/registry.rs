//! Name registries for guards and listeners.
//!
//! Configuration refers to guards and listeners by name; these
//! registries map the names back to capability values during the build
//! phase. The built transition table holds only resolved values, never
//! names.
//!
//! The two registries resolve differently, on purpose: an unregistered
//! guard name falls back to the always-true [`NullGuard`], while an
//! unregistered listener name is a hard build error.

use crate::builder::error::BuildError;
use crate::core::{Guard, Listener, Not, NullGuard};
use std::collections::HashMap;
use std::sync::Arc;

/// Name-to-guard registry with `!`-prefix negation.
///
/// A token with a leading `!` resolves to the registered guard wrapped
/// in [`Not`]. Negation of an unregistered name resolves to the plain
/// fallback, since the negation marker only applies to a guard that
/// exists.
///
/// # Example
///
/// ```rust
/// use turnstile::builder::GuardRegistry;
/// use std::sync::Arc;
///
/// struct Order {
///     paid: bool,
/// }
///
/// let mut guards = GuardRegistry::new();
/// guards.register("IsPaid", Arc::new(|order: &Order| order.paid));
///
/// let paid = guards.resolve("IsPaid");
/// let unpaid = guards.resolve("!IsPaid");
///
/// let order = Order { paid: true };
/// assert!(paid.is_satisfied(&order));
/// assert!(!unpaid.is_satisfied(&order));
/// ```
pub struct GuardRegistry<E: ?Sized> {
    guards: HashMap<String, Arc<dyn Guard<E>>>,
}

impl<E: ?Sized> GuardRegistry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            guards: HashMap::new(),
        }
    }

    /// Register a guard under a name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, guard: Arc<dyn Guard<E>>) {
        self.guards.insert(name.into(), guard);
    }

    /// Resolve a name token to a guard value.
    ///
    /// Unregistered names resolve to [`NullGuard`], negated or not.
    pub fn resolve(&self, token: &str) -> Arc<dyn Guard<E>>
    where
        E: 'static,
    {
        let (negated, name) = match token.strip_prefix('!') {
            Some(name) => (true, name),
            None => (false, token),
        };

        match self.guards.get(name) {
            Some(guard) if negated => Arc::new(Not::new(Arc::clone(guard))),
            Some(guard) => Arc::clone(guard),
            None => Arc::new(NullGuard),
        }
    }
}

impl<E: ?Sized> Default for GuardRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Name-to-listener registry.
///
/// Unlike guards, listeners have no silent fallback: looking up an
/// unregistered name fails with [`BuildError::ListenerNotFound`].
pub struct ListenerRegistry<E: ?Sized> {
    listeners: HashMap<String, Arc<dyn Listener<E>>>,
}

impl<E: ?Sized> ListenerRegistry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Register a listener under a name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, listener: Arc<dyn Listener<E>>) {
        self.listeners.insert(name.into(), listener);
    }

    /// Look up a listener by name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Listener<E>>, BuildError> {
        self.listeners
            .get(name)
            .map(Arc::clone)
            .ok_or_else(|| BuildError::ListenerNotFound(name.to_string()))
    }
}

impl<E: ?Sized> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
