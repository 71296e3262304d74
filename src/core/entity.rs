//! The driven-entity capability.

use super::state::State;

/// Capability exposed by any entity a state machine can drive.
///
/// The engine never constructs, copies, or destroys the entity; it only
/// reads the current state and overwrites it when a transition executes.
/// Ownership stays with the caller, and so does serialization across
/// restarts, concurrency control, and anything else about the entity's
/// life outside a driving call.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{State, Stateful};
///
/// struct Document {
///     state: State,
///     is_valid: bool,
/// }
///
/// impl Stateful for Document {
///     fn state(&self) -> &State {
///         &self.state
///     }
///
///     fn set_state(&mut self, state: State) {
///         self.state = state;
///     }
/// }
/// ```
pub trait Stateful {
    /// Get the entity's current state.
    fn state(&self) -> &State;

    /// Overwrite the entity's current state.
    fn set_state(&mut self, state: State);
}
