//! Factory assembling machines from configuration.

use crate::builder::config::{Config, MachineConfig, StateConfig, TransitionConfig};
use crate::builder::error::BuildError;
use crate::builder::registry::{GuardRegistry, ListenerRegistry};
use crate::core::{Fsm, State, StateKind, Stateful, Transition, TransitionTable};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Builds [`Fsm`] values from a declarative [`Config`] plus guard and
/// listener registries.
///
/// All name resolution happens here, eagerly: states are validated,
/// guard tokens (including `!` negation) become guard values, and
/// listener names become listener values before a machine is returned.
/// Every configuration error is fatal and surfaces at build time; the
/// returned machine raises no configuration errors while driving.
///
/// # Example
///
/// ```rust
/// use turnstile::builder::{Config, FsmFactory, GuardRegistry, ListenerRegistry};
/// use turnstile::core::{State, Stateful};
///
/// struct Light {
///     state: State,
/// }
///
/// impl Stateful for Light {
///     fn state(&self) -> &State {
///         &self.state
///     }
///
///     fn set_state(&mut self, state: State) {
///         self.state = state;
///     }
/// }
///
/// let config = Config::from_json(r#"{
///     "Light": {
///         "states": { "red": {}, "green": {} },
///         "transitions": [
///             { "from": "red", "to": "green", "signal": "go" }
///         ]
///     }
/// }"#).unwrap();
///
/// let factory = FsmFactory::new(config, GuardRegistry::new(), ListenerRegistry::new());
/// let fsm = factory.get_fsm("Light").unwrap();
///
/// let mut light = Light { state: State::new("red") };
/// fsm.signal(&mut light, "go", None).unwrap();
/// assert_eq!(light.state().name(), "green");
/// ```
pub struct FsmFactory<E: ?Sized> {
    config: Config,
    guards: GuardRegistry<E>,
    listeners: ListenerRegistry<E>,
}

impl<E: Stateful + ?Sized + 'static> FsmFactory<E> {
    /// Create a factory over a configuration and registries.
    pub fn new(config: Config, guards: GuardRegistry<E>, listeners: ListenerRegistry<E>) -> Self {
        Self {
            config,
            guards,
            listeners,
        }
    }

    /// Build the machine defined under `key`.
    ///
    /// Each call assembles a fresh machine; the factory can be reused
    /// for any number of keys and calls.
    pub fn get_fsm(&self, key: &str) -> Result<Fsm<E>, BuildError> {
        let definition = self
            .config
            .definition(key)
            .ok_or_else(|| BuildError::DefinitionNotFound(key.to_string()))?;

        let table = self.build_table(key, definition)?;
        debug!(fsm = key, transitions = table.len(), "built state machine");

        Ok(Fsm::new(key, Arc::new(table)))
    }

    fn build_table(
        &self,
        key: &str,
        definition: &MachineConfig,
    ) -> Result<TransitionTable<E>, BuildError> {
        let states_config = definition
            .states
            .as_ref()
            .ok_or_else(|| BuildError::MissingSection {
                definition: key.to_string(),
                section: "states",
            })?;
        let transitions_config = definition
            .transitions
            .as_ref()
            .ok_or_else(|| BuildError::MissingSection {
                definition: key.to_string(),
                section: "transitions",
            })?;

        let states = build_states(states_config)?;

        let transitions = transitions_config
            .iter()
            .map(|config| self.build_transition(&states, config))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TransitionTable::new(transitions))
    }

    fn build_transition(
        &self,
        states: &HashMap<String, State>,
        config: &TransitionConfig,
    ) -> Result<Transition<E>, BuildError> {
        let from = config
            .from
            .as_deref()
            .ok_or(BuildError::InvalidTransition { field: "from" })?;
        let to = config
            .to
            .as_deref()
            .ok_or(BuildError::InvalidTransition { field: "to" })?;

        let state_from = lookup_state(states, from)?;
        let state_to = lookup_state(states, to)?;

        let guards = config
            .guards
            .iter()
            .map(|token| self.guards.resolve(token))
            .collect();

        let before = config
            .before
            .iter()
            .map(|name| self.listeners.get(name))
            .collect::<Result<Vec<_>, _>>()?;
        let after = config
            .after
            .iter()
            .map(|name| self.listeners.get(name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Transition {
            state_from,
            state_to,
            signal: config.signal.clone(),
            guards,
            before,
            after,
        })
    }
}

fn build_states(config: &HashMap<String, StateConfig>) -> Result<HashMap<String, State>, BuildError> {
    config
        .iter()
        .map(|(name, state_config)| {
            let kind = parse_kind(name, state_config)?;
            Ok((name.clone(), State::with_kind(name.clone(), kind)))
        })
        .collect()
}

fn parse_kind(name: &str, config: &StateConfig) -> Result<StateKind, BuildError> {
    match config.kind.as_deref() {
        None | Some("regular") => Ok(StateKind::Regular),
        Some(kind) => Err(BuildError::InvalidStateKind {
            state: name.to_string(),
            kind: kind.to_string(),
        }),
    }
}

fn lookup_state(states: &HashMap<String, State>, name: &str) -> Result<State, BuildError> {
    states
        .get(name)
        .cloned()
        .ok_or_else(|| BuildError::StateNotFound(name.to_string()))
}
