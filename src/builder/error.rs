//! Build errors for the configuration layer.

use thiserror::Error;

/// Errors raised while building a state machine from configuration.
///
/// All of them are fatal to construction: the factory never yields a
/// partially built machine, and none of these can occur once a machine
/// has been handed to the caller.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("machine definition '{0}' is not found in config")]
    DefinitionNotFound(String),

    #[error("definition '{definition}' has no '{section}' section")]
    MissingSection {
        definition: String,
        section: &'static str,
    },

    #[error("state '{0}' is not declared in the states section")]
    StateNotFound(String),

    #[error("unknown kind '{kind}' for state '{state}'")]
    InvalidStateKind { state: String, kind: String },

    #[error("listener '{0}' is not registered")]
    ListenerNotFound(String),

    #[error("transition config has no '{field}' state")]
    InvalidTransition { field: &'static str },

    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}
