//! Declarative machine configuration.
//!
//! The structures here mirror the configuration shape consumed by
//! [`FsmFactory`](crate::builder::FsmFactory):
//!
//! ```json
//! {
//!     "Document": {
//!         "states": {
//!             "init": { "type": "regular" },
//!             "created": { "type": "regular" }
//!         },
//!         "transitions": [
//!             { "from": "init", "to": "created" },
//!             {
//!                 "from": "created",
//!                 "to": "done",
//!                 "signal": "finish",
//!                 "guards": ["IsValid", "!IsLocked"],
//!                 "before": ["Echo"],
//!                 "after": ["Echo"]
//!             }
//!         ]
//!     }
//! }
//! ```
//!
//! Required sections and fields are modeled as `Option` so their absence
//! surfaces as a distinct [`BuildError`](crate::builder::BuildError)
//! variant at build time rather than a serde error at parse time.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Top-level configuration: machine definitions keyed by a
/// caller-supplied name.
///
/// The key is whatever the caller passes to
/// [`FsmFactory::get_fsm`](crate::builder::FsmFactory::get_fsm); the
/// engine attaches no meaning to it beyond the lookup.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Config {
    definitions: HashMap<String, MachineConfig>,
}

impl Config {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a configuration from an in-memory JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Look up a machine definition by key.
    pub fn definition(&self, key: &str) -> Option<&MachineConfig> {
        self.definitions.get(key)
    }

    /// Add a definition under a key, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, definition: MachineConfig) {
        self.definitions.insert(key.into(), definition);
    }
}

/// One machine definition: its states and its ordered transitions.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MachineConfig {
    /// Declared states by name. Required; absence is a build error.
    pub states: Option<HashMap<String, StateConfig>>,
    /// Transitions in declaration order. Required; absence is a build
    /// error. Order decides which transition wins when several match.
    pub transitions: Option<Vec<TransitionConfig>>,
}

/// Declaration of one state.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StateConfig {
    /// Declared kind; absent means regular.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Declaration of one transition.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TransitionConfig {
    /// Source state name. Required; absence is a build error.
    pub from: Option<String>,
    /// Destination state name. Required; absence is a build error.
    pub to: Option<String>,
    /// Triggering signal; absent declares a free transition.
    pub signal: Option<String>,
    /// Guard name tokens, in evaluation order. A leading `!` negates.
    #[serde(default)]
    pub guards: Vec<String>,
    /// Before-listener names, in invocation order.
    #[serde(default)]
    pub before: Vec<String>,
    /// After-listener names, in invocation order.
    #[serde(default)]
    pub after: Vec<String>,
}
