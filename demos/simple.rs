//! Simple document workflow driven from JSON configuration.
//!
//! Run with: `cargo run --example simple`

use std::sync::Arc;
use turnstile::builder::{Config, FsmFactory, GuardRegistry, ListenerRegistry};
use turnstile::core::{Event, ListenerError, State, Stateful};

struct Document {
    state: State,
    is_valid: bool,
}

impl Stateful for Document {
    fn state(&self) -> &State {
        &self.state
    }

    fn set_state(&mut self, state: State) {
        self.state = state;
    }
}

fn echo(_doc: &mut Document, event: &Event) -> Result<(), ListenerError> {
    println!(
        "transition from \"{}\" to \"{}\" by \"{}\" (params: {:?})",
        event.state_from,
        event.state_to,
        event.signal.as_deref().unwrap_or("-"),
        event.params,
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_json(
        r#"{
            "Document": {
                "states": {
                    "init": { "type": "regular" },
                    "created": { "type": "regular" },
                    "valid": { "type": "regular" },
                    "invalid": { "type": "regular" },
                    "finish": { "type": "regular" }
                },
                "transitions": [
                    { "from": "init", "to": "created" },
                    { "from": "created", "to": "valid", "guards": ["IsValid"] },
                    { "from": "created", "to": "invalid", "guards": ["!IsValid"] },
                    {
                        "from": "valid",
                        "to": "finish",
                        "signal": "finish",
                        "before": ["Echo"],
                        "after": ["Echo"]
                    }
                ]
            }
        }"#,
    )?;

    let mut guards = GuardRegistry::new();
    guards.register("IsValid", Arc::new(|doc: &Document| doc.is_valid));

    let mut listeners = ListenerRegistry::new();
    listeners.register("Echo", Arc::new(echo));

    let factory = FsmFactory::new(config, guards, listeners);
    let fsm = factory.get_fsm("Document")?;

    let mut doc = Document {
        state: State::new("init"),
        is_valid: true,
    };

    println!("{}", doc.state());
    fsm.refresh(&mut doc)?;
    println!("{}", doc.state());

    println!(
        "is \"finish\" signal possible? {}",
        fsm.is_signal(&mut doc, "finish")?
    );

    let mut params = turnstile::core::Params::new();
    params.insert("tests".into(), "tests".into());
    fsm.signal(&mut doc, "finish", Some(params))?;
    println!("{}", doc.state());

    Ok(())
}
