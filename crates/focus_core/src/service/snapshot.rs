//! Persisted layout of a task collection.
//!
//! One record holds `{"state":{"tasks":[..]},"version":0}`.
//!
//! # Invariants
//! - A broken envelope fails the whole decode; callers decide how to degrade.
//! - Inside a valid envelope each task decodes on its own. An invalid
//!   optional field is dropped from its task; a task that still fails is
//!   dropped. Neither takes the rest of the list with it.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SNAPSHOT_VERSION: u32 = 0;

const OPTIONAL_FIELDS: [&str; 3] = ["dueDate", "priority", "source"];

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: StateRef<'a>,
    version: u32,
}

#[derive(Serialize)]
struct StateRef<'a> {
    tasks: &'a [Task],
}

#[derive(Deserialize)]
struct Envelope {
    state: State,
}

#[derive(Deserialize)]
struct State {
    #[serde(default)]
    tasks: Vec<Value>,
}

/// Tasks recovered from one record plus what had to be thrown away.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DecodedTasks {
    pub tasks: Vec<Task>,
    pub dropped_tasks: usize,
    pub dropped_fields: usize,
}

impl DecodedTasks {
    pub fn is_lossless(&self) -> bool {
        self.dropped_tasks == 0 && self.dropped_fields == 0
    }
}

pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        state: StateRef { tasks },
        version: SNAPSHOT_VERSION,
    })
}

pub fn decode_tasks(raw: &str) -> Result<DecodedTasks, serde_json::Error> {
    let envelope: Envelope = serde_json::from_str(raw)?;
    let mut decoded = DecodedTasks::default();
    for value in envelope.state.tasks {
        match decode_task(value, &mut decoded.dropped_fields) {
            Some(task) => decoded.tasks.push(task),
            None => decoded.dropped_tasks += 1,
        }
    }
    Ok(decoded)
}

fn decode_task(value: Value, dropped_fields: &mut usize) -> Option<Task> {
    let Value::Object(mut fields) = value else {
        return None;
    };
    if let Ok(task) = serde_json::from_value(Value::Object(fields.clone())) {
        return Some(task);
    }

    for name in OPTIONAL_FIELDS {
        let invalid = fields
            .get(name)
            .is_some_and(|field| !optional_field_is_valid(name, field));
        if invalid {
            fields.remove(name);
            *dropped_fields += 1;
        }
    }
    serde_json::from_value(Value::Object(fields)).ok()
}

// Checks one optional field against a minimal task so that only the broken
// field is blamed.
fn optional_field_is_valid(name: &str, field: &Value) -> bool {
    let mut minimal = Map::new();
    minimal.insert("id".to_string(), Value::from("_"));
    minimal.insert("text".to_string(), Value::from(""));
    minimal.insert("completed".to_string(), Value::from(false));
    minimal.insert(name.to_string(), field.clone());
    serde_json::from_value::<Task>(Value::Object(minimal)).is_ok()
}
