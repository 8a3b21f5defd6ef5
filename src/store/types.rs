use crate::env::actions;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A dispatched action: a `type` tag plus free-form payload fields.
///
/// Serializes to the flat JSON shape used by Redux-style stores, e.g.
/// `{"type": "LOAD_STORED_STATE", "storedState": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Action {
    /// Create an action with the given type and no payload
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: Map::new(),
        }
    }

    /// Attach a payload field
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.payload.insert(key.into(), value);
        self
    }

    /// Look up a payload field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Check the action type
    pub fn is(&self, action_type: &str) -> bool {
        self.action_type == action_type
    }

    /// Hydration action emitted by the default `on_load` callback
    pub fn load_stored_state(stored_state: Value) -> Self {
        Self::new(actions::LOAD_STORED_STATE).with_field(actions::STORED_STATE_FIELD, stored_state)
    }

    /// Action recognised by the default `clear_storage` predicate
    pub fn clear_stored_state() -> Self {
        Self::new(actions::CLEAR_STORED_STATE)
    }

    /// Flat JSON representation of the action
    pub fn to_value(&self) -> Value {
        let mut object = self.payload.clone();
        object.insert("type".to_string(), Value::String(self.action_type.clone()));
        Value::Object(object)
    }
}
