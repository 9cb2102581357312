//! Shapes of inbound server messages.
//!
//! Handshake and initialization messages are checked strictly and fail with a
//! [`ProtocolError`] naming the offending path. Turn messages are read
//! leniently: a missing or mistyped field simply contributes nothing.

use game_core::{ProtocolError, TankIdentity};
use serde_json::{Map, Value};

/// Marks the end of the initialization phase.
pub const END_INIT: &str = "END_INIT";

/// Marks the end of the game.
pub const END: &str = "END";

/// True when the message is the bare JSON string `sentinel`.
pub fn is_sentinel(message: &Value, sentinel: &str) -> bool {
    message.as_str() == Some(sentinel)
}

/// Extracts both tank ids from the handshake message.
///
/// Expected shape: `{"message": {"your-tank-id": "...", "enemy-tank-id": "..."}}`.
pub fn parse_handshake(message: &Value) -> Result<TankIdentity, ProtocolError> {
    let body = message
        .get("message")
        .ok_or(ProtocolError::MissingField { path: "message" })?;
    if !body.is_object() {
        return Err(ProtocolError::wrong_type("message", "an object", body));
    }

    let own = string_field(body, "your-tank-id", "message.your-tank-id")?;
    let enemy = string_field(body, "enemy-tank-id", "message.enemy-tank-id")?;

    Ok(TankIdentity::new(own, enemy))
}

/// Takes the `message.updated_objects` map out of an init-phase message.
pub fn init_updates(message: Value) -> Result<Map<String, Value>, ProtocolError> {
    let mut body = take_object(message, "message", "message")?;
    let updates = body
        .remove("updated_objects")
        .ok_or(ProtocolError::MissingField {
            path: "message.updated_objects",
        })?;

    match updates {
        Value::Object(map) => Ok(map),
        other => Err(ProtocolError::wrong_type(
            "message.updated_objects",
            "an object",
            &other,
        )),
    }
}

/// Deletions and upserts carried by one turn message.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TurnUpdate {
    /// Identifiers to remove, in message order.
    pub deleted: Vec<String>,
    /// Entries of `deleted_objects` that were not strings.
    pub skipped_deletions: usize,
    /// Records to upsert after the deletions.
    pub updated: Map<String, Value>,
}

impl TurnUpdate {
    /// Splits a turn message into its deletion list and update map.
    ///
    /// Never fails: anything that does not match the expected shape is dropped.
    pub fn from_message(mut message: Value) -> Self {
        let mut update = Self::default();

        let Some(Value::Object(mut body)) = message.get_mut("message").map(Value::take) else {
            return update;
        };

        if let Some(Value::Array(ids)) = body.remove("deleted_objects") {
            for id in ids {
                match id {
                    Value::String(id) => update.deleted.push(id),
                    _ => update.skipped_deletions += 1,
                }
            }
        }

        if let Some(Value::Object(updated)) = body.remove("updated_objects") {
            update.updated = updated;
        }

        update
    }

    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.updated.is_empty()
    }
}

fn string_field<'a>(
    parent: &'a Value,
    key: &str,
    path: &'static str,
) -> Result<&'a str, ProtocolError> {
    let field = parent
        .get(key)
        .ok_or(ProtocolError::MissingField { path })?;
    field
        .as_str()
        .ok_or_else(|| ProtocolError::wrong_type(path, "a string", field))
}

fn take_object(
    mut parent: Value,
    key: &str,
    path: &'static str,
) -> Result<Map<String, Value>, ProtocolError> {
    let field = parent
        .get_mut(key)
        .map(Value::take)
        .ok_or(ProtocolError::MissingField { path })?;

    match field {
        Value::Object(map) => Ok(map),
        other => Err(ProtocolError::wrong_type(path, "an object", &other)),
    }
}
