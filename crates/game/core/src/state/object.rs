//! Object records mirrored from the server.
//!
//! A record is kept as the raw JSON value the server sent. Only the `type`
//! tag and, for boundaries, the `position` corners are ever interpreted here;
//! every other field is carried through untouched so newer servers can add
//! fields without breaking the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-assigned object identifier (opaque string).
pub type ObjectId = String;

/// Kind of simulated entity, as encoded by the `type` field.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ObjectKind {
    Tank = 1,
    Bullet = 2,
    Wall = 3,
    DestructibleWall = 4,
    Boundary = 5,
    ClosingBoundary = 6,
    Powerup = 7,
}

impl ObjectKind {
    /// Wire tag for this kind.
    pub const fn tag(self) -> i64 {
        self as i64
    }

    /// Maps a wire tag to a kind; unknown tags yield `None`.
    pub const fn from_tag(tag: i64) -> Option<Self> {
        match tag {
            1 => Some(Self::Tank),
            2 => Some(Self::Bullet),
            3 => Some(Self::Wall),
            4 => Some(Self::DestructibleWall),
            5 => Some(Self::Boundary),
            6 => Some(Self::ClosingBoundary),
            7 => Some(Self::Powerup),
            _ => None,
        }
    }
}

impl TryFrom<i64> for ObjectKind {
    type Error = i64;

    fn try_from(tag: i64) -> Result<Self, Self::Error> {
        Self::from_tag(tag).ok_or(tag)
    }
}

/// Latest server version of one object.
///
/// Records have value semantics: the table owns them outright and an update
/// replaces the whole record, never individual fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectRecord(Value);

impl ObjectRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Integer `type` tag, if present.
    ///
    /// Integral floats (`5.0`) are accepted since some encoders emit them.
    pub fn type_tag(&self) -> Option<i64> {
        let tag = self.0.get("type")?;
        tag.as_i64().or_else(|| {
            tag.as_f64()
                .filter(|value| value.fract() == 0.0)
                .map(|value| value as i64)
        })
    }

    /// Decoded kind, or `None` when the tag is missing or unknown.
    pub fn kind(&self) -> Option<ObjectKind> {
        self.type_tag().and_then(ObjectKind::from_tag)
    }

    pub fn is(&self, kind: ObjectKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Raw `position` field. Its shape depends on the object kind.
    pub fn position(&self) -> Option<&Value> {
        self.field("position")
    }

    /// Any other field, uninterpreted.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ObjectRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
