//! Per-turn response sent back to the server.
//!
//! An action is one compact JSON object. Each field is an independent
//! command; unset fields are omitted, so the idle action is `{}`.
//!
//! ```text
//! {"shoot": 123}
//! {"move": 90, "shoot": 270}
//! {"path": [120.0, 45.5]}
//! ```

use serde::{Deserialize, Serialize};

/// Full circle in whole degrees. Angles are normalized into `0..DEGREES`.
pub const DEGREES: u16 = 360;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Fire a bullet at this angle (degrees).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoot: Option<u16>,

    /// Drive the tank at this angle (degrees).
    #[serde(rename = "move", default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<u16>,

    /// Let the server path-find toward this map coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<[f64; 2]>,
}

impl Action {
    /// Does nothing this turn.
    pub const fn idle() -> Self {
        Self {
            shoot: None,
            movement: None,
            path: None,
        }
    }

    pub fn shoot(angle: u16) -> Self {
        Self::idle().with_shoot(angle)
    }

    #[must_use]
    pub fn with_shoot(mut self, angle: u16) -> Self {
        self.shoot = Some(angle % DEGREES);
        self
    }

    #[must_use]
    pub fn with_move(mut self, angle: u16) -> Self {
        self.movement = Some(angle % DEGREES);
        self
    }

    #[must_use]
    pub fn with_path(mut self, x: f64, y: f64) -> Self {
        self.path = Some([x, y]);
        self
    }

    pub fn is_idle(&self) -> bool {
        self.shoot.is_none() && self.movement.is_none() && self.path.is_none()
    }

    /// Compact single-line JSON encoding, without the trailing newline.
    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
