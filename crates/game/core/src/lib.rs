//! Client-side world model for the tank game.
//!
//! `game-core` defines the local mirror of the server's world: the object
//! table keyed by server identifier, the derived map bounds, and the action
//! vocabulary sent back each turn. It performs no I/O; the runtime crate parses
//! messages and drives every mutation through [`WorldState`].
pub mod action;
pub mod error;
pub mod state;

pub use action::Action;
pub use error::{BoundsError, ProtocolError};
pub use state::{
    MapBounds, MergeCount, ObjectId, ObjectKind, ObjectRecord, RemovalCount, TankIdentity,
    WorldState,
};
