//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the synchronization layers can stay focused on the protocol.

pub mod errors;
pub mod providers;

pub use errors::{Phase, Result, RuntimeError};
pub use providers::{ActionProvider, FnProvider, IdleProvider};
