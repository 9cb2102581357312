//! Runtime orchestration for the tank game client.
//!
//! This crate wires the line protocol, the world-state synchronizers, and the
//! action provider abstraction into one sequential game loop. Consumers embed
//! [`Runtime`] and hand it an input and an output stream.
//!
//! Modules are organized by responsibility:
//! - [`protocol`] reads JSON lines and knows each phase's message shape
//! - [`sync`] runs the handshake/initialization phase and per-turn merges
//! - [`api`] exposes errors and the [`ActionProvider`] trait
//! - [`providers`] ships ready-made decision strategies
//! - [`runtime`] hosts the orchestrator and builder
pub mod api;
pub mod protocol;
pub mod providers;
pub mod runtime;
pub mod sync;

pub use api::{ActionProvider, FnProvider, IdleProvider, Phase, Result, RuntimeError};
pub use protocol::{MessageReader, ReadError};
pub use providers::RandomShooter;
pub use runtime::{RunReport, Runtime, RuntimeBuilder, RuntimeConfig};
pub use sync::{
    InitSummary, TerminationReason, TurnOutcome, TurnSummary, TurnSynchronizer, initialize,
};
