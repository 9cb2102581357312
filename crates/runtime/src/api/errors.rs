//! Unified error types surfaced by the runtime API.
//!
//! Every variant is fatal. Conditions that merely end the game (the `"END"`
//! sentinel, a closed or garbled stream during turns) are reported through
//! [`TerminationReason`](crate::TerminationReason) instead.
use std::fmt;

use thiserror::Error;

use crate::protocol::ReadError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("could not read {phase} message")]
    Read {
        phase: Phase,
        #[source]
        source: ReadError,
    },

    #[error("malformed {phase} message")]
    Protocol {
        phase: Phase,
        #[source]
        source: game_core::ProtocolError,
    },

    #[error("invalid map geometry")]
    Bounds(#[from] game_core::BoundsError),

    #[error("action provider not set")]
    ProviderNotSet,

    #[error("action provider failed: {0}")]
    Provider(String),

    #[error("failed to encode action")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write action to output stream")]
    Output(#[source] std::io::Error),
}

/// Protocol phase in which a fatal error occurred.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Handshake,
    Initialization,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Handshake => "handshake",
            Phase::Initialization => "initialization",
        };
        write!(f, "{}", label)
    }
}
