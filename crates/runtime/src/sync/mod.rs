//! State synchronization with the server.
//!
//! [`initialize`] runs once and builds the world; [`TurnSynchronizer`] then
//! applies one turn message per call until the game ends.
pub mod init;
pub mod turn;

pub use init::{InitSummary, initialize};
pub use turn::{TerminationReason, TurnOutcome, TurnSummary, TurnSynchronizer};
