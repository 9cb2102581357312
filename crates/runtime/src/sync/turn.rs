//! Per-turn synchronization.
//!
//! Each call consumes exactly one message. The `"END"` sentinel, a closed
//! stream, or an unparsable line all end the game gracefully; anything else is
//! merged into the world as deletions followed by upserts.

use std::fmt;

use game_core::WorldState;
use serde_json::Value;
use tokio::io::AsyncBufRead;
use tracing::{debug, warn};

use crate::protocol::{END, MessageReader, ReadError, TurnUpdate, is_sentinel};

/// Why the turn loop stopped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The server sent `"END"`.
    Sentinel,
    /// End of input or an I/O failure.
    StreamClosed,
    /// A turn line was not valid JSON.
    Malformed,
    /// The configured turn limit was reached.
    TurnLimit,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TerminationReason::Sentinel => "end sentinel received",
            TerminationReason::StreamClosed => "input stream closed",
            TerminationReason::Malformed => "unparsable turn message",
            TerminationReason::TurnLimit => "turn limit reached",
        };
        write!(f, "{}", label)
    }
}

/// Effect of one merged turn on the object table.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TurnSummary {
    /// 1-based index of this turn.
    pub turn: u64,
    pub removed: usize,
    /// Deleted ids that were not in the table.
    pub missing: usize,
    /// Non-string entries in `deleted_objects`.
    pub skipped: usize,
    pub created: usize,
    pub replaced: usize,
}

/// Result of one synchronizer call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue(TurnSummary),
    Terminated(TerminationReason),
}

impl TurnOutcome {
    pub fn is_continue(&self) -> bool {
        matches!(self, TurnOutcome::Continue(_))
    }
}

/// Applies turn messages to the world, one per call.
#[derive(Debug, Default)]
pub struct TurnSynchronizer {
    turns: u64,
}

impl TurnSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns merged so far.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Reads the next message and merges it into `world`.
    ///
    /// The message is owned for the duration of this call only and is
    /// dropped before it returns.
    pub async fn next_turn<R>(
        &mut self,
        reader: &mut MessageReader<R>,
        world: &mut WorldState,
    ) -> TurnOutcome
    where
        R: AsyncBufRead + Unpin,
    {
        let message = match reader.next_message().await {
            Ok(message) => message,
            Err(ReadError::Parse { line, .. }) => {
                warn!(line, "ending game on unparsable turn message");
                return TurnOutcome::Terminated(TerminationReason::Malformed);
            }
            Err(err) => {
                debug!(error = %err, "ending game on stream read failure");
                return TurnOutcome::Terminated(TerminationReason::StreamClosed);
            }
        };

        if is_sentinel(&message, END) {
            return TurnOutcome::Terminated(TerminationReason::Sentinel);
        }

        TurnOutcome::Continue(self.apply(message, world))
    }

    /// Merges one already-parsed turn message.
    ///
    /// Deletions are applied strictly before updates, so an id that appears
    /// in both ends up present.
    pub fn apply(&mut self, message: Value, world: &mut WorldState) -> TurnSummary {
        let update = TurnUpdate::from_message(message);

        let removal = world.remove_all(update.deleted.iter().map(String::as_str));
        let merge = world.merge_updates(update.updated);
        self.turns += 1;

        let summary = TurnSummary {
            turn: self.turns,
            removed: removal.removed,
            missing: removal.missing,
            skipped: update.skipped_deletions,
            created: merge.created,
            replaced: merge.replaced,
        };

        if summary.skipped > 0 {
            warn!(
                turn = summary.turn,
                skipped = summary.skipped,
                "ignored non-string ids in deleted_objects"
            );
        }
        debug!(
            turn = summary.turn,
            removed = summary.removed,
            missing = summary.missing,
            created = summary.created,
            replaced = summary.replaced,
            objects = world.len(),
            "turn merged"
        );

        summary
    }
}
