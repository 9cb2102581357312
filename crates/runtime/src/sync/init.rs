//! Handshake and initialization phase.
//!
//! Produces a fully populated [`WorldState`] before any turn is processed:
//!
//! 1. read the handshake and record both tank ids
//! 2. merge `updated_objects` batches until the `"END_INIT"` sentinel
//! 3. derive the map bounds from the complete boundary set
//!
//! Every failure in this phase is fatal: without a consistent initial world
//! the game cannot be played.

use game_core::{MapBounds, WorldState};
use tokio::io::AsyncBufRead;
use tracing::{debug, info};

use crate::api::{Phase, Result, RuntimeError};
use crate::protocol::{END_INIT, MessageReader, init_updates, is_sentinel, parse_handshake};

/// What the initialization phase ingested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitSummary {
    /// Non-sentinel init messages merged.
    pub batches: usize,
    /// Objects in the table once the sentinel arrived.
    pub objects: usize,
    pub bounds: MapBounds,
}

/// Runs the handshake and init merge loop, returning the initial world.
///
/// # Errors
///
/// - `Read` if the stream closes or a line is not valid JSON
/// - `Protocol` if a message lacks a required field or has the wrong shape
/// - `Bounds` if a boundary object's geometry is malformed
pub async fn initialize<R>(reader: &mut MessageReader<R>) -> Result<(WorldState, InitSummary)>
where
    R: AsyncBufRead + Unpin,
{
    let handshake = reader
        .next_message()
        .await
        .map_err(|source| RuntimeError::Read {
            phase: Phase::Handshake,
            source,
        })?;
    let identity = parse_handshake(&handshake).map_err(|source| RuntimeError::Protocol {
        phase: Phase::Handshake,
        source,
    })?;

    info!(own = %identity.own, enemy = %identity.enemy, "handshake complete");

    let mut world = WorldState::new(identity);
    let mut batches = 0;

    loop {
        let message = reader
            .next_message()
            .await
            .map_err(|source| RuntimeError::Read {
                phase: Phase::Initialization,
                source,
            })?;

        if is_sentinel(&message, END_INIT) {
            break;
        }

        let updates = init_updates(message).map_err(|source| RuntimeError::Protocol {
            phase: Phase::Initialization,
            source,
        })?;
        let merged = world.merge_updates(updates);
        batches += 1;

        debug!(
            batch = batches,
            created = merged.created,
            replaced = merged.replaced,
            "merged init batch"
        );
    }

    let bounds = world.derive_bounds()?;

    info!(
        batches,
        objects = world.len(),
        width = bounds.width,
        height = bounds.height,
        "world initialized"
    );

    let summary = InitSummary {
        batches,
        objects: world.len(),
        bounds,
    };
    Ok((world, summary))
}
