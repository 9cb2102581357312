//! High-level runtime orchestrator.
//!
//! The runtime composes the protocol pieces into the client's main loop:
//! initialize once, then repeatedly synchronize a turn, ask the action
//! provider for a decision, and emit it as one JSON line. Reads, decisions,
//! and writes are awaited strictly in order, so the world is never observed
//! mid-merge.

use game_core::{Action, WorldState};
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::api::{ActionProvider, Result, RuntimeError};
use crate::protocol::MessageReader;
use crate::sync::{InitSummary, TerminationReason, TurnOutcome, TurnSynchronizer, initialize};

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Stop after this many turns even if the server keeps going.
    pub turn_limit: Option<u64>,
    /// Flush the output after every action line (default: true).
    pub flush_each_turn: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            turn_limit: None,
            flush_each_turn: true,
        }
    }
}

/// How a completed game went.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub init: InitSummary,
    /// Turns that were merged and answered.
    pub turns: u64,
    pub reason: TerminationReason,
    /// World as of the last merged turn.
    pub world: WorldState,
}

/// Main runtime that drives one game over a pair of streams.
pub struct Runtime {
    config: RuntimeConfig,
    provider: Option<Box<dyn ActionProvider>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Set the action provider
    pub fn set_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.provider = Some(Box::new(provider));
    }

    /// Play one full game.
    ///
    /// Returns once the game ends gracefully (sentinel, closed or garbled
    /// stream during turns, or the turn limit).
    ///
    /// # Errors
    ///
    /// - any handshake/initialization failure
    /// - `ProviderNotSet` if no action provider was configured
    /// - provider, encoding, or output write failures during turns
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<RunReport>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let provider = self.provider.as_mut().ok_or(RuntimeError::ProviderNotSet)?;

        let mut reader = MessageReader::new(input);
        let (mut world, init) = initialize(&mut reader).await?;

        let mut sync = TurnSynchronizer::new();
        let reason = loop {
            if self
                .config
                .turn_limit
                .is_some_and(|limit| sync.turns() >= limit)
            {
                break TerminationReason::TurnLimit;
            }

            match sync.next_turn(&mut reader, &mut world).await {
                TurnOutcome::Continue(summary) => {
                    let action = provider.provide_action(&world).await?;
                    emit(&mut output, &action, self.config.flush_each_turn).await?;
                    debug!(turn = summary.turn, ?action, "action sent");
                }
                TurnOutcome::Terminated(reason) => break reason,
            }
        };

        output.flush().await.map_err(RuntimeError::Output)?;
        info!(turns = sync.turns(), %reason, "game over");

        Ok(RunReport {
            init,
            turns: sync.turns(),
            reason,
            world,
        })
    }
}

/// Writes one action as a compact JSON line.
async fn emit<W>(output: &mut W, action: &Action, flush: bool) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = action.to_line().map_err(RuntimeError::Encode)?;
    line.push('\n');

    output
        .write_all(line.as_bytes())
        .await
        .map_err(RuntimeError::Output)?;
    if flush {
        output.flush().await.map_err(RuntimeError::Output)?;
    }
    Ok(())
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    provider: Option<Box<dyn ActionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the action provider (required before [`Runtime::run`])
    pub fn provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Stop after `limit` answered turns
    pub fn turn_limit(mut self, limit: u64) -> Self {
        self.config.turn_limit = Some(limit);
        self
    }

    pub fn flush_each_turn(mut self, flush: bool) -> Self {
        self.config.flush_each_turn = flush;
        self
    }

    pub fn build(self) -> Runtime {
        Runtime {
            config: self.config,
            provider: self.provider,
        }
    }
}
