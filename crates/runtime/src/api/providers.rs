//! Asynchronous abstraction for choosing each turn's action.
//!
//! Runtime users plug in [`ActionProvider`] implementations so the client can
//! run a scripted fixture, a random policy, or a real strategy without the
//! synchronization core knowing anything about it.
use async_trait::async_trait;
use game_core::{Action, WorldState};

use super::errors::Result;

/// Trait for providing an action based on the current world.
///
/// Called exactly once per continuing turn, after the turn's merge is
/// complete. The state reference is only valid for that turn; the table is
/// mutated again before the next call.
#[async_trait]
pub trait ActionProvider: Send {
    /// Provide this turn's action.
    ///
    /// # Arguments
    /// * `state` - Read-only view of the synchronized world
    ///
    /// # Returns
    /// The action to emit, or an error if none can be determined
    async fn provide_action(&mut self, state: &WorldState) -> Result<Action>;
}

/// A provider that never acts. Emits `{}` every turn.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdleProvider;

#[async_trait]
impl ActionProvider for IdleProvider {
    async fn provide_action(&mut self, _state: &WorldState) -> Result<Action> {
        Ok(Action::idle())
    }
}

/// Adapts a synchronous closure into a provider.
///
/// Handy for tests and small scripted bots.
pub struct FnProvider<F>(pub F);

#[async_trait]
impl<F> ActionProvider for FnProvider<F>
where
    F: FnMut(&WorldState) -> Action + Send,
{
    async fn provide_action(&mut self, state: &WorldState) -> Result<Action> {
        Ok((self.0)(state))
    }
}

#[async_trait]
impl<P> ActionProvider for Box<P>
where
    P: ActionProvider + ?Sized,
{
    async fn provide_action(&mut self, state: &WorldState) -> Result<Action> {
        (**self).provide_action(state).await
    }
}
