//! Errors surfaced by the world

use thiserror::Error;

use super::tick::TickOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimError {
    /// `tick` before `init` (or after `teardown`)
    #[error("world has no running level; call init first")]
    NotInitialized,
    /// `tick` after the level already ended
    #[error("level already ended with {outcome:?}; call init to start another")]
    LevelOver { outcome: TickOutcome },
}
