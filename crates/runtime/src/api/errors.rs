//! Unified error types surfaced by the runtime API.
//!
//! Wraps worker coordination failures and board rejections so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use dice_core::{BoardError, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("combat worker command channel closed")]
    CommandChannelClosed,

    #[error("combat worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("combat worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("template `{0}` is not in the runtime catalog")]
    UnknownTemplate(String),

    #[error("dice {consumed} cannot be merged into dice {survivor}")]
    IncompatibleMerge {
        consumed: dice_core::DiceId,
        survivor: dice_core::DiceId,
    },

    #[error("frame interval must be non-zero")]
    ZeroFrameInterval,

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl RuntimeError {
    /// Whether the caller can retry with different input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::UnknownTemplate(_) | Self::IncompatibleMerge { .. } => true,
            Self::Board(e) => e.severity().is_recoverable(),
            _ => false,
        }
    }
}
