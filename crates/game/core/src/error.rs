//! Common error infrastructure for dice-core.
//!
//! Combat hooks never fail: a missing collaborator is a silent skip, not an
//! error. The errors here cover the two places where a caller hands the core
//! something malformed: authoring a template and addressing the board.

use crate::state::{DiceId, Position};

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with a different request.
    ///
    /// Examples: cell already occupied, dice already sold
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: template with zero sides, negative fire interval
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all dice-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Authoring mistakes detected by [`crate::DiceTemplate::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TemplateError {
    #[error("template `{id}` has zero sides")]
    ZeroSides { id: String },

    #[error("template `{id}` has non-positive fire interval {interval}")]
    NonPositiveFireInterval { id: String, interval: f32 },

    #[error("template `{id}` has max upgrade level 0")]
    ZeroMaxUpgradeLevel { id: String },

    #[error("template `{id}` has crit chance {chance} outside [0, 1]")]
    CritChanceOutOfRange { id: String, chance: f32 },

    #[error("template `{id}` has negative {field}")]
    Negative { id: String, field: &'static str },
}

impl GameError for TemplateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroSides { .. } => "TEMPLATE_ZERO_SIDES",
            Self::NonPositiveFireInterval { .. } => "TEMPLATE_FIRE_INTERVAL",
            Self::ZeroMaxUpgradeLevel { .. } => "TEMPLATE_MAX_LEVEL",
            Self::CritChanceOutOfRange { .. } => "TEMPLATE_CRIT_CHANCE",
            Self::Negative { .. } => "TEMPLATE_NEGATIVE",
        }
    }
}

/// Errors raised when the placement collaborator addresses the board.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BoardError {
    #[error("dice {0} is not on the board")]
    UnknownDice(DiceId),

    #[error("cell {0} is already occupied by dice {1}")]
    CellOccupied(Position, DiceId),

    #[error("cannot merge dice {0} into itself")]
    SelfMerge(DiceId),

    #[error(transparent)]
    InvalidTemplate(#[from] TemplateError),
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownDice(_) | Self::CellOccupied(..) => ErrorSeverity::Recoverable,
            Self::SelfMerge(_) => ErrorSeverity::Internal,
            Self::InvalidTemplate(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownDice(_) => "BOARD_UNKNOWN_DICE",
            Self::CellOccupied(..) => "BOARD_CELL_OCCUPIED",
            Self::SelfMerge(_) => "BOARD_SELF_MERGE",
            Self::InvalidTemplate(e) => e.error_code(),
        }
    }
}
