//! Engine errors.
//!
//! `Rejection` is the ordinary outcome of an illegal request: the message is
//! meant to be shown to the player who made it. `EngineError` wraps it and
//! adds the one non-recoverable case, a snapshot that breaks its own
//! invariants.

use super::state::Phase;

/// Why a requested action was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("unknown player {0}")]
    UnknownPlayer(String),
    #[error("unknown card {0}")]
    UnknownCard(String),
    #[error("card {0} cannot be played from a hand")]
    NotPlayable(String),
    #[error("card {0} is not in your hand")]
    CardNotInHand(String),
    #[error("this card needs a target")]
    TargetRequired,
    #[error("unknown target {0}")]
    UnknownTarget(String),
    #[error("attacks must target the opposing side")]
    SameSideAttack,
    #[error("recovery can only target your own side")]
    OpposingSideRecovery,
    #[error("a president is already on the board")]
    PresidentAlreadyPlaced,
    #[error("not allowed during the {actual} phase (expected {expected})")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("that action is not allowed during the {0} phase")]
    ActionNotAllowed(Phase),
    #[error("only the boss can do that")]
    BossOnly,
    #[error("only subordinates can do that")]
    SubordinateOnly,
    #[error("no dictatorship card is in play")]
    NoDictatorshipCard,
    #[error("the dictatorship card is already nullified")]
    AlreadyNullified,
    #[error("nullification limit reached ({limit} per game)")]
    NullificationLimitReached { limit: u8 },
    #[error("a dictatorship card was already drawn this turn")]
    DictatorshipAlreadyDrawn,
    #[error("the game is over")]
    GameOver,
    #[error("a game needs {min} to {max} players, got {actual}")]
    InvalidPlayerCount { min: usize, max: usize, actual: usize },
    #[error("player {0} is seated twice")]
    DuplicatePlayer(String),
}

impl Rejection {
    /// Whether the client should prompt for a target and retry.
    #[must_use]
    pub fn needs_target(&self) -> bool {
        matches!(self, Rejection::TargetRequired)
    }
}

/// Error returned by every engine operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error("corrupt game state: {0}")]
    CorruptState(String),
}

impl EngineError {
    /// The rejection, if this is one.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            EngineError::Rejected(r) => Some(r),
            EngineError::CorruptState(_) => None,
        }
    }
}
