//! Core types: players, configuration, RNG, errors, history and the game
//! snapshot.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{ActionKind, TurnRecord};
pub use config::RulesConfig;
pub use error::{EngineError, Rejection};
pub use player::{Player, PlayerId, Role, Seat};
pub use rng::{GameRng, GameRngState, RandomSource};
pub use state::{
    DictatorshipSlot, EndReason, Game, GameOutcome, GameState, NullificationCounters, Phase,
    PresidentSlot, Status,
};
