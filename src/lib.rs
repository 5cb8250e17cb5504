//! # boss-rules
//!
//! Rule engine for an asymmetric card game: one boss against three or four
//! subordinates.
//!
//! ## Design Principles
//!
//! 1. **Snapshots In, Snapshots Out**: Every operation takes a `Game` and
//!    returns a new one. The engine holds no game state of its own.
//!
//! 2. **Explicit Randomness**: Dice and shuffles go through a `RandomSource`
//!    passed by the caller. A seeded `GameRng` replays a game exactly.
//!
//! 3. **Typed Rejections**: Illegal requests come back as `Rejection` values
//!    with a displayable message, never as panics.
//!
//! ## Game Turn
//!
//! The boss reveals a dictatorship card, the subordinates may spend a shared
//! nullification on it, each living subordinate takes a turn, the boss takes
//! a turn, and the turn closes. Subordinates win by defeating the boss or by
//! holding out until the turn limit; the boss wins once three subordinates
//! are down.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, RNG, errors, history, the game snapshot
//! - `cards`: Card definitions and the catalog
//! - `zones`: Work deck, dictatorship deck and discard pile
//! - `effects`: Card effect validation and resolution
//! - `rules`: Phase transitions, win check and the `Engine`

pub mod cards;
pub mod core;
pub mod effects;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ActionKind, EndReason, EngineError, Game, GameOutcome, GameRng, GameRngState, Phase, Player,
    PlayerId, RandomSource, Rejection, Role, RulesConfig, Seat, Status, TurnRecord,
};

pub use crate::cards::{catalog, Card, CardCatalog, CardId, CardKind, Category, DictatorshipTarget};

pub use crate::zones::{DeckCounts, DeckManager};

pub use crate::effects::{EffectOutcome, EffectResolver, LifeChange, StateDelta};

pub use crate::rules::{
    DictatorshipDraw, DrawOutcome, Engine, HandDelta, PlayOutcome, RoleAssignment, WinCheck,
};
