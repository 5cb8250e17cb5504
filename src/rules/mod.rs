//! Game rules: the phase state machine, the win check and the engine that
//! exposes every client operation.

pub mod engine;
pub mod phase;
pub mod victory;

pub use engine::{DictatorshipDraw, DrawOutcome, Engine, HandDelta, PlayOutcome, RoleAssignment};
pub use victory::{check as check_victory, WinCheck};
