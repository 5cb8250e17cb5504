//! Card effects.
//!
//! - `EffectResolver`: validates a play and computes what it does
//! - `EffectOutcome`: the computed life and board changes, applied to a
//!   snapshot with `commit`
//!
//! Resolution and application are separate steps, so a caller can inspect
//! or log an outcome before it lands.

mod effect;
mod resolver;

pub use effect::{EffectOutcome, LifeChange, StateDelta};
pub use resolver::EffectResolver;
