//! Shared card piles.

pub mod deck;

pub use deck::{DeckCounts, DeckManager};
