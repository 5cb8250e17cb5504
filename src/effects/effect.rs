//! Effect outcomes.
//!
//! Resolving a card never touches the snapshot. It produces an
//! `EffectOutcome`: the life changes and board changes the card causes, a
//! log line, and the die roll if one was made. `commit` writes those changes
//! into a `Game`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::{Game, PlayerId, PresidentSlot, Role};

/// Life of one player before and after an effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeChange {
    pub player: PlayerId,
    pub before: u8,
    pub after: u8,
}

impl LifeChange {
    /// Signed change in life.
    #[must_use]
    pub fn delta(&self) -> i16 {
        i16::from(self.after) - i16::from(self.before)
    }
}

/// A change to shared board state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateDelta {
    /// A player's damage-reduction points now equal `points`.
    DefenseSet { player: PlayerId, points: u8 },
    /// A president card enters the board.
    PresidentPlaced {
        card: CardId,
        owner: Role,
        turns_remaining: u8,
    },
}

/// Everything a resolved card does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectOutcome {
    /// Life changes in the order they happened. Usually one or two.
    pub player_deltas: SmallVec<[LifeChange; 2]>,
    pub state_deltas: SmallVec<[StateDelta; 2]>,
    pub log_message: String,
    /// Die result for a revival attempt.
    pub dice: Option<u8>,
}

impl EffectOutcome {
    #[must_use]
    pub fn new(log_message: impl Into<String>) -> Self {
        Self {
            player_deltas: SmallVec::new(),
            state_deltas: SmallVec::new(),
            log_message: log_message.into(),
            dice: None,
        }
    }

    /// Life change of a given player, if any.
    #[must_use]
    pub fn life_change(&self, player: &str) -> Option<&LifeChange> {
        self.player_deltas.iter().find(|c| c.player.as_str() == player)
    }

    /// Write the changes into `game`.
    pub fn commit(&self, game: &mut Game) {
        for change in &self.player_deltas {
            if let Some(player) = game.players.get_mut(&change.player) {
                player.life = change.after.min(player.max_life);
            }
        }

        for delta in &self.state_deltas {
            match delta {
                StateDelta::DefenseSet { player, points } => {
                    if *points == 0 {
                        game.game_state.defense.remove(player);
                    } else {
                        game.game_state.defense.insert(player.clone(), *points);
                    }
                }
                StateDelta::PresidentPlaced {
                    card,
                    owner,
                    turns_remaining,
                } => {
                    game.game_state.president = PresidentSlot::Active {
                        card: card.clone(),
                        owner: *owner,
                        turns_remaining: *turns_remaining,
                    };
                }
            }
        }
    }
}
