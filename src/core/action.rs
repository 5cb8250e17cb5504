//! Turn history records.
//!
//! Every successful operation appends one `TurnRecord` to
//! `Game::turn_history`. The sequence number doubles as the engine's clock:
//! `Player::last_action` stores the sequence of that player's latest record.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::state::Phase;
use crate::cards::CardId;

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    PlayCard {
        card: CardId,
        target: Option<PlayerId>,
    },
    DrawCard {
        /// `None` when both piles were out of work cards.
        card: Option<CardId>,
    },
    PassTurn,
    DrawDictatorship {
        card: Option<CardId>,
    },
    NullifyDictatorship {
        card: CardId,
    },
    EndConsultation,
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based position in the history.
    pub sequence: u64,

    /// Turn count when the action was taken.
    pub turn_number: u32,

    /// Phase the action was taken in.
    pub phase: Phase,

    pub actor: PlayerId,

    pub action: ActionKind,

    /// Human-readable summary.
    pub message: String,

    /// Die result, if the action rolled one.
    pub dice: Option<u8>,
}

impl TurnRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(
        sequence: u64,
        turn_number: u32,
        phase: Phase,
        actor: PlayerId,
        action: ActionKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            sequence,
            turn_number,
            phase,
            actor,
            action,
            message: message.into(),
            dice: None,
        }
    }

    /// Attach a die result.
    #[must_use]
    pub fn with_dice(mut self, dice: Option<u8>) -> Self {
        self.dice = dice;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = TurnRecord::new(
            3,
            1,
            Phase::SubordinateTurn,
            PlayerId::from("a"),
            ActionKind::PassTurn,
            "a passed",
        )
        .with_dice(Some(4));

        assert_eq!(record.sequence, 3);
        assert_eq!(record.dice, Some(4));
        assert_eq!(record.message, "a passed");
    }

    #[test]
    fn test_action_kind_serialization() {
        let action = ActionKind::PlayCard {
            card: CardId::from("attack_001"),
            target: Some(PlayerId::from("boss")),
        };
        let json = serde_json::to_string(&action).unwrap();

        assert!(json.contains("\"type\":\"play_card\""));
        assert!(json.contains("\"target\":\"boss\""));

        let back: ActionKind = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }
}
