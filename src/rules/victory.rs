//! Win condition checker.
//!
//! Conditions are tested in a fixed order and the first match wins:
//!
//! 1. Boss at 0 life: subordinates win, "boss defeated"
//! 2. Enough subordinates at 0 life: boss wins
//! 3. Turn count at the limit: subordinates win, "turn limit reached"

use crate::core::{EndReason, Game, GameOutcome, Role, RulesConfig};

/// Result of a win check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinCheck {
    Ongoing,
    Ended(GameOutcome),
}

impl WinCheck {
    #[must_use]
    pub fn is_ended(&self) -> bool {
        matches!(self, WinCheck::Ended(_))
    }
}

/// Evaluate the win conditions on a snapshot.
#[must_use]
pub fn check(game: &Game, config: &RulesConfig) -> WinCheck {
    let ended = |winner, reason| WinCheck::Ended(GameOutcome { winner, reason });

    if game.boss().is_some_and(|b| b.is_down()) {
        return ended(Role::Subordinate, EndReason::BossDefeated);
    }
    if game.downed_subordinates() >= config.boss_win_subordinates_down {
        return ended(Role::Boss, EndReason::SubordinatesDown);
    }
    if game.turn_count >= game.max_turns {
        return ended(Role::Subordinate, EndReason::TurnLimitReached);
    }
    WinCheck::Ongoing
}
