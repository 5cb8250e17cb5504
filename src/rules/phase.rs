//! Turn and phase transitions.
//!
//! One game turn runs
//!
//! ```text
//! dictatorship -> subordinate_consultation -> subordinate_turn (x living subordinates)
//!     -> boss_turn -> turn_end -> dictatorship (turn_count + 1)
//! ```
//!
//! Seats rotate in the fixed order, skipping players at 0 life. The phase
//! after a finished player turn follows from the role of the next player.
//! These functions only move the state machine; legality is checked by the
//! engine before calling them.

use crate::core::{DictatorshipSlot, EndReason, Game, GameOutcome, Phase, PresidentSlot, Role};

/// Index of the next living player after `from`, wrapping around.
///
/// Falls back to `from` itself if nobody else is alive.
#[must_use]
pub fn next_living_index(game: &Game, from: usize) -> usize {
    let len = game.player_order.len();
    (1..=len)
        .map(|step| (from + step) % len)
        .find(|&i| {
            game.players
                .get(&game.player_order[i])
                .is_some_and(|p| !p.is_down())
        })
        .unwrap_or(from)
}

fn phase_for_current(game: &Game) -> Phase {
    match game.current_player().map(|p| p.role) {
        Some(Role::Boss) => Phase::BossTurn,
        _ => Phase::SubordinateTurn,
    }
}

/// Leave consultation and hand the turn to the current player, moving past
/// them first if they are down.
pub fn begin_player_turns(game: &mut Game) {
    if game.current_player().is_some_and(|p| p.is_down()) {
        game.current_player_index = next_living_index(game, game.current_player_index);
    }
    game.phase = phase_for_current(game);
}

/// The current player finished a `subordinate_turn` or `boss_turn`.
pub fn finish_player_turn(game: &mut Game) {
    let from_boss = game.phase == Phase::BossTurn;
    game.current_player_index = next_living_index(game, game.current_player_index);
    game.phase = if from_boss {
        Phase::TurnEnd
    } else {
        phase_for_current(game)
    };
}

/// Close `turn_end` and open the next turn's `dictatorship` phase.
///
/// Discards the spent dictatorship card and ticks the president. If the new
/// turn count exceeds the limit the game ends instead.
pub fn start_next_turn(game: &mut Game) {
    game.turn_count += 1;

    let board = &mut game.game_state;
    if let DictatorshipSlot::Active { card, .. } = std::mem::take(&mut board.dictatorship) {
        board.decks.discard(card);
    }
    board.president = match std::mem::take(&mut board.president) {
        PresidentSlot::Active {
            card,
            turns_remaining,
            ..
        } if turns_remaining <= 1 => {
            tracing::debug!(%card, "president left the board");
            board.decks.discard(card);
            PresidentSlot::None
        }
        PresidentSlot::Active {
            card,
            owner,
            turns_remaining,
        } => PresidentSlot::Active {
            card,
            owner,
            turns_remaining: turns_remaining - 1,
        },
        PresidentSlot::None => PresidentSlot::None,
    };

    if game.turn_count > game.max_turns {
        game.finish(GameOutcome {
            winner: Role::Subordinate,
            reason: EndReason::TurnLimitReached,
        });
    } else {
        game.phase = Phase::Dictatorship;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, DictatorshipTarget};
    use crate::core::{GameRng, Seat, Status};
    use crate::rules::Engine;

    fn fresh_game() -> Game {
        let seats = vec![
            Seat::new("boss", "Boss"),
            Seat::new("a", "A"),
            Seat::new("b", "B"),
            Seat::new("c", "C"),
        ];
        Engine::default()
            .start_game(&seats, Default::default(), &mut GameRng::new(3))
            .unwrap()
    }

    fn down(game: &mut Game, id: &str) {
        game.players.get_mut(id).unwrap().life = 0;
    }

    #[test]
    fn test_rotation_skips_downed_players() {
        let mut game = fresh_game();
        down(&mut game, "b");

        assert_eq!(next_living_index(&game, 1), 3);
        assert_eq!(next_living_index(&game, 3), 0);
    }

    #[test]
    fn test_subordinate_turns_then_boss() {
        let mut game = fresh_game();
        game.phase = Phase::SubordinateTurn;

        finish_player_turn(&mut game);
        assert_eq!((game.current_player_index, game.phase), (2, Phase::SubordinateTurn));
        finish_player_turn(&mut game);
        assert_eq!((game.current_player_index, game.phase), (3, Phase::SubordinateTurn));
        finish_player_turn(&mut game);
        assert_eq!((game.current_player_index, game.phase), (0, Phase::BossTurn));
        finish_player_turn(&mut game);
        assert_eq!((game.current_player_index, game.phase), (1, Phase::TurnEnd));
    }

    #[test]
    fn test_begin_skips_downed_current_player() {
        let mut game = fresh_game();
        down(&mut game, "a");
        game.phase = Phase::SubordinateConsultation;

        begin_player_turns(&mut game);
        assert_eq!(game.current_player_index, 2);
        assert_eq!(game.phase, Phase::SubordinateTurn);
    }

    #[test]
    fn test_next_turn_clears_dictatorship_and_ticks_president() {
        let mut game = fresh_game();
        game.phase = Phase::TurnEnd;
        game.game_state.dictatorship = DictatorshipSlot::Active {
            card: CardId::from("dict_001"),
            target: DictatorshipTarget::Boss,
            is_nullified: false,
        };
        game.game_state.president = PresidentSlot::Active {
            card: CardId::from("president_001"),
            owner: Role::Boss,
            turns_remaining: 2,
        };

        start_next_turn(&mut game);
        assert_eq!(game.turn_count, 2);
        assert_eq!(game.phase, Phase::Dictatorship);
        assert_eq!(game.game_state.dictatorship, DictatorshipSlot::None);
        assert!(game.game_state.decks.discard_pile().contains(&CardId::from("dict_001")));
        assert!(matches!(
            game.game_state.president,
            PresidentSlot::Active { turns_remaining: 1, .. }
        ));

        game.phase = Phase::TurnEnd;
        start_next_turn(&mut game);
        assert_eq!(game.game_state.president, PresidentSlot::None);
        assert!(game.game_state.decks.discard_pile().contains(&CardId::from("president_001")));
    }

    #[test]
    fn test_turn_past_limit_ends_game() {
        let mut game = fresh_game();
        game.turn_count = game.max_turns;
        game.phase = Phase::TurnEnd;

        start_next_turn(&mut game);
        assert_eq!(game.status, Status::Ended);
        assert_eq!(game.phase, Phase::TurnEnd);
        assert_eq!(
            game.outcome,
            Some(GameOutcome {
                winner: Role::Subordinate,
                reason: EndReason::TurnLimitReached
            })
        );
    }
}
