//! The rules engine: every operation a client can request.
//!
//! Each operation takes the current snapshot and returns a new one (or a
//! richer outcome carrying it). Nothing is mutated in place. Before acting,
//! an operation checks the snapshot's integrity and that the game is still
//! running; after acting it runs the win check, so a returned game that
//! has ended always carries its outcome.
//!
//! ## Usage
//!
//! ```
//! use boss_rules::core::{GameRng, Phase, Seat};
//! use boss_rules::rules::{Engine, RoleAssignment};
//!
//! let engine = Engine::default();
//! let mut rng = GameRng::new(42);
//! let seats = vec![
//!     Seat::new("u1", "Kai"),
//!     Seat::new("u2", "Rin"),
//!     Seat::new("u3", "Sho"),
//!     Seat::new("u4", "Yui"),
//! ];
//!
//! let game = engine.start_game(&seats, RoleAssignment::FirstJoined, &mut rng).unwrap();
//! assert_eq!(game.phase, Phase::Dictatorship);
//!
//! let drawn = engine.process_dictatorship_phase(&game, "u1").unwrap();
//! assert_eq!(drawn.game.phase, Phase::SubordinateConsultation);
//! ```

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::phase;
use super::victory::{self, WinCheck};
use crate::cards::{catalog, CardId, CardKind, WorkCategory};
use crate::core::{
    ActionKind, DictatorshipSlot, EngineError, Game, GameState, Phase, Player, PlayerId,
    RandomSource, Rejection, Role, RulesConfig, Seat, Status,
};
use crate::effects::{EffectOutcome, EffectResolver};
use crate::zones::DeckManager;

/// How the boss is chosen at setup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "player", rename_all = "snake_case")]
pub enum RoleAssignment {
    /// The first seat is the boss.
    #[default]
    FirstJoined,
    /// The named player is the boss.
    Boss(PlayerId),
    /// The boss is drawn at random from the seats.
    Random,
}

/// Cards that left or entered a hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandDelta {
    pub player: PlayerId,
    pub removed: Vec<CardId>,
    pub added: Vec<CardId>,
}

/// Result of `Engine::play_card`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayOutcome {
    pub game: Game,
    pub hand_delta: HandDelta,
    pub effect: EffectOutcome,
}

/// Result of `Engine::draw_card`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    pub game: Game,
    /// `None` when no work card was left anywhere. The game is unchanged.
    pub drawn: Option<CardId>,
}

/// Result of `Engine::process_dictatorship_phase`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictatorshipDraw {
    pub game: Game,
    /// `None` once the dictatorship deck is spent. The phase still advances.
    pub drawn: Option<CardId>,
    /// Living players the revealed card applies to, in seating order.
    pub affected: Vec<PlayerId>,
}

/// Rules engine.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: RulesConfig,
}

impl Engine {
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Create a game: seat the players, build and shuffle both decks and deal
    /// opening hands.
    ///
    /// The boss takes position 0 of the seating order; subordinates keep
    /// their join order. The first subordinate is the current player.
    pub fn start_game<R: RandomSource>(
        &self,
        seats: &[Seat],
        roles: RoleAssignment,
        rng: &mut R,
    ) -> Result<Game, EngineError> {
        logged("start_game", self.start_game_inner(seats, roles, rng))
    }

    fn start_game_inner<R: RandomSource>(
        &self,
        seats: &[Seat],
        roles: RoleAssignment,
        rng: &mut R,
    ) -> Result<Game, EngineError> {
        let config = &self.config;
        if !(config.min_players..=config.max_players).contains(&seats.len()) {
            return Err(Rejection::InvalidPlayerCount {
                min: config.min_players,
                max: config.max_players,
                actual: seats.len(),
            }
            .into());
        }
        for (i, seat) in seats.iter().enumerate() {
            if seats[..i].iter().any(|s| s.id == seat.id) {
                return Err(Rejection::DuplicatePlayer(seat.id.to_string()).into());
            }
        }

        let boss_id = match roles {
            RoleAssignment::FirstJoined => seats[0].id.clone(),
            RoleAssignment::Boss(id) => {
                if !seats.iter().any(|s| s.id == id) {
                    return Err(Rejection::UnknownPlayer(id.to_string()).into());
                }
                id
            }
            RoleAssignment::Random => match rng.pick(seats) {
                Some(seat) => seat.id.clone(),
                None => return Err(EngineError::CorruptState("no seat to pick a boss from".into())),
            },
        };

        let mut player_order = vec![boss_id.clone()];
        player_order.extend(seats.iter().filter(|s| s.id != boss_id).map(|s| s.id.clone()));

        let players: BTreeMap<PlayerId, Player> = seats
            .iter()
            .map(|seat| {
                let role = if seat.id == boss_id {
                    Role::Boss
                } else {
                    Role::Subordinate
                };
                let player = Player::new(seat.clone(), role, config.max_life(role));
                (seat.id.clone(), player)
            })
            .collect();

        let mut game = Game {
            status: Status::Playing,
            phase: Phase::Dictatorship,
            current_player_index: 1,
            turn_count: 1,
            max_turns: config.max_turns,
            players,
            player_order,
            hands: BTreeMap::new(),
            game_state: GameState {
                decks: DeckManager::new_shuffled(rng),
                ..GameState::default()
            },
            turn_history: Vector::new(),
            outcome: None,
        };

        for id in game.player_order.clone() {
            let role = game.players[&id].role;
            let hand = game
                .game_state
                .decks
                .draw_work_n(config.hand_size(role), rng);
            game.set_hand(&id, hand);
        }

        info!(
            players = game.player_order.len(),
            boss = %boss_id,
            "game started"
        );
        Ok(game)
    }

    /// Play a card from the current player's hand.
    pub fn play_card<R: RandomSource>(
        &self,
        game: &Game,
        actor: &str,
        card: &str,
        target: Option<&str>,
        rng: &mut R,
    ) -> Result<PlayOutcome, EngineError> {
        logged("play_card", self.play_card_inner(game, actor, card, target, rng))
    }

    fn play_card_inner<R: RandomSource>(
        &self,
        game: &Game,
        actor: &str,
        card: &str,
        target: Option<&str>,
        rng: &mut R,
    ) -> Result<PlayOutcome, EngineError> {
        self.ensure_running(game)?;
        if !game.phase.is_action_phase() {
            return Err(Rejection::ActionNotAllowed(game.phase).into());
        }

        let resolver = EffectResolver::new(&self.config);
        resolver.validate(game, actor, card, target)?;
        let actor_id = known_player(game, actor)?;
        let Some(slot) = game.hand(actor).iter().position(|c| c.as_str() == card) else {
            return Err(Rejection::CardNotInHand(card.to_string()).into());
        };

        let effect = resolver.apply(game, actor, card, target, rng)?;

        let mut next = game.clone();
        effect.commit(&mut next);

        let mut hand = game.hand(actor).to_vec();
        let played = hand.remove(slot);
        next.set_hand(&actor_id, hand);

        let is_president = matches!(
            catalog().find_by_id(card).map(|c| c.kind),
            Some(CardKind::Work(WorkCategory::President))
        );
        if !is_president {
            next.game_state.decks.discard(played.clone());
        }

        next.record(
            &actor_id,
            ActionKind::PlayCard {
                card: played.clone(),
                target: target.map(PlayerId::new),
            },
            effect.log_message.clone(),
            effect.dice,
        );
        info!(actor, card, target, dice = effect.dice, "{}", effect.log_message);
        self.settle(&mut next);

        // A player brought down by their own card cannot keep the turn.
        let actor_down = next.players.get(&actor_id).is_some_and(Player::is_down);
        if !next.is_over() && actor_down && next.current_player_id() == Some(&actor_id) {
            debug!(actor, "actor is down, turn passes on");
            phase::finish_player_turn(&mut next);
        }

        Ok(PlayOutcome {
            game: next,
            hand_delta: HandDelta {
                player: actor_id,
                removed: vec![played],
                added: Vec::new(),
            },
            effect,
        })
    }

    /// Draw one work card for the current player.
    pub fn draw_card<R: RandomSource>(
        &self,
        game: &Game,
        actor: &str,
        rng: &mut R,
    ) -> Result<DrawOutcome, EngineError> {
        logged("draw_card", self.draw_card_inner(game, actor, rng))
    }

    fn draw_card_inner<R: RandomSource>(
        &self,
        game: &Game,
        actor: &str,
        rng: &mut R,
    ) -> Result<DrawOutcome, EngineError> {
        self.ensure_running(game)?;
        if !game.phase.is_action_phase() {
            return Err(Rejection::ActionNotAllowed(game.phase).into());
        }
        let actor_id = self.ensure_current(game, actor)?;

        let mut next = game.clone();
        let Some(card) = next.game_state.decks.draw_work(rng) else {
            debug!(actor, "no work cards left to draw");
            return Ok(DrawOutcome {
                game: game.clone(),
                drawn: None,
            });
        };

        let mut hand = next.hand(actor).to_vec();
        hand.push(card.clone());
        next.set_hand(&actor_id, hand);
        let message = format!("{} drew a card", next.players[&actor_id].name);
        next.record(
            &actor_id,
            ActionKind::DrawCard {
                card: Some(card.clone()),
            },
            message,
            None,
        );
        info!(actor, "card drawn");
        self.settle(&mut next);

        Ok(DrawOutcome {
            game: next,
            drawn: Some(card),
        })
    }

    /// End the current player's turn, or close `turn_end` and start the next
    /// game turn.
    pub fn pass_turn(&self, game: &Game, actor: &str) -> Result<Game, EngineError> {
        logged("pass_turn", self.pass_turn_inner(game, actor))
    }

    fn pass_turn_inner(&self, game: &Game, actor: &str) -> Result<Game, EngineError> {
        self.ensure_running(game)?;
        let actor_id = self.ensure_current(game, actor)?;

        let mut next = game.clone();
        let name = next.players[&actor_id].name.clone();
        match game.phase {
            Phase::SubordinateTurn | Phase::BossTurn => {
                next.record(&actor_id, ActionKind::PassTurn, format!("{name} ended their turn"), None);
                phase::finish_player_turn(&mut next);
            }
            Phase::TurnEnd => {
                next.record(&actor_id, ActionKind::PassTurn, format!("{name} closed turn {}", game.turn_count), None);
                phase::start_next_turn(&mut next);
            }
            Phase::Dictatorship | Phase::SubordinateConsultation => {
                return Err(Rejection::ActionNotAllowed(game.phase).into());
            }
        }

        info!(
            actor,
            phase = %next.phase,
            turn = next.turn_count,
            "turn passed"
        );
        self.settle(&mut next);
        Ok(next)
    }

    /// Reveal this turn's dictatorship card and open consultation.
    pub fn process_dictatorship_phase(
        &self,
        game: &Game,
        actor: &str,
    ) -> Result<DictatorshipDraw, EngineError> {
        logged(
            "process_dictatorship_phase",
            self.process_dictatorship_phase_inner(game, actor),
        )
    }

    fn process_dictatorship_phase_inner(
        &self,
        game: &Game,
        actor: &str,
    ) -> Result<DictatorshipDraw, EngineError> {
        self.ensure_running(game)?;
        if game.phase != Phase::Dictatorship {
            return Err(Rejection::WrongPhase {
                expected: Phase::Dictatorship,
                actual: game.phase,
            }
            .into());
        }
        let actor_id = known_player(game, actor)?;
        if game.players[&actor_id].role != Role::Boss {
            return Err(Rejection::BossOnly.into());
        }
        if game.game_state.dictatorship != DictatorshipSlot::None {
            return Err(Rejection::DictatorshipAlreadyDrawn.into());
        }

        let mut next = game.clone();
        let drawn = next.game_state.decks.draw_dictatorship();
        let message = match &drawn {
            Some(card) => {
                let definition = catalog()
                    .find_by_id(card.as_str())
                    .ok_or_else(|| EngineError::CorruptState(format!("unknown card {card} in dictatorship deck")))?;
                let Some(target) = definition.target() else {
                    return Err(EngineError::CorruptState(format!("work card {card} in dictatorship deck")));
                };
                next.game_state.dictatorship = DictatorshipSlot::Active {
                    card: card.clone(),
                    target,
                    is_nullified: false,
                };
                format!("dictatorship card revealed: {}", definition.name)
            }
            None => "the dictatorship deck is empty".to_string(),
        };

        next.phase = Phase::SubordinateConsultation;
        next.record(
            &actor_id,
            ActionKind::DrawDictatorship { card: drawn.clone() },
            message,
            None,
        );
        let affected: Vec<PlayerId> = match &next.game_state.dictatorship {
            DictatorshipSlot::Active { target, .. } => next
                .player_order
                .iter()
                .filter_map(|id| next.players.get(id))
                .filter(|p| !p.is_down() && target.affects(p.role))
                .map(|p| p.id.clone())
                .collect(),
            DictatorshipSlot::None => Vec::new(),
        };
        info!(actor, card = ?drawn, affected = affected.len(), "dictatorship phase processed");
        self.settle(&mut next);

        Ok(DictatorshipDraw {
            game: next,
            drawn,
            affected,
        })
    }

    /// Spend one of the subordinates' shared nullifications on the current
    /// dictatorship card.
    pub fn nullify_dictatorship_card(&self, game: &Game, actor: &str) -> Result<Game, EngineError> {
        logged(
            "nullify_dictatorship_card",
            self.nullify_dictatorship_card_inner(game, actor),
        )
    }

    fn nullify_dictatorship_card_inner(&self, game: &Game, actor: &str) -> Result<Game, EngineError> {
        self.ensure_running(game)?;
        let actor_id = known_player(game, actor)?;
        if game.players[&actor_id].role != Role::Subordinate {
            return Err(Rejection::SubordinateOnly.into());
        }
        let card = match &game.game_state.dictatorship {
            DictatorshipSlot::None => return Err(Rejection::NoDictatorshipCard.into()),
            DictatorshipSlot::Active { is_nullified: true, .. } => {
                return Err(Rejection::AlreadyNullified.into())
            }
            DictatorshipSlot::Active { card, .. } => card.clone(),
        };

        let subordinates = game.subordinate_count();
        let limit = self.config.nullification_limit(subordinates);
        if game.game_state.nullifications.used(subordinates) >= limit {
            return Err(Rejection::NullificationLimitReached { limit }.into());
        }

        let mut next = game.clone();
        if let DictatorshipSlot::Active { is_nullified, .. } = &mut next.game_state.dictatorship {
            *is_nullified = true;
        }
        next.game_state.nullifications.record(subordinates);
        let message = format!("{} nullified the dictatorship card", next.players[&actor_id].name);
        next.record(
            &actor_id,
            ActionKind::NullifyDictatorship { card: card.clone() },
            message,
            None,
        );
        info!(
            actor,
            %card,
            used = next.game_state.nullifications.used(subordinates),
            limit,
            "dictatorship card nullified"
        );
        self.settle(&mut next);
        Ok(next)
    }

    /// Close consultation and start the player turns.
    pub fn end_subordinate_consultation(&self, game: &Game, actor: &str) -> Result<Game, EngineError> {
        logged(
            "end_subordinate_consultation",
            self.end_subordinate_consultation_inner(game, actor),
        )
    }

    fn end_subordinate_consultation_inner(&self, game: &Game, actor: &str) -> Result<Game, EngineError> {
        self.ensure_running(game)?;
        if game.phase != Phase::SubordinateConsultation {
            return Err(Rejection::WrongPhase {
                expected: Phase::SubordinateConsultation,
                actual: game.phase,
            }
            .into());
        }
        let actor_id = known_player(game, actor)?;
        if game.players[&actor_id].role != Role::Subordinate {
            return Err(Rejection::SubordinateOnly.into());
        }

        let mut next = game.clone();
        let message = format!("{} ended the consultation", next.players[&actor_id].name);
        next.record(&actor_id, ActionKind::EndConsultation, message, None);
        phase::begin_player_turns(&mut next);

        info!(actor, phase = %next.phase, "consultation ended");
        self.settle(&mut next);
        Ok(next)
    }

    /// Integrity first, then the game must still be running.
    fn ensure_running(&self, game: &Game) -> Result<(), EngineError> {
        game.check_integrity(&self.config)?;
        if game.is_over() {
            return Err(Rejection::GameOver.into());
        }
        Ok(())
    }

    fn ensure_current(&self, game: &Game, actor: &str) -> Result<PlayerId, EngineError> {
        match game.current_player_id() {
            Some(current) if current.as_str() == actor => Ok(current.clone()),
            _ => Err(Rejection::NotYourTurn.into()),
        }
    }

    /// Run the win check and end the game if it is decided.
    fn settle(&self, game: &mut Game) {
        if game.is_over() {
            if let Some(outcome) = game.outcome {
                info!(winner = %outcome.winner, reason = %outcome.reason, "game over");
            }
            return;
        }
        if let WinCheck::Ended(outcome) = victory::check(game, &self.config) {
            info!(winner = %outcome.winner, reason = %outcome.reason, "game over");
            game.finish(outcome);
        }
    }
}

fn known_player(game: &Game, id: &str) -> Result<PlayerId, Rejection> {
    game.players
        .get(id)
        .map(|p| p.id.clone())
        .ok_or_else(|| Rejection::UnknownPlayer(id.to_string()))
}

/// Log rejections at debug level on the way out.
fn logged<T>(operation: &'static str, result: Result<T, EngineError>) -> Result<T, EngineError> {
    if let Err(err) = &result {
        match err {
            EngineError::Rejected(reason) => debug!(operation, %reason, "request rejected"),
            EngineError::CorruptState(detail) => {
                tracing::warn!(operation, %detail, "refusing corrupt game state")
            }
        }
    }
    result
}
