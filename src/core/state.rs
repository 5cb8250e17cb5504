//! Game snapshot.
//!
//! ## Game
//!
//! Complete state of one game:
//! - Status, phase, turn count and the current player
//! - Player records in a fixed seating order (boss first)
//! - Private hands
//! - Shared board state (`GameState`): decks, the dictatorship slot, the
//!   president slot, nullification counters and defense points
//! - Append-only turn history
//!
//! Engine operations take `&Game` and return a new `Game`. History is an
//! `im::Vector`, so those clones share structure.
//!
//! ## Public View
//!
//! `Game::public_view` strips every hand so the snapshot can be broadcast;
//! `Game::view_for` keeps one player's hand.

use std::collections::BTreeMap;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{ActionKind, TurnRecord};
use super::config::RulesConfig;
use super::error::{EngineError, Rejection};
use super::player::{Player, PlayerId, Role};
use crate::cards::{CardId, DictatorshipTarget};
use crate::zones::DeckManager;

/// Whether the game is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Playing,
    Ended,
}

/// Turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The boss reveals a dictatorship card.
    Dictatorship,
    /// Subordinates talk over whether to nullify it.
    SubordinateConsultation,
    SubordinateTurn,
    BossTurn,
    /// The turn is wrapped up by the current player.
    TurnEnd,
}

impl Phase {
    /// Phases in which the current player plays and draws cards.
    #[must_use]
    pub fn is_action_phase(self) -> bool {
        matches!(self, Phase::SubordinateTurn | Phase::BossTurn)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Dictatorship => "dictatorship",
            Phase::SubordinateConsultation => "subordinate_consultation",
            Phase::SubordinateTurn => "subordinate_turn",
            Phase::BossTurn => "boss_turn",
            Phase::TurnEnd => "turn_end",
        };
        f.write_str(name)
    }
}

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    BossDefeated,
    SubordinatesDown,
    TurnLimitReached,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            EndReason::BossDefeated => "boss defeated",
            EndReason::SubordinatesDown => "three or more subordinates down",
            EndReason::TurnLimitReached => "turn limit reached",
        };
        f.write_str(text)
    }
}

/// Winner and reason of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Role,
    pub reason: EndReason,
}

/// The current dictatorship card, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DictatorshipSlot {
    #[default]
    None,
    Active {
        card: CardId,
        target: DictatorshipTarget,
        is_nullified: bool,
    },
}

/// The president on the board, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PresidentSlot {
    #[default]
    None,
    Active {
        card: CardId,
        owner: Role,
        turns_remaining: u8,
    },
}

impl PresidentSlot {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, PresidentSlot::Active { .. })
    }
}

/// Nullifications spent so far, kept per table size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullificationCounters {
    pub three_subordinates: u8,
    pub four_subordinates: u8,
}

impl NullificationCounters {
    /// Nullifications spent at a table with `subordinates` subordinates.
    #[must_use]
    pub fn used(&self, subordinates: usize) -> u8 {
        if subordinates >= 4 {
            self.four_subordinates
        } else {
            self.three_subordinates
        }
    }

    pub fn record(&mut self, subordinates: usize) {
        if subordinates >= 4 {
            self.four_subordinates += 1;
        } else {
            self.three_subordinates += 1;
        }
    }
}

/// Shared board state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub decks: DeckManager,
    pub dictatorship: DictatorshipSlot,
    pub nullifications: NullificationCounters,
    pub president: PresidentSlot,
    /// Stored damage-reduction points per player. Absent means 0.
    pub defense: BTreeMap<PlayerId, u8>,
}

impl GameState {
    #[must_use]
    pub fn defense_points(&self, player: &str) -> u8 {
        self.defense.get(player).copied().unwrap_or(0)
    }
}

/// Complete game snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub status: Status,
    pub phase: Phase,
    /// Index into `player_order`.
    pub current_player_index: usize,
    /// Starts at 1.
    pub turn_count: u32,
    pub max_turns: u32,
    pub players: BTreeMap<PlayerId, Player>,
    /// Fixed seating order, boss first.
    pub player_order: Vec<PlayerId>,
    /// Private. Redact with `public_view` before sharing.
    pub hands: BTreeMap<PlayerId, Vec<CardId>>,
    pub game_state: GameState,
    pub turn_history: Vector<TurnRecord>,
    /// Present iff `status` is `Ended`.
    pub outcome: Option<GameOutcome>,
}

impl Game {
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == Status::Ended
    }

    #[must_use]
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    /// Id of the player at `current_player_index`.
    #[must_use]
    pub fn current_player_id(&self) -> Option<&PlayerId> {
        self.player_order.get(self.current_player_index)
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.current_player_id().and_then(|id| self.players.get(id))
    }

    #[must_use]
    pub fn boss(&self) -> Option<&Player> {
        self.players.values().find(|p| p.is_boss())
    }

    /// Subordinates in seating order.
    pub fn subordinates(&self) -> impl Iterator<Item = &Player> {
        self.player_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .filter(|p| !p.is_boss())
    }

    #[must_use]
    pub fn subordinate_count(&self) -> usize {
        self.subordinates().count()
    }

    #[must_use]
    pub fn downed_subordinates(&self) -> usize {
        self.subordinates().filter(|p| p.is_down()).count()
    }

    /// A player's hand; empty for unknown ids and redacted views.
    #[must_use]
    pub fn hand(&self, id: &str) -> &[CardId] {
        self.hands.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Snapshot with every hand removed. `hand_count` stays public.
    #[must_use]
    pub fn public_view(&self) -> Game {
        let mut view = self.clone();
        view.hands.clear();
        view
    }

    /// Snapshot with only `viewer`'s hand left in.
    #[must_use]
    pub fn view_for(&self, viewer: &str) -> Game {
        let mut view = self.clone();
        view.hands.retain(|id, _| id.as_str() == viewer);
        view
    }

    /// Update a player's connection flag.
    pub fn set_connected(&mut self, id: &str, connected: bool) -> Result<(), Rejection> {
        let player = self
            .players
            .get_mut(id)
            .ok_or_else(|| Rejection::UnknownPlayer(id.to_string()))?;
        player.is_connected = connected;
        Ok(())
    }

    /// Replace a hand and keep `hand_count` in step with it.
    pub fn set_hand(&mut self, id: &PlayerId, hand: Vec<CardId>) {
        if let Some(player) = self.players.get_mut(id) {
            player.hand_count = hand.len();
        }
        self.hands.insert(id.clone(), hand);
    }

    /// Append a history record and stamp the actor's `last_action`.
    pub(crate) fn record(
        &mut self,
        actor: &PlayerId,
        action: ActionKind,
        message: impl Into<String>,
        dice: Option<u8>,
    ) {
        let sequence = self.turn_history.len() as u64 + 1;
        let entry = TurnRecord::new(sequence, self.turn_count, self.phase, actor.clone(), action, message)
            .with_dice(dice);
        self.turn_history.push_back(entry);
        if let Some(player) = self.players.get_mut(actor) {
            player.last_action = sequence;
        }
    }

    /// End the game. Every finished game rests in `TurnEnd`.
    pub(crate) fn finish(&mut self, outcome: GameOutcome) {
        self.status = Status::Ended;
        self.phase = Phase::TurnEnd;
        self.outcome = Some(outcome);
    }

    /// Verify the snapshot's structural invariants.
    pub fn check_integrity(&self, config: &RulesConfig) -> Result<(), EngineError> {
        let corrupt = |msg: String| Err(EngineError::CorruptState(msg));

        if self.player_order.len() != self.players.len() {
            return corrupt(format!(
                "seating order has {} entries but {} players exist",
                self.player_order.len(),
                self.players.len()
            ));
        }
        for (i, id) in self.player_order.iter().enumerate() {
            if !self.players.contains_key(id) {
                return corrupt(format!("seat {i} refers to unknown player {id}"));
            }
            if self.player_order[..i].contains(id) {
                return corrupt(format!("player {id} is seated twice"));
            }
        }
        if self.current_player_index >= self.player_order.len() {
            return corrupt(format!(
                "current player index {} out of range",
                self.current_player_index
            ));
        }

        let bosses = self.players.values().filter(|p| p.is_boss()).count();
        if bosses != 1 {
            return corrupt(format!("expected exactly one boss, found {bosses}"));
        }

        if let Some(p) = self.players.values().find(|p| p.life > p.max_life) {
            return corrupt(format!("player {} has {} life over a maximum of {}", p.id, p.life, p.max_life));
        }
        for (id, hand) in &self.hands {
            match self.players.get(id) {
                None => return corrupt(format!("hand held for unknown player {id}")),
                Some(p) if p.hand_count != hand.len() => {
                    return corrupt(format!(
                        "player {id} reports {} cards but holds {}",
                        p.hand_count,
                        hand.len()
                    ))
                }
                Some(_) => {}
            }
        }

        match (self.status, &self.outcome) {
            (Status::Playing, Some(_)) => return corrupt("playing game has an outcome".into()),
            (Status::Ended, None) => return corrupt("ended game has no outcome".into()),
            _ => {}
        }

        if self.status == Status::Playing {
            let current_role = self.current_player().map(|p| p.role);
            let expected = match self.phase {
                Phase::BossTurn => Some(Role::Boss),
                Phase::SubordinateTurn => Some(Role::Subordinate),
                _ => None,
            };
            if let Some(role) = expected {
                if current_role != Some(role) {
                    return corrupt(format!("{} phase but the current player is not a {role}", self.phase));
                }
                if let Some(p) = self.current_player().filter(|p| p.is_down()) {
                    return corrupt(format!("{} phase but current player {} is down", self.phase, p.id));
                }
            }
        }

        let subordinates = self.subordinate_count();
        let used = self.game_state.nullifications.used(subordinates);
        let limit = config.nullification_limit(subordinates);
        if used > limit {
            return corrupt(format!("{used} nullifications used over a limit of {limit}"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::Seat;

    fn sample_game() -> Game {
        let config = RulesConfig::default();
        let seats = [("boss", Role::Boss), ("a", Role::Subordinate), ("b", Role::Subordinate), ("c", Role::Subordinate)];

        let mut players = BTreeMap::new();
        let mut order = Vec::new();
        for (id, role) in seats {
            players.insert(PlayerId::from(id), Player::new(Seat::new(id, id), role, config.max_life(role)));
            order.push(PlayerId::from(id));
        }

        Game {
            status: Status::Playing,
            phase: Phase::Dictatorship,
            current_player_index: 1,
            turn_count: 1,
            max_turns: config.max_turns,
            players,
            player_order: order,
            hands: BTreeMap::new(),
            game_state: GameState::default(),
            turn_history: Vector::new(),
            outcome: None,
        }
    }

    #[test]
    fn test_lookups() {
        let game = sample_game();

        assert_eq!(game.current_player_id(), Some(&PlayerId::from("a")));
        assert_eq!(game.boss().map(|p| p.id.as_str()), Some("boss"));
        assert_eq!(game.subordinate_count(), 3);
        assert_eq!(game.downed_subordinates(), 0);
        assert!(game.hand("a").is_empty());
    }

    #[test]
    fn test_set_hand_tracks_count() {
        let mut game = sample_game();
        let a = PlayerId::from("a");
        game.set_hand(&a, vec![CardId::from("attack_001"), CardId::from("defense_001")]);

        assert_eq!(game.players[&a].hand_count, 2);
        assert_eq!(game.hand("a").len(), 2);
    }

    #[test]
    fn test_public_view_redacts_hands() {
        let mut game = sample_game();
        game.set_hand(&PlayerId::from("a"), vec![CardId::from("attack_001")]);
        game.set_hand(&PlayerId::from("b"), vec![CardId::from("attack_002")]);

        let public = game.public_view();
        assert!(public.hands.is_empty());
        assert_eq!(public.players[&PlayerId::from("a")].hand_count, 1);

        let own = game.view_for("b");
        assert_eq!(own.hands.len(), 1);
        assert_eq!(own.hand("b"), &[CardId::from("attack_002")]);
    }

    #[test]
    fn test_set_connected() {
        let mut game = sample_game();
        game.set_connected("b", false).unwrap();
        assert!(!game.players[&PlayerId::from("b")].is_connected);

        assert!(matches!(
            game.set_connected("zed", true),
            Err(Rejection::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_record_stamps_last_action() {
        let mut game = sample_game();
        let a = PlayerId::from("a");
        game.record(&a, ActionKind::EndConsultation, "a ended consultation", None);
        game.record(&a, ActionKind::PassTurn, "a passed", None);

        assert_eq!(game.turn_history.len(), 2);
        assert_eq!(game.turn_history[1].sequence, 2);
        assert_eq!(game.players[&a].last_action, 2);
    }

    #[test]
    fn test_integrity_ok() {
        assert!(sample_game().check_integrity(&RulesConfig::default()).is_ok());
    }

    #[test]
    fn test_integrity_index_out_of_range() {
        let mut game = sample_game();
        game.current_player_index = 9;
        assert!(matches!(
            game.check_integrity(&RulesConfig::default()),
            Err(EngineError::CorruptState(_))
        ));
    }

    #[test]
    fn test_integrity_two_bosses() {
        let mut game = sample_game();
        game.players.get_mut("a").unwrap().role = Role::Boss;
        assert!(game.check_integrity(&RulesConfig::default()).is_err());
    }

    #[test]
    fn test_integrity_role_phase_mismatch() {
        let mut game = sample_game();
        game.phase = Phase::BossTurn;
        assert!(game.check_integrity(&RulesConfig::default()).is_err());
    }

    #[test]
    fn test_integrity_downed_current_player() {
        let mut game = sample_game();
        game.phase = Phase::SubordinateTurn;
        assert!(game.check_integrity(&RulesConfig::default()).is_ok());

        game.players.get_mut("a").unwrap().life = 0;
        assert!(game.check_integrity(&RulesConfig::default()).is_err());

        // Outside the action phases the rotation has not reached them yet.
        game.phase = Phase::SubordinateConsultation;
        assert!(game.check_integrity(&RulesConfig::default()).is_ok());
    }

    #[test]
    fn test_integrity_status_outcome_mismatch() {
        let mut game = sample_game();
        game.status = Status::Ended;
        assert!(game.check_integrity(&RulesConfig::default()).is_err());
    }

    #[test]
    fn test_integrity_counter_over_limit() {
        let mut game = sample_game();
        game.game_state.nullifications.three_subordinates = 3;
        assert!(game.check_integrity(&RulesConfig::default()).is_err());
    }

    #[test]
    fn test_finish_sets_turn_end() {
        let mut game = sample_game();
        game.finish(GameOutcome {
            winner: Role::Boss,
            reason: EndReason::SubordinatesDown,
        });

        assert!(game.is_over());
        assert_eq!(game.phase, Phase::TurnEnd);
        assert!(game.check_integrity(&RulesConfig::default()).is_ok());
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut game = sample_game();
        game.game_state.dictatorship = DictatorshipSlot::Active {
            card: CardId::from("dict_004"),
            target: DictatorshipTarget::All,
            is_nullified: false,
        };

        let json = serde_json::to_string(&game).unwrap();
        assert!(json.contains("\"phase\":\"dictatorship\""));
        assert!(json.contains("\"state\":\"active\""));

        let back: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(game, back);
    }
}
