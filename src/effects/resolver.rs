//! Card effect resolution.
//!
//! `EffectResolver::validate` checks a play against the snapshot in a fixed
//! order and reports the first failure. `EffectResolver::apply` validates,
//! then computes the card's effect without mutating anything.
//!
//! ## Damage and defense
//!
//! Attack damage is reduced by the target's stored defense points, one point
//! per damage, and the points spent are removed. The life a subordinate pays
//! to attack is a cost, not damage, so defense never touches it.

use crate::cards::{catalog, CardId, CardKind, WorkCategory};
use crate::core::rng::RandomSource;
use crate::core::{Game, Player, Rejection, Role, RulesConfig};

use super::effect::{EffectOutcome, LifeChange, StateDelta};

const SUBORDINATE_ATTACK_DAMAGE: u8 = 1;
const SUBORDINATE_ATTACK_COST: u8 = 1;
const BOSS_ATTACK_DAMAGE: u8 = 2;
const SUBORDINATE_HEAL: u8 = 1;
const BOSS_HEAL: u8 = 2;

/// Resolves work cards against a snapshot.
pub struct EffectResolver<'a> {
    config: &'a RulesConfig,
}

impl<'a> EffectResolver<'a> {
    #[must_use]
    pub fn new(config: &'a RulesConfig) -> Self {
        Self { config }
    }

    /// Check whether `actor` may play `card` on `target`.
    ///
    /// Order: actor is the current player, card exists and is a work card,
    /// target exists, then the card's own targeting rules.
    pub fn validate(
        &self,
        game: &Game,
        actor: &str,
        card: &str,
        target: Option<&str>,
    ) -> Result<(), Rejection> {
        self.resolve_parts(game, actor, card, target).map(|_| ())
    }

    /// Validate and compute the effect of a play.
    pub fn apply<R: RandomSource>(
        &self,
        game: &Game,
        actor: &str,
        card: &str,
        target: Option<&str>,
        rng: &mut R,
    ) -> Result<EffectOutcome, Rejection> {
        let (actor, category, target) = self.resolve_parts(game, actor, card, target)?;

        let outcome = match (category, actor.role) {
            (WorkCategory::Attack, _) => {
                // Checked present by validation.
                let target = target.ok_or(Rejection::TargetRequired)?;
                self.attack(game, actor, target)
            }
            (WorkCategory::Defense, _) => {
                let points = game.game_state.defense_points(actor.id.as_str()).saturating_add(1);
                let mut outcome = EffectOutcome::new(format!(
                    "{} prepared a defense ({points} point{} stored)",
                    actor.name,
                    if points == 1 { "" } else { "s" }
                ));
                outcome.state_deltas.push(StateDelta::DefenseSet {
                    player: actor.id.clone(),
                    points,
                });
                outcome
            }
            (WorkCategory::Recovery, Role::Boss) => {
                let after = actor.life.saturating_add(BOSS_HEAL).min(actor.max_life);
                let mut outcome = EffectOutcome::new(format!(
                    "{} recovered {} life ({} -> {after})",
                    actor.name,
                    after - actor.life,
                    actor.life
                ));
                outcome.player_deltas.push(life_change(actor, after));
                outcome
            }
            (WorkCategory::Recovery, Role::Subordinate) => {
                self.subordinate_recovery(actor, target.unwrap_or(actor), rng)
            }
            (WorkCategory::President, _) => {
                let mut outcome = EffectOutcome::new(format!(
                    "{} placed a president for the {} side ({} turns)",
                    actor.name, actor.role, self.config.president_duration
                ));
                outcome.state_deltas.push(StateDelta::PresidentPlaced {
                    card: CardId::new(card),
                    owner: actor.role,
                    turns_remaining: self.config.president_duration,
                });
                outcome
            }
        };

        Ok(outcome)
    }

    fn resolve_parts<'g>(
        &self,
        game: &'g Game,
        actor: &str,
        card: &str,
        target: Option<&str>,
    ) -> Result<(&'g Player, WorkCategory, Option<&'g Player>), Rejection> {
        let actor = match game.current_player() {
            Some(current) if current.id.as_str() == actor => current,
            _ => return Err(Rejection::NotYourTurn),
        };

        let category = match catalog().find_by_id(card).map(|c| c.kind) {
            Some(CardKind::Work(category)) => category,
            Some(CardKind::Dictatorship(_)) => return Err(Rejection::NotPlayable(card.to_string())),
            None => return Err(Rejection::UnknownCard(card.to_string())),
        };

        let target = match target {
            Some(id) => Some(
                game.player(id)
                    .ok_or_else(|| Rejection::UnknownTarget(id.to_string()))?,
            ),
            None => None,
        };

        match category {
            WorkCategory::Attack => {
                let target = target.ok_or(Rejection::TargetRequired)?;
                if target.role != actor.role.opponent() {
                    return Err(Rejection::SameSideAttack);
                }
            }
            WorkCategory::Recovery => {
                if let Some(target) = target {
                    if target.id != actor.id && target.role != actor.role {
                        return Err(Rejection::OpposingSideRecovery);
                    }
                }
            }
            WorkCategory::President => {
                if game.game_state.president.is_active() {
                    return Err(Rejection::PresidentAlreadyPlaced);
                }
            }
            WorkCategory::Defense => {}
        }

        Ok((actor, category, target))
    }

    fn attack(&self, game: &Game, actor: &Player, target: &Player) -> EffectOutcome {
        let damage = match actor.role {
            Role::Subordinate => SUBORDINATE_ATTACK_DAMAGE,
            Role::Boss => BOSS_ATTACK_DAMAGE,
        };

        let stored = game.game_state.defense_points(target.id.as_str());
        let absorbed = stored.min(damage);
        let dealt = damage - absorbed;
        let after = target.life.saturating_sub(dealt);

        let mut message = format!(
            "{} attacked {} for {dealt} damage ({} -> {after})",
            actor.name, target.name, target.life
        );
        if absorbed > 0 {
            message.push_str(&format!(", {absorbed} blocked by defense"));
        }

        let mut outcome = EffectOutcome::new(String::new());
        if actor.role == Role::Subordinate {
            let paid = actor.life.saturating_sub(SUBORDINATE_ATTACK_COST);
            message.push_str(&format!(
                ", paying {} life ({} -> {paid})",
                SUBORDINATE_ATTACK_COST, actor.life
            ));
            outcome.player_deltas.push(life_change(actor, paid));
        }
        outcome.player_deltas.push(life_change(target, after));
        if absorbed > 0 {
            outcome.state_deltas.push(StateDelta::DefenseSet {
                player: target.id.clone(),
                points: stored - absorbed,
            });
        }

        outcome.log_message = message;
        outcome
    }

    fn subordinate_recovery<R: RandomSource>(
        &self,
        actor: &Player,
        target: &Player,
        rng: &mut R,
    ) -> EffectOutcome {
        if target.is_down() {
            let roll = rng.roll_die();
            let mut outcome = if roll % 2 == 0 {
                let mut outcome = EffectOutcome::new(format!(
                    "{} rolled {roll} and revived {} (0 -> 1)",
                    actor.name, target.name
                ));
                outcome.player_deltas.push(life_change(target, 1));
                outcome
            } else {
                EffectOutcome::new(format!(
                    "{} rolled {roll}, failing to revive {}",
                    actor.name, target.name
                ))
            };
            outcome.dice = Some(roll);
            return outcome;
        }

        let after = target.life.saturating_add(SUBORDINATE_HEAL).min(target.max_life);
        let mut outcome = EffectOutcome::new(format!(
            "{} restored {} life to {} ({} -> {after})",
            actor.name,
            after - target.life,
            target.name,
            target.life
        ));
        outcome.player_deltas.push(life_change(target, after));
        outcome
    }
}

fn life_change(player: &Player, after: u8) -> LifeChange {
    LifeChange {
        player: player.id.clone(),
        before: player.life,
        after,
    }
}
