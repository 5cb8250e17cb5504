//! Rules configuration.
//!
//! `RulesConfig` collects every number the rules depend on. The `Default`
//! value is the standard house rules; builder methods exist so tests and
//! variants can tweak a single knob without restating the rest.

use serde::{Deserialize, Serialize};

use super::player::Role;

/// Tunable constants of the rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Minimum seats at the table (boss included).
    pub min_players: usize,
    /// Maximum seats at the table (boss included).
    pub max_players: usize,

    /// Starting and maximum life of the boss.
    pub boss_life: u8,
    /// Starting and maximum life of each subordinate.
    pub subordinate_life: u8,

    /// Cards dealt to the boss at setup.
    pub boss_hand_size: usize,
    /// Cards dealt to each subordinate at setup.
    pub subordinate_hand_size: usize,

    /// Turn count at which subordinates win by holding out.
    pub max_turns: u32,

    /// Turns a president card stays on the board.
    pub president_duration: u8,

    /// Faction-wide nullifications per game with three subordinates.
    pub nullifications_three_subordinates: u8,
    /// Faction-wide nullifications per game with four subordinates.
    pub nullifications_four_subordinates: u8,

    /// Downed subordinates needed for a boss victory.
    ///
    /// Fixed regardless of table size: a three-subordinate game ends as soon
    /// as all three are down.
    pub boss_win_subordinates_down: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_players: 4,
            max_players: 5,
            boss_life: 7,
            subordinate_life: 4,
            boss_hand_size: 7,
            subordinate_hand_size: 2,
            max_turns: 5,
            president_duration: 2,
            nullifications_three_subordinates: 2,
            nullifications_four_subordinates: 1,
            boss_win_subordinates_down: 3,
        }
    }
}

impl RulesConfig {
    /// Standard rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the turn limit.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set how long a president card lingers.
    #[must_use]
    pub fn with_president_duration(mut self, turns: u8) -> Self {
        self.president_duration = turns;
        self
    }

    /// Set the boss-victory threshold.
    #[must_use]
    pub fn with_boss_win_threshold(mut self, downed: usize) -> Self {
        self.boss_win_subordinates_down = downed;
        self
    }

    /// Set the nullification budgets (three subordinates, four subordinates).
    #[must_use]
    pub fn with_nullification_limits(mut self, three: u8, four: u8) -> Self {
        self.nullifications_three_subordinates = three;
        self.nullifications_four_subordinates = four;
        self
    }

    /// Maximum life for a role.
    #[must_use]
    pub fn max_life(&self, role: Role) -> u8 {
        match role {
            Role::Boss => self.boss_life,
            Role::Subordinate => self.subordinate_life,
        }
    }

    /// Opening hand size for a role.
    #[must_use]
    pub fn hand_size(&self, role: Role) -> usize {
        match role {
            Role::Boss => self.boss_hand_size,
            Role::Subordinate => self.subordinate_hand_size,
        }
    }

    /// Nullification budget for a table with `subordinates` subordinates.
    #[must_use]
    pub fn nullification_limit(&self, subordinates: usize) -> u8 {
        if subordinates >= 4 {
            self.nullifications_four_subordinates
        } else {
            self.nullifications_three_subordinates
        }
    }
}
