//! Player identification, roles and per-player public data.
//!
//! ## PlayerId
//!
//! Opaque identifier supplied by the caller (usually an account id).
//!
//! ## Player
//!
//! Public per-player record: role, life, hand size, connection flag.
//! Hands themselves live in `Game::hands` and are redacted by
//! `Game::public_view`.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Player identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PlayerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Side a player is on. Fixed for the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Boss,
    Subordinate,
}

impl Role {
    /// The other side.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Role::Boss => Role::Subordinate,
            Role::Subordinate => Role::Boss,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Boss => write!(f, "boss"),
            Role::Subordinate => write!(f, "subordinate"),
        }
    }
}

/// A seat offered to `Engine::start_game`, in join order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
}

impl Seat {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            name: name.into(),
        }
    }
}

/// Public per-player state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    /// Current life, always within `0..=max_life`.
    pub life: u8,
    pub max_life: u8,
    /// Number of cards held. The hand contents are private.
    pub hand_count: usize,
    pub is_connected: bool,
    /// Logical timestamp: turn-history sequence number of the latest action
    /// by this player, 0 before they have acted.
    pub last_action: u64,
}

impl Player {
    /// Create a player at full life.
    #[must_use]
    pub fn new(seat: Seat, role: Role, max_life: u8) -> Self {
        Self {
            id: seat.id,
            name: seat.name,
            role,
            life: max_life,
            max_life,
            hand_count: 0,
            is_connected: true,
            last_action: 0,
        }
    }

    /// Whether the player is down (life 0).
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.life == 0
    }

    #[must_use]
    pub fn is_boss(&self) -> bool {
        self.role == Role::Boss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let id = PlayerId::new("alice");
        assert_eq!(id.as_str(), "alice");
        assert_eq!(format!("{}", id), "alice");
        assert_eq!(PlayerId::from("alice"), id);
    }

    #[test]
    fn test_role_opponent() {
        assert_eq!(Role::Boss.opponent(), Role::Subordinate);
        assert_eq!(Role::Subordinate.opponent(), Role::Boss);
    }

    #[test]
    fn test_new_player_full_life() {
        let player = Player::new(Seat::new("p1", "Pat"), Role::Subordinate, 4);

        assert_eq!(player.life, 4);
        assert_eq!(player.max_life, 4);
        assert!(!player.is_down());
        assert!(!player.is_boss());
        assert!(player.is_connected);
    }

    #[test]
    fn test_player_serialization() {
        let player = Player::new(Seat::new("b", "Boss"), Role::Boss, 7);
        let json = serde_json::to_string(&player).unwrap();

        assert!(json.contains("\"role\":\"boss\""));
        assert!(json.contains("\"id\":\"b\""));

        let back: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, back);
    }
}
