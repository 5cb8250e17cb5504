//! Card definitions - static card data.
//!
//! A `Card` is immutable reference data. Copies of the same card never
//! exist: every physical card has its own id (`attack_001`, `attack_002`, ...),
//! so decks, hands and the discard pile hold plain `CardId`s.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

use crate::core::Role;

/// Unique identifier of a physical card.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
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

impl Borrow<str> for CardId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which deck a card belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Work,
    Dictatorship,
}

/// Card category, as shown to players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Attack,
    Defense,
    Recovery,
    President,
    Dictatorship,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Attack => "attack",
            Category::Defense => "defense",
            Category::Recovery => "recovery",
            Category::President => "president",
            Category::Dictatorship => "dictatorship",
        };
        f.write_str(name)
    }
}

/// Category of a work card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkCategory {
    Attack,
    Defense,
    Recovery,
    President,
}

impl From<WorkCategory> for Category {
    fn from(category: WorkCategory) -> Self {
        match category {
            WorkCategory::Attack => Category::Attack,
            WorkCategory::Defense => Category::Defense,
            WorkCategory::Recovery => Category::Recovery,
            WorkCategory::President => Category::President,
        }
    }
}

/// Who a dictatorship card's effect applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DictatorshipTarget {
    Boss,
    Subordinate,
    All,
}

impl DictatorshipTarget {
    /// Whether the effect applies to a player of `role`.
    #[must_use]
    pub fn affects(self, role: Role) -> bool {
        match self {
            DictatorshipTarget::Boss => role == Role::Boss,
            DictatorshipTarget::Subordinate => role == Role::Subordinate,
            DictatorshipTarget::All => true,
        }
    }
}

/// Deck and category in one value, so a work card can never carry a
/// dictatorship target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Work(WorkCategory),
    Dictatorship(DictatorshipTarget),
}

/// Static card definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
    /// Display name.
    pub name: String,
    /// Effect text.
    pub description: String,
    /// Public knowledge once drawn (dictatorship cards are revealed).
    pub is_visible: bool,
}

impl Card {
    /// Create a work card.
    #[must_use]
    pub fn work(
        id: impl Into<String>,
        category: WorkCategory,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: CardId::new(id),
            kind: CardKind::Work(category),
            name: name.into(),
            description: description.into(),
            is_visible: false,
        }
    }

    /// Create a dictatorship card.
    #[must_use]
    pub fn dictatorship(
        id: impl Into<String>,
        target: DictatorshipTarget,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: CardId::new(id),
            kind: CardKind::Dictatorship(target),
            name: name.into(),
            description: description.into(),
            is_visible: true,
        }
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self.kind {
            CardKind::Work(_) => CardType::Work,
            CardKind::Dictatorship(_) => CardType::Dictatorship,
        }
    }

    #[must_use]
    pub fn category(&self) -> Category {
        match self.kind {
            CardKind::Work(category) => category.into(),
            CardKind::Dictatorship(_) => Category::Dictatorship,
        }
    }

    /// Target of a dictatorship card, `None` for work cards.
    #[must_use]
    pub fn target(&self) -> Option<DictatorshipTarget> {
        match self.kind {
            CardKind::Work(_) => None,
            CardKind::Dictatorship(target) => Some(target),
        }
    }

    #[must_use]
    pub fn is_work(&self) -> bool {
        self.card_type() == CardType::Work
    }
}
