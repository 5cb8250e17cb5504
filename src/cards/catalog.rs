//! The card catalog.
//!
//! Built once per process from fixed definitions and shared as a
//! `&'static CardCatalog`. Lookup by id goes through an `FxHashMap` index;
//! iteration follows definition order so deck construction is stable.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, Category, DictatorshipTarget, WorkCategory};

const ATTACK_COUNT: usize = 22;
const DEFENSE_COUNT: usize = 11;
const RECOVERY_COUNT: usize = 10;
const PRESIDENT_COUNT: usize = 7;

const ATTACK_TEXT: &str =
    "Subordinate: lose 1 life to deal 1 damage to the boss / Boss: deal 2 damage to one subordinate";
const DEFENSE_TEXT: &str = "Reduce the next damage you take by 1";
const RECOVERY_TEXT: &str = "Subordinate: restore 1 life to a subordinate, or revive a downed one on an even die roll / \
     Boss: restore 2 of your own life (up to 7)";
const PRESIDENT_TEXT: &str =
    "Place on your side of the board for 2 turns. Only one president may be on the board.";

/// `(id, target, name, description)` for the 15 dictatorship cards.
const DICTATORSHIP_DEFS: [(&str, DictatorshipTarget, &str, &str); 15] = [
    ("dict_001", DictatorshipTarget::Boss, "Slacking Spot",
        "Boss only: may skip this turn's draw to restore 2 life"),
    ("dict_002", DictatorshipTarget::Boss, "My Achievement",
        "Boss only: roll a die, on 4 or more put a president from the deck on the boss's side"),
    ("dict_003", DictatorshipTarget::All, "Not Even a Sip of Water",
        "This turn, any subordinate who restores life takes 1 damage"),
    ("dict_004", DictatorshipTarget::All, "Drinking Till Dawn",
        "At the end of the boss's turn, the boss and every subordinate take 1 damage"),
    ("dict_005", DictatorshipTarget::Boss, "Collective Responsibility",
        "Boss only: once this turn, when an attack deals damage, deal 1 damage to another player"),
    ("dict_006", DictatorshipTarget::Boss, "Embezzlement",
        "Boss only: draw one extra card at the start of the boss's turn"),
    ("dict_007", DictatorshipTarget::Boss, "Letter of Apology",
        "Boss chooses: restore 1 life, or deal 1 damage to one subordinate"),
    ("dict_008", DictatorshipTarget::All, "Department Dissolved",
        "Subordinates cannot use defense cards this turn"),
    ("dict_009", DictatorshipTarget::All, "Paid Leave",
        "This turn, any player who restores life discards one card of their choice"),
    ("dict_010", DictatorshipTarget::Boss, "Responsibility on Site",
        "Boss only: once this turn, reduce damage taken to 0"),
    ("dict_011", DictatorshipTarget::All, "That Person's Gaffe",
        "Discard the president on the board"),
    ("dict_012", DictatorshipTarget::All, "Combative Attitude",
        "This turn, each side's first attack deals 1 extra damage"),
    ("dict_013", DictatorshipTarget::All, "Lunch Once in a While",
        "If a president is in the discard pile, roll a die: even puts it on the boss's side, odd on the subordinates'"),
    ("dict_014", DictatorshipTarget::Boss, "Rules Are Made to Be Broken",
        "Boss only: once this turn, after playing a recovery card, also play one attack card"),
    ("dict_015", DictatorshipTarget::Boss, "Boss Dictatorship",
        "Boss only: once this turn, an attack deals 100 extra damage"),
];

/// Read-only table of every card in the game.
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard 50 work cards and 15 dictatorship cards.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        let work_sets = [
            ("attack", WorkCategory::Attack, ATTACK_COUNT, "Attack", ATTACK_TEXT),
            ("defense", WorkCategory::Defense, DEFENSE_COUNT, "Defense", DEFENSE_TEXT),
            ("recovery", WorkCategory::Recovery, RECOVERY_COUNT, "Recovery", RECOVERY_TEXT),
            ("president", WorkCategory::President, PRESIDENT_COUNT, "President", PRESIDENT_TEXT),
        ];
        for (prefix, category, count, name, text) in work_sets {
            for n in 1..=count {
                catalog.register(Card::work(format!("{prefix}_{n:03}"), category, name, text));
            }
        }

        for (id, target, name, text) in DICTATORSHIP_DEFS {
            catalog.register(Card::dictatorship(id, target, name, text));
        }

        catalog
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: Card) {
        if self.index.contains_key(&card.id) {
            panic!("Card with ID {} already registered", card.id);
        }
        self.index.insert(card.id.clone(), self.cards.len());
        self.cards.push(card);
    }

    /// Get a card by id.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Card> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    /// Check if a card id is known.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All cards of a category, in definition order.
    #[must_use]
    pub fn cards_by_category(&self, category: Category) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.category() == category).collect()
    }

    /// All work cards, in definition order.
    pub fn work_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_work())
    }

    /// All dictatorship cards, in definition order.
    pub fn dictatorship_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| !c.is_work())
    }

    /// Iterate over every card.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// The process-wide standard catalog.
#[must_use]
pub fn catalog() -> &'static CardCatalog {
    static CATALOG: OnceLock<CardCatalog> = OnceLock::new();
    CATALOG.get_or_init(CardCatalog::standard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;

    #[test]
    fn test_standard_counts() {
        let catalog = catalog();

        assert_eq!(catalog.len(), 65);
        assert_eq!(catalog.work_cards().count(), 50);
        assert_eq!(catalog.dictatorship_cards().count(), 15);
        assert_eq!(catalog.cards_by_category(Category::Attack).len(), 22);
        assert_eq!(catalog.cards_by_category(Category::Defense).len(), 11);
        assert_eq!(catalog.cards_by_category(Category::Recovery).len(), 10);
        assert_eq!(catalog.cards_by_category(Category::President).len(), 7);
        assert_eq!(catalog.cards_by_category(Category::Dictatorship).len(), 15);
    }

    #[test]
    fn test_find_by_id() {
        let catalog = catalog();

        let attack = catalog.find_by_id("attack_022").unwrap();
        assert_eq!(attack.category(), Category::Attack);
        assert_eq!(attack.card_type(), CardType::Work);

        let dict = catalog.find_by_id("dict_011").unwrap();
        assert_eq!(dict.target(), Some(DictatorshipTarget::All));

        assert!(catalog.find_by_id("attack_023").is_none());
        assert!(catalog.find_by_id("").is_none());
    }

    #[test]
    fn test_ids_are_zero_padded() {
        let catalog = catalog();
        assert!(catalog.contains("president_001"));
        assert!(catalog.contains("president_007"));
        assert!(!catalog.contains("president_1"));
    }

    #[test]
    fn test_definition_order_is_stable() {
        let first: Vec<_> = catalog().work_cards().take(3).map(|c| c.id.as_str()).collect();
        assert_eq!(first, vec!["attack_001", "attack_002", "attack_003"]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut catalog = CardCatalog::new();
        catalog.register(Card::work("attack_001", WorkCategory::Attack, "A", ""));
        catalog.register(Card::work("attack_001", WorkCategory::Attack, "B", ""));
    }
}
