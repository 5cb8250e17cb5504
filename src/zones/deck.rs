//! Deck manager: the work deck, the dictatorship deck and the shared
//! discard pile.
//!
//! The top of each pile is the end of its `Vec`. The work deck recycles:
//! when it runs dry, every work card in the discard pile is shuffled back
//! in. The dictatorship deck never recycles, so its cards pile up in the
//! discard pile for the rest of the game.

use serde::{Deserialize, Serialize};

use crate::cards::{catalog, Card, CardId};
use crate::core::rng::RandomSource;

/// Pile sizes, for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCounts {
    pub work: usize,
    pub dictatorship: usize,
    pub discard: usize,
}

/// The three shared card piles.
///
/// ## Usage
///
/// ```
/// use boss_rules::core::GameRng;
/// use boss_rules::zones::DeckManager;
///
/// let mut rng = GameRng::new(7);
/// let mut decks = DeckManager::new_shuffled(&mut rng);
///
/// let hand = decks.draw_work_n(2, &mut rng);
/// assert_eq!(hand.len(), 2);
/// assert_eq!(decks.counts().work, 48);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckManager {
    work_deck: Vec<CardId>,
    dictatorship_deck: Vec<CardId>,
    discard_pile: Vec<CardId>,
}

impl DeckManager {
    /// Empty piles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build both decks from the catalog and shuffle them.
    #[must_use]
    pub fn new_shuffled<R: RandomSource>(rng: &mut R) -> Self {
        let cards = catalog();
        let mut decks = Self {
            work_deck: cards.work_cards().map(|c| c.id.clone()).collect(),
            dictatorship_deck: cards.dictatorship_cards().map(|c| c.id.clone()).collect(),
            discard_pile: Vec::new(),
        };
        decks.shuffle_work(rng);
        decks.shuffle_dictatorship(rng);
        decks
    }

    /// Piles in exactly the given order (last element is the top).
    #[must_use]
    pub fn from_parts(
        work_deck: Vec<CardId>,
        dictatorship_deck: Vec<CardId>,
        discard_pile: Vec<CardId>,
    ) -> Self {
        Self {
            work_deck,
            dictatorship_deck,
            discard_pile,
        }
    }

    pub fn shuffle_work<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.work_deck);
    }

    pub fn shuffle_dictatorship<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.dictatorship_deck);
    }

    /// Draw the top work card, recycling the discard pile if the deck is
    /// empty. `None` when neither pile holds a work card.
    pub fn draw_work<R: RandomSource>(&mut self, rng: &mut R) -> Option<CardId> {
        if self.work_deck.is_empty() && self.recycle_discards(rng) == 0 {
            return None;
        }
        self.work_deck.pop()
    }

    /// Draw up to `n` work cards, stopping early if they run out.
    pub fn draw_work_n<R: RandomSource>(&mut self, n: usize, rng: &mut R) -> Vec<CardId> {
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            match self.draw_work(rng) {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    /// Draw the top dictatorship card. Never recycles.
    pub fn draw_dictatorship(&mut self) -> Option<CardId> {
        self.dictatorship_deck.pop()
    }

    pub fn discard(&mut self, card: CardId) {
        self.discard_pile.push(card);
    }

    pub fn discard_many(&mut self, cards: impl IntoIterator<Item = CardId>) {
        self.discard_pile.extend(cards);
    }

    /// Move every work card from the discard pile into the work deck and
    /// shuffle it. Dictatorship cards stay in the discard pile.
    ///
    /// Returns the number of cards moved.
    fn recycle_discards<R: RandomSource>(&mut self, rng: &mut R) -> usize {
        let (work, rest): (Vec<_>, Vec<_>) = self
            .discard_pile
            .drain(..)
            .partition(|id| catalog().find_by_id(id.as_str()).is_some_and(Card::is_work));
        self.discard_pile = rest;

        let moved = work.len();
        if moved > 0 {
            self.work_deck.extend(work);
            self.shuffle_work(rng);
            tracing::debug!(moved, "recycled discard pile into work deck");
        }
        moved
    }

    #[must_use]
    pub fn counts(&self) -> DeckCounts {
        DeckCounts {
            work: self.work_deck.len(),
            dictatorship: self.dictatorship_deck.len(),
            discard: self.discard_pile.len(),
        }
    }

    /// Work deck, bottom first.
    #[must_use]
    pub fn work_deck(&self) -> &[CardId] {
        &self.work_deck
    }

    /// Dictatorship deck, bottom first.
    #[must_use]
    pub fn dictatorship_deck(&self) -> &[CardId] {
        &self.dictatorship_deck
    }

    /// Discard pile, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &[CardId] {
        &self.discard_pile
    }
}
