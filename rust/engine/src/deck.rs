use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::{GameError, GameResult};

/// An ordered deck of undealt cards with its own seeded RNG. One deck serves
/// one hand; `shuffle` restores all 52 cards and permutes them, after which
/// `deal_card`/`draw` consume from the top.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    /// Deck seeded from OS entropy.
    pub fn new() -> Self {
        Self::new_with_seed(rand::random())
    }

    /// Deck with a reproducible shuffle order. Two decks built from the same
    /// seed deal identical sequences.
    pub fn new_with_seed(seed: u64) -> Self {
        // Keep the fixed pre-shuffle order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Restore all 52 cards and apply a Fisher-Yates permutation.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
    }

    /// Restore the fixed pre-shuffle order without consuming RNG state.
    pub fn reset(&mut self) {
        self.cards = full_deck();
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    /// Remove and return the top `n` cards.
    pub fn draw(&mut self, n: usize) -> GameResult<Vec<Card>> {
        if n > self.cards.len() {
            return Err(GameError::InsufficientCards {
                needed: n,
                available: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    /// Discard the top card per the hold'em burn procedure.
    pub fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    /// Remove the named cards wherever they sit; absent cards are ignored.
    /// Keeps a deck consistent with cards that were dealt out of band, for
    /// example when rebuilding a table from a persisted snapshot.
    pub fn remove(&mut self, cards: &[Card]) {
        self.cards.retain(|c| !cards.contains(c));
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
