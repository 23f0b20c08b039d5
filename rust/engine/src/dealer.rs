use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Owns the face-down draw pile and the random stream used to shuffle it.
/// The end of the internal vector is the top of the pile.
///
/// # Examples
///
/// ```
/// use yaniv_engine::dealer::Dealer;
///
/// let mut a = Dealer::new_with_seed(42);
/// let mut b = Dealer::new_with_seed(42);
/// assert_eq!(a.deal_card(), b.deal_card());
/// assert_eq!(a.remaining(), 51);
/// ```
#[derive(Debug, Clone)]
pub struct Dealer {
    /// Draw pile, top card last
    deck: Vec<Card>,
    /// Seeded source for every shuffle this dealer performs
    rng: ChaCha20Rng,
}

impl Dealer {
    /// A full 52-card deck, shuffled with a stream seeded from `seed`.
    pub fn new_with_seed(seed: u64) -> Self {
        let mut dealer = Self::from_cards(full_deck(), seed);
        dealer.shuffle();
        dealer
    }

    /// A dealer holding exactly `cards` in the given order (top card last), unshuffled.
    pub fn from_cards(cards: Vec<Card>, seed: u64) -> Self {
        Self {
            deck: cards,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn shuffle(&mut self) {
        self.deck.shuffle(&mut self.rng);
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        self.deck.pop().ok_or(GameError::EmptyDeck)
    }

    /// Puts recycled cards back into the pile and reshuffles it.
    pub fn replace_deck(&mut self, cards: Vec<Card>) {
        self.deck.extend(cards);
        self.shuffle();
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.deck.len()
    }
}
