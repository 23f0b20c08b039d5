use crate::actions::hand_score;
use crate::cards::Card;
use crate::errors::GameError;

/// Represents a seat at the table and the cards held there.
/// Hand order carries no meaning for the rules; it only fixes the order singles are listed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Seat index, `0..num_players`
    id: usize,
    /// Cards currently held
    hand: Vec<Card>,
}

impl Player {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            hand: Vec::with_capacity(5),
        }
    }

    pub fn with_hand(id: usize, hand: Vec<Card>) -> Self {
        Self { id, hand }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn hand_score(&self) -> u32 {
        hand_score(&self.hand)
    }

    pub fn give_card(&mut self, c: Card) {
        self.hand.push(c);
    }

    pub fn holds(&self, c: &Card) -> bool {
        self.hand.contains(c)
    }

    /// Removes every listed card, or none of them if any is missing.
    pub fn remove_cards(&mut self, cards: &[Card]) -> Result<(), GameError> {
        if let Some(missing) = cards.iter().find(|c| !self.holds(c)) {
            return Err(GameError::CardNotInHand(*missing));
        }
        self.hand.retain(|c| !cards.contains(c));
        Ok(())
    }
}
