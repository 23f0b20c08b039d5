use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::cards::Card;
use crate::round::Phase;

/// Plain observation record handed to agents and feature encoders.
/// Cards serialize as two-character strings, actions as their action strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Seat this observation was taken from
    pub player_id: usize,
    /// That seat's hand
    pub hand: Vec<Card>,
    /// Every discard event, oldest first
    pub discard_pile: Vec<Vec<Card>>,
    /// Cards that may currently be picked up
    pub available_discard: Vec<Card>,
    /// Discarded cards that can no longer be picked up
    pub dead_cards: Vec<Card>,
    /// Per seat, cards known to be held because they were picked up
    pub known_cards: Vec<Vec<Card>>,
    /// Per seat hand size
    pub hand_sizes: Vec<usize>,
    /// Cards left in the draw pile
    pub deck_size: usize,
    /// Legal actions, empty unless `player_id` is the seat to act
    pub legal_actions: Vec<Action>,
    pub current_player: usize,
    pub num_players: usize,
    pub phase: Phase,
}

impl PlayerState {
    /// Legal actions as their strings, the form vocabulary lookups use.
    pub fn legal_action_strings(&self) -> Vec<String> {
        self.legal_actions.iter().map(Action::to_string).collect()
    }
}
