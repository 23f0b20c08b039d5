//! Actions and their canonical string form.
//!
//! A discard is written as the concatenation of its cards' two-character
//! strings in the exact order played, so `"DTST"` and `"STDT"` are distinct
//! actions. The string doubles as the key into
//! [`ActionVocabulary`](crate::vocab::ActionVocabulary).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

pub const YANIV: &str = "yaniv";
pub const PICKUP_TOP_DISCARD: &str = "pickup_top_discard";
pub const PICKUP_BOTTOM_DISCARD: &str = "pickup_bottom_discard";
pub const DRAW_CARD: &str = "draw_card";

/// Pickup-phase actions in their fixed order.
pub const PICKUP_ACTIONS: [&str; 3] = [PICKUP_TOP_DISCARD, PICKUP_BOTTOM_DISCARD, DRAW_CARD];

/// A move available to the current player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Action {
    /// End the round by declaring a hand score of at most 7
    Yaniv,
    /// Take the last card of the pickup event
    PickupTopDiscard,
    /// Take the first card of the pickup event
    PickupBottomDiscard,
    /// Take the top card of the draw pile
    DrawCard,
    /// Place these cards, in this order, as one discard event
    Discard(Vec<Card>),
}

impl Action {
    pub fn pickup_actions() -> [Action; 3] {
        [
            Action::PickupTopDiscard,
            Action::PickupBottomDiscard,
            Action::DrawCard,
        ]
    }

    pub fn is_pickup(&self) -> bool {
        matches!(
            self,
            Action::PickupTopDiscard | Action::PickupBottomDiscard | Action::DrawCard
        )
    }

    pub fn cards(&self) -> &[Card] {
        match self {
            Action::Discard(cards) => cards,
            _ => &[],
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Yaniv => f.write_str(YANIV),
            Action::PickupTopDiscard => f.write_str(PICKUP_TOP_DISCARD),
            Action::PickupBottomDiscard => f.write_str(PICKUP_BOTTOM_DISCARD),
            Action::DrawCard => f.write_str(DRAW_CARD),
            Action::Discard(cards) => f.write_str(&action_string(cards)),
        }
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            YANIV => Ok(Action::Yaniv),
            PICKUP_TOP_DISCARD => Ok(Action::PickupTopDiscard),
            PICKUP_BOTTOM_DISCARD => Ok(Action::PickupBottomDiscard),
            DRAW_CARD => Ok(Action::DrawCard),
            _ => parse_cards(s).map(Action::Discard),
        }
    }
}

impl From<Action> for String {
    fn from(a: Action) -> String {
        a.to_string()
    }
}

impl TryFrom<String> for Action {
    type Error = GameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Concatenates card strings in the order given; never reorders.
pub fn action_string(cards: &[Card]) -> String {
    cards.iter().map(Card::to_string).collect()
}

/// Splits an action string into consecutive two-character card tokens.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, GameError> {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() || chars.len() % 2 != 0 {
        return Err(GameError::InvalidFormat(s.to_string()));
    }
    chars
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>().parse::<Card>())
        .collect()
}

pub fn hand_score(cards: &[Card]) -> u32 {
    cards.iter().map(Card::score).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discard_string_keeps_given_order() {
        let a: Action = "STDT".parse().unwrap();
        let b: Action = "DTST".parse().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "STDT");
        assert_eq!(a.cards().len(), 2);
    }

    #[test]
    fn named_actions_round_trip() {
        for name in PICKUP_ACTIONS.iter().chain(std::iter::once(&YANIV)) {
            let a: Action = name.parse().unwrap();
            assert!(!matches!(a, Action::Discard(_)));
            assert_eq!(a.to_string(), *name);
        }
    }

    #[test]
    fn odd_length_is_invalid_format() {
        assert_eq!(
            "STD".parse::<Action>(),
            Err(GameError::InvalidFormat("STD".into()))
        );
        assert_eq!(
            parse_cards(""),
            Err(GameError::InvalidFormat(String::new()))
        );
    }

    #[test]
    fn bad_symbols_name_the_offender() {
        assert_eq!(parse_cards("SX"), Err(GameError::InvalidRank('X')));
        assert_eq!(parse_cards("SAX2"), Err(GameError::InvalidSuit('X')));
    }
}
