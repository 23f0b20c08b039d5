use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// Number of distinct cards, and the width of an indicator plane.
pub const DECK_SIZE: usize = 52;

/// Represents one of the four suits in a standard 52-card deck.
/// Variants are declared in symbol order (C < D < H < S), which is the order
/// cards of equal rank are listed in when grouped.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit (♣), symbol `C`
    Clubs,
    /// Diamonds suit (♦), symbol `D`
    Diamonds,
    /// Hearts suit (♥), symbol `H`
    Hearts,
    /// Spades suit (♠), symbol `S`
    Spades,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => 'S',
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }

    pub fn from_symbol(c: char) -> Result<Suit, GameError> {
        match c {
            'S' => Ok(Suit::Spades),
            'H' => Ok(Suit::Hearts),
            'D' => Ok(Suit::Diamonds),
            'C' => Ok(Suit::Clubs),
            _ => Err(GameError::InvalidSuit(c)),
        }
    }

    /// Position in the id layout: S=0, H=1, D=2, C=3.
    pub fn index(self) -> usize {
        match self {
            Suit::Spades => 0,
            Suit::Hearts => 1,
            Suit::Diamonds => 2,
            Suit::Clubs => 3,
        }
    }

    fn from_index(i: usize) -> Option<Suit> {
        all_suits().get(i).copied()
    }
}

/// Represents the rank of a card from Ace (low) through King.
/// Discriminants are the rank index used for straights.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (1)
    Ace = 1,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Ten (10), symbol `T`
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
}

impl Rank {
    pub fn from_symbol(c: char) -> Result<Rank, GameError> {
        match c {
            'A' => Ok(Rank::Ace),
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            _ => Err(GameError::InvalidRank(c)),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Rank::Ace => 'A',
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }

    /// 1 for Ace up to 13 for King.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Face value, with the court cards and the ten all worth 10.
    pub fn score(self) -> u32 {
        match self {
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            r => r as u32,
        }
    }

    pub fn from_index(v: u8) -> Option<Rank> {
        all_ranks().get(usize::from(v).checked_sub(1)?).copied()
    }
}

/// Represents a single immutable playing card.
/// Serialized as its two-character string, suit first (`"SA"`, `"DT"`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card {
    /// The suit of the card
    pub suit: Suit,
    /// The rank of the card (Ace through King)
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Position of this card in a 52-slot plane.
    pub fn id(&self) -> usize {
        card_id(*self)
    }

    pub fn score(&self) -> u32 {
        self.rank.score()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.symbol(), self.rank.symbol())
    }
}

impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(suit), Some(rank), None) => Ok(Card {
                suit: Suit::from_symbol(suit)?,
                rank: Rank::from_symbol(rank)?,
            }),
            _ => Err(GameError::InvalidFormat(s.to_string())),
        }
    }
}

impl From<Card> for String {
    fn from(c: Card) -> String {
        c.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = GameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Suits in id order (S, H, D, C).
pub fn all_suits() -> [Suit; 4] {
    [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

/// All 52 cards, ordered by card id.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(DECK_SIZE);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}

pub fn rank_to_score(symbol: char) -> Result<u32, GameError> {
    Rank::from_symbol(symbol).map(Rank::score)
}

pub fn rank_to_index(symbol: char) -> Result<u8, GameError> {
    Rank::from_symbol(symbol).map(Rank::index)
}

/// `rank_index - 1 + 13 * suit_index`, a bijection onto `0..52`.
pub fn card_id(card: Card) -> usize {
    usize::from(card.rank.index() - 1) + 13 * card.suit.index()
}

pub fn card_from_id(id: usize) -> Result<Card, GameError> {
    if id >= DECK_SIZE {
        return Err(GameError::OutOfRange(id));
    }
    let suit = Suit::from_index(id / 13).ok_or(GameError::OutOfRange(id))?;
    let rank = Rank::from_index((id % 13) as u8 + 1).ok_or(GameError::OutOfRange(id))?;
    Ok(Card { suit, rank })
}

/// Indicator plane with a 1 at the id of every given card.
pub fn encode(cards: &[Card]) -> [u8; DECK_SIZE] {
    let mut plane = [0u8; DECK_SIZE];
    for c in cards {
        plane[c.id()] = 1;
    }
    plane
}

/// Cards marked in an indicator plane, in id order.
pub fn decode_plane(plane: &[u8; DECK_SIZE]) -> Vec<Card> {
    full_deck()
        .into_iter()
        .filter(|c| plane[c.id()] != 0)
        .collect()
}
