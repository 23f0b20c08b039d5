use thiserror::Error;

use crate::cards::Card;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid rank symbol: {0:?}")]
    InvalidRank(char),
    #[error("Invalid suit symbol: {0:?}")]
    InvalidSuit(char),
    #[error("Invalid card format: {0:?}")]
    InvalidFormat(String),
    #[error("Card id {0} out of range [0, 52)")]
    OutOfRange(usize),
    #[error("Card {0} is not in the player's hand")]
    CardNotInHand(Card),
    #[error("Deck is empty and no dead cards are left to recycle")]
    EmptyDeck,
    #[error("Unknown action: {0:?}")]
    UnknownAction(String),
    #[error("Action {0:?} is not legal in the current state")]
    IllegalAction(String),
    #[error("Round already over")]
    RoundOver,
    #[error("No game in progress")]
    NotStarted,
    #[error("No player at seat {0}")]
    InvalidPlayer(usize),
    #[error("Invalid action vocabulary: {0}")]
    Vocabulary(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
