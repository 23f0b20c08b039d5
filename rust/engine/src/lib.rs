//! # yaniv-engine: Yaniv Rules Engine Core
//!
//! A deterministic, single-threaded simulator of the card game Yaniv for
//! two to ten players. At every decision point it lists the exhaustive set of
//! legal actions and applies the chosen one, so external agents can observe
//! partial state and learn to play.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), ids and indicator planes
//! - [`dealer`] - Draw pile with seeded ChaCha20 shuffling
//! - [`player`] - Seat identity and hand
//! - [`actions`] - Action enum, canonical action strings, hand scoring
//! - [`vocab`] - Fixed action vocabulary (string ↔ id)
//! - [`rules`] - Legal-action generation and rule constants
//! - [`round`] - Turn state machine, Yaniv/Assaf resolution, deck replacement
//! - [`state`] - Observation record handed to agents
//! - [`game`] - Match orchestration, step-back history, payoffs
//! - [`config`] - Game configuration loading
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use yaniv_engine::cards::Card;
//! use yaniv_engine::rules::discard_actions;
//!
//! let hand: Vec<Card> = ["ST", "SA", "DT", "SJ", "SQ"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let actions: Vec<String> = discard_actions(&hand).iter().map(|a| a.to_string()).collect();
//! assert_eq!(actions.len(), 7);
//! assert!(actions.contains(&"DTST".to_string()));
//! assert!(actions.contains(&"STSJSQ".to_string()));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All randomness flows from the configured seed:
//!
//! ```rust
//! use yaniv_engine::config::GameConfig;
//! use yaniv_engine::game::Game;
//!
//! let config = GameConfig { seed: Some(42), ..GameConfig::default() };
//! let mut g1 = Game::new(config.clone()).unwrap();
//! let mut g2 = Game::new(config).unwrap();
//! assert_eq!(g1.init_game().unwrap(), g2.init_game().unwrap());
//! ```

pub mod actions;
pub mod cards;
pub mod config;
pub mod dealer;
pub mod errors;
pub mod game;
pub mod player;
pub mod round;
pub mod rules;
pub mod state;
pub mod vocab;
