use std::sync::Arc;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, warn};

use crate::actions::Action;
use crate::config::GameConfig;
use crate::dealer::Dealer;
use crate::errors::{ConfigError, GameError};
use crate::player::Player;
use crate::round::{EarlyEnd, Round, RoundEnd};
use crate::rules::INITIAL_HAND_SIZE;
use crate::state::PlayerState;
use crate::vocab::ActionVocabulary;

/// Seed used when the configuration does not name one.
pub const DEFAULT_SEED: u64 = 0xA1A2_A3A4;

/// Everything a step can change: the draw pile, the hands and the round.
/// Cloning it yields a fully independent snapshot.
#[derive(Debug, Clone)]
pub struct Table {
    pub dealer: Dealer,
    pub players: Vec<Player>,
    pub round: Round,
}

/// Runs matches of Yaniv: deals, sequences turns, applies end-of-match
/// policies and computes payoffs.
///
/// # Examples
///
/// ```
/// use yaniv_engine::config::GameConfig;
/// use yaniv_engine::game::Game;
///
/// let mut game = Game::new(GameConfig { seed: Some(7), ..GameConfig::default() }).unwrap();
/// let (state, player) = game.init_game().unwrap();
/// assert_eq!(player, 0);
/// assert_eq!(state.hand.len(), 5);
///
/// // the first legal action that is not a yaniv call is a discard
/// let discard = game
///     .get_legal_actions()
///     .into_iter()
///     .find(|a| a.to_string() != "yaniv")
///     .unwrap();
/// let (_, player) = game.step(&discard.to_string()).unwrap();
/// assert_eq!(player, 0);
/// let (_, player) = game.step("draw_card").unwrap();
/// assert_eq!(player, 1);
/// ```
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    vocabulary: Arc<ActionVocabulary>,
    /// Master stream; each match draws its dealer seed from it
    rng: ChaCha20Rng,
    table: Option<Table>,
    /// Snapshots taken before each step when step-back is enabled
    history: Vec<Table>,
    /// Actions applied in the current match
    actions: Vec<Action>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_vocabulary(config, Arc::new(ActionVocabulary::standard().clone()))
    }

    pub fn with_vocabulary(
        config: GameConfig,
        vocabulary: Arc<ActionVocabulary>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = ChaCha20Rng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
        Ok(Self {
            config,
            vocabulary,
            rng,
            table: None,
            history: Vec::new(),
            actions: Vec::new(),
        })
    }

    /// Starts a fresh match and returns the first state with the seat to act.
    pub fn init_game(&mut self) -> Result<(PlayerState, usize), GameError> {
        let n = self.config.num_players;
        let mut dealer = Dealer::new_with_seed(self.rng.next_u64());
        let mut players: Vec<Player> = (0..n).map(Player::new).collect();
        for _ in 0..INITIAL_HAND_SIZE {
            for p in &mut players {
                p.give_card(dealer.deal_card()?);
            }
        }
        let mut round = Round::new(n);
        round.flip_top_card(&mut dealer)?;

        self.history.clear();
        self.actions.clear();
        self.table = Some(Table {
            dealer,
            players,
            round,
        });
        debug!(num_players = n, "match dealt");

        let player = self.table()?.round.current_player();
        Ok((self.get_state(player)?, player))
    }

    /// Applies an action given as its string.
    pub fn step(&mut self, action: &str) -> Result<(PlayerState, usize), GameError> {
        if self.vocabulary.index_of(action).is_none() {
            return Err(GameError::UnknownAction(action.to_string()));
        }
        let action: Action = action.parse()?;
        self.apply(action)
    }

    /// Applies an action given as its vocabulary id.
    pub fn step_index(&mut self, index: usize) -> Result<(PlayerState, usize), GameError> {
        let action = self.vocabulary.decode(index)?;
        self.apply(action)
    }

    fn apply(&mut self, action: Action) -> Result<(PlayerState, usize), GameError> {
        let table = self.table.as_mut().ok_or(GameError::NotStarted)?;
        if table.round.is_over() {
            return Err(GameError::RoundOver);
        }
        let seat = table.round.current_player();
        if !table.round.legal_actions(table.players[seat].hand()).contains(&action) {
            return Err(GameError::IllegalAction(action.to_string()));
        }

        let snapshot = self.config.allow_step_back.then(|| table.clone());
        table
            .round
            .proceed(&mut table.dealer, &mut table.players, &action)?;
        self.history.extend(snapshot);
        self.actions.push(action);

        let step_cap = self.config.end_after_n_steps;
        if step_cap > 0 && self.actions.len() >= step_cap {
            warn!(steps = self.actions.len(), "step limit reached, ending match");
            table.round.force_end(EarlyEnd::StepLimit);
        }
        let replacement_cap = self.config.end_after_n_deck_replacements;
        if replacement_cap > 0 && table.round.deck_replacements() >= replacement_cap {
            warn!(
                replacements = table.round.deck_replacements(),
                "deck replacement limit reached, ending match"
            );
            table.round.force_end(EarlyEnd::DeckReplacementLimit);
        }

        let player = table.round.current_player();
        Ok((self.get_state(player)?, player))
    }

    /// Restores the table to before the last step. Returns false when
    /// there is nothing to undo.
    pub fn step_back(&mut self) -> bool {
        match self.history.pop() {
            Some(table) => {
                self.table = Some(table);
                self.actions.pop();
                true
            }
            None => false,
        }
    }

    pub fn get_state(&self, player_id: usize) -> Result<PlayerState, GameError> {
        let t = self.table()?;
        t.round.get_state(&t.dealer, &t.players, player_id)
    }

    /// Per-seat payoffs: the early-end reward for everyone after a forced
    /// end, otherwise 1 for the winner and `-score / 50` for the rest.
    /// All zeros while the match is running.
    pub fn get_payoffs(&self) -> Vec<f64> {
        let n = self.config.num_players;
        match self.table.as_ref().and_then(|t| t.round.end()) {
            Some(RoundEnd::Early(_)) => vec![self.config.early_end_reward; n],
            Some(RoundEnd::Yaniv { scores, .. }) => scores
                .iter()
                .map(|&s| if s == 0 { 1.0 } else { -(f64::from(s) / 50.0) })
                .collect(),
            None => vec![0.0; n],
        }
    }

    pub fn get_legal_actions(&self) -> Vec<Action> {
        match &self.table {
            Some(t) => {
                let seat = t.round.current_player();
                t.round.legal_actions(t.players[seat].hand())
            }
            None => Vec::new(),
        }
    }

    /// Legal actions as vocabulary ids.
    pub fn legal_action_ids(&self) -> Result<Vec<usize>, GameError> {
        self.get_legal_actions()
            .iter()
            .map(|a| self.vocabulary.index_of_action(a))
            .collect()
    }

    pub fn num_players(&self) -> usize {
        self.config.num_players
    }

    pub fn action_num(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn current_player(&self) -> Option<usize> {
        self.table.as_ref().map(|t| t.round.current_player())
    }

    pub fn is_over(&self) -> bool {
        self.table.as_ref().is_some_and(|t| t.round.is_over())
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &ActionVocabulary {
        &self.vocabulary
    }

    pub fn round(&self) -> Option<&Round> {
        self.table.as_ref().map(|t| &t.round)
    }

    pub fn dealer(&self) -> Option<&Dealer> {
        self.table.as_ref().map(|t| &t.dealer)
    }

    pub fn players(&self) -> &[Player] {
        self.table.as_ref().map_or(&[][..], |t| t.players.as_slice())
    }

    fn table(&self) -> Result<&Table, GameError> {
        self.table.as_ref().ok_or(GameError::NotStarted)
    }
}
