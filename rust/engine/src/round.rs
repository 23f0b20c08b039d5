use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::actions::{hand_score, Action};
use crate::cards::Card;
use crate::dealer::Dealer;
use crate::errors::GameError;
use crate::player::Player;
use crate::rules::{can_call_yaniv, discard_actions, pickup_actions, ASSAF_PENALTY};
use crate::state::PlayerState;

/// Which half of a turn the current player is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Must discard a legal combination or call Yaniv
    Discarding,
    /// Must take a card from the previous discard or the draw pile
    PickingUp,
}

/// Why a match was cut short without a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EarlyEnd {
    StepLimit,
    DeckReplacementLimit,
}

/// How a round finished. Fixed once set, except that an early-end policy
/// may replace a Yaniv result reached on the same step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEnd {
    Yaniv {
        caller: usize,
        winner: usize,
        assaf: bool,
        /// Final per-seat scores; the winner's is 0
        scores: Vec<u32>,
    },
    Early(EarlyEnd),
}

/// The turn state machine for one round of Yaniv.
///
/// A `Round` does not own the dealer or the players; the caller lends them
/// to every operation so a whole table can be snapshotted as one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    num_players: usize,
    current_player: usize,
    phase: Phase,
    /// Discard events, oldest first; each keeps the order it was played in
    discard_pile: Vec<Vec<Card>>,
    /// Per seat, cards others saw that seat take from the discard pile
    known_cards: Vec<Vec<Card>>,
    deck_replacements: u32,
    end: Option<RoundEnd>,
}

impl Round {
    pub fn new(num_players: usize) -> Self {
        Self {
            num_players,
            current_player: 0,
            phase: Phase::Discarding,
            discard_pile: Vec::new(),
            known_cards: vec![Vec::new(); num_players],
            deck_replacements: 0,
            end: None,
        }
    }

    /// Seeds the discard pile with one card from the deck.
    pub fn flip_top_card(&mut self, dealer: &mut Dealer) -> Result<(), GameError> {
        let card = dealer.deal_card()?;
        self.discard_pile.push(vec![card]);
        Ok(())
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn next_player(&self) -> usize {
        (self.current_player + 1) % self.num_players
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_discarding(&self) -> bool {
        self.phase == Phase::Discarding
    }

    pub fn discard_pile(&self) -> &[Vec<Card>] {
        &self.discard_pile
    }

    pub fn known_cards(&self) -> &[Vec<Card>] {
        &self.known_cards
    }

    pub fn deck_replacements(&self) -> u32 {
        self.deck_replacements
    }

    pub fn is_over(&self) -> bool {
        self.end.is_some()
    }

    pub fn end(&self) -> Option<&RoundEnd> {
        self.end.as_ref()
    }

    /// Winning seat, or `None` while playing or after an early end.
    pub fn winner(&self) -> Option<usize> {
        match &self.end {
            Some(RoundEnd::Yaniv { winner, .. }) => Some(*winner),
            _ => None,
        }
    }

    pub fn scores(&self) -> Option<&[u32]> {
        match &self.end {
            Some(RoundEnd::Yaniv { scores, .. }) => Some(scores),
            _ => None,
        }
    }

    /// The event cards may be picked up from: the top event while
    /// discarding, the one beneath the fresh discard while picking up.
    fn pickup_event(&self) -> Option<usize> {
        let offset = match self.phase {
            Phase::Discarding => 1,
            Phase::PickingUp => 2,
        };
        self.discard_pile.len().checked_sub(offset)
    }

    /// The live ends of the pickup event (one card if it holds only one).
    pub fn available_discard(&self) -> Vec<Card> {
        self.pickup_event()
            .map(|i| live_ends(&self.discard_pile[i]))
            .unwrap_or_default()
    }

    /// Every discarded card that can no longer be picked up.
    pub fn dead_cards(&self) -> Vec<Card> {
        let live = self.available_discard();
        self.discard_pile
            .iter()
            .flatten()
            .filter(|c| !live.contains(c))
            .copied()
            .collect()
    }

    pub fn legal_actions(&self, hand: &[Card]) -> Vec<Action> {
        if self.is_over() {
            return Vec::new();
        }
        match self.phase {
            Phase::Discarding => discard_actions(hand),
            Phase::PickingUp => pickup_actions(),
        }
    }

    /// Applies `action` for the current player. Nothing changes on error.
    pub fn proceed(
        &mut self,
        dealer: &mut Dealer,
        players: &mut [Player],
        action: &Action,
    ) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::RoundOver);
        }
        let seat = self.current_player;
        if seat >= players.len() {
            return Err(GameError::InvalidPlayer(seat));
        }
        debug!(player = seat, action = %action, phase = ?self.phase, "applying action");

        match (self.phase, action) {
            (Phase::Discarding, Action::Yaniv) => {
                if !can_call_yaniv(players[seat].hand()) {
                    return Err(GameError::IllegalAction(action.to_string()));
                }
                self.resolve_yaniv(players);
            }
            (Phase::Discarding, Action::Discard(cards)) => {
                let player = &mut players[seat];
                if let Some(missing) = cards.iter().find(|c| !player.holds(c)) {
                    return Err(GameError::CardNotInHand(*missing));
                }
                if !discard_actions(player.hand()).contains(action) {
                    return Err(GameError::IllegalAction(action.to_string()));
                }
                player.remove_cards(cards)?;
                self.known_cards[seat].retain(|c| !cards.contains(c));
                self.discard_pile.push(cards.clone());
                self.phase = Phase::PickingUp;
            }
            (Phase::PickingUp, Action::PickupTopDiscard | Action::PickupBottomDiscard) => {
                let event = self
                    .pickup_event()
                    .filter(|&i| !self.discard_pile[i].is_empty())
                    .ok_or_else(|| GameError::IllegalAction(action.to_string()))?;
                let pile = &mut self.discard_pile[event];
                let card = if *action == Action::PickupTopDiscard {
                    pile.pop()
                } else {
                    Some(pile.remove(0))
                }
                .ok_or_else(|| GameError::IllegalAction(action.to_string()))?;
                players[seat].give_card(card);
                self.known_cards[seat].push(card);
                self.end_turn();
            }
            (Phase::PickingUp, Action::DrawCard) => {
                if dealer.is_empty() {
                    self.replace_deck(dealer)?;
                }
                let card = dealer.deal_card()?;
                players[seat].give_card(card);
                self.end_turn();
            }
            _ => return Err(GameError::IllegalAction(action.to_string())),
        }
        Ok(())
    }

    /// Marks the round over without a winner.
    pub fn force_end(&mut self, reason: EarlyEnd) {
        self.end = Some(RoundEnd::Early(reason));
    }

    /// Observation of the table from `player_id`'s seat.
    pub fn get_state(
        &self,
        dealer: &Dealer,
        players: &[Player],
        player_id: usize,
    ) -> Result<PlayerState, GameError> {
        let player = players
            .get(player_id)
            .ok_or(GameError::InvalidPlayer(player_id))?;
        let legal_actions = if player_id == self.current_player {
            self.legal_actions(player.hand())
        } else {
            Vec::new()
        };
        Ok(PlayerState {
            player_id,
            hand: player.hand().to_vec(),
            discard_pile: self.discard_pile.clone(),
            available_discard: self.available_discard(),
            dead_cards: self.dead_cards(),
            known_cards: self.known_cards.clone(),
            hand_sizes: players.iter().map(|p| p.hand().len()).collect(),
            deck_size: dealer.remaining(),
            legal_actions,
            current_player: self.current_player,
            num_players: self.num_players,
            phase: self.phase,
        })
    }

    fn end_turn(&mut self) {
        self.current_player = self.next_player();
        self.phase = Phase::Discarding;
    }

    /// Recycles every discarded card except the top event's live ends.
    fn replace_deck(&mut self, dealer: &mut Dealer) -> Result<(), GameError> {
        let keep = self.discard_pile.last().map(|e| live_ends(e)).unwrap_or_default();
        let recycled: Vec<Card> = self
            .discard_pile
            .iter()
            .flatten()
            .filter(|c| !keep.contains(c))
            .copied()
            .collect();
        if recycled.is_empty() {
            return Err(GameError::EmptyDeck);
        }
        self.discard_pile = if keep.is_empty() { Vec::new() } else { vec![keep] };
        let count = recycled.len();
        dealer.replace_deck(recycled);
        self.deck_replacements += 1;
        info!(
            recycled = count,
            replacements = self.deck_replacements,
            "draw pile replaced from discards"
        );
        Ok(())
    }

    fn resolve_yaniv(&mut self, players: &[Player]) {
        let caller = self.current_player;
        let mut scores: Vec<u32> = players.iter().map(|p| hand_score(p.hand())).collect();
        let caller_score = scores[caller];
        let assaf = scores
            .iter()
            .enumerate()
            .any(|(i, &s)| i != caller && s <= caller_score);

        let winner = if assaf {
            scores[caller] += ASSAF_PENALTY;
            let min = scores.iter().copied().min().unwrap_or(0);
            // nearest seat to the caller's right holding the minimum
            let mut seat = caller;
            while scores[seat] != min {
                seat = if seat == 0 { scores.len() - 1 } else { seat - 1 };
            }
            seat
        } else {
            caller
        };
        scores[winner] = 0;

        info!(caller, winner, assaf, scores = ?scores, "yaniv called");
        self.end = Some(RoundEnd::Yaniv {
            caller,
            winner,
            assaf,
            scores,
        });
    }
}

fn live_ends(event: &[Card]) -> Vec<Card> {
    match event {
        [] => Vec::new(),
        [only] => vec![*only],
        [first, .., last] => vec![*first, *last],
    }
}
