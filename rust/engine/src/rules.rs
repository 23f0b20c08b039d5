use crate::actions::{hand_score, Action};
use crate::cards::Card;

/// Highest hand score that may call Yaniv.
pub const YANIV_THRESHOLD: u32 = 7;
/// Added to the caller's score when another player matches or beats it.
pub const ASSAF_PENALTY: u32 = 30;
/// Cards dealt to each player at the start of a round.
pub const INITIAL_HAND_SIZE: usize = 5;

/// Whether a hand is low enough to call Yaniv.
pub fn can_call_yaniv(hand: &[Card]) -> bool {
    hand_score(hand) <= YANIV_THRESHOLD
}

/// Enumerates every discard-phase action for `hand`.
///
/// The result lists, in order: `yaniv` when allowed, every single card in
/// hand order, rank groups by ascending rank, then straights by suit.
/// Card order inside each action is part of its identity.
///
/// # Examples
///
/// ```
/// use yaniv_engine::cards::Card;
/// use yaniv_engine::rules::discard_actions;
///
/// let hand: Vec<Card> = ["S2", "D2", "C2"].iter().map(|s| s.parse().unwrap()).collect();
/// let actions: Vec<String> = discard_actions(&hand).iter().map(|a| a.to_string()).collect();
/// assert_eq!(actions.len(), 10);
/// assert_eq!(actions[0], "yaniv");
/// assert!(actions.contains(&"C2D2S2".to_string()));
/// assert!(actions.contains(&"D2C2S2".to_string()));
/// ```
pub fn discard_actions(hand: &[Card]) -> Vec<Action> {
    let mut actions = Vec::new();
    if can_call_yaniv(hand) {
        actions.push(Action::Yaniv);
    }
    actions.extend(hand.iter().map(|&c| Action::Discard(vec![c])));

    let mut by_rank = hand.to_vec();
    by_rank.sort_by_key(|c| (c.rank, c.suit));
    for group in by_rank.chunk_by(|a, b| a.rank == b.rank) {
        actions.extend(rank_group_actions(group).into_iter().map(Action::Discard));
    }

    let mut by_suit = hand.to_vec();
    by_suit.sort_by_key(|c| (c.suit, c.rank));
    for suited in by_suit.chunk_by(|a, b| a.suit == b.suit) {
        for run in suited.chunk_by(|a, b| b.rank.index() == a.rank.index() + 1) {
            actions.extend(straight_actions(run).into_iter().map(Action::Discard));
        }
    }
    actions
}

/// Every pickup-phase action; the hand plays no part.
pub fn pickup_actions() -> Vec<Action> {
    Action::pickup_actions().to_vec()
}

/// Multi-card discards from cards of one rank, already sorted by suit.
///
/// Pairs keep their sorted order. Each triple appears three times, once
/// with each member in the middle. Each quad appears once per pair of
/// outer cards, with the remaining two spliced between them.
pub fn rank_group_actions(group: &[Card]) -> Vec<Vec<Card>> {
    let n = group.len();
    let mut out = Vec::new();
    if n < 2 {
        return out;
    }
    for i in 0..n {
        for j in i + 1..n {
            out.push(vec![group[i], group[j]]);
        }
    }
    if n >= 3 {
        for i in 0..n {
            for j in i + 1..n {
                for k in j + 1..n {
                    let (a, b, c) = (group[i], group[j], group[k]);
                    out.push(vec![b, a, c]);
                    out.push(vec![a, b, c]);
                    out.push(vec![a, c, b]);
                }
            }
        }
    }
    if n == 4 {
        for i in 0..n {
            for j in i + 1..n {
                let mut quad = vec![group[i]];
                quad.extend((0..n).filter(|&k| k != i && k != j).map(|k| group[k]));
                quad.push(group[j]);
                out.push(quad);
            }
        }
    }
    out
}

/// Straight discards from a maximal run of consecutive ranks in one suit,
/// ascending. Runs shorter than three yield nothing.
pub fn straight_actions(run: &[Card]) -> Vec<Vec<Card>> {
    let n = run.len();
    let mut out = Vec::new();
    if n < 3 {
        return out;
    }
    out.push(run.to_vec());
    if n >= 4 {
        out.push(run[0..3].to_vec());
        out.push(run[1..4].to_vec());
    }
    if n == 5 {
        out.push(run[2..5].to_vec());
        out.push(run[0..4].to_vec());
        out.push(run[1..5].to_vec());
    }
    out
}
