//! Property tests for scoring, card ids and legal-action generation.

use std::collections::HashSet;

use proptest::prelude::*;
use yaniv_engine::actions::{hand_score, Action};
use yaniv_engine::cards::{card_from_id, card_id, full_deck, Card};
use yaniv_engine::config::GameConfig;
use yaniv_engine::game::Game;
use yaniv_engine::rules::{can_call_yaniv, discard_actions};
use yaniv_engine::vocab::ActionVocabulary;

/// A hand of one to five distinct cards in arbitrary order.
fn hand() -> impl Strategy<Value = Vec<Card>> {
    proptest::sample::subsequence(full_deck(), 1..=5).prop_shuffle()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: hand score is the sum of card scores, whatever the order
    #[test]
    fn prop_hand_score_is_order_free_sum(cards in hand()) {
        let expected: u32 = cards.iter().map(Card::score).sum();
        prop_assert_eq!(hand_score(&cards), expected);

        let mut reversed = cards.clone();
        reversed.reverse();
        prop_assert_eq!(hand_score(&reversed), expected);
    }

    #[test]
    fn prop_card_id_round_trips(id in 0usize..52) {
        let card = card_from_id(id).unwrap();
        prop_assert_eq!(card_id(card), id);
        prop_assert_eq!(card.to_string().parse::<Card>().unwrap(), card);
    }

    /// Property: every legal discard uses only held cards, each at most once,
    /// and is registered in the standard vocabulary
    #[test]
    fn prop_legal_discards_are_well_formed(cards in hand()) {
        let vocab = ActionVocabulary::standard();
        let actions = discard_actions(&cards);

        prop_assert_eq!(actions.contains(&Action::Yaniv), can_call_yaniv(&cards));
        for &c in &cards {
            prop_assert!(actions.contains(&Action::Discard(vec![c])));
        }

        let mut seen = HashSet::new();
        for action in &actions {
            let s = action.to_string();
            prop_assert!(seen.insert(s.clone()), "duplicate action {}", s);
            prop_assert!(vocab.index_of(&s).is_some(), "{} not in vocabulary", s);
            prop_assert_eq!(&s.parse::<Action>().unwrap(), action);

            let used = action.cards();
            let distinct: HashSet<&Card> = used.iter().collect();
            prop_assert_eq!(distinct.len(), used.len());
            prop_assert!(used.iter().all(|c| cards.contains(c)));
        }
    }

    /// Property: hand order changes only the listing order, never the set
    #[test]
    fn prop_legal_set_ignores_hand_order(cards in hand()) {
        let mut sorted = cards.clone();
        sorted.sort();
        let a: HashSet<Action> = discard_actions(&cards).into_iter().collect();
        let b: HashSet<Action> = discard_actions(&sorted).into_iter().collect();
        prop_assert_eq!(a, b);
    }

    /// Property: a seed fully determines the deal
    #[test]
    fn prop_same_seed_same_deal(seed in any::<u64>(), players in 2usize..=6) {
        let config = GameConfig { num_players: players, seed: Some(seed), ..GameConfig::default() };
        let mut a = Game::new(config.clone()).unwrap();
        let mut b = Game::new(config).unwrap();
        a.init_game().unwrap();
        b.init_game().unwrap();
        for seat in 0..players {
            prop_assert_eq!(a.get_state(seat).unwrap(), b.get_state(seat).unwrap());
        }

        let dealt: HashSet<Card> = a.players().iter().flat_map(|p| p.hand().iter().copied()).collect();
        prop_assert_eq!(dealt.len(), players * 5);
    }
}
