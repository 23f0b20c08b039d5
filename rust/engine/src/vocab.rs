//! The fixed action vocabulary: a bidirectional map between action strings
//! and the integer ids external agents are trained against.
//!
//! Discard actions take ids `0..n` in source order; `pickup_top_discard`,
//! `pickup_bottom_discard`, `draw_card` and `yaniv` follow as `n..n + 4`.
//! Changing the source order changes every id.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use serde_json::Value;

use crate::actions::{action_string, hand_score, Action, PICKUP_ACTIONS, YANIV};
use crate::cards::{all_ranks, all_suits, full_deck, Card};
use crate::errors::GameError;
use crate::rules::{rank_group_actions, straight_actions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionVocabulary {
    actions: Vec<String>,
    index: HashMap<String, usize>,
    discard_count: usize,
}

impl ActionVocabulary {
    /// The built-in vocabulary, generated once per process.
    pub fn standard() -> &'static ActionVocabulary {
        static STANDARD: OnceLock<ActionVocabulary> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Self::from_discard_actions(standard_discard_actions())
                .expect("generated discard actions are unique and well formed")
        })
    }

    /// Builds the map from an ordered list of discard action strings.
    pub fn from_discard_actions<I, S>(discards: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut actions: Vec<String> = Vec::new();
        let mut index = HashMap::new();
        for key in discards {
            let key = key.into();
            match key.parse::<Action>() {
                Ok(Action::Discard(_)) => {}
                _ => {
                    return Err(GameError::Vocabulary(format!(
                        "{key:?} is not a discard action"
                    )))
                }
            }
            if index.insert(key.clone(), actions.len()).is_some() {
                return Err(GameError::Vocabulary(format!("duplicate action {key:?}")));
            }
            actions.push(key);
        }
        let discard_count = actions.len();
        for name in PICKUP_ACTIONS.iter().chain(std::iter::once(&YANIV)) {
            index.insert(name.to_string(), actions.len());
            actions.push(name.to_string());
        }
        Ok(Self {
            actions,
            index,
            discard_count,
        })
    }

    /// Parses the external discard-action file.
    ///
    /// Accepts either a JSON object whose key order defines the ids (values
    /// are ignored) or a JSON array of action strings.
    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| GameError::Vocabulary(e.to_string()))?;
        match value {
            Value::Object(map) => Self::from_discard_actions(map.into_iter().map(|(k, _)| k)),
            Value::Array(items) => {
                let keys = items
                    .into_iter()
                    .map(|v| match v {
                        Value::String(s) => Ok(s),
                        other => Err(GameError::Vocabulary(format!(
                            "expected action string, found {other}"
                        ))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::from_discard_actions(keys)
            }
            _ => Err(GameError::Vocabulary(
                "expected a JSON object or array".to_string(),
            )),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            GameError::Vocabulary(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Total number of actions, discards plus the four named ones.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn discard_count(&self) -> usize {
        self.discard_count
    }

    pub fn index_of(&self, action: &str) -> Option<usize> {
        self.index.get(action).copied()
    }

    pub fn index_of_action(&self, action: &Action) -> Result<usize, GameError> {
        let key = action.to_string();
        self.index_of(&key).ok_or(GameError::UnknownAction(key))
    }

    pub fn action(&self, index: usize) -> Option<&str> {
        self.actions.get(index).map(String::as_str)
    }

    /// Decodes an id back into an [`Action`].
    pub fn decode(&self, index: usize) -> Result<Action, GameError> {
        self.action(index)
            .ok_or_else(|| GameError::UnknownAction(index.to_string()))?
            .parse()
    }

    /// Score of the cards named by a registered discard action.
    pub fn discard_score(&self, action: &str) -> Result<u32, GameError> {
        match self.index_of(action) {
            Some(i) if i < self.discard_count => match action.parse::<Action>()? {
                Action::Discard(cards) => Ok(hand_score(&cards)),
                _ => Err(GameError::UnknownAction(action.to_string())),
            },
            _ => Err(GameError::UnknownAction(action.to_string())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(String::as_str)
    }
}

/// Every discard the rules can produce: singles by card id, then per rank
/// the pair/triple/quad renderings, then per suit every straight window.
fn standard_discard_actions() -> Vec<String> {
    let mut out: Vec<String> = full_deck().iter().map(Card::to_string).collect();

    for rank in all_ranks() {
        let mut group: Vec<Card> = all_suits().iter().map(|&s| Card::new(s, rank)).collect();
        group.sort();
        out.extend(rank_group_actions(&group).iter().map(|c| action_string(c)));
    }

    for suit in all_suits() {
        let run: Vec<Card> = all_ranks().iter().map(|&r| Card::new(suit, r)).collect();
        for len in 3..=5 {
            for window in run.windows(len) {
                out.push(action_string(window));
            }
        }
    }
    out
}
