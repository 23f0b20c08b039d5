//! Game configuration: defaults, then a TOML file named by `YANIV_CONFIG`,
//! then `YANIV_*` environment overrides.

use serde::{Deserialize, Serialize};
use std::fs;

use crate::errors::ConfigError;

pub const MIN_PLAYERS: usize = 2;
/// Five cards per seat plus the flipped card must fit in one deck.
pub const MAX_PLAYERS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub num_players: usize,
    /// Master seed; `None` uses a fixed default so runs stay reproducible
    pub seed: Option<u64>,
    /// Keep a snapshot per step so `Game::step_back` can undo it
    pub allow_step_back: bool,
    /// 0 = unlimited
    pub end_after_n_deck_replacements: u32,
    /// 0 = unlimited
    pub end_after_n_steps: usize,
    /// Payoff given to every seat when a limit ends the match
    pub early_end_reward: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: 2,
            seed: None,
            allow_step_back: false,
            end_after_n_deck_replacements: 0,
            end_after_n_steps: 0,
            early_end_reward: 0.0,
        }
    }
}

impl GameConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let f: FileConfig = toml::from_str(s)?;
        let mut cfg = GameConfig::default();
        f.apply(&mut cfg, &mut ConfigSources::default());
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players) {
            return Err(ConfigError::Invalid(format!(
                "num_players must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {}",
                self.num_players
            )));
        }
        if !self.early_end_reward.is_finite() {
            return Err(ConfigError::Invalid(
                "early_end_reward must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub num_players: ValueSource,
    pub seed: ValueSource,
    pub allow_step_back: ValueSource,
    pub end_after_n_deck_replacements: ValueSource,
    pub end_after_n_steps: ValueSource,
    pub early_end_reward: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            num_players: ValueSource::Default,
            seed: ValueSource::Default,
            allow_step_back: ValueSource::Default,
            end_after_n_deck_replacements: ValueSource::Default,
            end_after_n_steps: ValueSource::Default,
            early_end_reward: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: GameConfig,
    pub sources: ConfigSources,
}

pub fn load() -> Result<GameConfig, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = GameConfig::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("YANIV_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        f.apply(&mut cfg, &mut sources);
    }

    if let Some(v) = env_value("YANIV_SEED") {
        cfg.seed = Some(parse_env("YANIV_SEED", &v)?);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("YANIV_NUM_PLAYERS") {
        cfg.num_players = parse_env("YANIV_NUM_PLAYERS", &v)?;
        sources.num_players = ValueSource::Env;
    }
    if let Some(v) = env_value("YANIV_ALLOW_STEP_BACK") {
        cfg.allow_step_back = parse_bool(&v)
            .ok_or_else(|| ConfigError::Invalid("Invalid YANIV_ALLOW_STEP_BACK".into()))?;
        sources.allow_step_back = ValueSource::Env;
    }
    if let Some(v) = env_value("YANIV_END_AFTER_N_STEPS") {
        cfg.end_after_n_steps = parse_env("YANIV_END_AFTER_N_STEPS", &v)?;
        sources.end_after_n_steps = ValueSource::Env;
    }
    if let Some(v) = env_value("YANIV_END_AFTER_N_DECK_REPLACEMENTS") {
        cfg.end_after_n_deck_replacements =
            parse_env("YANIV_END_AFTER_N_DECK_REPLACEMENTS", &v)?;
        sources.end_after_n_deck_replacements = ValueSource::Env;
    }
    if let Some(v) = env_value("YANIV_EARLY_END_REWARD") {
        cfg.early_end_reward = parse_env("YANIV_EARLY_END_REWARD", &v)?;
        sources.early_end_reward = ValueSource::Env;
    }

    cfg.validate()?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    num_players: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    allow_step_back: Option<bool>,
    #[serde(default)]
    end_after_n_deck_replacements: Option<u32>,
    #[serde(default)]
    end_after_n_steps: Option<usize>,
    #[serde(default)]
    early_end_reward: Option<f64>,
}

impl FileConfig {
    fn apply(self, cfg: &mut GameConfig, sources: &mut ConfigSources) {
        if let Some(v) = self.num_players {
            cfg.num_players = v;
            sources.num_players = ValueSource::File;
        }
        if let Some(v) = self.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = self.allow_step_back {
            cfg.allow_step_back = v;
            sources.allow_step_back = ValueSource::File;
        }
        if let Some(v) = self.end_after_n_deck_replacements {
            cfg.end_after_n_deck_replacements = v;
            sources.end_after_n_deck_replacements = ValueSource::File;
        }
        if let Some(v) = self.end_after_n_steps {
            cfg.end_after_n_steps = v;
            sources.end_after_n_steps = ValueSource::File;
        }
        if let Some(v) = self.early_end_reward {
            cfg.early_end_reward = v;
            sources.early_end_reward = ValueSource::File;
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {key}: {value:?}")))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
