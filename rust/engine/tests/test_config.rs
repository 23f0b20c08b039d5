use std::env;
use std::io::Write;

use serial_test::serial;
use yaniv_engine::config::{self, GameConfig, ValueSource};
use yaniv_engine::errors::ConfigError;

const KEYS: [&str; 7] = [
    "YANIV_CONFIG",
    "YANIV_SEED",
    "YANIV_NUM_PLAYERS",
    "YANIV_ALLOW_STEP_BACK",
    "YANIV_END_AFTER_N_STEPS",
    "YANIV_END_AFTER_N_DECK_REPLACEMENTS",
    "YANIV_EARLY_END_REWARD",
];

/// Clears every `YANIV_*` key, applies `vars`, and restores the previous
/// environment when dropped.
struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn set(vars: &[(&str, &str)]) -> Self {
        let saved = KEYS.iter().map(|&k| (k, env::var(k).ok())).collect();
        for k in KEYS {
            env::remove_var(k);
        }
        for (k, v) in vars {
            env::set_var(k, v);
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (k, v) in &self.saved {
            match v {
                Some(val) => env::set_var(k, val),
                None => env::remove_var(k),
            }
        }
    }
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn defaults_without_sources() {
    let _env = EnvGuard::set(&[]);
    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config, GameConfig::default());
    assert_eq!(resolved.sources.num_players, ValueSource::Default);
    assert_eq!(resolved.sources.seed, ValueSource::Default);
}

#[test]
#[serial]
fn file_values_apply() {
    let file = config_file(
        "num_players = 4\nseed = 99\nallow_step_back = true\nend_after_n_steps = 500\n",
    );
    let path = file.path().to_string_lossy().into_owned();
    let _env = EnvGuard::set(&[("YANIV_CONFIG", &path)]);

    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config.num_players, 4);
    assert_eq!(resolved.config.seed, Some(99));
    assert!(resolved.config.allow_step_back);
    assert_eq!(resolved.config.end_after_n_steps, 500);
    assert_eq!(resolved.sources.num_players, ValueSource::File);
    assert_eq!(resolved.sources.early_end_reward, ValueSource::Default);
}

#[test]
#[serial]
fn env_overrides_file() {
    let file = config_file("num_players = 4\nseed = 99\n");
    let path = file.path().to_string_lossy().into_owned();
    let _env = EnvGuard::set(&[
        ("YANIV_CONFIG", &path),
        ("YANIV_SEED", "7"),
        ("YANIV_ALLOW_STEP_BACK", "yes"),
        ("YANIV_END_AFTER_N_DECK_REPLACEMENTS", "3"),
        ("YANIV_EARLY_END_REWARD", "-0.25"),
    ]);

    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config.seed, Some(7));
    assert_eq!(resolved.sources.seed, ValueSource::Env);
    assert_eq!(resolved.config.num_players, 4);
    assert_eq!(resolved.sources.num_players, ValueSource::File);
    assert!(resolved.config.allow_step_back);
    assert_eq!(resolved.config.end_after_n_deck_replacements, 3);
    assert_eq!(resolved.config.early_end_reward, -0.25);
}

#[test]
#[serial]
fn empty_env_values_are_ignored() {
    let _env = EnvGuard::set(&[("YANIV_NUM_PLAYERS", "")]);
    assert_eq!(config::load().unwrap().num_players, 2);
}

#[test]
#[serial]
fn bad_env_values_are_reported() {
    let _env = EnvGuard::set(&[("YANIV_SEED", "abc")]);
    let err = config::load().unwrap_err();
    assert!(err.to_string().contains("YANIV_SEED"));

    let _env = EnvGuard::set(&[("YANIV_ALLOW_STEP_BACK", "maybe")]);
    assert!(matches!(config::load(), Err(ConfigError::Invalid(_))));
}

#[test]
#[serial]
fn out_of_range_players_fail_validation() {
    let _env = EnvGuard::set(&[("YANIV_NUM_PLAYERS", "11")]);
    assert!(matches!(config::load(), Err(ConfigError::Invalid(_))));
}

#[test]
#[serial]
fn unknown_file_keys_are_rejected() {
    let file = config_file("num_players = 3\nblinds = 50\n");
    let path = file.path().to_string_lossy().into_owned();
    let _env = EnvGuard::set(&[("YANIV_CONFIG", &path)]);
    assert!(matches!(config::load(), Err(ConfigError::Parse(_))));
}

#[test]
#[serial]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml").to_string_lossy().into_owned();
    let _env = EnvGuard::set(&[("YANIV_CONFIG", &path)]);
    assert!(matches!(config::load(), Err(ConfigError::Io(_))));
}

#[test]
fn from_toml_str_validates() {
    assert!(matches!(
        GameConfig::from_toml_str("early_end_reward = nan\n"),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        GameConfig::from_toml_str("num_players = \"two\"\n"),
        Err(ConfigError::Parse(_))
    ));
}
