use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use holdem_engine::game::TableConfig;

/// Table profile driving a simulation. Resolution order is default < TOML
/// file < environment, with command-line flags applied on top by the
/// caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimConfig {
    pub max_players: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub min_buy_in: u32,
    pub max_buy_in: u32,
    /// Stack every simulated player sits down with
    pub buy_in: u32,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        let table = TableConfig::default();
        Self {
            max_players: table.max_players,
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            min_buy_in: table.min_buy_in,
            max_buy_in: table.max_buy_in,
            buy_in: 2_000,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn table_config(&self) -> TableConfig {
        TableConfig {
            max_players: self.max_players,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            min_buy_in: self.min_buy_in,
            max_buy_in: self.max_buy_in,
        }
    }
}

/// TOML shape: every key optional, absent keys keep their defaults.
#[derive(Debug, Deserialize)]
struct FileConfig {
    max_players: Option<usize>,
    small_blind: Option<u32>,
    big_blind: Option<u32>,
    min_buy_in: Option<u32>,
    max_buy_in: Option<u32>,
    buy_in: Option<u32>,
    seed: Option<u64>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config io: {}", e),
            ConfigError::Parse(e) => write!(f, "config parse: {}", e),
            ConfigError::Invalid(msg) => write!(f, "config invalid: {}", msg),
        }
    }
}

/// Load the profile. `path` wins over the `HOLDEM_CONFIG` env var; the
/// `HOLDEM_SEED` env var overrides the file's seed.
pub fn load(path: Option<&Path>) -> Result<SimConfig, ConfigError> {
    let mut cfg = SimConfig::default();

    let file = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var("HOLDEM_CONFIG").ok().map(PathBuf::from));
    if let Some(p) = file {
        apply_file(&mut cfg, &p)?;
    }

    if let Ok(seed) = std::env::var("HOLDEM_SEED") {
        if !seed.is_empty() {
            let parsed = seed
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid(format!("HOLDEM_SEED={} is not a u64", seed)))?;
            cfg.seed = Some(parsed);
        }
    }

    validate(&cfg)?;
    Ok(cfg)
}

fn apply_file(cfg: &mut SimConfig, path: &Path) -> Result<(), ConfigError> {
    let s = fs::read_to_string(path)?;
    let f: FileConfig = toml::from_str(&s)?;
    if let Some(v) = f.max_players {
        cfg.max_players = v;
    }
    if let Some(v) = f.small_blind {
        cfg.small_blind = v;
    }
    if let Some(v) = f.big_blind {
        cfg.big_blind = v;
    }
    if let Some(v) = f.min_buy_in {
        cfg.min_buy_in = v;
    }
    if let Some(v) = f.max_buy_in {
        cfg.max_buy_in = v;
    }
    if let Some(v) = f.buy_in {
        cfg.buy_in = v;
    }
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
    }
    Ok(())
}

fn validate(cfg: &SimConfig) -> Result<(), ConfigError> {
    if cfg.max_players < 2 {
        return Err(ConfigError::Invalid("max_players must be >= 2".into()));
    }
    if cfg.big_blind == 0 || cfg.small_blind > cfg.big_blind {
        return Err(ConfigError::Invalid(
            "blinds must satisfy 0 < small_blind <= big_blind".into(),
        ));
    }
    if cfg.min_buy_in > cfg.max_buy_in {
        return Err(ConfigError::Invalid(
            "min_buy_in must not exceed max_buy_in".into(),
        ));
    }
    if cfg.buy_in < cfg.min_buy_in || cfg.buy_in > cfg.max_buy_in {
        return Err(ConfigError::Invalid(format!(
            "buy_in {} outside {}..={}",
            cfg.buy_in, cfg.min_buy_in, cfg.max_buy_in
        )));
    }
    Ok(())
}
