use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

use crate::combat::state::BattleMode;
use crate::monsters::Language;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub battle: BattleConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CatalogConfig {
    pub catalog_path: String,
    pub type_chart_path: Option<String>, // None uses the built-in chart
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BattleConfig {
    pub mode: BattleMode,
    pub language: Language,
    pub rng_seed: Option<u64>,
    pub demo_max_turns: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog: CatalogConfig {
                catalog_path: "resources/catalog.json".to_string(),
                type_chart_path: None,
            },
            battle: BattleConfig {
                mode: BattleMode::Single,
                language: Language::En,
                rng_seed: None,
                demo_max_turns: 50,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        // Load .env file if available
        dotenv::dotenv().ok();

        let config = Self::from_lookup(|key| env::var(key).ok());
        info!("Configuration loaded: {:?}", config);
        config
    }

    /// Build a config from an arbitrary key lookup, falling back to defaults
    /// for anything missing or unparseable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        // Catalog config
        if let Some(catalog_path) = lookup("CATALOG_PATH") {
            config.catalog.catalog_path = catalog_path;
        }

        if let Some(type_chart_path) = lookup("TYPE_CHART_PATH") {
            if !type_chart_path.trim().is_empty() {
                config.catalog.type_chart_path = Some(type_chart_path);
            }
        }

        // Battle config
        if let Some(mode) = lookup("BATTLE_MODE") {
            match BattleMode::from_label(&mode) {
                Some(mode) => config.battle.mode = mode,
                None => warn!("Unknown BATTLE_MODE {:?}, using {}", mode, config.battle.mode),
            }
        }

        if let Some(language) = lookup("BATTLE_LANGUAGE") {
            match Language::from_code(&language) {
                Some(language) => config.battle.language = language,
                None => warn!("Unknown BATTLE_LANGUAGE {:?}, using {:?}", language, config.battle.language),
            }
        }

        if let Some(seed) = lookup("BATTLE_RNG_SEED") {
            if let Ok(seed) = seed.trim().parse::<u64>() {
                config.battle.rng_seed = Some(seed);
            }
        }

        if let Some(max_turns) = lookup("DEMO_MAX_TURNS") {
            if let Ok(max_turns) = max_turns.trim().parse::<u32>() {
                config.battle.demo_max_turns = max_turns;
            }
        }

        config
    }
}
