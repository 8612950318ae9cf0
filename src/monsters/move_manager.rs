use serde::{Deserialize, Serialize};

use super::monster::PokemonType;

/// A move as listed in the catalog for a species
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct MoveData {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: PokemonType,
    pub power: Option<u32>,   // None for status moves
    pub accuracy: Option<u8>, // Carried for display, never rolled
    #[serde(default)]
    pub pp: u8,
    pub damage_class: MoveCategory,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub learn_method: LearnMethod,
    #[serde(default)]
    pub level_learned_at: u32,
}

impl MoveData {
    /// Moves without a power value never deal direct damage
    pub fn is_damaging(&self) -> bool {
        matches!(self.power, Some(power) if power > 0) && self.damage_class != MoveCategory::Status
    }

    /// Name as shown in battle log lines. Only the first hyphen becomes a
    /// space: `dragon-claw` -> `dragon claw`, `will-o-wisp` -> `will o-wisp`.
    pub fn display_name(&self) -> String {
        self.name.replacen('-', " ", 1)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "snake_case")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Copy, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LearnMethod {
    LevelUp,
    Machine,
    Egg,
    Tutor,
    #[default]
    #[serde(other)]
    Other,
}
