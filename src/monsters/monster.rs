use serde::{Deserialize, Serialize};

use super::move_manager::MoveData;
use crate::stats::BaseStats;

/// Elemental types. Names that match none of the eighteen parse to `Unknown`,
/// which is neutral against and from everything.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Copy, PartialOrd, Ord)]
#[serde(from = "String", into = "String")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Steel,
    Dark,
    Fairy,
    Unknown,
}

impl PokemonType {
    pub const ALL: [PokemonType; 18] = [
        PokemonType::Normal,
        PokemonType::Fire,
        PokemonType::Water,
        PokemonType::Grass,
        PokemonType::Electric,
        PokemonType::Ice,
        PokemonType::Fighting,
        PokemonType::Poison,
        PokemonType::Ground,
        PokemonType::Flying,
        PokemonType::Psychic,
        PokemonType::Bug,
        PokemonType::Rock,
        PokemonType::Ghost,
        PokemonType::Dragon,
        PokemonType::Steel,
        PokemonType::Dark,
        PokemonType::Fairy,
    ];

    /// Case-insensitive lookup by type name
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "normal" => PokemonType::Normal,
            "fire" => PokemonType::Fire,
            "water" => PokemonType::Water,
            "grass" => PokemonType::Grass,
            "electric" => PokemonType::Electric,
            "ice" => PokemonType::Ice,
            "fighting" => PokemonType::Fighting,
            "poison" => PokemonType::Poison,
            "ground" => PokemonType::Ground,
            "flying" => PokemonType::Flying,
            "psychic" => PokemonType::Psychic,
            "bug" => PokemonType::Bug,
            "rock" => PokemonType::Rock,
            "ghost" => PokemonType::Ghost,
            "dragon" => PokemonType::Dragon,
            "steel" => PokemonType::Steel,
            "dark" => PokemonType::Dark,
            "fairy" => PokemonType::Fairy,
            _ => PokemonType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PokemonType::Normal => "normal",
            PokemonType::Fire => "fire",
            PokemonType::Water => "water",
            PokemonType::Grass => "grass",
            PokemonType::Electric => "electric",
            PokemonType::Ice => "ice",
            PokemonType::Fighting => "fighting",
            PokemonType::Poison => "poison",
            PokemonType::Ground => "ground",
            PokemonType::Flying => "flying",
            PokemonType::Psychic => "psychic",
            PokemonType::Bug => "bug",
            PokemonType::Rock => "rock",
            PokemonType::Ghost => "ghost",
            PokemonType::Dragon => "dragon",
            PokemonType::Steel => "steel",
            PokemonType::Dark => "dark",
            PokemonType::Fairy => "fairy",
            PokemonType::Unknown => "unknown",
        }
    }
}

impl From<String> for PokemonType {
    fn from(name: String) -> Self {
        PokemonType::from_name(&name)
    }
}

impl From<PokemonType> for String {
    fn from(pokemon_type: PokemonType) -> Self {
        pokemon_type.as_str().to_string()
    }
}

impl std::fmt::Display for PokemonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display languages the catalog carries names for
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
    Ar,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Language::En),
            "fr" => Some(Language::Fr),
            "ar" => Some(Language::Ar),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LocalizedNames {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub fr: String,
    #[serde(default)]
    pub ar: String,
}

impl LocalizedNames {
    /// Name in `language`, `None` when the catalog left it blank
    pub fn get(&self, language: Language) -> Option<&str> {
        let name = match language {
            Language::En => &self.en,
            Language::Fr => &self.fr,
            Language::Ar => &self.ar,
        };
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// One species as supplied by the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub translated_names: LocalizedNames,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub sprite_url: String,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub is_mythical: bool,
    #[serde(default)]
    pub is_paradox: bool,
    #[serde(default)]
    pub moves: Vec<MoveData>,
}

impl SpeciesRecord {
    /// Case-insensitive lookup in the learnable move list
    pub fn find_move(&self, move_name: &str) -> Option<&MoveData> {
        self.moves
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(move_name))
    }
}
