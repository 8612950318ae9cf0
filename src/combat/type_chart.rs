use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::CatalogError;
use crate::monsters::PokemonType;

use PokemonType::*;

/// Non-neutral entries of the attack-type table; anything absent is 1.
const STANDARD_CHART: &[(PokemonType, &[(PokemonType, f32)])] = &[
    (Normal, &[(Rock, 0.5), (Ghost, 0.0), (Steel, 0.5)]),
    (
        Fire,
        &[(Fire, 0.5), (Water, 0.5), (Grass, 2.0), (Ice, 2.0), (Bug, 2.0), (Rock, 0.5), (Dragon, 0.5), (Steel, 2.0)],
    ),
    (
        Water,
        &[(Fire, 2.0), (Water, 0.5), (Grass, 0.5), (Ground, 2.0), (Rock, 2.0), (Dragon, 0.5)],
    ),
    (
        Electric,
        &[(Water, 2.0), (Electric, 0.5), (Grass, 0.5), (Ground, 0.0), (Flying, 2.0), (Dragon, 0.5)],
    ),
    (
        Grass,
        &[
            (Fire, 0.5),
            (Water, 2.0),
            (Grass, 0.5),
            (Poison, 0.5),
            (Ground, 2.0),
            (Flying, 0.5),
            (Bug, 0.5),
            (Rock, 2.0),
            (Dragon, 0.5),
            (Steel, 0.5),
        ],
    ),
    (
        Ice,
        &[(Fire, 0.5), (Water, 0.5), (Grass, 2.0), (Ice, 0.5), (Ground, 2.0), (Flying, 2.0), (Dragon, 2.0), (Steel, 0.5)],
    ),
    (
        Fighting,
        &[
            (Normal, 2.0),
            (Ice, 2.0),
            (Poison, 0.5),
            (Flying, 0.5),
            (Psychic, 0.5),
            (Bug, 0.5),
            (Rock, 2.0),
            (Ghost, 0.0),
            (Dark, 2.0),
            (Steel, 2.0),
            (Fairy, 0.5),
        ],
    ),
    (
        Poison,
        &[(Grass, 2.0), (Poison, 0.5), (Ground, 0.5), (Rock, 0.5), (Ghost, 0.5), (Steel, 0.0), (Fairy, 2.0)],
    ),
    (
        Ground,
        &[(Fire, 2.0), (Electric, 2.0), (Grass, 0.5), (Poison, 2.0), (Flying, 0.0), (Bug, 0.5), (Rock, 2.0), (Steel, 2.0)],
    ),
    (
        Flying,
        &[(Electric, 0.5), (Grass, 2.0), (Fighting, 2.0), (Bug, 2.0), (Rock, 0.5), (Steel, 0.5)],
    ),
    (
        Psychic,
        &[(Fighting, 2.0), (Poison, 2.0), (Psychic, 0.5), (Dark, 0.0), (Steel, 0.5)],
    ),
    (
        Bug,
        &[
            (Fire, 0.5),
            (Grass, 2.0),
            (Fighting, 0.5),
            (Poison, 0.5),
            (Flying, 0.5),
            (Psychic, 2.0),
            (Ghost, 0.5),
            (Dark, 2.0),
            (Steel, 0.5),
            (Fairy, 0.5),
        ],
    ),
    (
        Rock,
        &[(Fire, 2.0), (Ice, 2.0), (Fighting, 0.5), (Ground, 0.5), (Flying, 2.0), (Bug, 2.0), (Steel, 0.5)],
    ),
    (Ghost, &[(Normal, 0.0), (Psychic, 2.0), (Ghost, 2.0), (Dark, 0.5)]),
    (Dragon, &[(Dragon, 2.0), (Steel, 0.5), (Fairy, 0.0)]),
    (
        Dark,
        &[(Fighting, 0.5), (Psychic, 2.0), (Ghost, 2.0), (Dark, 0.5), (Fairy, 0.5)],
    ),
    (
        Steel,
        &[(Fire, 0.5), (Water, 0.5), (Electric, 0.5), (Ice, 2.0), (Rock, 2.0), (Steel, 0.5), (Fairy, 2.0)],
    ),
    (
        Fairy,
        &[(Fire, 0.5), (Fighting, 2.0), (Poison, 0.5), (Dragon, 2.0), (Dark, 2.0), (Steel, 0.5)],
    ),
];

/// Attacking type -> defending type -> multiplier. Sparse: absent pairs are neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTypeChart", into = "RawTypeChart")]
pub struct TypeChart {
    entries: HashMap<PokemonType, HashMap<PokemonType, f32>>,
}

/// Chart as written on disk, keyed by type name
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct RawTypeChart(HashMap<String, HashMap<String, f32>>);

impl From<RawTypeChart> for TypeChart {
    // Unknown types stay neutral, so rows and columns naming them are dropped
    fn from(raw: RawTypeChart) -> Self {
        let mut entries = HashMap::new();
        for (attacking_name, row) in raw.0 {
            let attacking = PokemonType::from_name(&attacking_name);
            if attacking == Unknown {
                warn!("Ignoring type chart row for unknown type '{}'", attacking_name);
                continue;
            }
            let mut parsed = HashMap::new();
            for (defending_name, multiplier) in row {
                let defending = PokemonType::from_name(&defending_name);
                if defending == Unknown {
                    warn!(
                        "Ignoring type chart entry {} -> unknown type '{}'",
                        attacking_name, defending_name
                    );
                    continue;
                }
                parsed.insert(defending, multiplier);
            }
            entries.insert(attacking, parsed);
        }
        TypeChart { entries }
    }
}

impl From<TypeChart> for RawTypeChart {
    fn from(chart: TypeChart) -> Self {
        let entries = chart
            .entries
            .into_iter()
            .map(|(attacking, row)| {
                let row = row
                    .into_iter()
                    .map(|(defending, multiplier)| (defending.as_str().to_string(), multiplier))
                    .collect();
                (attacking.as_str().to_string(), row)
            })
            .collect();
        RawTypeChart(entries)
    }
}

impl Default for TypeChart {
    fn default() -> Self {
        Self::standard()
    }
}

impl TypeChart {
    pub fn standard() -> Self {
        let entries = STANDARD_CHART
            .iter()
            .map(|(attacking, row)| (*attacking, row.iter().copied().collect()))
            .collect();
        TypeChart { entries }
    }

    /// Load a chart override from a JSON file with the same sparse shape
    pub fn from_path(path: &str) -> Result<Self, CatalogError> {
        let file = File::open(Path::new(path)).map_err(|source| CatalogError::Io {
            path: path.to_string(),
            source,
        })?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|source| CatalogError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Use the override at `path` if one is configured and readable
    pub fn load_or_standard(path: Option<&str>) -> Self {
        let Some(path) = path else {
            return Self::standard();
        };
        match Self::from_path(path) {
            Ok(chart) => {
                info!("Loaded type chart with {} attacking types from {}", chart.entries.len(), path);
                chart
            }
            Err(e) => {
                warn!("Falling back to the built-in type chart: {}", e);
                Self::standard()
            }
        }
    }

    /// Multiplier of one attacking type against one defending type
    pub fn effectiveness(&self, attacking: PokemonType, defending: PokemonType) -> f32 {
        self.entries
            .get(&attacking)
            .and_then(|row| row.get(&defending))
            .copied()
            .unwrap_or(1.0)
    }

    /// Product over every defending type
    pub fn combined(&self, attacking: PokemonType, defending: &[PokemonType]) -> f32 {
        defending
            .iter()
            .map(|defending_type| self.effectiveness(attacking, *defending_type))
            .product()
    }

    /// Bucket every attacking type by how it fares against `defending`
    pub fn defensive_profile(&self, defending: &[PokemonType]) -> DefensiveProfile {
        let mut profile = DefensiveProfile::default();
        for attacking in PokemonType::ALL {
            let multiplier = self.combined(attacking, defending);
            if multiplier == 0.0 {
                profile.immune.push(attacking);
            } else if multiplier >= 4.0 {
                profile.quadruple.push(attacking);
            } else if multiplier >= 2.0 {
                profile.double.push(attacking);
            } else if multiplier <= 0.25 {
                profile.quarter.push(attacking);
            } else if multiplier < 1.0 {
                profile.half.push(attacking);
            }
        }
        profile
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefensiveProfile {
    pub quadruple: Vec<PokemonType>,
    pub double: Vec<PokemonType>,
    pub half: Vec<PokemonType>,
    pub quarter: Vec<PokemonType>,
    pub immune: Vec<PokemonType>,
}

/// Battle log note for a non-neutral multiplier
pub fn effectiveness_text(multiplier: f32) -> Option<&'static str> {
    if multiplier == 0.0 {
        Some("It has no effect...")
    } else if multiplier < 1.0 {
        Some("It's not very effective...")
    } else if multiplier > 1.0 {
        Some("It's super effective!")
    } else {
        None
    }
}
