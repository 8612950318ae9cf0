use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::combat::state::{Combatant, StatusCondition};
use crate::errors::{BattleError, BattleResult};
use crate::monsters::{CatalogProvider, MoveData};
use crate::stats::{IndividualValues, StatName, MAX_IV, MAX_LEVEL, MIN_LEVEL};

pub const MAX_MOVES: usize = 4;

/// A team slot as configured before battle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamMemberRequest {
    pub species_id: u32,
    pub level: u32,
    #[serde(default)]
    pub ivs: IndividualValues,
    #[serde(default)]
    pub held_item: Option<String>,
    pub moves: Vec<String>,
    #[serde(default)]
    pub status: Option<StatusCondition>,
}

impl TeamMemberRequest {
    pub fn new(species_id: u32, level: u32, moves: &[&str]) -> Self {
        TeamMemberRequest {
            species_id,
            level,
            ivs: IndividualValues::uniform(MAX_IV),
            held_item: None,
            moves: moves.iter().map(|m| m.to_string()).collect(),
            status: None,
        }
    }

    pub fn with_held_item(mut self, item: impl Into<String>) -> Self {
        self.held_item = Some(item.into());
        self
    }

    pub fn with_status(mut self, status: StatusCondition) -> Self {
        self.status = Some(status);
        self
    }
}

/// Validate a team slot against the catalog and enter it into battle
pub fn build_combatant(catalog: &dyn CatalogProvider, request: &TeamMemberRequest) -> BattleResult<Combatant> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&request.level) {
        return Err(BattleError::InvalidLevel(request.level));
    }
    for stat in StatName::ALL {
        let value = request.ivs.get(stat);
        if value > MAX_IV {
            return Err(BattleError::InvalidIv {
                stat: stat.label(),
                value,
            });
        }
    }
    if request.moves.is_empty() || request.moves.len() > MAX_MOVES {
        return Err(BattleError::InvalidMoveCount(request.moves.len()));
    }

    let species = catalog.species(request.species_id).ok_or_else(|| {
        warn!("Team member references unknown species {}", request.species_id);
        BattleError::SpeciesNotFound(request.species_id)
    })?;

    let moves = request
        .moves
        .iter()
        .map(|name| {
            species
                .find_move(name)
                .cloned()
                .ok_or_else(|| BattleError::MoveNotLearnable {
                    species: species.name.clone(),
                    move_name: name.clone(),
                })
        })
        .collect::<BattleResult<Vec<MoveData>>>()?;

    let held_item = request
        .held_item
        .as_ref()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty());

    Ok(Combatant::new(species, request.level, request.ivs.clone(), moves, held_item).with_status(request.status))
}
