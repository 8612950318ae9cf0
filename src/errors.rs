use thiserror::Error;
use uuid::Uuid;

use crate::combat::state::{BattlePhase, Side};

/// Failures while loading catalog or type chart data from disk
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Guard conditions checked before a transformation is applied.
/// Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("This Pokémon is already Mega Evolved!")]
    AlreadyTransformed,
    #[error("This Pokémon is not holding a Mega Stone!")]
    NoHeldItem,
    #[error("This item cannot trigger Mega Evolution!")]
    NoMatchingRecord { item: String },
}

#[derive(Debug, Error)]
pub enum BattleError {
    #[error("species {0} not found in catalog")]
    SpeciesNotFound(u32),
    #[error("{species} cannot learn {move_name}")]
    MoveNotLearnable { species: String, move_name: String },
    #[error("level {0} is outside 1-100")]
    InvalidLevel(u32),
    #[error("individual value {value} for {stat} is outside 0-31")]
    InvalidIv { stat: &'static str, value: u8 },
    #[error("a combatant needs 1-4 moves, got {0}")]
    InvalidMoveCount(usize),
    #[error("{side} already has {max} combatant(s)")]
    TeamFull { side: Side, max: usize },
    #[error("{0} has no combatants")]
    EmptyTeam(Side),
    #[error("battle is {actual:?}, expected {expected:?}")]
    WrongPhase { expected: BattlePhase, actual: BattlePhase },
    #[error("{side} has no combatant at index {index}")]
    InvalidCombatantIndex { side: Side, index: usize },
    #[error("{side}'s active combatant has no move at index {index}")]
    InvalidMoveIndex { side: Side, index: usize },
    #[error("battle {0} not found")]
    BattleNotFound(Uuid),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

pub type BattleResult<T> = Result<T, BattleError>;
