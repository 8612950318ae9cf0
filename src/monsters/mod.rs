pub mod monster;
pub mod monster_manager;
pub mod move_manager;

pub use monster::{Language, LocalizedNames, PokemonType, SpeciesRecord};
pub use monster_manager::{CatalogProvider, SpeciesRepository};
pub use move_manager::{LearnMethod, MoveCategory, MoveData};
