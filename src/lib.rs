// Re-export modules for external use
pub mod combat;
pub mod config;
pub mod errors;
pub mod monsters;
pub mod stats;

pub use combat::{BattleCommand, BattleManager, BattleState, BattleUpdate, Side};
pub use config::Config;
pub use errors::{BattleError, CatalogError, TransformError};
