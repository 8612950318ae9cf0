pub mod battle_calculations;
pub mod battle_effects;
pub mod battle_turn;
pub mod mega_evolution;

// Re-export the main entry points
pub use battle_calculations::{calculate_damage, DamageResult};
pub use battle_turn::process_turn;
