pub mod logic;
pub mod manager;
pub mod messages;
pub mod rng;
pub mod session;
pub mod state;
pub mod type_chart;
pub mod utils;

// Re-export key types
pub use manager::BattleManager;
pub use messages::{BattleCommand, BattleUpdate};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use session::BattleSession;
pub use state::{
    BattleEvent, BattleMode, BattlePhase, BattleSide, BattleState, Combatant, Side, StatusCondition,
    TransformSnapshot,
};
pub use type_chart::{effectiveness_text, DefensiveProfile, TypeChart};
pub use utils::{build_combatant, TeamMemberRequest};
