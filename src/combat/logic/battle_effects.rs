use tracing::debug;

use crate::combat::rng::RandomSource;
use crate::combat::state::{Combatant, StatusCondition};

pub const SLEEP_WAKE_CHANCE: f64 = 1.0 / 3.0;
pub const FREEZE_THAW_CHANCE: f64 = 1.0 / 5.0;
pub const FULL_PARALYSIS_CHANCE: f64 = 1.0 / 4.0;

/// Whether a combatant gets to use its move this turn.
/// Sleep, freeze and paralysis take one draw each call; other conditions never draw.
pub fn can_act(combatant: &Combatant, rng: &mut dyn RandomSource) -> bool {
    let acts = match combatant.status {
        Some(StatusCondition::Sleep) => rng.next_f64() < SLEEP_WAKE_CHANCE,
        Some(StatusCondition::Freeze) => rng.next_f64() < FREEZE_THAW_CHANCE,
        Some(StatusCondition::Paralysis) => rng.next_f64() >= FULL_PARALYSIS_CHANCE,
        Some(StatusCondition::Burn) | Some(StatusCondition::Poison) | None => return true,
    };
    debug!("{} status check ({:?}): acts = {}", combatant.name, combatant.status, acts);
    acts
}

/// End-of-turn damage from burn or poison. The caller applies it.
pub fn recurring_damage(combatant: &Combatant) -> u32 {
    match combatant.status {
        Some(StatusCondition::Burn) => combatant.max_hp / 16,
        Some(StatusCondition::Poison) => combatant.max_hp / 8,
        _ => 0,
    }
}

/// Speed used for turn order
pub fn effective_speed(combatant: &Combatant) -> u32 {
    match combatant.status {
        Some(StatusCondition::Paralysis) => combatant.calculated_stats.speed / 2,
        _ => combatant.calculated_stats.speed,
    }
}
