use tracing::{debug, warn};

use super::battle_calculations::calculate_damage;
use super::battle_effects::{can_act, effective_speed, recurring_damage};
use crate::combat::rng::RandomSource;
use crate::combat::state::{BattleEvent, BattlePhase, BattleState, Side};
use crate::combat::type_chart::TypeChart;

/// Resolve one full turn from both sides' move selections.
///
/// Invalid input (battle not in progress, a selection missing or out of
/// range) leaves the state untouched and returns no events.
pub fn process_turn(
    battle_state: &mut BattleState,
    type_chart: &TypeChart,
    rng: &mut dyn RandomSource,
) -> Vec<BattleEvent> {
    if battle_state.phase != BattlePhase::InProgress {
        warn!("Ignoring turn for battle {}: phase is {:?}", battle_state.battle_id, battle_state.phase);
        return Vec::new();
    }
    if !selections_valid(battle_state) {
        warn!("Ignoring turn for battle {}: move selections incomplete", battle_state.battle_id);
        return Vec::new();
    }

    let start = battle_state.events.len();
    battle_state.record(BattleEvent::TurnStart {
        turn_number: battle_state.turn_number,
    });

    // --- 1. Determine turn order (ties go to side 1) ---
    let speed1 = battle_state.active(Side::One).map_or(0, effective_speed);
    let speed2 = battle_state.active(Side::Two).map_or(0, effective_speed);
    let first = if speed1 >= speed2 { Side::One } else { Side::Two };
    debug!("Turn {}: speed {} vs {}, {} moves first", battle_state.turn_number, speed1, speed2, first);

    // --- 2. Execute moves; a faint forfeits the second move ---
    for attacker in [first, first.opponent()] {
        execute_move(battle_state, attacker, type_chart, rng);
        if check_faint(battle_state, attacker.opponent()) {
            break;
        }
    }

    // --- 3. End of turn status damage ---
    if !battle_state.is_concluded() {
        apply_end_of_turn_effects(battle_state);
    }

    battle_state.clear_selections();
    // Counts turns played, so it stops at the deciding turn
    if !battle_state.is_concluded() {
        battle_state.turn_number += 1;
    }
    battle_state.events_since(start)
}

fn selections_valid(battle_state: &BattleState) -> bool {
    Side::BOTH.iter().all(|side| {
        match (battle_state.selection(*side), battle_state.active(*side)) {
            (Some(index), Some(combatant)) => index < combatant.moves.len() && !combatant.is_fainted(),
            _ => false,
        }
    })
}

fn execute_move(
    battle_state: &mut BattleState,
    attacker_side: Side,
    type_chart: &TypeChart,
    rng: &mut dyn RandomSource,
) {
    let language = battle_state.language;
    let defender_side = attacker_side.opponent();
    let (Some(attacker), Some(defender)) = (battle_state.active(attacker_side), battle_state.active(defender_side))
    else {
        return;
    };
    let attacker_name = attacker.display_name(language);

    if !can_act(attacker, rng) {
        let status = attacker.status;
        battle_state.record(BattleEvent::UnableToMove {
            side: attacker_side,
            name: attacker_name,
            status,
        });
        return;
    }

    let Some(move_data) = battle_state
        .selection(attacker_side)
        .and_then(|index| attacker.moves.get(index))
    else {
        return;
    };
    let result = calculate_damage(attacker, defender, move_data, type_chart, rng);
    let move_name = move_data.display_name();
    let damaging = move_data.is_damaging();
    let defender_name = defender.display_name(language);

    battle_state.record(BattleEvent::MoveUsed {
        side: attacker_side,
        name: attacker_name,
        move_name,
    });
    if !damaging {
        return;
    }
    if result.critical && result.damage > 0 {
        battle_state.record(BattleEvent::CriticalHit { side: attacker_side });
    }
    if result.effectiveness != 1.0 {
        battle_state.record(BattleEvent::Effectiveness {
            target: defender_side,
            multiplier: result.effectiveness,
        });
    }
    if result.damage == 0 {
        return;
    }

    let Some(defender) = battle_state.active_mut(defender_side) else {
        return;
    };
    let new_hp = defender.take_damage(result.damage);
    let max_hp = defender.max_hp;
    battle_state.record(BattleEvent::DamageDealt {
        target: defender_side,
        name: defender_name,
        damage: result.damage,
        new_hp,
        max_hp,
    });
}

/// Conclude the battle if `side`'s active combatant is down. Returns whether it was.
fn check_faint(battle_state: &mut BattleState, side: Side) -> bool {
    let language = battle_state.language;
    let Some(combatant) = battle_state.active(side) else {
        return false;
    };
    if !combatant.is_fainted() {
        return false;
    }
    let name = combatant.display_name(language);
    battle_state.record(BattleEvent::Fainted { side, name });
    battle_state.conclude(side.opponent());
    true
}

/// Burn and poison damage, side 1 first. A faint here also ends the battle.
fn apply_end_of_turn_effects(battle_state: &mut BattleState) {
    let language = battle_state.language;
    for side in Side::BOTH {
        let Some(combatant) = battle_state.active_mut(side) else {
            continue;
        };
        let damage = recurring_damage(combatant);
        let Some(status) = combatant.status.filter(|_| damage > 0) else {
            continue;
        };
        let new_hp = combatant.take_damage(damage);
        let max_hp = combatant.max_hp;
        let name = combatant.display_name(language);

        battle_state.record(BattleEvent::StatusDamage {
            target: side,
            name,
            status,
            damage,
            new_hp,
            max_hp,
        });
        if check_faint(battle_state, side) {
            break;
        }
    }
}
