use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::{BattleEvent, BattlePhase, BattleState, Side};
use super::utils::TeamMemberRequest;

/// User intents forwarded to a battle session
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleCommand {
    /// Add a configured team member while the battle has not started
    AddCombatant { side: Side, member: TeamMemberRequest },
    RemoveCombatant { side: Side, index: usize },
    Start,
    SelectMove { side: Side, move_index: usize },
    /// Resolve one turn from both selections
    ExecuteTurn,
    /// Mega evolve the team member at `index`
    Transform { side: Side, index: usize },
    /// Discard the battle and begin team building again
    Reset,
}

/// Result of a command: the state after it ran plus whatever it produced
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleUpdate {
    pub battle_id: Uuid,
    pub phase: BattlePhase,
    pub winner: Option<Side>,
    pub events: Vec<BattleEvent>,
    pub state: BattleState,
}

impl BattleUpdate {
    pub fn new(state: &BattleState, events: Vec<BattleEvent>) -> Self {
        BattleUpdate {
            battle_id: state.battle_id,
            phase: state.phase,
            winner: state.winner,
            events,
            state: state.clone(),
        }
    }

    /// Log lines for just this update's events
    pub fn log_lines(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::log_line).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_use_tagged_json() {
        let command: BattleCommand =
            serde_json::from_str(r#"{ "type": "select_move", "side": "two", "move_index": 2 }"#).unwrap();
        assert_eq!(command, BattleCommand::SelectMove { side: Side::Two, move_index: 2 });

        let json = serde_json::to_string(&BattleCommand::ExecuteTurn).unwrap();
        assert_eq!(json, r#"{"type":"execute_turn"}"#);
    }

    #[test]
    fn add_combatant_accepts_sparse_member() {
        let command: BattleCommand = serde_json::from_str(
            r#"{ "type": "add_combatant", "side": "one", "member": { "species_id": 6, "level": 50, "moves": ["flamethrower"] } }"#,
        )
        .unwrap();
        let BattleCommand::AddCombatant { side, member } = command else {
            panic!("expected add_combatant");
        };
        assert_eq!(side, Side::One);
        assert_eq!(member.held_item, None);
        assert_eq!(member.ivs.attack, 0);
    }
}
