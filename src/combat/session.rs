use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::logic::process_turn;
use super::messages::{BattleCommand, BattleUpdate};
use super::rng::RandomSource;
use super::state::{BattleMode, BattlePhase, BattleState};
use super::type_chart::TypeChart;
use super::utils::build_combatant;
use crate::errors::{BattleError, BattleResult};
use crate::monsters::{CatalogProvider, Language};

/// Owns one battle and everything needed to advance it.
/// `handle` is the only way the battle state changes.
pub struct BattleSession {
    state: BattleState,
    catalog: Arc<dyn CatalogProvider>,
    type_chart: Arc<TypeChart>,
    rng: Box<dyn RandomSource>,
}

impl BattleSession {
    pub fn new(
        battle_id: Uuid,
        mode: BattleMode,
        language: Language,
        catalog: Arc<dyn CatalogProvider>,
        type_chart: Arc<TypeChart>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        BattleSession {
            state: BattleState::new(battle_id, mode, language),
            catalog,
            type_chart,
            rng,
        }
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn handle(&mut self, command: BattleCommand) -> BattleResult<BattleUpdate> {
        debug!("Battle {} handling {:?}", self.state.battle_id, command);
        let start = self.state.events.len();

        match command {
            BattleCommand::AddCombatant { side, member } => {
                let combatant = build_combatant(self.catalog.as_ref(), &member)?;
                let index = self.state.add_combatant(side, combatant)?;
                info!("Battle {}: added species {} to {} at {}", self.state.battle_id, member.species_id, side, index);
            }
            BattleCommand::RemoveCombatant { side, index } => {
                self.state.remove_combatant(side, index)?;
            }
            BattleCommand::Start => self.state.start()?,
            BattleCommand::SelectMove { side, move_index } => self.state.select_move(side, move_index)?,
            BattleCommand::ExecuteTurn => {
                if self.state.phase != BattlePhase::InProgress {
                    return Err(BattleError::WrongPhase {
                        expected: BattlePhase::InProgress,
                        actual: self.state.phase,
                    });
                }
                process_turn(&mut self.state, &self.type_chart, self.rng.as_mut());
            }
            BattleCommand::Transform { side, index } => self.state.transform(side, index)?,
            BattleCommand::Reset => {
                info!("Battle {} reset", self.state.battle_id);
                self.state = BattleState::new(self.state.battle_id, self.state.mode, self.state.language);
                return Ok(BattleUpdate::new(&self.state, Vec::new()));
            }
        }

        Ok(BattleUpdate::new(&self.state, self.state.events_since(start)))
    }
}
