use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

use crate::combat::logic::mega_evolution;
use crate::errors::{BattleError, BattleResult, TransformError};
use crate::monsters::{Language, LocalizedNames, MoveData, PokemonType, SpeciesRecord};
use crate::stats::{calculate_stats, BaseStats, CalculatedStats, IndividualValues};

/// One of the two sides of a battle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    pub fn opponent(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::One => f.write_str("side 1"),
            Side::Two => f.write_str("side 2"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum BattleMode {
    #[default]
    #[serde(rename = "1v1")]
    Single,
    #[serde(rename = "2v2")]
    Double,
}

impl BattleMode {
    /// Combatants allowed per side
    pub fn max_team_size(self) -> usize {
        match self {
            BattleMode::Single => 1,
            BattleMode::Double => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BattleMode::Single => "1v1",
            BattleMode::Double => "2v2",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "1v1" => Some(BattleMode::Single),
            "2v2" => Some(BattleMode::Double),
            _ => None,
        }
    }
}

impl fmt::Display for BattleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle of a battle. There is no way back out of `Concluded`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    NotStarted,
    InProgress,
    Concluded,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Copy)]
#[serde(rename_all = "snake_case")]
pub enum StatusCondition {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    Sleep,
}

impl StatusCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCondition::Burn => "burn",
            StatusCondition::Freeze => "freeze",
            StatusCondition::Paralysis => "paralysis",
            StatusCondition::Poison => "poison",
            StatusCondition::Sleep => "sleep",
        }
    }
}

impl fmt::Display for StatusCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a transformation replaced, kept so it can be undone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformSnapshot {
    pub calculated_stats: CalculatedStats,
    pub pokemon_types: Vec<PokemonType>,
    pub sprite_url: String,
}

/// A creature entered into battle with all its dynamic state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Combatant {
    // Identity
    pub species_id: u32,
    pub name: String,
    pub translated_names: LocalizedNames,
    pub level: u32,
    pub sprite_url: String,

    // Stats
    pub base_stats: BaseStats,
    pub ivs: IndividualValues,
    pub calculated_stats: CalculatedStats, // Effective stats, fixed at entry unless transformed
    pub max_hp: u32,
    pub current_hp: u32,

    pub moves: Vec<MoveData>,
    pub pokemon_types: Vec<PokemonType>,
    pub held_item: Option<String>,
    pub status: Option<StatusCondition>,

    // Transformation
    pub is_transformed: bool,
    pub transformed_form: Option<String>,
    pub snapshot: Option<TransformSnapshot>,
}

impl Combatant {
    /// Enter a species into battle, deriving its effective stats once
    pub fn new(
        species: &SpeciesRecord,
        level: u32,
        ivs: IndividualValues,
        moves: Vec<MoveData>,
        held_item: Option<String>,
    ) -> Self {
        let calculated_stats = calculate_stats(&species.base_stats, level, &ivs);
        let max_hp = calculated_stats.hp;
        Combatant {
            species_id: species.id,
            name: species.name.clone(),
            translated_names: species.translated_names.clone(),
            level,
            sprite_url: species.sprite_url.clone(),
            base_stats: species.base_stats.clone(),
            ivs,
            calculated_stats,
            max_hp,
            current_hp: max_hp,
            moves,
            pokemon_types: species.types.clone(),
            held_item,
            status: None,
            is_transformed: false,
            transformed_form: None,
            snapshot: None,
        }
    }

    pub fn with_status(mut self, status: Option<StatusCondition>) -> Self {
        self.status = status;
        self
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Subtract damage, clamping at zero. Returns the new health.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        self.current_hp = self.current_hp.saturating_sub(damage);
        self.current_hp
    }

    /// Localized name, or the capitalized canonical name when the catalog has none
    pub fn display_name(&self, language: Language) -> String {
        match self.translated_names.get(language) {
            Some(name) => name.to_string(),
            None => capitalize(&self.name),
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One side's team and which member is currently fighting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BattleSide {
    pub name: String,
    pub team: Vec<Combatant>,
    pub active_index: usize,
}

impl BattleSide {
    pub fn new(name: impl Into<String>) -> Self {
        BattleSide {
            name: name.into(),
            team: Vec::new(),
            active_index: 0,
        }
    }

    pub fn active(&self) -> Option<&Combatant> {
        self.team.get(self.active_index)
    }

    pub fn active_mut(&mut self) -> Option<&mut Combatant> {
        self.team.get_mut(self.active_index)
    }
}

/// Event that occurs during battle, for clients that want more than log text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event_type", content = "details", rename_all = "snake_case")]
pub enum BattleEvent {
    BattleStarted,
    TurnStart { turn_number: u32 },
    MoveUsed { side: Side, name: String, move_name: String },
    CriticalHit { side: Side },
    Effectiveness { target: Side, multiplier: f32 },
    DamageDealt { target: Side, name: String, damage: u32, new_hp: u32, max_hp: u32 },
    UnableToMove { side: Side, name: String, status: Option<StatusCondition> },
    StatusDamage { target: Side, name: String, status: StatusCondition, damage: u32, new_hp: u32, max_hp: u32 },
    Fainted { side: Side, name: String },
    Transformed { side: Side, name: String, item: String, form: String },
    BattleEnded { winner: Side, winner_name: String },
}

impl BattleEvent {
    /// Human-readable line for the battle log, if the event has one
    pub fn log_line(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted => Some("Battle started!".to_string()),
            BattleEvent::TurnStart { .. } => None,
            BattleEvent::MoveUsed { name, move_name, .. } => Some(format!("{} used {}!", name, move_name)),
            BattleEvent::CriticalHit { .. } => Some("Critical hit!".to_string()),
            BattleEvent::Effectiveness { multiplier, .. } => {
                crate::combat::type_chart::effectiveness_text(*multiplier).map(str::to_string)
            }
            BattleEvent::DamageDealt { name, damage, .. } => Some(format!("{} took {} damage!", name, damage)),
            BattleEvent::UnableToMove { name, .. } => Some(format!("{} is unable to move!", name)),
            BattleEvent::StatusDamage { name, status, .. } => Some(format!("{} is hurt by {}!", name, status)),
            BattleEvent::Fainted { name, .. } => Some(format!("{} fainted!", name)),
            BattleEvent::Transformed { name, .. } => Some(format!("{} Mega Evolved into Mega {}!", name, name)),
            BattleEvent::BattleEnded { winner_name, .. } => Some(format!("{} wins!", winner_name)),
        }
    }
}

/// Main battle state container. Only the turn resolver and the
/// transformation entry point mutate combatants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleState {
    pub battle_id: Uuid,
    pub mode: BattleMode,
    pub language: Language,
    pub side1: BattleSide,
    pub side2: BattleSide,
    pub turn_number: u32,
    pub phase: BattlePhase,
    pub winner: Option<Side>,
    pub battle_log: Vec<String>,
    pub events: Vec<BattleEvent>,
    pub side1_selection: Option<usize>, // Move index for the active combatant
    pub side2_selection: Option<usize>,
}

impl BattleState {
    pub fn new(battle_id: Uuid, mode: BattleMode, language: Language) -> Self {
        BattleState {
            battle_id,
            mode,
            language,
            side1: BattleSide::new("Team 1"),
            side2: BattleSide::new("Team 2"),
            turn_number: 0,
            phase: BattlePhase::NotStarted,
            winner: None,
            battle_log: Vec::new(),
            events: Vec::new(),
            side1_selection: None,
            side2_selection: None,
        }
    }

    pub fn side(&self, side: Side) -> &BattleSide {
        match side {
            Side::One => &self.side1,
            Side::Two => &self.side2,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut BattleSide {
        match side {
            Side::One => &mut self.side1,
            Side::Two => &mut self.side2,
        }
    }

    pub fn active(&self, side: Side) -> Option<&Combatant> {
        self.side(side).active()
    }

    pub fn active_mut(&mut self, side: Side) -> Option<&mut Combatant> {
        self.side_mut(side).active_mut()
    }

    pub fn selection(&self, side: Side) -> Option<usize> {
        match side {
            Side::One => self.side1_selection,
            Side::Two => self.side2_selection,
        }
    }

    pub fn clear_selections(&mut self) {
        self.side1_selection = None;
        self.side2_selection = None;
    }

    pub fn is_concluded(&self) -> bool {
        self.phase == BattlePhase::Concluded
    }

    /// Append an event and its log line, if any
    pub fn record(&mut self, event: BattleEvent) {
        if let Some(line) = event.log_line() {
            self.battle_log.push(line);
        }
        self.events.push(event);
    }

    /// Events recorded at or after position `start`
    pub fn events_since(&self, start: usize) -> Vec<BattleEvent> {
        self.events.get(start..).map(<[BattleEvent]>::to_vec).unwrap_or_default()
    }

    fn expect_phase(&self, expected: BattlePhase) -> BattleResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(BattleError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Add a combatant to a side during team building. Returns its team index.
    pub fn add_combatant(&mut self, side: Side, combatant: Combatant) -> BattleResult<usize> {
        self.expect_phase(BattlePhase::NotStarted)?;
        let max = self.mode.max_team_size();
        let team = &mut self.side_mut(side).team;
        if team.len() >= max {
            return Err(BattleError::TeamFull { side, max });
        }
        team.push(combatant);
        Ok(team.len() - 1)
    }

    pub fn remove_combatant(&mut self, side: Side, index: usize) -> BattleResult<Combatant> {
        self.expect_phase(BattlePhase::NotStarted)?;
        let team = &mut self.side_mut(side).team;
        if index >= team.len() {
            return Err(BattleError::InvalidCombatantIndex { side, index });
        }
        Ok(team.remove(index))
    }

    /// NotStarted -> InProgress. Both sides need at least one combatant.
    pub fn start(&mut self) -> BattleResult<()> {
        self.expect_phase(BattlePhase::NotStarted)?;
        for side in Side::BOTH {
            if self.side(side).team.is_empty() {
                return Err(BattleError::EmptyTeam(side));
            }
        }
        self.side1.active_index = 0;
        self.side2.active_index = 0;
        self.phase = BattlePhase::InProgress;
        self.turn_number = 1;
        self.record(BattleEvent::BattleStarted);
        info!("Battle {} started ({})", self.battle_id, self.mode);
        Ok(())
    }

    /// Choose the active combatant's move for the next turn
    pub fn select_move(&mut self, side: Side, move_index: usize) -> BattleResult<()> {
        self.expect_phase(BattlePhase::InProgress)?;
        let active = self.active(side).ok_or(BattleError::InvalidCombatantIndex {
            side,
            index: self.side(side).active_index,
        })?;
        if move_index >= active.moves.len() {
            return Err(BattleError::InvalidMoveIndex { side, index: move_index });
        }
        match side {
            Side::One => self.side1_selection = Some(move_index),
            Side::Two => self.side2_selection = Some(move_index),
        }
        Ok(())
    }

    /// Mega evolve a team member if its held item matches a transformation record
    pub fn transform(&mut self, side: Side, index: usize) -> BattleResult<()> {
        self.expect_phase(BattlePhase::InProgress)?;
        let language = self.language;
        let combatant = self
            .side_mut(side)
            .team
            .get_mut(index)
            .ok_or(BattleError::InvalidCombatantIndex { side, index })?;

        if combatant.is_transformed {
            return Err(TransformError::AlreadyTransformed.into());
        }
        let item = combatant.held_item.clone().ok_or(TransformError::NoHeldItem)?;
        let record = mega_evolution::lookup(combatant.species_id, &item)
            .ok_or_else(|| TransformError::NoMatchingRecord { item: item.clone() })?;

        *combatant = mega_evolution::apply(combatant, record);
        let name = combatant.display_name(language);
        info!("{} on {} transformed into {} with {}", name, side, record.form, item);

        self.record(BattleEvent::Transformed {
            side,
            name,
            item,
            form: record.form.to_string(),
        });
        Ok(())
    }

    /// InProgress -> Concluded with `winner` recorded
    pub fn conclude(&mut self, winner: Side) {
        if self.is_concluded() {
            return;
        }
        self.phase = BattlePhase::Concluded;
        self.winner = Some(winner);
        self.clear_selections();
        let winner_name = self.side(winner).name.clone();
        info!("Battle {} concluded after turn {}: {} wins", self.battle_id, self.turn_number, winner_name);
        self.record(BattleEvent::BattleEnded { winner, winner_name });
    }
}
