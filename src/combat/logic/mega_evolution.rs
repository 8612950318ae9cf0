use serde::Serialize;

use crate::combat::state::{Combatant, TransformSnapshot};
use crate::monsters::PokemonType;
use crate::stats::{StatDelta, StatName, StatSet};

use PokemonType::*;

const SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// Static reference data for one held-item-triggered transformation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformationRecord {
    pub species_id: u32,
    pub species_name: &'static str,
    pub item: &'static str,
    pub form: &'static str,
    pub sprite_id: u32,
    pub types: Option<&'static [PokemonType]>, // None keeps the current types
    pub stat_changes: StatDelta,
}

impl TransformationRecord {
    pub fn sprite_url(&self) -> String {
        format!("{}/{}.png", SPRITE_BASE_URL, self.sprite_id)
    }
}

const fn deltas(hp: i32, attack: i32, defense: i32, special_attack: i32, special_defense: i32, speed: i32) -> StatDelta {
    StatSet {
        hp,
        attack,
        defense,
        special_attack,
        special_defense,
        speed,
    }
}

macro_rules! mega {
    ($id:expr, $name:expr, $item:expr, $form:expr, $sprite:expr, $types:expr, $deltas:expr) => {
        TransformationRecord {
            species_id: $id,
            species_name: $name,
            item: $item,
            form: $form,
            sprite_id: $sprite,
            types: $types,
            stat_changes: $deltas,
        }
    };
}

pub static MEGA_EVOLUTIONS: &[TransformationRecord] = &[
    mega!(3, "venusaur", "Venusaurite", "mega", 10033, None, deltas(0, 20, 23, 22, 15, 0)),
    mega!(6, "charizard", "Charizardite X", "mega-x", 10034, Some(&[Fire, Dragon]), deltas(0, 64, 47, -20, 14, 0)),
    mega!(6, "charizard", "Charizardite Y", "mega-y", 10035, None, deltas(0, -26, 18, 78, 20, 0)),
    mega!(9, "blastoise", "Blastoisinite", "mega", 10036, None, deltas(0, 16, 51, 45, 25, 0)),
    mega!(15, "beedrill", "Beedrillite", "mega", 10090, None, deltas(0, 60, 20, -10, 0, 40)),
    mega!(18, "pidgeot", "Pidgeotite", "mega", 10073, None, deltas(0, -20, 0, 70, 0, 30)),
    mega!(65, "alakazam", "Alakazite", "mega", 10037, None, deltas(0, 0, 10, 40, 30, 20)),
    mega!(80, "slowbro", "Slowbronite", "mega", 10071, None, deltas(0, 5, 120, 15, -20, -30)),
    mega!(94, "gengar", "Gengarite", "mega", 10038, None, deltas(0, 0, 20, 50, 30, 0)),
    mega!(115, "kangaskhan", "Kangaskhanite", "mega", 10039, None, deltas(0, 30, 20, 0, 20, 30)),
    mega!(127, "pinsir", "Pinsirite", "mega", 10040, Some(&[Bug, Flying]), deltas(0, 35, 30, 0, 15, 20)),
    mega!(130, "gyarados", "Gyaradosite", "mega", 10041, Some(&[Water, Dark]), deltas(0, 35, 30, -10, 30, 15)),
    mega!(142, "aerodactyl", "Aerodactylite", "mega", 10042, None, deltas(0, 30, 30, 0, 10, 30)),
    mega!(150, "mewtwo", "Mewtwonite X", "mega-x", 10043, Some(&[Psychic, Fighting]), deltas(0, 84, 40, 0, 0, -24)),
    mega!(150, "mewtwo", "Mewtwonite Y", "mega-y", 10044, None, deltas(0, -40, -30, 74, 40, 56)),
    mega!(254, "sceptile", "Sceptilite", "mega", 10065, Some(&[Grass, Dragon]), deltas(0, 25, 15, 35, 5, 20)),
    mega!(257, "blaziken", "Blazikenite", "mega", 10066, None, deltas(0, 40, 0, 30, 0, 30)),
    mega!(260, "swampert", "Swampertite", "mega", 10064, None, deltas(0, 60, 20, 0, 0, 20)),
    mega!(282, "gardevoir", "Gardevoirite", "mega", 10068, None, deltas(0, -15, 15, 65, 35, 0)),
    mega!(302, "sableye", "Sablenite", "mega", 10045, None, deltas(0, 20, 75, 20, 35, -50)),
    mega!(303, "mawile", "Mawilite", "mega", 10046, Some(&[Steel, Fairy]), deltas(0, 65, 55, -10, 30, -10)),
    mega!(306, "aggron", "Aggronite", "mega", 10047, Some(&[Steel]), deltas(0, 20, 80, 0, 20, -30)),
    mega!(308, "medicham", "Medichamite", "mega", 10069, None, deltas(0, 40, 15, 0, 15, 30)),
    mega!(310, "manectric", "Manectite", "mega", 10048, None, deltas(0, -10, 10, 60, 10, 30)),
    mega!(319, "sharpedo", "Sharpedonite", "mega", 10070, None, deltas(0, 50, 20, 30, 0, 0)),
    mega!(323, "camerupt", "Cameruptite", "mega", 10087, None, deltas(0, 40, 0, 60, 0, -20)),
    mega!(334, "altaria", "Altarianite", "mega", 10067, Some(&[Dragon, Fairy]), deltas(0, 30, 30, 30, 0, 10)),
    mega!(354, "banette", "Banettite", "mega", 10049, None, deltas(0, 55, 35, 5, 15, -10)),
    mega!(359, "absol", "Absolite", "mega", 10050, None, deltas(0, 40, 0, 20, 0, 40)),
    mega!(362, "glalie", "Glalitite", "mega", 10074, None, deltas(0, 40, 20, 40, 0, 0)),
    mega!(373, "salamence", "Salamencite", "mega", 10089, None, deltas(0, 25, 50, 0, 0, 25)),
    mega!(376, "metagross", "Metagrossite", "mega", 10051, None, deltas(0, 35, 30, 5, 10, 20)),
    mega!(380, "latias", "Latiasite", "mega", 10062, None, deltas(0, 0, 20, 40, 40, 0)),
    mega!(381, "latios", "Latiosite", "mega", 10063, None, deltas(0, 30, 0, 50, 20, 0)),
    mega!(384, "rayquaza", "Dragon Ascent (Move)", "mega", 10079, None, deltas(0, 35, 10, 35, 10, 10)),
    mega!(445, "garchomp", "Garchompite", "mega", 10052, None, deltas(0, 30, 20, 20, 10, -10)),
    mega!(448, "lucario", "Lucarionite", "mega", 10053, None, deltas(0, 35, 18, 57, 0, 10)),
    mega!(460, "abomasnow", "Abomasite", "mega", 10054, None, deltas(0, 22, 30, 42, 6, -30)),
    mega!(719, "diancie", "Diancite", "mega", 10101, None, deltas(0, 50, -60, 50, -60, 120)),
];

/// Record for a species holding `item`, matched case-insensitively
pub fn lookup(species_id: u32, item: &str) -> Option<&'static TransformationRecord> {
    let item = item.trim();
    MEGA_EVOLUTIONS
        .iter()
        .find(|record| record.species_id == species_id && record.item.eq_ignore_ascii_case(item))
}

pub fn records_for_species(species_id: u32) -> Vec<&'static TransformationRecord> {
    MEGA_EVOLUTIONS
        .iter()
        .filter(|record| record.species_id == species_id)
        .collect()
}

pub fn can_transform(species_id: u32) -> bool {
    MEGA_EVOLUTIONS.iter().any(|record| record.species_id == species_id)
}

/// Every item that can trigger a transformation, in table order
pub fn transformation_items() -> Vec<&'static str> {
    let mut items: Vec<&'static str> = Vec::new();
    for record in MEGA_EVOLUTIONS {
        if !items.contains(&record.item) {
            items.push(record.item);
        }
    }
    items
}

/// Apply a transformation. Health is never changed; every other effective
/// stat moves by its delta and stays at least 1.
pub fn apply(combatant: &Combatant, record: &TransformationRecord) -> Combatant {
    let snapshot = combatant.snapshot.clone().unwrap_or_else(|| TransformSnapshot {
        calculated_stats: combatant.calculated_stats.clone(),
        pokemon_types: combatant.pokemon_types.clone(),
        sprite_url: combatant.sprite_url.clone(),
    });

    let mut transformed = combatant.clone();
    for stat in StatName::ALL {
        if stat == StatName::Hp {
            continue;
        }
        let value = combatant.calculated_stats.get(stat) as i64 + record.stat_changes.get(stat) as i64;
        transformed.calculated_stats.set(stat, value.max(1) as u32);
    }
    if let Some(types) = record.types {
        transformed.pokemon_types = types.to_vec();
    }
    transformed.sprite_url = record.sprite_url();
    transformed.is_transformed = true;
    transformed.transformed_form = Some(record.form.to_string());
    transformed.snapshot = Some(snapshot);
    transformed
}

/// Undo a transformation. A combatant that is not transformed comes back unchanged.
pub fn revert(combatant: &Combatant) -> Combatant {
    let mut reverted = combatant.clone();
    if !combatant.is_transformed {
        return reverted;
    }
    if let Some(snapshot) = reverted.snapshot.take() {
        reverted.calculated_stats = snapshot.calculated_stats;
        reverted.pokemon_types = snapshot.pokemon_types;
        reverted.sprite_url = snapshot.sprite_url;
    }
    reverted.is_transformed = false;
    reverted.transformed_form = None;
    reverted
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatChange {
    pub stat: StatName,
    pub label: &'static str,
    pub old_value: u32,
    pub new_value: u32,
    pub change: i64,
    pub percent: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformationSummary {
    pub changes: Vec<StatChange>,
    pub original_types: Vec<PokemonType>,
    pub new_types: Vec<PokemonType>,
    pub types_changed: bool,
}

/// Compare a transformed combatant against its snapshot. Unchanged stats are left out.
pub fn stat_changes(combatant: &Combatant) -> Option<TransformationSummary> {
    let snapshot = combatant.snapshot.as_ref()?;
    let changes = StatName::ALL
        .iter()
        .filter_map(|stat| {
            let old_value = snapshot.calculated_stats.get(*stat);
            let new_value = combatant.calculated_stats.get(*stat);
            let change = new_value as i64 - old_value as i64;
            if change == 0 {
                return None;
            }
            let percent = if old_value == 0 {
                0
            } else {
                (change as f64 / old_value as f64 * 100.0).round() as i64
            };
            Some(StatChange {
                stat: *stat,
                label: stat.label(),
                old_value,
                new_value,
                change,
                percent,
            })
        })
        .collect();

    Some(TransformationSummary {
        changes,
        original_types: snapshot.pokemon_types.clone(),
        new_types: combatant.pokemon_types.clone(),
        types_changed: snapshot.pokemon_types != combatant.pokemon_types,
    })
}
