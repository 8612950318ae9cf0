use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatName {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatName {
    pub const ALL: [StatName; 6] = [
        StatName::Hp,
        StatName::Attack,
        StatName::Defense,
        StatName::SpecialAttack,
        StatName::SpecialDefense,
        StatName::Speed,
    ];

    /// Short label used in stat comparison readouts
    pub fn label(&self) -> &'static str {
        match self {
            StatName::Hp => "HP",
            StatName::Attack => "ATK",
            StatName::Defense => "DEF",
            StatName::SpecialAttack => "SP.ATK",
            StatName::SpecialDefense => "SP.DEF",
            StatName::Speed => "SPD",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatSet<T> {
    pub hp: T,
    pub attack: T,
    pub defense: T,
    pub special_attack: T,
    pub special_defense: T,
    pub speed: T,
}

impl<T: Copy> StatSet<T> {
    /// Same value for every stat
    pub fn uniform(value: T) -> Self {
        StatSet {
            hp: value,
            attack: value,
            defense: value,
            special_attack: value,
            special_defense: value,
            speed: value,
        }
    }

    pub fn get(&self, stat: StatName) -> T {
        match stat {
            StatName::Hp => self.hp,
            StatName::Attack => self.attack,
            StatName::Defense => self.defense,
            StatName::SpecialAttack => self.special_attack,
            StatName::SpecialDefense => self.special_defense,
            StatName::Speed => self.speed,
        }
    }

    pub fn set(&mut self, stat: StatName, value: T) {
        match stat {
            StatName::Hp => self.hp = value,
            StatName::Attack => self.attack = value,
            StatName::Defense => self.defense = value,
            StatName::SpecialAttack => self.special_attack = value,
            StatName::SpecialDefense => self.special_defense = value,
            StatName::Speed => self.speed = value,
        }
    }
}

pub type BaseStats = StatSet<u32>;
pub type CalculatedStats = StatSet<u32>;
pub type IndividualValues = StatSet<u8>;
/// Signed per-stat adjustment, as carried by transformation records
pub type StatDelta = StatSet<i32>;

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 100;
pub const MAX_IV: u8 = 31;

/// Derive a single in-battle stat from its base value.
///
/// `floor(((2 * base + iv) * level) / 100) + (level + 10 for health, else 5)`
pub fn compute_stat(base: u32, level: u32, iv: u8, is_hp: bool) -> u32 {
    let scaled = ((2 * base + iv as u32) * level) / 100;
    if is_hp {
        scaled + level + 10
    } else {
        scaled + 5
    }
}

pub fn calculate_stats(base_stats: &BaseStats, level: u32, ivs: &IndividualValues) -> CalculatedStats {
    CalculatedStats {
        hp: compute_stat(base_stats.hp, level, ivs.hp, true),
        attack: compute_stat(base_stats.attack, level, ivs.attack, false),
        defense: compute_stat(base_stats.defense, level, ivs.defense, false),
        special_attack: compute_stat(base_stats.special_attack, level, ivs.special_attack, false),
        special_defense: compute_stat(base_stats.special_defense, level, ivs.special_defense, false),
        speed: compute_stat(base_stats.speed, level, ivs.speed, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(100, 50, 0, false, 105)]
    #[case(100, 50, 31, false, 120)]
    #[case(78, 50, 31, true, 153)]
    #[case(1, 1, 0, true, 11)]
    #[case(255, 100, 31, true, 651)]
    #[case(5, 1, 0, false, 5)]
    fn computes_stat(
        #[case] base: u32,
        #[case] level: u32,
        #[case] iv: u8,
        #[case] is_hp: bool,
        #[case] expected: u32,
    ) {
        assert_eq!(compute_stat(base, level, iv, is_hp), expected);
    }

    #[test]
    fn stat_is_monotonic_in_level_and_iv() {
        for base in [1u32, 45, 80, 130, 255] {
            for is_hp in [true, false] {
                for iv in 0..=MAX_IV {
                    let mut previous = 0;
                    for level in MIN_LEVEL..=MAX_LEVEL {
                        let value = compute_stat(base, level, iv, is_hp);
                        assert!(value >= previous, "level {level} base {base} iv {iv}");
                        previous = value;
                    }
                }
                for level in MIN_LEVEL..=MAX_LEVEL {
                    let mut previous = 0;
                    for iv in 0..=MAX_IV {
                        let value = compute_stat(base, level, iv, is_hp);
                        assert!(value >= previous, "iv {iv} base {base} level {level}");
                        previous = value;
                    }
                }
            }
        }
    }

    #[test]
    fn calculates_full_stat_block() {
        let base = BaseStats {
            hp: 78,
            attack: 84,
            defense: 78,
            special_attack: 109,
            special_defense: 85,
            speed: 100,
        };
        let stats = calculate_stats(&base, 50, &IndividualValues::uniform(31));
        assert_eq!(
            stats,
            CalculatedStats {
                hp: 153,
                attack: 104,
                defense: 98,
                special_attack: 129,
                special_defense: 105,
                speed: 120,
            }
        );
    }

    #[test]
    fn stat_set_get_and_set_round_trip() {
        let mut stats = StatSet::uniform(0u32);
        for (i, stat) in StatName::ALL.iter().enumerate() {
            stats.set(*stat, i as u32 + 1);
        }
        assert_eq!(stats.special_attack, 4);
        assert_eq!(stats.get(StatName::Speed), 6);
    }
}
