use crate::errors::MalformedCombatantError;
use crate::moves::Move;
use crate::types::PokemonType;
use serde::{Deserialize, Serialize};

pub const MAX_MOVES: usize = 4;
pub const MAX_TYPES: usize = 4;
pub const DEFAULT_LEVEL: u8 = 50;

/// The six-stat block every combatant carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl Stats {
    /// Build a stat block from raw floating-point source data, rejecting
    /// NaN, infinite, and negative values instead of substituting
    /// defaults. Fractional values are floored.
    pub fn from_raw(
        combatant: &str,
        raw: [(&'static str, f64); 6],
    ) -> Result<Self, MalformedCombatantError> {
        let mut checked = [0u32; 6];
        for (i, (stat, value)) in raw.iter().enumerate() {
            if !value.is_finite() {
                return Err(MalformedCombatantError::NonFiniteStat {
                    combatant: combatant.to_string(),
                    stat: stat.to_string(),
                });
            }
            if *value < 0.0 {
                return Err(MalformedCombatantError::NegativeStat {
                    combatant: combatant.to_string(),
                    stat: stat.to_string(),
                });
            }
            checked[i] = value.floor() as u32;
        }
        Ok(Stats {
            hp: checked[0],
            attack: checked[1],
            defense: checked[2],
            special_attack: checked[3],
            special_defense: checked[4],
            speed: checked[5],
        })
    }
}

/// A single creature instance participating in battle. Owned by the
/// session (or team) that holds it; current HP is the only field that
/// mutates during a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub id: u32,
    pub name: String,
    pub level: u8,
    pub types: Vec<PokemonType>,
    pub stats: Stats,
    pub moves: Vec<Move>,
    pub current_hp: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
}

impl Combatant {
    /// Validate and build a combatant at full HP. Bad input is rejected
    /// here so no battle can start with malformed data.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        level: u8,
        types: Vec<PokemonType>,
        stats: Stats,
        moves: Vec<Move>,
    ) -> Result<Self, MalformedCombatantError> {
        let name = name.into();
        if level == 0 {
            return Err(MalformedCombatantError::InvalidLevel(name));
        }
        if stats.hp == 0 {
            return Err(MalformedCombatantError::ZeroMaxHp(name));
        }
        if types.is_empty() || types.len() > MAX_TYPES {
            return Err(MalformedCombatantError::InvalidTypeCount {
                combatant: name,
                count: types.len(),
            });
        }
        if moves.is_empty() || moves.len() > MAX_MOVES {
            return Err(MalformedCombatantError::InvalidMoveCount {
                combatant: name,
                count: moves.len(),
            });
        }
        Ok(Combatant {
            id,
            name,
            level,
            types,
            stats,
            moves,
            current_hp: stats.hp,
            sprite: None,
        })
    }

    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    pub fn max_hp(&self) -> u32 {
        self.stats.hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Apply damage, clamping at zero. Returns true if this faints the
    /// combatant.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        self.current_hp = self.current_hp.saturating_sub(damage);
        self.is_fainted()
    }

    /// Reset current HP to the stat-block maximum.
    pub fn restore_full(&mut self) {
        self.current_hp = self.stats.hp;
    }

    /// Look up a known move by name (case-insensitive).
    pub fn move_named(&self, name: &str) -> Option<&Move> {
        self.moves.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveCategory;
    use pretty_assertions::assert_eq;

    fn flat_stats(hp: u32) -> Stats {
        Stats {
            hp,
            attack: 80,
            defense: 80,
            special_attack: 80,
            special_defense: 80,
            speed: 80,
        }
    }

    fn tackle() -> Move {
        Move::new("Tackle", 40, 100, MoveCategory::Physical, PokemonType::Normal).unwrap()
    }

    #[test]
    fn test_combatant_starts_at_full_hp() {
        let pikachu = Combatant::new(
            25,
            "pikachu",
            DEFAULT_LEVEL,
            vec![PokemonType::Electric],
            flat_stats(95),
            vec![tackle()],
        )
        .expect("pikachu should be valid");
        assert_eq!(pikachu.current_hp, 95);
        assert!(!pikachu.is_fainted());
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut pikachu = Combatant::new(
            25,
            "pikachu",
            50,
            vec![PokemonType::Electric],
            flat_stats(30),
            vec![tackle()],
        )
        .unwrap();

        assert!(!pikachu.take_damage(20));
        assert_eq!(pikachu.current_hp, 10);

        assert!(pikachu.take_damage(9999));
        assert_eq!(pikachu.current_hp, 0);
        assert!(pikachu.is_fainted());

        pikachu.restore_full();
        assert_eq!(pikachu.current_hp, 30);
    }

    #[test]
    fn test_rejects_empty_move_list() {
        let result = Combatant::new(
            1,
            "bulbasaur",
            50,
            vec![PokemonType::Grass, PokemonType::Poison],
            flat_stats(45),
            vec![],
        );
        assert_eq!(
            result,
            Err(MalformedCombatantError::InvalidMoveCount {
                combatant: "bulbasaur".to_string(),
                count: 0,
            })
        );
    }

    #[test]
    fn test_rejects_zero_hp_and_zero_level() {
        let no_hp = Combatant::new(
            1,
            "ghost",
            50,
            vec![PokemonType::Ghost],
            flat_stats(0),
            vec![tackle()],
        );
        assert_eq!(
            no_hp,
            Err(MalformedCombatantError::ZeroMaxHp("ghost".to_string()))
        );

        let no_level = Combatant::new(
            1,
            "egg",
            0,
            vec![PokemonType::Normal],
            flat_stats(10),
            vec![tackle()],
        );
        assert_eq!(
            no_level,
            Err(MalformedCombatantError::InvalidLevel("egg".to_string()))
        );
    }

    #[test]
    fn test_stats_from_raw_rejects_nan_and_negative() {
        let nan = Stats::from_raw(
            "missingno",
            [
                ("hp", f64::NAN),
                ("attack", 50.0),
                ("defense", 50.0),
                ("specialAttack", 50.0),
                ("specialDefense", 50.0),
                ("speed", 50.0),
            ],
        );
        assert!(matches!(
            nan,
            Err(MalformedCombatantError::NonFiniteStat { .. })
        ));

        let negative = Stats::from_raw(
            "missingno",
            [
                ("hp", 100.0),
                ("attack", -3.0),
                ("defense", 50.0),
                ("specialAttack", 50.0),
                ("specialDefense", 50.0),
                ("speed", 50.0),
            ],
        );
        assert_eq!(
            negative,
            Err(MalformedCombatantError::NegativeStat {
                combatant: "missingno".to_string(),
                stat: "attack".to_string(),
            })
        );
    }

    #[test]
    fn test_move_lookup_is_case_insensitive() {
        let pikachu = Combatant::new(
            25,
            "pikachu",
            50,
            vec![PokemonType::Electric],
            flat_stats(95),
            vec![tackle()],
        )
        .unwrap();
        assert!(pikachu.move_named("tackle").is_some());
        assert!(pikachu.move_named("TACKLE").is_some());
        assert!(pikachu.move_named("Thunderbolt").is_none());
    }
}
