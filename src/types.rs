use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The 18 elemental types a combatant or move can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    pub fn name(&self) -> &'static str {
        match self {
            PokemonType::Normal => "normal",
            PokemonType::Fire => "fire",
            PokemonType::Water => "water",
            PokemonType::Electric => "electric",
            PokemonType::Grass => "grass",
            PokemonType::Ice => "ice",
            PokemonType::Fighting => "fighting",
            PokemonType::Poison => "poison",
            PokemonType::Ground => "ground",
            PokemonType::Flying => "flying",
            PokemonType::Psychic => "psychic",
            PokemonType::Bug => "bug",
            PokemonType::Rock => "rock",
            PokemonType::Ghost => "ghost",
            PokemonType::Dragon => "dragon",
            PokemonType::Dark => "dark",
            PokemonType::Steel => "steel",
            PokemonType::Fairy => "fairy",
        }
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PokemonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(PokemonType::Normal),
            "fire" => Ok(PokemonType::Fire),
            "water" => Ok(PokemonType::Water),
            "electric" => Ok(PokemonType::Electric),
            "grass" => Ok(PokemonType::Grass),
            "ice" => Ok(PokemonType::Ice),
            "fighting" => Ok(PokemonType::Fighting),
            "poison" => Ok(PokemonType::Poison),
            "ground" => Ok(PokemonType::Ground),
            "flying" => Ok(PokemonType::Flying),
            "psychic" => Ok(PokemonType::Psychic),
            "bug" => Ok(PokemonType::Bug),
            "rock" => Ok(PokemonType::Rock),
            "ghost" => Ok(PokemonType::Ghost),
            "dragon" => Ok(PokemonType::Dragon),
            "dark" => Ok(PokemonType::Dark),
            "steel" => Ok(PokemonType::Steel),
            "fairy" => Ok(PokemonType::Fairy),
            other => Err(format!("unknown type: {}", other)),
        }
    }
}

/// Multiplier for a single attack type against a single defender type.
/// Only the non-neutral entries of the 18x18 chart are listed; every
/// other pairing is 1.0.
fn matchup(attack: PokemonType, defender: PokemonType) -> f64 {
    use PokemonType::*;
    match (attack, defender) {
        (Normal, Rock) | (Normal, Steel) => 0.5,
        (Normal, Ghost) => 0.0,

        (Fire, Fire) | (Fire, Water) | (Fire, Rock) | (Fire, Dragon) => 0.5,
        (Fire, Grass) | (Fire, Ice) | (Fire, Bug) | (Fire, Steel) => 2.0,

        (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,
        (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,

        (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => 0.5,
        (Electric, Water) | (Electric, Flying) => 2.0,
        (Electric, Ground) => 0.0,

        (Grass, Fire) | (Grass, Grass) | (Grass, Poison) | (Grass, Flying) | (Grass, Bug)
        | (Grass, Dragon) | (Grass, Steel) => 0.5,
        (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,

        (Ice, Fire) | (Ice, Water) | (Ice, Ice) | (Ice, Steel) => 0.5,
        (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => 2.0,

        (Fighting, Poison) | (Fighting, Flying) | (Fighting, Psychic) | (Fighting, Bug)
        | (Fighting, Fairy) => 0.5,
        (Fighting, Normal) | (Fighting, Ice) | (Fighting, Rock) | (Fighting, Dark)
        | (Fighting, Steel) => 2.0,
        (Fighting, Ghost) => 0.0,

        (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
        (Poison, Grass) | (Poison, Fairy) => 2.0,
        (Poison, Steel) => 0.0,

        (Ground, Grass) | (Ground, Bug) => 0.5,
        (Ground, Fire) | (Ground, Electric) | (Ground, Poison) | (Ground, Rock)
        | (Ground, Steel) => 2.0,
        (Ground, Flying) => 0.0,

        (Flying, Electric) | (Flying, Rock) | (Flying, Steel) => 0.5,
        (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => 2.0,

        (Psychic, Psychic) | (Psychic, Steel) => 0.5,
        (Psychic, Fighting) | (Psychic, Poison) => 2.0,
        (Psychic, Dark) => 0.0,

        (Bug, Fire) | (Bug, Fighting) | (Bug, Poison) | (Bug, Flying) | (Bug, Ghost)
        | (Bug, Steel) | (Bug, Fairy) => 0.5,
        (Bug, Grass) | (Bug, Psychic) | (Bug, Dark) => 2.0,

        (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => 0.5,
        (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => 2.0,

        (Ghost, Dark) => 0.5,
        (Ghost, Psychic) | (Ghost, Ghost) => 2.0,
        (Ghost, Normal) => 0.0,

        (Dragon, Steel) => 0.5,
        (Dragon, Dragon) => 2.0,
        (Dragon, Fairy) => 0.0,

        (Dark, Fighting) | (Dark, Dark) | (Dark, Fairy) => 0.5,
        (Dark, Psychic) | (Dark, Ghost) => 2.0,

        (Steel, Fire) | (Steel, Water) | (Steel, Electric) | (Steel, Steel) => 0.5,
        (Steel, Ice) | (Steel, Rock) | (Steel, Fairy) => 2.0,

        (Fairy, Poison) | (Fairy, Bug) | (Fairy, Steel) => 0.5,
        (Fairy, Fighting) | (Fairy, Dragon) | (Fairy, Dark) => 2.0,

        _ => 1.0,
    }
}

/// Combined effectiveness of an attack type against a defender's full
/// type list: the product of the per-type multipliers. Unknown pairings
/// contribute a factor of 1, so this never fails. Dual-typed defenders
/// can yield 0, 0.25, 0.5, 1, 2, or 4.
pub fn effectiveness(attack: PokemonType, defender_types: &[PokemonType]) -> f64 {
    defender_types
        .iter()
        .fold(1.0, |mult, &defender| mult * matchup(attack, defender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(PokemonType::Fire, PokemonType::Grass, 2.0)]
    #[case(PokemonType::Fire, PokemonType::Water, 0.5)]
    #[case(PokemonType::Water, PokemonType::Fire, 2.0)]
    #[case(PokemonType::Electric, PokemonType::Ground, 0.0)]
    #[case(PokemonType::Normal, PokemonType::Ghost, 0.0)]
    #[case(PokemonType::Ghost, PokemonType::Normal, 0.0)]
    #[case(PokemonType::Dragon, PokemonType::Fairy, 0.0)]
    #[case(PokemonType::Fighting, PokemonType::Normal, 2.0)]
    #[case(PokemonType::Normal, PokemonType::Normal, 1.0)]
    #[case(PokemonType::Fairy, PokemonType::Dragon, 2.0)]
    fn test_single_type_matchups(
        #[case] attack: PokemonType,
        #[case] defender: PokemonType,
        #[case] expected: f64,
    ) {
        assert_eq!(effectiveness(attack, &[defender]), expected);
    }

    #[test]
    fn test_dual_type_multiplies() {
        // Grass hits Water/Ground for 2 * 2 = 4
        let quad = effectiveness(
            PokemonType::Grass,
            &[PokemonType::Water, PokemonType::Ground],
        );
        assert_eq!(quad, 4.0);

        // Fire hits Water/Rock for 0.5 * 0.5 = 0.25
        let quarter = effectiveness(PokemonType::Fire, &[PokemonType::Water, PokemonType::Rock]);
        assert_eq!(quarter, 0.25);

        // One immunity zeroes the whole product
        let immune = effectiveness(
            PokemonType::Electric,
            &[PokemonType::Water, PokemonType::Ground],
        );
        assert_eq!(immune, 0.0);
    }

    #[test]
    fn test_defender_order_is_commutative() {
        let pairs = [
            (PokemonType::Water, PokemonType::Ground),
            (PokemonType::Fire, PokemonType::Rock),
            (PokemonType::Ghost, PokemonType::Dark),
        ];
        for attack in [PokemonType::Grass, PokemonType::Electric, PokemonType::Ice] {
            for (a, b) in pairs {
                assert_eq!(
                    effectiveness(attack, &[a, b]),
                    effectiveness(attack, &[b, a]),
                    "{} vs [{}, {}]",
                    attack,
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_type_round_trips_through_str() {
        let all = [
            PokemonType::Normal,
            PokemonType::Fire,
            PokemonType::Water,
            PokemonType::Electric,
            PokemonType::Grass,
            PokemonType::Ice,
            PokemonType::Fighting,
            PokemonType::Poison,
            PokemonType::Ground,
            PokemonType::Flying,
            PokemonType::Psychic,
            PokemonType::Bug,
            PokemonType::Rock,
            PokemonType::Ghost,
            PokemonType::Dragon,
            PokemonType::Dark,
            PokemonType::Steel,
            PokemonType::Fairy,
        ];
        for ty in all {
            assert_eq!(ty.name().parse::<PokemonType>(), Ok(ty));
        }
        assert!("shadow".parse::<PokemonType>().is_err());
    }
}
