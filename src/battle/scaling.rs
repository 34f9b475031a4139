use crate::battle::state::Difficulty;
use crate::combatant::Combatant;

/// Effective speed of the AI-controlled side for turn-order purposes.
/// Computed fresh from the pristine stat block each time it is needed,
/// so the adjustment can never compound across activations.
pub fn scaled_speed(combatant: &Combatant, difficulty: Difficulty) -> u32 {
    let speed = combatant.stats.speed;
    match difficulty {
        Difficulty::Easy => (speed as f64 * 0.70).floor() as u32,
        Difficulty::Normal => speed,
        Difficulty::Hard => (speed as f64 * 1.30).floor() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::Stats;
    use crate::moves::{Move, MoveCategory};
    use crate::types::PokemonType;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn runner(speed: u32) -> Combatant {
        let stats = Stats {
            hp: 60,
            attack: 60,
            defense: 60,
            special_attack: 60,
            special_defense: 60,
            speed,
        };
        let tackle =
            Move::new("Tackle", 40, 100, MoveCategory::Physical, PokemonType::Normal).unwrap();
        Combatant::new(1, "runner", 50, vec![PokemonType::Normal], stats, vec![tackle]).unwrap()
    }

    #[rstest]
    #[case(Difficulty::Easy, 100, 70)]
    #[case(Difficulty::Normal, 100, 100)]
    #[case(Difficulty::Hard, 100, 130)]
    #[case(Difficulty::Easy, 95, 66)] // 95 * 0.70 = 66.5, floored
    #[case(Difficulty::Hard, 95, 123)] // 95 * 1.30 = 123.5, floored
    fn test_speed_scaling(
        #[case] difficulty: Difficulty,
        #[case] speed: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(scaled_speed(&runner(speed), difficulty), expected);
    }

    #[test]
    fn test_scaling_never_compounds() {
        let combatant = runner(100);
        let first = scaled_speed(&combatant, Difficulty::Hard);
        let second = scaled_speed(&combatant, Difficulty::Hard);
        assert_eq!(first, second);
    }
}
