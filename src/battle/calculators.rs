use crate::battle::state::BattleRng;
use crate::combatant::Combatant;
use crate::moves::{Move, MoveCategory};
use crate::types::effectiveness;

/// Chance for any landed attack to crit.
pub const CRIT_RATE: f64 = 0.10;

/// Damage plus the metadata the log and stats need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub damage: u32,
    pub effectiveness: f64,
    pub is_critical: bool,
}

/// Accuracy check, evaluated once per attack attempt and strictly
/// before any damage computation.
pub fn attack_hits(accuracy: u8, rng: &mut dyn BattleRng) -> bool {
    rng.next("accuracy check") * 100.0 <= accuracy as f64
}

/// The damage formula. Each step floors, in this order: base damage,
/// type effectiveness, critical bonus (x1.5 at 10%), then a random
/// 85-100% spread. Historical records were produced by exactly this
/// sequence, so the step order is load-bearing.
pub fn compute_damage(
    attacker: &Combatant,
    defender: &Combatant,
    attack: &Move,
    rng: &mut dyn BattleRng,
) -> DamageOutcome {
    let attack_stat = match attack.category {
        MoveCategory::Special => attacker.stats.special_attack,
        MoveCategory::Physical => attacker.stats.attack,
    };
    let defense_stat = match attack.category {
        MoveCategory::Special => defender.stats.special_defense,
        MoveCategory::Physical => defender.stats.defense,
    };
    // A zero defense stat would divide to infinity; treat it as 1.
    let defense_stat = defense_stat.max(1);

    let base = ((2.0 * attacker.level as f64 / 5.0 + 2.0)
        * attack.power as f64
        * (attack_stat as f64 / defense_stat as f64)
        / 50.0)
        .floor()
        + 2.0;

    let effectiveness = effectiveness(attack.move_type, &defender.types);
    let mut damage = (base * effectiveness).floor();

    let is_critical = rng.next("critical hit") < CRIT_RATE;
    if is_critical {
        damage = (damage * 1.5).floor();
    }

    // Random factor 85-100%, inclusive on both ends.
    let random_factor = (rng.next("damage spread") * 16.0).floor() + 85.0;
    damage = (damage * random_factor / 100.0).floor();

    DamageOutcome {
        damage: damage as u32,
        effectiveness,
        is_critical,
    }
}
