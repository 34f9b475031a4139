use crate::battle::state::ScriptedRng;
use crate::combatant::{Combatant, Stats};
use crate::moves::{Move, MoveCategory};
use crate::types::PokemonType;

// Canonical draws for scripting attacks. An attack that lands consumes
// three draws in order: accuracy, crit, spread. `SPREAD_MAX` maps to a
// random factor of exactly 100, so scripted damage equals the
// pre-spread figure.
pub const HIT: f64 = 0.01;
pub const MISS: f64 = 0.75;
pub const NO_CRIT: f64 = 0.5;
pub const CRIT: f64 = 0.05;
pub const SPREAD_MAX: f64 = 0.96875;
pub const FIRST_MOVE: f64 = 0.0;

pub fn scripted(draws: Vec<f64>) -> ScriptedRng {
    ScriptedRng::new(draws)
}

/// Draws for one landed attack at full spread.
pub fn landed_attack() -> Vec<f64> {
    vec![HIT, NO_CRIT, SPREAD_MAX]
}

pub struct TestCombatantBuilder {
    id: u32,
    name: String,
    level: u8,
    types: Vec<PokemonType>,
    stats: Stats,
    moves: Vec<Move>,
}

impl TestCombatantBuilder {
    /// Level-50 normal-type baseline: 100 HP, 100 attack into 50
    /// defense, so the stock `strike` move deals exactly 46 at full
    /// spread without a crit.
    pub fn new(id: u32, name: &str) -> Self {
        TestCombatantBuilder {
            id,
            name: name.to_string(),
            level: 50,
            types: vec![PokemonType::Normal],
            stats: Stats {
                hp: 100,
                attack: 100,
                defense: 50,
                special_attack: 100,
                special_defense: 50,
                speed: 80,
            },
            moves: Vec::new(),
        }
    }

    pub fn types(mut self, types: Vec<PokemonType>) -> Self {
        self.types = types;
        self
    }

    pub fn hp(mut self, hp: u32) -> Self {
        self.stats.hp = hp;
        self
    }

    pub fn speed(mut self, speed: u32) -> Self {
        self.stats.speed = speed;
        self
    }

    pub fn with_move(
        mut self,
        name: &str,
        power: u16,
        accuracy: u8,
        category: MoveCategory,
        move_type: PokemonType,
    ) -> Self {
        self.moves.push(
            Move::new(name, power, accuracy, category, move_type)
                .expect("test move should be valid"),
        );
        self
    }

    pub fn with_strike(self) -> Self {
        self.with_move("Strike", 50, 100, MoveCategory::Physical, PokemonType::Normal)
    }

    pub fn build(self) -> Combatant {
        Combatant::new(
            self.id,
            self.name,
            self.level,
            self.types,
            self.stats,
            self.moves,
        )
        .expect("test combatant should be valid")
    }
}

/// Baseline combatant with the stock strike move.
pub fn striker(id: u32, name: &str, speed: u32) -> Combatant {
    TestCombatantBuilder::new(id, name)
        .speed(speed)
        .with_strike()
        .build()
}

/// Same baseline but frail enough that a single landed strike faints it.
pub fn frail_striker(id: u32, name: &str, speed: u32) -> Combatant {
    TestCombatantBuilder::new(id, name)
        .speed(speed)
        .hp(40)
        .with_strike()
        .build()
}
