use crate::errors::MalformedCombatantError;
use crate::types::PokemonType;
use serde::{Deserialize, Serialize};

pub const MAX_MOVE_POWER: u16 = 250;

/// Whether a move damages with the attack/defense pair or the
/// special-attack/special-defense pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
}

/// A damaging move. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub name: String,
    pub power: u16,
    pub accuracy: u8,
    pub category: MoveCategory,
    #[serde(rename = "type")]
    pub move_type: PokemonType,
}

impl Move {
    pub fn new(
        name: impl Into<String>,
        power: u16,
        accuracy: u8,
        category: MoveCategory,
        move_type: PokemonType,
    ) -> Result<Self, MalformedCombatantError> {
        let name = name.into();
        if power > MAX_MOVE_POWER {
            return Err(MalformedCombatantError::InvalidMovePower { name, power });
        }
        if accuracy > 100 {
            return Err(MalformedCombatantError::InvalidMoveAccuracy {
                name,
                accuracy: accuracy as u16,
            });
        }
        Ok(Move {
            name,
            power,
            accuracy,
            category,
            move_type,
        })
    }
}
