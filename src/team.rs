use crate::combatant::Combatant;
use crate::errors::MalformedCombatantError;
use serde::{Deserialize, Serialize};

pub const MAX_TEAM_SIZE: usize = 6;

/// An ordered roster of up to 6 combatants. Insertion order is send-out
/// order. A team may be empty while it is being built in the roster
/// store; an empty team is rejected when it tries to enter battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub members: Vec<Combatant>,
}

impl Team {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        members: Vec<Combatant>,
    ) -> Result<Self, MalformedCombatantError> {
        let id = id.into();
        let name = name.into();
        if members.len() > MAX_TEAM_SIZE {
            return Err(MalformedCombatantError::OversizedRoster {
                team: name,
                count: members.len(),
            });
        }
        Ok(Team { id, name, members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
