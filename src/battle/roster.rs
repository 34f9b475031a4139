use crate::combatant::Combatant;

/// Tracks which roster slot is active and which members have fainted
/// for one side of a team battle. The active index only ever advances
/// forward; there is no voluntary mid-battle switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterManager {
    active_index: usize,
    fainted: Vec<bool>,
}

impl RosterManager {
    pub fn new(team_size: usize) -> Self {
        RosterManager {
            active_index: 0,
            fainted: vec![false; team_size],
        }
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn all_fainted(&self) -> bool {
        self.fainted.iter().all(|&f| f)
    }

    /// Count of members still standing.
    pub fn remaining(&self) -> usize {
        self.fainted.iter().filter(|&&f| !f).count()
    }

    /// The roster member currently eligible to act, or None if the whole
    /// side is down.
    pub fn current_active<'a>(&self, members: &'a [Combatant]) -> Option<&'a Combatant> {
        if self.all_fainted() {
            return None;
        }
        members.get(self.active_index)
    }

    /// Mark the active member fainted and advance to the next standing
    /// member in roster order. Returns the new active index, or None if
    /// the side is fully defeated.
    pub fn advance_on_faint(&mut self) -> Option<usize> {
        if let Some(slot) = self.fainted.get_mut(self.active_index) {
            *slot = true;
        }
        let next = (self.active_index + 1..self.fainted.len()).find(|&i| !self.fainted[i])?;
        self.active_index = next;
        Some(next)
    }
}
