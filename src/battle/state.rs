use crate::battle::roster::RosterManager;
use crate::combatant::Combatant;
use crate::errors::MalformedCombatantError;
use crate::team::Team;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleMode {
    Single,
    Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleStatus {
    Setup,
    InProgress,
    Over,
}

/// Which side acts next within an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Player,
    Opponent,
}

impl Turn {
    pub fn other(self) -> Turn {
        match self {
            Turn::Player => Turn::Opponent,
            Turn::Opponent => Turn::Player,
        }
    }
}

/// Display category of a log entry, matching the history schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Info,
    Attack,
    Warning,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub text: String,
    #[serde(rename = "type")]
    pub category: LogCategory,
    pub timestamp: String,
}

/// Ordered, append-only record of what happened each turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleLog {
    entries: Vec<LogEntry>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, category: LogCategory) {
        self.entries.push(LogEntry {
            text: text.into(),
            category,
            timestamp: chrono::Utc::now().to_rfc3339(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any entry's text contains the given fragment. Handy in
    /// tests and demo output checks.
    pub fn contains(&self, fragment: &str) -> bool {
        self.entries.iter().any(|e| e.text.contains(fragment))
    }
}

impl fmt::Display for BattleLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "  [{:?}] {}", entry.category, entry.text)?;
        }
        Ok(())
    }
}

/// Player-perspective accumulator shown on the battle-end screen and
/// persisted with the summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleStats {
    pub total_damage_dealt: u32,
    pub critical_hits: u32,
    pub super_effective_hits: u32,
    pub pokemon_fainted: u32,
}

/// Injected source of uniform [0, 1) draws. Every random decision the
/// engine makes (accuracy, critical hits, damage spread, opponent move
/// choice) flows through one of these, which is what makes battles
/// replayable under test.
pub trait BattleRng {
    /// Draw the next value in [0, 1). The reason string names what the
    /// draw decides, for debugging scripted sequences.
    fn next(&mut self, reason: &str) -> f64;
}

/// Production RNG, one instance per session.
#[derive(Debug, Default)]
pub struct SessionRng;

impl SessionRng {
    pub fn new() -> Self {
        SessionRng
    }
}

impl BattleRng for SessionRng {
    fn next(&mut self, _reason: &str) -> f64 {
        use rand::Rng;
        rand::rng().random::<f64>()
    }
}

/// Pre-scripted RNG for deterministic tests.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: Vec<f64>,
    index: usize,
}

impl ScriptedRng {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, index: 0 }
    }
}

impl BattleRng for ScriptedRng {
    fn next(&mut self, reason: &str) -> f64 {
        if self.index >= self.draws.len() {
            panic!(
                "ScriptedRng exhausted! Tried to get a value for: '{}'. Need more draws.",
                reason
            );
        }
        let draw = self.draws[self.index];

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", draw, reason);

        self.index += 1;
        draw
    }
}

/// Team identity attached to a side in team mode. Single battles carry
/// no team identity; the combatant itself names the side.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamTag {
    pub id: String,
    pub name: String,
}

/// One side of the battle: its ordered combatants plus roster tracking.
/// Single mode is a side of exactly one combatant.
#[derive(Debug, Clone)]
pub(crate) struct SideState {
    pub tag: Option<TeamTag>,
    pub members: Vec<Combatant>,
    pub roster: RosterManager,
}

impl SideState {
    /// Every member enters battle at its stat-block maximum. Stored
    /// teams may carry stale or out-of-range current HP (a 0-HP or
    /// over-max combatant must never be the one that acts first).
    pub fn single(mut combatant: Combatant) -> Self {
        combatant.restore_full();
        SideState {
            tag: None,
            members: vec![combatant],
            roster: RosterManager::new(1),
        }
    }

    pub fn from_team(mut team: Team) -> Result<Self, MalformedCombatantError> {
        if team.is_empty() {
            return Err(MalformedCombatantError::EmptyRoster(team.name));
        }
        for member in &mut team.members {
            member.restore_full();
        }
        let size = team.len();
        Ok(SideState {
            tag: Some(TeamTag {
                id: team.id,
                name: team.name,
            }),
            members: team.members,
            roster: RosterManager::new(size),
        })
    }

    pub fn active(&self) -> Option<&Combatant> {
        self.roster.current_active(&self.members)
    }

    pub fn active_mut(&mut self) -> Option<&mut Combatant> {
        if self.roster.all_fainted() {
            return None;
        }
        self.members.get_mut(self.roster.active_index())
    }

    /// The side's display name: the team name in team mode, the active
    /// combatant's name in single mode.
    pub fn display_name(&self) -> String {
        match &self.tag {
            Some(tag) => tag.name.clone(),
            None => self
                .members
                .first()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
        }
    }
}

/// Either side's identifier in a persisted result: a combatant id in
/// single mode, a team id in team mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WinnerId {
    Combatant(u32),
    Team(String),
}

/// The aggregate root: everything mutable about one battle lives here,
/// privately, so sessions can run concurrently without locking.
#[derive(Debug, Clone)]
pub struct BattleSession {
    pub(crate) mode: BattleMode,
    pub(crate) difficulty: Difficulty,
    pub(crate) player: SideState,
    pub(crate) opponent: SideState,
    pub(crate) whose_turn: Turn,
    pub(crate) status: BattleStatus,
    pub(crate) log: BattleLog,
    pub(crate) stats: BattleStats,
    pub(crate) victor: Option<WinnerId>,
}

impl BattleSession {
    /// One combatant a side, no switching: the first faint ends the
    /// battle.
    pub fn single(
        player: Combatant,
        opponent: Combatant,
        difficulty: Difficulty,
    ) -> Result<Self, MalformedCombatantError> {
        Ok(BattleSession {
            mode: BattleMode::Single,
            difficulty,
            player: SideState::single(player),
            opponent: SideState::single(opponent),
            whose_turn: Turn::Player,
            status: BattleStatus::Setup,
            log: BattleLog::new(),
            stats: BattleStats::default(),
            victor: None,
        })
    }

    /// Full-roster battle; fainted combatants are replaced in roster
    /// order until one side runs out.
    pub fn team(
        player_team: Team,
        opponent_team: Team,
        difficulty: Difficulty,
    ) -> Result<Self, MalformedCombatantError> {
        Ok(BattleSession {
            mode: BattleMode::Team,
            difficulty,
            player: SideState::from_team(player_team)?,
            opponent: SideState::from_team(opponent_team)?,
            whose_turn: Turn::Player,
            status: BattleStatus::Setup,
            log: BattleLog::new(),
            stats: BattleStats::default(),
            victor: None,
        })
    }

    pub fn mode(&self) -> BattleMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn whose_turn(&self) -> Turn {
        self.whose_turn
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn stats(&self) -> &BattleStats {
        &self.stats
    }

    /// The winning side's identifier once the battle is over.
    pub fn victor_id(&self) -> Option<&WinnerId> {
        self.victor.as_ref()
    }

    pub fn player_active(&self) -> Option<&Combatant> {
        self.player.active()
    }

    pub fn opponent_active(&self) -> Option<&Combatant> {
        self.opponent.active()
    }

    /// Non-fainted combatants remaining on each side (player, opponent).
    pub fn remaining(&self) -> (usize, usize) {
        (self.player.roster.remaining(), self.opponent.roster.remaining())
    }
}
