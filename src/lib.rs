//! A turn-based battle simulation engine: type matchups, deterministic
//! damage resolution over an injected random source, single and team
//! battles, and JSON-backed team and history persistence.

pub mod battle;
pub mod combatant;
pub mod errors;
pub mod moves;
pub mod provider;
pub mod recorder;
pub mod storage;
pub mod team;
pub mod types;

pub use battle::{
    BattleMode, BattleRng, BattleSession, BattleStats, BattleStatus, Difficulty, LogCategory,
    LogEntry, ScriptedRng, SessionRng, Turn, WinnerId,
};
pub use combatant::{Combatant, Stats};
pub use errors::{BattleError, BattleResult, StorageError, StorageResult};
pub use moves::{Move, MoveCategory};
pub use provider::{CombatantPage, DataProvider, RonDataProvider};
pub use recorder::{record, BattleSummary, ParticipantSnapshot, TeamSnapshot};
pub use storage::{HistoryStore, JsonHistoryStore, JsonRosterStore, RosterStore};
pub use team::Team;
pub use types::{effectiveness, PokemonType};
