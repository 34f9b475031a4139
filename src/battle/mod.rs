pub mod calculators;
pub mod engine;
pub mod roster;
pub mod scaling;
pub mod state;

#[cfg(test)]
pub(crate) mod tests;

pub use state::{
    BattleLog, BattleMode, BattleRng, BattleSession, BattleStats, BattleStatus, Difficulty,
    LogCategory, LogEntry, ScriptedRng, SessionRng, Turn, WinnerId,
};
