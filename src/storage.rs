use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::combatant::Combatant;
use crate::errors::{StorageError, StorageResult};
use crate::recorder::BattleSummary;
use crate::team::{Team, MAX_TEAM_SIZE};

/// Persistent team rosters. Teams are created empty and filled one
/// member at a time; the store enforces the 6-member cap and rejects
/// duplicate combatants within one team.
#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn create_team(&self, name: &str) -> StorageResult<Team>;
    async fn update_team(&self, id: &str, team: Team) -> StorageResult<Team>;
    async fn delete_team(&self, id: &str) -> StorageResult<()>;
    async fn list_teams(&self) -> StorageResult<Vec<Team>>;
    async fn add_member(&self, team_id: &str, combatant: Combatant) -> StorageResult<Team>;
    async fn remove_member(&self, team_id: &str, index: usize) -> StorageResult<Team>;
}

/// Append-only archive of finished battles.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, summary: BattleSummary) -> StorageResult<BattleSummary>;
    async fn delete(&self, id: i64) -> StorageResult<()>;
    async fn list(&self) -> StorageResult<Vec<BattleSummary>>;
}

fn io_err(e: std::io::Error) -> StorageError {
    StorageError::Io(e.to_string())
}

fn ser_err(e: serde_json::Error) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Teams in a single JSON file. All access goes through one async lock
/// so concurrent mutations cannot interleave their read-modify-write
/// cycles.
#[derive(Debug)]
pub struct JsonRosterStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonRosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonRosterStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> StorageResult<Vec<Team>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents).map_err(ser_err),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(io_err(e)),
        }
    }

    async fn save(&self, teams: &[Team]) -> StorageResult<()> {
        let contents = serde_json::to_string_pretty(teams).map_err(ser_err)?;
        tokio::fs::write(&self.path, contents).await.map_err(io_err)
    }
}

#[async_trait]
impl RosterStore for JsonRosterStore {
    async fn create_team(&self, name: &str) -> StorageResult<Team> {
        let _guard = self.lock.lock().await;
        let mut teams = self.load().await?;

        let team = Team {
            id: format!("team-{}", Utc::now().timestamp_millis()),
            name: name.to_string(),
            members: Vec::new(),
        };
        teams.push(team.clone());
        self.save(&teams).await?;

        info!(team = %team.id, name, "created team");
        Ok(team)
    }

    async fn update_team(&self, id: &str, team: Team) -> StorageResult<Team> {
        let _guard = self.lock.lock().await;
        let mut teams = self.load().await?;

        for (i, member) in team.members.iter().enumerate() {
            if team.members[..i].iter().any(|m| m.id == member.id) {
                return Err(StorageError::DuplicateMember {
                    team: team.name.clone(),
                    combatant: member.id,
                });
            }
        }

        let slot = teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StorageError::TeamNotFound(id.to_string()))?;
        let mut updated = team;
        updated.id = id.to_string();
        *slot = updated.clone();
        self.save(&teams).await?;

        debug!(team = id, "updated team");
        Ok(updated)
    }

    async fn delete_team(&self, id: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        let mut teams = self.load().await?;

        let before = teams.len();
        teams.retain(|t| t.id != id);
        if teams.len() == before {
            return Err(StorageError::TeamNotFound(id.to_string()));
        }
        self.save(&teams).await?;

        info!(team = id, "deleted team");
        Ok(())
    }

    async fn list_teams(&self) -> StorageResult<Vec<Team>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn add_member(&self, team_id: &str, combatant: Combatant) -> StorageResult<Team> {
        let _guard = self.lock.lock().await;
        let mut teams = self.load().await?;

        let team = teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or_else(|| StorageError::TeamNotFound(team_id.to_string()))?;
        if team.members.len() >= MAX_TEAM_SIZE {
            return Err(StorageError::RosterFull(team.name.clone()));
        }
        if team.members.iter().any(|m| m.id == combatant.id) {
            return Err(StorageError::DuplicateMember {
                team: team.name.clone(),
                combatant: combatant.id,
            });
        }
        team.members.push(combatant);
        let updated = team.clone();
        self.save(&teams).await?;
        Ok(updated)
    }

    async fn remove_member(&self, team_id: &str, index: usize) -> StorageResult<Team> {
        let _guard = self.lock.lock().await;
        let mut teams = self.load().await?;

        let team = teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or_else(|| StorageError::TeamNotFound(team_id.to_string()))?;
        if index >= team.members.len() {
            return Err(StorageError::TeamNotFound(format!(
                "{} has no member at index {}",
                team_id, index
            )));
        }
        team.members.remove(index);
        let updated = team.clone();
        self.save(&teams).await?;
        Ok(updated)
    }
}

/// Battle summaries in a single JSON file, newest last. Records are
/// never rewritten once appended; delete removes a whole record only.
#[derive(Debug)]
pub struct JsonHistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonHistoryStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> StorageResult<Vec<BattleSummary>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents).map_err(ser_err),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(io_err(e)),
        }
    }

    async fn save(&self, records: &[BattleSummary]) -> StorageResult<()> {
        let contents = serde_json::to_string_pretty(records).map_err(ser_err)?;
        tokio::fs::write(&self.path, contents).await.map_err(io_err)
    }
}

#[async_trait]
impl HistoryStore for JsonHistoryStore {
    async fn append(&self, summary: BattleSummary) -> StorageResult<BattleSummary> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        records.push(summary.clone());
        self.save(&records).await?;

        info!(record = summary.id(), "recorded battle");
        Ok(summary)
    }

    async fn delete(&self, id: i64) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(StorageError::RecordNotFound(id.to_string()));
        }
        self.save(&records).await
    }

    async fn list(&self) -> StorageResult<Vec<BattleSummary>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }
}
