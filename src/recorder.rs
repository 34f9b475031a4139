use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::battle::state::{
    BattleMode, BattleSession, BattleStats, BattleStatus, Difficulty, LogEntry, SideState,
    WinnerId,
};
use crate::combatant::Combatant;
use crate::errors::{BattleResult, InvalidOperationError};

/// Identity-only view of a combatant, enough to render a history card
/// without carrying the full stat block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantSnapshot {
    pub id: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub id: String,
    pub name: String,
    pub pokemons: Vec<ParticipantSnapshot>,
}

/// Immutable record of a finished battle. The serialized form is the
/// history schema: a `type` discriminator, camelCase participant
/// snapshots, the winner's identifier, stats, and the full log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BattleSummary {
    #[serde(rename_all = "camelCase")]
    Single {
        id: i64,
        player_pokemon: ParticipantSnapshot,
        opponent_pokemon: ParticipantSnapshot,
        winner: WinnerId,
        difficulty: Difficulty,
        stats: BattleStats,
        log: Vec<LogEntry>,
        date: String,
    },
    #[serde(rename_all = "camelCase")]
    Team {
        id: i64,
        player_team: TeamSnapshot,
        opponent_team: TeamSnapshot,
        winner: WinnerId,
        difficulty: Difficulty,
        stats: BattleStats,
        log: Vec<LogEntry>,
        date: String,
    },
}

impl BattleSummary {
    pub fn id(&self) -> i64 {
        match self {
            BattleSummary::Single { id, .. } => *id,
            BattleSummary::Team { id, .. } => *id,
        }
    }

    pub fn winner(&self) -> &WinnerId {
        match self {
            BattleSummary::Single { winner, .. } => winner,
            BattleSummary::Team { winner, .. } => winner,
        }
    }
}

fn snapshot(combatant: &Combatant) -> ParticipantSnapshot {
    ParticipantSnapshot {
        id: combatant.id,
        name: combatant.name.clone(),
        sprite: combatant.sprite.clone(),
    }
}

fn team_snapshot(side: &SideState) -> TeamSnapshot {
    let tag = side
        .tag
        .as_ref()
        .expect("team battle side carries a team tag");
    TeamSnapshot {
        id: tag.id.clone(),
        name: tag.name.clone(),
        pokemons: side.members.iter().map(snapshot).collect(),
    }
}

/// Summarize a finished battle. Only terminal sessions can be
/// recorded; everything in the summary is copied out, so the session
/// stays readable afterwards.
pub fn record(session: &BattleSession) -> BattleResult<BattleSummary> {
    if session.status() != BattleStatus::Over {
        return Err(InvalidOperationError::BattleNotOver.into());
    }
    let winner = session
        .victor_id()
        .cloned()
        .expect("finished battle has a victor");

    let now = Utc::now();
    let id = now.timestamp_millis();
    let date = now.to_rfc3339();
    let difficulty: Difficulty = session.difficulty();
    let stats: BattleStats = *session.stats();
    let log: Vec<LogEntry> = session.log().entries().to_vec();

    let summary = match session.mode() {
        BattleMode::Single => BattleSummary::Single {
            id,
            player_pokemon: snapshot(&session.player.members[0]),
            opponent_pokemon: snapshot(&session.opponent.members[0]),
            winner,
            difficulty,
            stats,
            log,
            date,
        },
        BattleMode::Team => BattleSummary::Team {
            id,
            player_team: team_snapshot(&session.player),
            opponent_team: team_snapshot(&session.opponent),
            winner,
            difficulty,
            stats,
            log,
            date,
        },
    };
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::*;
    use crate::errors::BattleError;
    use crate::team::Team;
    use pretty_assertions::assert_eq;

    fn finished_single() -> BattleSession {
        let player = striker(1, "Ampere", 80);
        let opponent = frail_striker(2, "Voltan", 60);
        let mut session =
            BattleSession::single(player, opponent, Difficulty::Normal).unwrap();
        session.start(&mut scripted(vec![])).unwrap();
        session
            .submit_player_move("Strike", &mut scripted(landed_attack()))
            .unwrap();
        session
    }

    #[test]
    fn an_unfinished_battle_cannot_be_recorded() {
        let player = striker(1, "Ampere", 80);
        let opponent = striker(2, "Voltan", 60);
        let session = BattleSession::single(player, opponent, Difficulty::Normal).unwrap();

        let err = record(&session).unwrap_err();
        assert!(matches!(
            err,
            BattleError::InvalidOperation(InvalidOperationError::BattleNotOver)
        ));
    }

    #[test]
    fn a_single_battle_serializes_with_a_numeric_winner() {
        let session = finished_single();
        let summary = record(&session).unwrap();

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["type"], "single");
        assert_eq!(value["playerPokemon"]["id"], 1);
        assert_eq!(value["playerPokemon"]["name"], "Ampere");
        assert_eq!(value["opponentPokemon"]["id"], 2);
        assert_eq!(value["winner"], 1);
        assert_eq!(value["difficulty"], "normal");
        assert_eq!(value["stats"]["totalDamageDealt"], 46);
        assert_eq!(value["stats"]["pokemonFainted"], 1);
        assert!(value["log"].as_array().unwrap().len() >= 5);
        assert!(value["date"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn a_team_battle_serializes_with_the_team_id_as_winner() {
        let player = Team::new("t-player", "Sparks", vec![striker(1, "Ampere", 80)]).unwrap();
        let opponent =
            Team::new("t-rival", "Rivals", vec![frail_striker(2, "Voltan", 60)]).unwrap();
        let mut session = BattleSession::team(player, opponent, Difficulty::Hard).unwrap();
        session.start(&mut scripted(vec![])).unwrap();
        session
            .submit_player_move("Strike", &mut scripted(landed_attack()))
            .unwrap();

        let summary = record(&session).unwrap();
        assert_eq!(summary.winner(), &WinnerId::Team("t-player".to_string()));

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["type"], "team");
        assert_eq!(value["winner"], "t-player");
        assert_eq!(value["playerTeam"]["id"], "t-player");
        assert_eq!(value["playerTeam"]["pokemons"][0]["name"], "Ampere");
        assert_eq!(value["opponentTeam"]["pokemons"][0]["id"], 2);
        assert_eq!(value["difficulty"], "hard");
    }

    #[test]
    fn summaries_round_trip_through_json() {
        let session = finished_single();
        let summary = record(&session).unwrap();

        let encoded = serde_json::to_string(&summary).unwrap();
        let decoded: BattleSummary = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, summary);
    }
}
