use tracing::info;
use tracing_subscriber::EnvFilter;

use pokemon_battle::{
    record, BattleSession, BattleStatus, Difficulty, JsonHistoryStore, HistoryStore,
    RonDataProvider, DataProvider, SessionRng, Team,
};

/// Plays one automated team battle from the bundled combatant data,
/// prints the log, and appends the summary to the on-disk history.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let difficulty = match std::env::args().nth(1).as_deref() {
        Some("easy") => Difficulty::Easy,
        Some("hard") => Difficulty::Hard,
        _ => Difficulty::Normal,
    };
    info!(?difficulty, "setting up battle");

    let provider = RonDataProvider::new("data/combatants");
    let page = provider.list_combatants(6, 0).await?;
    if page.items.len() < 6 {
        return Err(format!(
            "need at least 6 combatants in data/combatants, found {}",
            page.items.len()
        )
        .into());
    }

    let mut roster = page.items;
    let opponent_members = roster.split_off(3);
    let player = Team::new("team-player", "Challengers", roster)?;
    let opponent = Team::new("team-rival", "Rivals", opponent_members)?;

    let mut session = BattleSession::team(player, opponent, difficulty)?;
    let mut rng = SessionRng::new();
    session.start(&mut rng)?;

    // The demo player always leads with its active combatant's first move.
    while session.status() == BattleStatus::InProgress {
        let move_name = session
            .player_active()
            .and_then(|c| c.moves.first())
            .map(|m| m.name.clone())
            .ok_or("player has no usable move")?;
        session.submit_player_move(&move_name, &mut rng)?;
    }

    for entry in session.log().entries() {
        println!("[{:>7}] {}", format!("{:?}", entry.category).to_lowercase(), entry.text);
    }

    let summary = record(&session)?;
    let stats = session.stats();
    info!(
        damage = stats.total_damage_dealt,
        crits = stats.critical_hits,
        fainted = stats.pokemon_fainted,
        "battle finished"
    );

    let history = JsonHistoryStore::new("data/history.json");
    let stored = history.append(summary).await?;
    info!(record = stored.id(), "summary appended to data/history.json");

    Ok(())
}
