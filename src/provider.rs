use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::combatant::{Combatant, Stats, DEFAULT_LEVEL};
use crate::errors::{BattleResult, MalformedCombatantError, ProviderError};
use crate::moves::{Move, MoveCategory};
use crate::types::PokemonType;

/// One page of a combatant listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantPage {
    pub items: Vec<Combatant>,
    pub total_count: usize,
}

/// Source of combatant definitions. Implementations own the lookup and
/// validation path; everything they hand out is battle-ready.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn get_combatant(&self, id: u32) -> BattleResult<Combatant>;
    async fn list_combatants(&self, limit: usize, offset: usize) -> BattleResult<CombatantPage>;
}

/// On-disk combatant definition. Stats arrive as floats and moves are
/// optional; both go through full validation before a `Combatant` is
/// produced.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCombatant {
    id: u32,
    name: String,
    #[serde(default)]
    level: Option<u8>,
    types: Vec<String>,
    stats: RawStats,
    #[serde(default)]
    sprite: Option<String>,
    #[serde(default)]
    moves: Vec<RawMove>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStats {
    hp: f64,
    attack: f64,
    defense: f64,
    special_attack: f64,
    special_defense: f64,
    speed: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMove {
    name: String,
    power: u16,
    accuracy: u16,
    category: String,
    #[serde(rename = "type")]
    move_type: String,
}

/// The move set a combatant falls back to when its definition lists
/// none: two plain physical hits, a special hit of its own type, and a
/// stronger but less accurate slam.
fn default_moves(primary: PokemonType) -> Vec<Move> {
    let special_name = if primary == PokemonType::Normal {
        "Swift".to_string()
    } else {
        let type_name = primary.name();
        let mut capitalized = type_name[..1].to_ascii_uppercase();
        capitalized.push_str(&type_name[1..]);
        format!("{} Attack", capitalized)
    };
    vec![
        Move::new("Tackle", 40, 100, MoveCategory::Physical, PokemonType::Normal),
        Move::new("Quick Attack", 40, 100, MoveCategory::Physical, PokemonType::Normal),
        Move::new(special_name, 60, 100, MoveCategory::Special, primary),
        Move::new("Slam", 80, 75, MoveCategory::Physical, PokemonType::Normal),
    ]
    .into_iter()
    .map(|m| m.expect("default move definitions are valid"))
    .collect()
}

fn parse_type(raw: &str) -> Result<PokemonType, ProviderError> {
    PokemonType::from_str(raw).map_err(ProviderError::MalformedData)
}

fn parse_category(name: &str, raw: &str) -> Result<MoveCategory, ProviderError> {
    match raw.to_ascii_lowercase().as_str() {
        "physical" => Ok(MoveCategory::Physical),
        "special" => Ok(MoveCategory::Special),
        other => Err(ProviderError::MalformedData(format!(
            "move {} has unknown category: {}",
            name, other
        ))),
    }
}

impl RawCombatant {
    fn into_combatant(self) -> BattleResult<Combatant> {
        let stats = Stats::from_raw(
            &self.name,
            [
                ("hp", self.stats.hp),
                ("attack", self.stats.attack),
                ("defense", self.stats.defense),
                ("specialAttack", self.stats.special_attack),
                ("specialDefense", self.stats.special_defense),
                ("speed", self.stats.speed),
            ],
        )?;

        let mut types = Vec::with_capacity(self.types.len());
        for raw in &self.types {
            types.push(parse_type(raw)?);
        }

        let moves = if self.moves.is_empty() {
            let primary = types.first().copied().unwrap_or(PokemonType::Normal);
            debug!(combatant = %self.name, "no moves listed, synthesizing defaults");
            default_moves(primary)
        } else {
            let mut moves = Vec::with_capacity(self.moves.len());
            for raw in self.moves {
                if raw.accuracy > 100 {
                    return Err(MalformedCombatantError::InvalidMoveAccuracy {
                        name: raw.name,
                        accuracy: raw.accuracy,
                    }
                    .into());
                }
                let category = parse_category(&raw.name, &raw.category)?;
                let move_type = parse_type(&raw.move_type)?;
                moves.push(Move::new(
                    raw.name,
                    raw.power,
                    raw.accuracy as u8,
                    category,
                    move_type,
                )?);
            }
            moves
        };

        let combatant = Combatant::new(
            self.id,
            self.name,
            self.level.unwrap_or(DEFAULT_LEVEL),
            types,
            stats,
            moves,
        )?;
        Ok(match self.sprite {
            Some(sprite) => combatant.with_sprite(sprite),
            None => combatant,
        })
    }
}

/// Combatant definitions stored as one RON file per combatant, named
/// `NNN-name.ron` so a directory listing sorts by id.
#[derive(Debug, Clone)]
pub struct RonDataProvider {
    dir: PathBuf,
}

impl RonDataProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        RonDataProvider { dir: dir.into() }
    }

    async fn sorted_entries(&self) -> Result<Vec<PathBuf>, ProviderError> {
        let mut dir = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| ProviderError::Unavailable(format!("{}: {}", self.dir.display(), e)))?;
        let mut paths = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            } else {
                warn!(path = %path.display(), "skipping non-RON file in data directory");
            }
        }
        paths.sort();
        Ok(paths)
    }

    async fn load(&self, path: &Path) -> BattleResult<Combatant> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ProviderError::Unavailable(format!("{}: {}", path.display(), e)))?;
        let raw: RawCombatant = ron::from_str(&contents).map_err(|e| {
            ProviderError::MalformedData(format!("{}: {}", path.display(), e))
        })?;
        raw.into_combatant()
    }
}

#[async_trait]
impl DataProvider for RonDataProvider {
    async fn get_combatant(&self, id: u32) -> BattleResult<Combatant> {
        let prefix = format!("{:03}-", id);
        let paths = self.sorted_entries().await?;
        let path = paths
            .iter()
            .find(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix))
            })
            .ok_or(ProviderError::NotFound(id))?;

        debug!(id, path = %path.display(), "loading combatant");
        let combatant = self.load(path).await?;
        if combatant.id != id {
            return Err(ProviderError::MalformedData(format!(
                "{}: file id {} does not match requested id {}",
                path.display(),
                combatant.id,
                id
            ))
            .into());
        }
        Ok(combatant)
    }

    async fn list_combatants(&self, limit: usize, offset: usize) -> BattleResult<CombatantPage> {
        let paths = self.sorted_entries().await?;
        let total_count = paths.len();

        let mut items = Vec::new();
        for path in paths.into_iter().skip(offset).take(limit) {
            items.push(self.load(&path).await?);
        }
        Ok(CombatantPage { items, total_count })
    }
}
