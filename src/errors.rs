use std::fmt;

/// Main error type for the battle simulation crate
#[derive(Debug, Clone, PartialEq)]
pub enum BattleError {
    /// An operation was attempted in a state that does not allow it
    InvalidOperation(InvalidOperationError),
    /// A combatant failed construction-time validation
    MalformedCombatant(MalformedCombatantError),
    /// Error surfaced from the external data provider
    Provider(ProviderError),
    /// Error surfaced from a roster or history store
    Storage(StorageError),
}

/// Illegal state transitions and rejected battle actions
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidOperationError {
    /// A move was submitted before the battle started
    BattleNotStarted,
    /// `start` was called on a battle that already left setup
    AlreadyStarted,
    /// A move was submitted after the battle reached its terminal state
    BattleOver,
    /// A move was submitted while it was not the player's turn
    NotPlayersTurn,
    /// A summary was requested for a battle that has not finished
    BattleNotOver,
    /// The named move does not exist on the active combatant
    UnknownMove(String),
}

/// Construction-time validation failures for combatants and teams
#[derive(Debug, Clone, PartialEq)]
pub enum MalformedCombatantError {
    /// A stat value was NaN or infinite in the source data
    NonFiniteStat { combatant: String, stat: String },
    /// A stat value was negative in the source data
    NegativeStat { combatant: String, stat: String },
    /// Max HP of zero cannot enter battle
    ZeroMaxHp(String),
    /// Level must be at least 1
    InvalidLevel(String),
    /// A combatant must know between 1 and 4 moves
    InvalidMoveCount { combatant: String, count: usize },
    /// A combatant must have between 1 and 4 types
    InvalidTypeCount { combatant: String, count: usize },
    /// Move power must be in 0..=250
    InvalidMovePower { name: String, power: u16 },
    /// Move accuracy must be in 0..=100
    InvalidMoveAccuracy { name: String, accuracy: u16 },
    /// A team with no combatants cannot enter battle
    EmptyRoster(String),
    /// A team holds at most 6 combatants
    OversizedRoster { team: String, count: usize },
}

/// Errors surfaced from the external combatant data provider
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// No combatant exists under the given identifier
    NotFound(u32),
    /// The provider's backing source could not be reached or read
    Unavailable(String),
    /// The provider returned data that could not be parsed
    MalformedData(String),
}

/// Errors surfaced from the roster and history stores
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Underlying file I/O failure
    Io(String),
    /// Serialization or deserialization failure
    Serialization(String),
    /// No team exists under the given identifier
    TeamNotFound(String),
    /// Teams hold at most 6 members
    RosterFull(String),
    /// The same combatant cannot appear twice in one team
    DuplicateMember { team: String, combatant: u32 },
    /// No history record exists under the given identifier
    RecordNotFound(String),
}

impl fmt::Display for BattleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleError::InvalidOperation(err) => write!(f, "Invalid operation: {}", err),
            BattleError::MalformedCombatant(err) => write!(f, "Malformed combatant: {}", err),
            BattleError::Provider(err) => write!(f, "Provider error: {}", err),
            BattleError::Storage(err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl fmt::Display for InvalidOperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidOperationError::BattleNotStarted => write!(f, "battle has not started"),
            InvalidOperationError::AlreadyStarted => write!(f, "battle has already started"),
            InvalidOperationError::BattleOver => write!(f, "battle is already over"),
            InvalidOperationError::NotPlayersTurn => write!(f, "it is not the player's turn"),
            InvalidOperationError::BattleNotOver => write!(f, "battle has not finished"),
            InvalidOperationError::UnknownMove(name) => write!(f, "unknown move: {}", name),
        }
    }
}

impl fmt::Display for MalformedCombatantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedCombatantError::NonFiniteStat { combatant, stat } => {
                write!(f, "{} has a non-finite {} stat", combatant, stat)
            }
            MalformedCombatantError::NegativeStat { combatant, stat } => {
                write!(f, "{} has a negative {} stat", combatant, stat)
            }
            MalformedCombatantError::ZeroMaxHp(combatant) => {
                write!(f, "{} has zero max HP", combatant)
            }
            MalformedCombatantError::InvalidLevel(combatant) => {
                write!(f, "{} has an invalid level", combatant)
            }
            MalformedCombatantError::InvalidMoveCount { combatant, count } => {
                write!(f, "{} has {} moves, expected 1 to 4", combatant, count)
            }
            MalformedCombatantError::InvalidTypeCount { combatant, count } => {
                write!(f, "{} has {} types, expected 1 to 4", combatant, count)
            }
            MalformedCombatantError::InvalidMovePower { name, power } => {
                write!(f, "move {} has power {}, expected 0 to 250", name, power)
            }
            MalformedCombatantError::InvalidMoveAccuracy { name, accuracy } => {
                write!(f, "move {} has accuracy {}, expected 0 to 100", name, accuracy)
            }
            MalformedCombatantError::EmptyRoster(team) => {
                write!(f, "team {} has no combatants", team)
            }
            MalformedCombatantError::OversizedRoster { team, count } => {
                write!(f, "team {} has {} combatants, max is 6", team, count)
            }
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::NotFound(id) => write!(f, "combatant {} not found", id),
            ProviderError::Unavailable(details) => write!(f, "provider unavailable: {}", details),
            ProviderError::MalformedData(details) => {
                write!(f, "malformed provider data: {}", details)
            }
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(details) => write!(f, "I/O error: {}", details),
            StorageError::Serialization(details) => write!(f, "serialization error: {}", details),
            StorageError::TeamNotFound(id) => write!(f, "team {} not found", id),
            StorageError::RosterFull(team) => write!(f, "team {} already has 6 members", team),
            StorageError::DuplicateMember { team, combatant } => {
                write!(f, "combatant {} is already in team {}", combatant, team)
            }
            StorageError::RecordNotFound(id) => write!(f, "history record {} not found", id),
        }
    }
}

impl std::error::Error for BattleError {}
impl std::error::Error for InvalidOperationError {}
impl std::error::Error for MalformedCombatantError {}
impl std::error::Error for ProviderError {}
impl std::error::Error for StorageError {}

impl From<InvalidOperationError> for BattleError {
    fn from(err: InvalidOperationError) -> Self {
        BattleError::InvalidOperation(err)
    }
}

impl From<MalformedCombatantError> for BattleError {
    fn from(err: MalformedCombatantError) -> Self {
        BattleError::MalformedCombatant(err)
    }
}

impl From<ProviderError> for BattleError {
    fn from(err: ProviderError) -> Self {
        BattleError::Provider(err)
    }
}

impl From<StorageError> for BattleError {
    fn from(err: StorageError) -> Self {
        BattleError::Storage(err)
    }
}

/// Type alias for Results using BattleError
pub type BattleResult<T> = Result<T, BattleError>;

/// Type alias for Results using StorageError
pub type StorageResult<T> = Result<T, StorageError>;
