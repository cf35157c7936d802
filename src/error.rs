//! The unified error taxonomy for the game.
//!
//! Every fallible operation returns [`GameError`]; the driver catches one per
//! user action and reports it without ending the session. [`ErrorCategory`]
//! groups the variants into the four recoverable families plus I/O.

use std::io;
use std::path::PathBuf;

/// Errors raised by game operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A class name outside the fixed Warrior/Mage/Rogue/Cleric set.
    #[error("invalid character class: {0}")]
    InvalidClass(String),

    /// No save record exists for the named character.
    #[error("character '{0}' not found")]
    CharacterNotFound(String),

    /// The action requires a living character.
    #[error("character is dead")]
    CharacterDead,

    /// A save file exists but could not be read.
    #[error("save for '{name}' is corrupted: {reason}")]
    SaveCorrupted { name: String, reason: String },

    /// A save record parsed but violated the required field/type set.
    #[error("invalid save data: {0}")]
    InvalidSaveData(String),

    /// A quest id absent from the catalog.
    #[error("quest '{0}' not found")]
    QuestNotFound(String),

    /// The quest is already in the completed set.
    #[error("quest '{0}' has already been completed")]
    QuestAlreadyCompleted(String),

    /// The quest is not in the active set.
    #[error("quest '{0}' is not active")]
    QuestNotActive(String),

    /// The character's level is below the quest's requirement.
    #[error("requires level {need}, currently level {have}")]
    InsufficientLevel { have: u32, need: u32 },

    /// The quest's prerequisite has not been completed.
    #[error("prerequisite quest '{prerequisite}' must be completed first")]
    QuestRequirementsNotMet { prerequisite: String },

    /// An item id absent from the catalog or the inventory.
    #[error("item '{0}' not found")]
    ItemNotFound(String),

    /// The item's kind does not fit the operation or slot.
    #[error("item '{item_id}' is a {actual}, expected a {expected}")]
    InvalidItemType {
        item_id: String,
        expected: &'static str,
        actual: String,
    },

    /// The inventory is at capacity.
    #[error("inventory is full")]
    InventoryFull,

    /// The gold balance cannot cover the cost.
    #[error("not enough gold: need {need}, have {have}")]
    InsufficientGold { need: u32, have: u32 },

    /// An enemy type name outside the fixed roster.
    #[error("unknown enemy type: {0}")]
    UnknownEnemyType(String),

    /// A turn was taken in a battle that has already resolved.
    #[error("combat is not active")]
    CombatNotActive,

    /// The special ability has not come off cooldown yet.
    #[error("special ability is on cooldown")]
    AbilityOnCooldown,

    /// A required catalog data file does not exist.
    #[error("missing data file: {0}")]
    MissingDataFile(PathBuf),

    /// Catalog content violated the record format.
    #[error("invalid data format: {0}")]
    InvalidDataFormat(String),

    /// A catalog file exists but could not be read.
    #[error("corrupted data: {0}")]
    CorruptedData(String),

    /// An underlying filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The recoverable failure families; see `category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A lookup missed: character, item, quest, or enemy type.
    NotFound,
    /// Malformed persisted or catalog data, or a bad enum value.
    InvalidInput,
    /// The operation is illegal in the current state.
    StateConflict,
    /// A bounded resource ran out: inventory space, gold, or level.
    ResourceExhausted,
    /// A filesystem failure outside the game's control.
    Io,
}

impl GameError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GameError::CharacterNotFound(_)
            | GameError::QuestNotFound(_)
            | GameError::ItemNotFound(_)
            | GameError::UnknownEnemyType(_) => ErrorCategory::NotFound,

            GameError::InvalidClass(_)
            | GameError::SaveCorrupted { .. }
            | GameError::InvalidSaveData(_)
            | GameError::InvalidItemType { .. }
            | GameError::MissingDataFile(_)
            | GameError::InvalidDataFormat(_)
            | GameError::CorruptedData(_) => ErrorCategory::InvalidInput,

            GameError::CharacterDead
            | GameError::QuestAlreadyCompleted(_)
            | GameError::QuestNotActive(_)
            | GameError::CombatNotActive
            | GameError::AbilityOnCooldown => ErrorCategory::StateConflict,

            GameError::InsufficientLevel { .. }
            | GameError::QuestRequirementsNotMet { .. }
            | GameError::InventoryFull
            | GameError::InsufficientGold { .. } => ErrorCategory::ResourceExhausted,

            GameError::Io(_) => ErrorCategory::Io,
        }
    }
}

/// Convenience result type for game operations.
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            GameError::QuestNotFound("x".into()).category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            GameError::InvalidSaveData("bad".into()).category(),
            ErrorCategory::InvalidInput
        );
        assert_eq!(
            GameError::CharacterDead.category(),
            ErrorCategory::StateConflict
        );
        assert_eq!(
            GameError::InventoryFull.category(),
            ErrorCategory::ResourceExhausted
        );
        assert_eq!(
            GameError::Io(io::Error::new(io::ErrorKind::Other, "boom")).category(),
            ErrorCategory::Io
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GameError::InsufficientGold { need: 50, have: 30 }.to_string(),
            "not enough gold: need 50, have 30"
        );
        assert_eq!(
            GameError::InsufficientLevel { have: 1, need: 3 }.to_string(),
            "requires level 3, currently level 1"
        );
        assert_eq!(
            GameError::QuestNotFound("lost".into()).to_string(),
            "quest 'lost' not found"
        );
    }

    #[test]
    fn test_io_errors_convert() {
        fn fails() -> Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(GameError::Io(_))));
    }
}
