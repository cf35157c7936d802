//! Flat-text persistence for characters.
//!
//! One `KEY: value` pair per line, uppercase keys, list fields comma-joined
//! (empty string for an empty list). A character named `Ari` lives at
//! `<save dir>/Ari_save.txt`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::{Character, ClassKind};
use crate::constants::{APP_DIR_NAME, SAVE_FILE_SUFFIX, SAVE_SUBDIR_NAME};
use crate::error::{GameError, Result};

/// Manages the save directory and the flat-text character records in it.
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    /// Creates a manager rooted at `~/.chronicles/saves`, creating the
    /// directory if needed.
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        Self::with_directory(home_dir.join(APP_DIR_NAME).join(SAVE_SUBDIR_NAME))
    }

    /// Creates a manager rooted at an explicit directory.
    pub fn with_directory(dir: impl Into<PathBuf>) -> Result<Self> {
        let save_dir = dir.into();
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    fn save_path(&self, name: &str) -> PathBuf {
        self.save_dir.join(format!("{}{}", name, SAVE_FILE_SUFFIX))
    }

    pub fn save_exists(&self, name: &str) -> bool {
        self.save_path(name).exists()
    }

    /// Writes the character's record, replacing any previous save.
    pub fn save_character(&self, character: &Character) -> Result<()> {
        let path = self.save_path(&character.name);
        fs::write(&path, serialize_character(character))?;
        debug!(name = %character.name, path = %path.display(), "character saved");
        Ok(())
    }

    /// Loads a character by name.
    ///
    /// Fails with [`GameError::CharacterNotFound`] when no save exists,
    /// [`GameError::SaveCorrupted`] when the file cannot be read, and
    /// [`GameError::InvalidSaveData`] when the record is malformed.
    pub fn load_character(&self, name: &str) -> Result<Character> {
        let path = self.save_path(name);
        if !path.exists() {
            return Err(GameError::CharacterNotFound(name.to_string()));
        }

        let content = fs::read_to_string(&path).map_err(|e| GameError::SaveCorrupted {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let character = parse_character(&content)?;
        info!(name = %character.name, level = character.level, "character loaded");
        Ok(character)
    }

    /// Lists the names of all saved characters, sorted.
    pub fn list_characters(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.save_dir)? {
            let entry = entry?;
            if let Some(filename) = entry.file_name().to_str() {
                if let Some(name) = filename.strip_suffix(SAVE_FILE_SUFFIX) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Deletes a character's save file.
    pub fn delete_character(&self, name: &str) -> Result<()> {
        let path = self.save_path(name);
        if !path.exists() {
            return Err(GameError::CharacterNotFound(name.to_string()));
        }
        fs::remove_file(path)?;
        info!(name, "character deleted");
        Ok(())
    }
}

/// Renders a character as its flat-text record.
pub fn serialize_character(character: &Character) -> String {
    let mut out = String::new();
    out.push_str(&format!("NAME: {}\n", character.name));
    out.push_str(&format!("CLASS: {}\n", character.class));
    out.push_str(&format!("LEVEL: {}\n", character.level));
    out.push_str(&format!("HEALTH: {}\n", character.health));
    out.push_str(&format!("MAX_HEALTH: {}\n", character.max_health));
    out.push_str(&format!("STRENGTH: {}\n", character.strength));
    out.push_str(&format!("MAGIC: {}\n", character.magic));
    out.push_str(&format!("EXPERIENCE: {}\n", character.experience));
    out.push_str(&format!("GOLD: {}\n", character.gold));
    out.push_str(&format!("INVENTORY: {}\n", character.inventory.join(",")));
    out.push_str(&format!(
        "ACTIVE_QUESTS: {}\n",
        character.active_quests.join(",")
    ));
    out.push_str(&format!(
        "COMPLETED_QUESTS: {}\n",
        character.completed_quests.join(",")
    ));
    out
}

fn parse_int<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        GameError::InvalidSaveData(format!("field {} is not a valid integer: '{}'", key, value))
    })
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn require<T>(field: Option<T>, key: &str) -> Result<T> {
    field.ok_or_else(|| GameError::InvalidSaveData(format!("missing required field: {}", key)))
}

/// Parses a flat-text record back into a character.
pub fn parse_character(content: &str) -> Result<Character> {
    let mut name = None;
    let mut class = None;
    let mut level = None;
    let mut health = None;
    let mut max_health = None;
    let mut strength = None;
    let mut magic = None;
    let mut experience = None;
    let mut gold = None;
    let mut inventory = None;
    let mut active_quests = None;
    let mut completed_quests = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or_else(|| {
            GameError::InvalidSaveData(format!("malformed line in save file: {}", line))
        })?;
        let key = key.trim();
        let value = value.trim();

        match key {
            "NAME" => name = Some(value.to_string()),
            "CLASS" => {
                class = Some(ClassKind::parse(value).map_err(|_| {
                    GameError::InvalidSaveData(format!("invalid character class: {}", value))
                })?)
            }
            "LEVEL" => level = Some(parse_int::<u32>(key, value)?),
            "HEALTH" => health = Some(parse_int::<i32>(key, value)?),
            "MAX_HEALTH" => max_health = Some(parse_int::<i32>(key, value)?),
            "STRENGTH" => strength = Some(parse_int::<i32>(key, value)?),
            "MAGIC" => magic = Some(parse_int::<i32>(key, value)?),
            "EXPERIENCE" => experience = Some(parse_int::<u32>(key, value)?),
            "GOLD" => gold = Some(parse_int::<u32>(key, value)?),
            "INVENTORY" => inventory = Some(parse_list(value)),
            "ACTIVE_QUESTS" => active_quests = Some(parse_list(value)),
            "COMPLETED_QUESTS" => completed_quests = Some(parse_list(value)),
            other => {
                return Err(GameError::InvalidSaveData(format!(
                    "unexpected key '{}' in save file",
                    other
                )))
            }
        }
    }

    Ok(Character {
        name: require(name, "NAME")?,
        class: require(class, "CLASS")?,
        level: require(level, "LEVEL")?,
        health: require(health, "HEALTH")?,
        max_health: require(max_health, "MAX_HEALTH")?,
        strength: require(strength, "STRENGTH")?,
        magic: require(magic, "MAGIC")?,
        experience: require(experience, "EXPERIENCE")?,
        gold: require(gold, "GOLD")?,
        inventory: require(inventory, "INVENTORY")?,
        equipped_weapon: None,
        equipped_armor: None,
        active_quests: require(active_quests, "ACTIVE_QUESTS")?,
        completed_quests: require(completed_quests, "COMPLETED_QUESTS")?,
    })
}
