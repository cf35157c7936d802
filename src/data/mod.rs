//! Catalog file loading.
//!
//! Quests and items live in UTF-8 text files of blank-line-separated
//! records, each record a run of `KEY: value` lines. Catalogs are parsed and
//! validated once at session start and shared read-only afterwards.

pub mod defaults;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{GameError, Result};
use crate::items::{ItemCatalog, ItemDefinition, ItemEffect, ItemKind};
use crate::quests::{Quest, QuestCatalog};

/// The `PREREQUISITE` value marking an entry quest.
const NO_PREREQUISITE: &str = "NONE";

fn read_data_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(GameError::MissingDataFile(path.to_path_buf()));
    }
    fs::read_to_string(path)
        .map_err(|e| GameError::CorruptedData(format!("could not read {}: {}", path.display(), e)))
}

/// Splits file content into records on blank lines, then each record into
/// trimmed `(KEY, value)` pairs. Keys are uppercased for matching.
fn split_records(content: &str) -> Result<Vec<Vec<(String, String)>>> {
    let mut records = Vec::new();
    for block in content.split("\n\n") {
        if block.trim().is_empty() {
            continue;
        }
        let mut fields = Vec::new();
        for line in block.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line.split_once(':').ok_or_else(|| {
                GameError::InvalidDataFormat(format!("malformed line in data file: {}", line))
            })?;
            fields.push((key.trim().to_uppercase(), value.trim().to_string()));
        }
        records.push(fields);
    }
    Ok(records)
}

fn parse_u32(key: &str, value: &str) -> Result<u32> {
    value.parse().map_err(|_| {
        GameError::InvalidDataFormat(format!("field {} is not a valid integer: '{}'", key, value))
    })
}

fn require<T>(field: Option<T>, key: &str, record: &str) -> Result<T> {
    field.ok_or_else(|| {
        GameError::InvalidDataFormat(format!("missing required field {} in {}", key, record))
    })
}

fn parse_quest_record(fields: &[(String, String)]) -> Result<Quest> {
    let mut id = None;
    let mut title = None;
    let mut description = None;
    let mut reward_xp = None;
    let mut reward_gold = None;
    let mut required_level = None;
    let mut prerequisite = None;

    for (key, value) in fields {
        match key.as_str() {
            "QUEST_ID" => id = Some(value.clone()),
            "TITLE" => title = Some(value.clone()),
            "DESCRIPTION" => description = Some(value.clone()),
            "REWARD_XP" => reward_xp = Some(parse_u32(key, value)?),
            "REWARD_GOLD" => reward_gold = Some(parse_u32(key, value)?),
            "REQUIRED_LEVEL" => required_level = Some(parse_u32(key, value)?),
            "PREREQUISITE" => {
                prerequisite = Some(if value == NO_PREREQUISITE {
                    None
                } else {
                    Some(value.clone())
                })
            }
            other => {
                return Err(GameError::InvalidDataFormat(format!(
                    "unknown field in quest record: {}",
                    other
                )))
            }
        }
    }

    Ok(Quest {
        id: require(id, "QUEST_ID", "quest record")?,
        title: require(title, "TITLE", "quest record")?,
        description: require(description, "DESCRIPTION", "quest record")?,
        reward_xp: require(reward_xp, "REWARD_XP", "quest record")?,
        reward_gold: require(reward_gold, "REWARD_GOLD", "quest record")?,
        required_level: require(required_level, "REQUIRED_LEVEL", "quest record")?,
        prerequisite: require(prerequisite, "PREREQUISITE", "quest record")?,
    })
}

fn parse_item_record(fields: &[(String, String)]) -> Result<ItemDefinition> {
    let mut id = None;
    let mut name = None;
    let mut kind = None;
    let mut effect = None;
    let mut cost = None;
    let mut description = None;

    for (key, value) in fields {
        match key.as_str() {
            "ITEM_ID" => id = Some(value.clone()),
            "NAME" => name = Some(value.clone()),
            "TYPE" => kind = Some(ItemKind::parse(&value.to_lowercase())?),
            "EFFECT" => effect = Some(ItemEffect::parse(value)?),
            "COST" => cost = Some(parse_u32(key, value)?),
            "DESCRIPTION" => description = Some(value.clone()),
            other => {
                return Err(GameError::InvalidDataFormat(format!(
                    "unknown field in item record: {}",
                    other
                )))
            }
        }
    }

    Ok(ItemDefinition {
        id: require(id, "ITEM_ID", "item record")?,
        name: require(name, "NAME", "item record")?,
        kind: require(kind, "TYPE", "item record")?,
        effect: require(effect, "EFFECT", "item record")?,
        cost: require(cost, "COST", "item record")?,
        description: require(description, "DESCRIPTION", "item record")?,
    })
}

/// Parses quest catalog content and validates prerequisite references.
pub fn parse_quest_catalog(content: &str) -> Result<QuestCatalog> {
    let mut catalog = QuestCatalog::new();
    for fields in split_records(content)? {
        let quest = parse_quest_record(&fields)?;
        let id = quest.id.clone();
        if catalog.insert(quest).is_some() {
            return Err(GameError::InvalidDataFormat(format!(
                "duplicate quest id: {}",
                id
            )));
        }
    }

    // Prerequisite edges must point at known quests. Cycles are allowed
    // here; traversal guards against them instead.
    for quest in catalog.iter() {
        if let Some(prerequisite) = &quest.prerequisite {
            if !catalog.contains(prerequisite) {
                return Err(GameError::InvalidDataFormat(format!(
                    "quest '{}' has unknown prerequisite '{}'",
                    quest.id, prerequisite
                )));
            }
        }
    }

    Ok(catalog)
}

/// Parses item catalog content, normalizing effects into their canonical
/// mapping form.
pub fn parse_item_catalog(content: &str) -> Result<ItemCatalog> {
    let mut catalog = ItemCatalog::new();
    for fields in split_records(content)? {
        let item = parse_item_record(&fields)?;
        let id = item.id.clone();
        if catalog.insert(item).is_some() {
            return Err(GameError::InvalidDataFormat(format!(
                "duplicate item id: {}",
                id
            )));
        }
    }
    Ok(catalog)
}

/// Loads the quest catalog from a file.
pub fn load_quests(path: &Path) -> Result<QuestCatalog> {
    let catalog = parse_quest_catalog(&read_data_file(path)?);
    if let Ok(catalog) = &catalog {
        info!(count = catalog.len(), path = %path.display(), "quests loaded");
    }
    catalog
}

/// Loads the quest catalog and additionally rejects prerequisite cycles.
pub fn load_quests_strict(path: &Path) -> Result<QuestCatalog> {
    let catalog = load_quests(path)?;
    crate::quests::logic::validate_acyclic(&catalog)?;
    Ok(catalog)
}

/// Loads the item catalog from a file.
pub fn load_items(path: &Path) -> Result<ItemCatalog> {
    let catalog = parse_item_catalog(&read_data_file(path)?);
    if let Ok(catalog) = &catalog {
        info!(count = catalog.len(), path = %path.display(), "items loaded");
    }
    catalog
}
