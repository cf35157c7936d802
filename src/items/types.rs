use std::fmt;

use crate::error::{GameError, Result};

/// Item categories. Only consumables can be used directly; weapons and armor
/// go into the matching equipment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Weapon,
    Armor,
    Consumable,
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Weapon => "weapon",
            ItemKind::Armor => "armor",
            ItemKind::Consumable => "consumable",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "weapon" => Ok(ItemKind::Weapon),
            "armor" => Ok(ItemKind::Armor),
            "consumable" => Ok(ItemKind::Consumable),
            other => Err(GameError::InvalidDataFormat(format!(
                "invalid item type: {} (must be weapon, armor, or consumable)",
                other
            ))),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An equipment attachment point on a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl EquipmentSlot {
    /// The item kind this slot accepts.
    pub fn expected_kind(&self) -> ItemKind {
        match self {
            EquipmentSlot::Weapon => ItemKind::Weapon,
            EquipmentSlot::Armor => ItemKind::Armor,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Armor => "armor",
        }
    }
}

/// Stat deltas applied when an item is used or equipped, in file order.
///
/// Catalog files write effects either as a single `stat:value` pair or as a
/// comma-separated mapping (`strength:5,magic:2`); both normalize to this one
/// representation at load time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemEffect {
    pub entries: Vec<(String, i32)>,
}

impl ItemEffect {
    pub fn new(entries: Vec<(String, i32)>) -> Self {
        Self { entries }
    }

    /// Parses the textual effect forms into the canonical mapping.
    pub fn parse(value: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for pair in value.split(',') {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }
            let (stat, amount) = pair.split_once(':').ok_or_else(|| {
                GameError::InvalidDataFormat(format!("invalid effect format: {}", value))
            })?;
            let amount: i32 = amount.trim().parse().map_err(|_| {
                GameError::InvalidDataFormat(format!("invalid effect value: {}", pair))
            })?;
            entries.push((stat.trim().to_lowercase(), amount));
        }
        if entries.is_empty() {
            return Err(GameError::InvalidDataFormat(format!(
                "invalid effect format: {}",
                value
            )));
        }
        Ok(Self { entries })
    }
}

impl fmt::Display for ItemEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .entries
            .iter()
            .map(|(stat, amount)| format!("{}:{}", stat, amount))
            .collect();
        f.write_str(&rendered.join(","))
    }
}

/// An immutable catalog item record.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub effect: ItemEffect,
    pub cost: u32,
    pub description: String,
}

/// The session-wide item catalog, keyed by item id. Loaded once, never
/// mutated afterwards; ordered for stable shop display.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: std::collections::BTreeMap<String, ItemDefinition>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: ItemDefinition) -> Option<ItemDefinition> {
        self.items.insert(item.id.clone(), item)
    }

    pub fn get(&self, item_id: &str) -> Option<&ItemDefinition> {
        self.items.get(item_id)
    }

    /// Like [`get`](Self::get), but fails with [`GameError::ItemNotFound`].
    pub fn require(&self, item_id: &str) -> Result<&ItemDefinition> {
        self.get(item_id)
            .ok_or_else(|| GameError::ItemNotFound(item_id.to_string()))
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.contains_key(item_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
