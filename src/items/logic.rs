//! Inventory bookkeeping, item usage, equipment, and the shop.
//!
//! All operations mutate the passed [`Character`] directly; catalog records
//! are read-only. Failed operations leave the character unchanged.

use tracing::debug;

use super::types::{EquipmentSlot, ItemDefinition, ItemEffect, ItemKind};
use crate::character::Character;
use crate::constants::{MAX_INVENTORY_SIZE, SELL_PRICE_DIVISOR};
use crate::error::{GameError, Result};

/// Appends an item id, failing when the inventory is at capacity.
pub fn add_to_inventory(character: &mut Character, item_id: &str) -> Result<()> {
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull);
    }
    character.inventory.push(item_id.to_string());
    Ok(())
}

/// Removes one instance of an item id.
pub fn remove_from_inventory(character: &mut Character, item_id: &str) -> Result<()> {
    let position = character
        .inventory
        .iter()
        .position(|id| id == item_id)
        .ok_or_else(|| GameError::ItemNotFound(item_id.to_string()))?;
    character.inventory.remove(position);
    Ok(())
}

pub fn has_item(character: &Character, item_id: &str) -> bool {
    character.inventory.iter().any(|id| id == item_id)
}

pub fn count_item(character: &Character, item_id: &str) -> usize {
    character.inventory.iter().filter(|id| *id == item_id).count()
}

pub fn inventory_space_remaining(character: &Character) -> usize {
    MAX_INVENTORY_SIZE - character.inventory.len()
}

/// Applies each stat delta to the matching character attribute.
///
/// Recognized stats are `health`, `max_health`, `strength`, and `magic`;
/// anything else is silently ignored. Health stays within `[0, max_health]`.
pub fn apply_effect(character: &mut Character, effect: &ItemEffect) {
    for (stat, amount) in &effect.entries {
        match stat.as_str() {
            "health" => {
                character.health = (character.health + amount).min(character.max_health).max(0);
            }
            "max_health" => {
                character.max_health += amount;
                character.health = character.health.min(character.max_health).max(0);
            }
            "strength" => character.strength += amount,
            "magic" => character.magic += amount,
            other => {
                debug!(stat = other, "ignoring unknown effect stat");
            }
        }
    }
}

/// Consumes one instance of a consumable, applying its effect.
pub fn use_consumable(character: &mut Character, item: &ItemDefinition) -> Result<()> {
    if !has_item(character, &item.id) {
        return Err(GameError::ItemNotFound(item.id.clone()));
    }
    if item.kind != ItemKind::Consumable {
        return Err(GameError::InvalidItemType {
            item_id: item.id.clone(),
            expected: "consumable",
            actual: item.kind.to_string(),
        });
    }

    apply_effect(character, &item.effect);
    remove_from_inventory(character, &item.id)?;
    Ok(())
}

fn slot_mut<'a>(character: &'a mut Character, slot: EquipmentSlot) -> &'a mut Option<String> {
    match slot {
        EquipmentSlot::Weapon => &mut character.equipped_weapon,
        EquipmentSlot::Armor => &mut character.equipped_armor,
    }
}

/// Equips an item into the given slot.
///
/// An occupied slot is vacated first: the old item goes back to the
/// inventory, and if there is no room for it the whole equip aborts with
/// [`GameError::InventoryFull`], leaving the prior item equipped. The new
/// item's effect is applied on top of current stats.
pub fn equip(character: &mut Character, item: &ItemDefinition, slot: EquipmentSlot) -> Result<()> {
    if !has_item(character, &item.id) {
        return Err(GameError::ItemNotFound(item.id.clone()));
    }
    if item.kind != slot.expected_kind() {
        return Err(GameError::InvalidItemType {
            item_id: item.id.clone(),
            expected: slot.expected_kind().name(),
            actual: item.kind.to_string(),
        });
    }

    // Vacate the slot before touching the new item; the capacity check runs
    // while the new item still occupies an inventory slot, so equipping at
    // capacity fails even though a swap would technically fit.
    if slot_mut(character, slot).is_some() {
        unequip(character, slot)?;
    }

    remove_from_inventory(character, &item.id)?;
    apply_effect(character, &item.effect);
    *slot_mut(character, slot) = Some(item.id.clone());
    debug!(item = %item.id, slot = slot.name(), "equipped");
    Ok(())
}

pub fn equip_weapon(character: &mut Character, item: &ItemDefinition) -> Result<()> {
    equip(character, item, EquipmentSlot::Weapon)
}

pub fn equip_armor(character: &mut Character, item: &ItemDefinition) -> Result<()> {
    equip(character, item, EquipmentSlot::Armor)
}

/// Moves the equipped item (if any) back into the inventory.
///
/// Returns the item id that was unequipped, or `None` for an empty slot.
/// The item's stat bonus is not removed; see DESIGN.md.
pub fn unequip(character: &mut Character, slot: EquipmentSlot) -> Result<Option<String>> {
    let item_id = match slot_mut(character, slot).clone() {
        Some(id) => id,
        None => return Ok(None),
    };

    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull);
    }

    character.inventory.push(item_id.clone());
    *slot_mut(character, slot) = None;
    debug!(item = %item_id, slot = slot.name(), "unequipped");
    Ok(Some(item_id))
}

/// Buys one instance of an item from the shop.
pub fn purchase(character: &mut Character, item: &ItemDefinition) -> Result<()> {
    if character.gold < item.cost {
        return Err(GameError::InsufficientGold {
            need: item.cost,
            have: character.gold,
        });
    }
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(GameError::InventoryFull);
    }

    character.add_gold(-(item.cost as i64))?;
    add_to_inventory(character, &item.id)?;
    Ok(())
}

/// Sells one instance of an item for half its cost. Returns the gold
/// received.
pub fn sell(character: &mut Character, item: &ItemDefinition) -> Result<u32> {
    remove_from_inventory(character, &item.id)?;
    let price = item.cost / SELL_PRICE_DIVISOR;
    character.add_gold(price as i64)?;
    Ok(price)
}
