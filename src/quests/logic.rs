//! Quest acceptance, completion, and dependency resolution.
//!
//! Per character and quest, the states are Unseen -> Active -> Completed,
//! with abandon returning an active quest to the available pool. Eligibility
//! is recomputed on demand from the character's level and completed set plus
//! the catalog's prerequisite edges.

use std::collections::HashSet;

use tracing::info;

use super::types::{Quest, QuestCatalog, QuestCompletion};
use crate::character::Character;
use crate::error::{GameError, Result};

pub fn is_quest_active(character: &Character, quest_id: &str) -> bool {
    character.active_quests.iter().any(|id| id == quest_id)
}

pub fn is_quest_completed(character: &Character, quest_id: &str) -> bool {
    character.completed_quests.iter().any(|id| id == quest_id)
}

/// Accepts a quest, adding it to the character's active set.
///
/// Accepting a quest that is already active succeeds without duplicating the
/// entry. Fails with [`GameError::QuestNotFound`],
/// [`GameError::QuestAlreadyCompleted`], [`GameError::InsufficientLevel`], or
/// [`GameError::QuestRequirementsNotMet`].
pub fn accept_quest(
    character: &mut Character,
    quest_id: &str,
    catalog: &QuestCatalog,
) -> Result<()> {
    let quest = catalog.require(quest_id)?;

    if is_quest_completed(character, quest_id) {
        return Err(GameError::QuestAlreadyCompleted(quest_id.to_string()));
    }
    if is_quest_active(character, quest_id) {
        return Ok(());
    }
    if character.level < quest.required_level {
        return Err(GameError::InsufficientLevel {
            have: character.level,
            need: quest.required_level,
        });
    }
    if let Some(prerequisite) = &quest.prerequisite {
        if !is_quest_completed(character, prerequisite) {
            return Err(GameError::QuestRequirementsNotMet {
                prerequisite: prerequisite.clone(),
            });
        }
    }

    character.active_quests.push(quest_id.to_string());
    info!(name = %character.name, quest = quest_id, "quest accepted");
    Ok(())
}

/// Completes an active quest: awards XP (which may level up the character),
/// then gold, and moves the id from the active to the completed set.
///
/// Fails with [`GameError::QuestNotActive`] when the quest is not active, and
/// defensively with [`GameError::QuestNotFound`] for an id missing from the
/// catalog.
pub fn complete_quest(
    character: &mut Character,
    quest_id: &str,
    catalog: &QuestCatalog,
) -> Result<QuestCompletion> {
    if !is_quest_active(character, quest_id) {
        return Err(GameError::QuestNotActive(quest_id.to_string()));
    }
    let quest = catalog.require(quest_id)?;

    if quest.reward_xp > 0 {
        character.gain_experience(quest.reward_xp)?;
    }
    if quest.reward_gold > 0 {
        character.add_gold(quest.reward_gold as i64)?;
    }

    character.active_quests.retain(|id| id != quest_id);
    character.completed_quests.push(quest_id.to_string());
    info!(name = %character.name, quest = quest_id, "quest completed");

    Ok(QuestCompletion {
        quest_id: quest.id.clone(),
        title: quest.title.clone(),
        reward_xp: quest.reward_xp,
        reward_gold: quest.reward_gold,
    })
}

/// Removes a quest from the active set, returning it to the available pool.
pub fn abandon_quest(character: &mut Character, quest_id: &str) -> Result<()> {
    if !is_quest_active(character, quest_id) {
        return Err(GameError::QuestNotActive(quest_id.to_string()));
    }
    character.active_quests.retain(|id| id != quest_id);
    info!(name = %character.name, quest = quest_id, "quest abandoned");
    Ok(())
}

/// Non-erroring form of the accept checks, for menu display.
pub fn can_accept_quest(character: &Character, quest_id: &str, catalog: &QuestCatalog) -> bool {
    let Some(quest) = catalog.get(quest_id) else {
        return false;
    };
    if is_quest_completed(character, quest_id) || is_quest_active(character, quest_id) {
        return false;
    }
    if character.level < quest.required_level {
        return false;
    }
    match &quest.prerequisite {
        Some(prerequisite) => is_quest_completed(character, prerequisite),
        None => true,
    }
}

/// Quests the character could accept right now. Recomputed on demand.
pub fn available_quests<'a>(character: &Character, catalog: &'a QuestCatalog) -> Vec<&'a Quest> {
    catalog
        .iter()
        .filter(|quest| can_accept_quest(character, &quest.id, catalog))
        .collect()
}

/// Catalog records for the character's active quests, in acceptance order.
pub fn active_quests<'a>(character: &Character, catalog: &'a QuestCatalog) -> Vec<&'a Quest> {
    character
        .active_quests
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect()
}

/// Catalog records for the character's completed quests, in completion order.
pub fn completed_quests<'a>(character: &Character, catalog: &'a QuestCatalog) -> Vec<&'a Quest> {
    character
        .completed_quests
        .iter()
        .filter_map(|id| catalog.get(id))
        .collect()
}

/// Walks prerequisite edges back from `quest_id` and returns the full chain,
/// earliest requirement first, ending with the queried quest.
///
/// Prerequisite cycles are not rejected at catalog load, so the walk keeps a
/// visited set and stops on the first repeated id instead of looping. An edge
/// that leaves the catalog also ends the walk.
pub fn prerequisite_chain(quest_id: &str, catalog: &QuestCatalog) -> Result<Vec<String>> {
    catalog.require(quest_id)?;

    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Some(quest_id.to_string());

    while let Some(id) = current {
        if !visited.insert(id.clone()) {
            break;
        }
        let Some(quest) = catalog.get(&id) else {
            break;
        };
        chain.push(id);
        current = quest.prerequisite.clone();
    }

    chain.reverse();
    Ok(chain)
}

/// Strict-mode catalog check: rejects prerequisite cycles.
///
/// The default loader allows cycles (traversal guards against them); callers
/// that want early rejection run this after loading.
pub fn validate_acyclic(catalog: &QuestCatalog) -> Result<()> {
    for quest in catalog.iter() {
        let mut visited = HashSet::new();
        let mut current = Some(quest.id.clone());
        while let Some(id) = current {
            if !visited.insert(id.clone()) {
                return Err(GameError::InvalidDataFormat(format!(
                    "prerequisite cycle involving quest '{}'",
                    id
                )));
            }
            current = catalog.get(&id).and_then(|q| q.prerequisite.clone());
        }
    }
    Ok(())
}

/// Share of the catalog the character has completed, as a percentage.
pub fn completion_percentage(character: &Character, catalog: &QuestCatalog) -> f64 {
    if catalog.is_empty() {
        return 0.0;
    }
    character.completed_quests.len() as f64 / catalog.len() as f64 * 100.0
}

/// Totals of the rewards paid out by the character's completed quests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuestRewardTotals {
    pub xp: u32,
    pub gold: u32,
}

pub fn total_rewards_earned(character: &Character, catalog: &QuestCatalog) -> QuestRewardTotals {
    let mut totals = QuestRewardTotals::default();
    for id in &character.completed_quests {
        if let Some(quest) = catalog.get(id) {
            totals.xp += quest.reward_xp;
            totals.gold += quest.reward_gold;
        }
    }
    totals
}

/// Quests whose required level falls within `[min_level, max_level]`.
pub fn quests_by_level<'a>(
    catalog: &'a QuestCatalog,
    min_level: u32,
    max_level: u32,
) -> Vec<&'a Quest> {
    catalog
        .iter()
        .filter(|quest| quest.required_level >= min_level && quest.required_level <= max_level)
        .collect()
}
