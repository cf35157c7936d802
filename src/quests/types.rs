use std::collections::BTreeMap;

use crate::error::{GameError, Result};

/// An immutable catalog quest record.
///
/// `prerequisite` is `None` for entry quests; the file sentinel `NONE` is
/// normalized away at load time. Prerequisite edges form the quest graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reward_xp: u32,
    pub reward_gold: u32,
    pub required_level: u32,
    pub prerequisite: Option<String>,
}

/// The session-wide quest catalog, keyed by quest id. Loaded once, never
/// mutated afterwards; ordered for stable display.
#[derive(Debug, Clone, Default)]
pub struct QuestCatalog {
    quests: BTreeMap<String, Quest>,
}

impl QuestCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, quest: Quest) -> Option<Quest> {
        self.quests.insert(quest.id.clone(), quest)
    }

    pub fn get(&self, quest_id: &str) -> Option<&Quest> {
        self.quests.get(quest_id)
    }

    /// Like [`get`](Self::get), but fails with [`GameError::QuestNotFound`].
    pub fn require(&self, quest_id: &str) -> Result<&Quest> {
        self.get(quest_id)
            .ok_or_else(|| GameError::QuestNotFound(quest_id.to_string()))
    }

    pub fn contains(&self, quest_id: &str) -> bool {
        self.quests.contains_key(quest_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quest> {
        self.quests.values()
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}

/// What a completed quest paid out, for display by the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestCompletion {
    pub quest_id: String,
    pub title: String,
    pub reward_xp: u32,
    pub reward_gold: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quest(id: &str) -> Quest {
        Quest {
            id: id.to_string(),
            title: format!("Quest {}", id),
            description: String::new(),
            reward_xp: 50,
            reward_gold: 25,
            required_level: 1,
            prerequisite: None,
        }
    }

    #[test]
    fn test_catalog_insert_and_get() {
        let mut catalog = QuestCatalog::new();
        assert!(catalog.insert(quest("a")).is_none());
        assert!(catalog.get("a").is_some());
        assert!(catalog.get("b").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_catalog_require_missing() {
        let catalog = QuestCatalog::new();
        let err = catalog.require("ghost").unwrap_err();
        assert!(matches!(err, GameError::QuestNotFound(id) if id == "ghost"));
    }

    #[test]
    fn test_catalog_iteration_is_ordered() {
        let mut catalog = QuestCatalog::new();
        catalog.insert(quest("zeta"));
        catalog.insert(quest("alpha"));
        let ids: Vec<&str> = catalog.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }
}
