use std::fmt;

use crate::constants::*;
use crate::error::{GameError, Result};

/// The fixed enemy roster. Each kind carries a static stat tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Goblin,
    Orc,
    Dragon,
}

impl EnemyKind {
    /// Static (health, strength, magic, xp_reward, gold_reward) table.
    fn stats(&self) -> (i32, i32, i32, u32, u32) {
        match self {
            EnemyKind::Goblin => GOBLIN_STATS,
            EnemyKind::Orc => ORC_STATS,
            EnemyKind::Dragon => DRAGON_STATS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "Goblin",
            EnemyKind::Orc => "Orc",
            EnemyKind::Dragon => "Dragon",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "goblin" => Ok(EnemyKind::Goblin),
            "orc" => Ok(EnemyKind::Orc),
            "dragon" => Ok(EnemyKind::Dragon),
            other => Err(GameError::UnknownEnemyType(other.to_string())),
        }
    }

    /// Picks the enemy tier for a character level: goblins up to level 2,
    /// orcs up to level 5, dragons beyond.
    pub fn for_level(character_level: u32) -> Self {
        if character_level <= GOBLIN_MAX_LEVEL {
            EnemyKind::Goblin
        } else if character_level <= ORC_MAX_LEVEL {
            EnemyKind::Orc
        } else {
            EnemyKind::Dragon
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A per-encounter opponent. Never persisted; a fresh one is generated for
/// every battle.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub health: i32,
    pub max_health: i32,
    pub strength: i32,
    pub magic: i32,
    pub xp_reward: u32,
    pub gold_reward: u32,
}

impl Enemy {
    pub fn spawn(kind: EnemyKind) -> Self {
        let (health, strength, magic, xp_reward, gold_reward) = kind.stats();
        Self {
            kind,
            health,
            max_health: health,
            strength,
            magic,
            xp_reward,
            gold_reward,
        }
    }

    /// Spawns the enemy tier matching a character level.
    pub fn for_level(character_level: u32) -> Self {
        Self::spawn(EnemyKind::for_level(character_level))
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }
}
