//! Leveling, gold, healing, and death rules for [`Character`].

use tracing::debug;

use super::types::Character;
use crate::constants::*;
use crate::error::{GameError, Result};

impl Character {
    /// XP needed to advance past the current level.
    pub fn xp_to_next_level(&self) -> u32 {
        self.level * XP_PER_LEVEL_STEP
    }

    /// Grants experience and processes level-ups.
    ///
    /// A single large grant can trigger several level-ups; each one costs
    /// `level * 100` XP, raises max health by 10 and strength/magic by 2,
    /// and restores health to the new maximum. Returns the number of levels
    /// gained. Fails with [`GameError::CharacterDead`] when health is 0.
    pub fn gain_experience(&mut self, amount: u32) -> Result<u32> {
        if self.is_dead() {
            return Err(GameError::CharacterDead);
        }

        self.experience += amount;

        let mut levels_gained = 0;
        while self.experience >= self.xp_to_next_level() {
            self.experience -= self.xp_to_next_level();
            self.level += 1;
            self.max_health += LEVEL_UP_MAX_HEALTH_BONUS;
            self.strength += LEVEL_UP_STRENGTH_BONUS;
            self.magic += LEVEL_UP_MAGIC_BONUS;
            self.health = self.max_health;
            levels_gained += 1;
        }

        if levels_gained > 0 {
            debug!(name = %self.name, level = self.level, "level up");
        }
        Ok(levels_gained)
    }

    /// Adjusts the gold balance by `delta` (negative for purchases).
    ///
    /// Fails with [`GameError::InsufficientGold`] if the balance would go
    /// negative; the balance is left untouched in that case. Returns the new
    /// balance on success.
    pub fn add_gold(&mut self, delta: i64) -> Result<u32> {
        let new_balance = self.gold as i64 + delta;
        if new_balance < 0 {
            return Err(GameError::InsufficientGold {
                need: (-delta) as u32,
                have: self.gold,
            });
        }
        self.gold = new_balance as u32;
        Ok(self.gold)
    }

    /// Restores up to `amount` health, clamped at max health.
    /// Returns the amount actually healed (0 when already full).
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.health >= self.max_health {
            return 0;
        }
        let healed = amount.min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Reduces health by `amount`, never below 0.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Brings a dead character back at half max health.
    /// Returns false without changing anything when the character is alive.
    pub fn revive(&mut self) -> bool {
        if self.health > 0 {
            return false;
        }
        self.health = self.max_health / REVIVE_HEALTH_DIVISOR;
        true
    }
}
