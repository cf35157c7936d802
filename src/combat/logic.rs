//! Turn-based battle resolution.
//!
//! A [`Battle`] runs over a private working copy of the character and a
//! freshly generated enemy; nothing touches the persisted character until the
//! caller applies the resolved [`BattleOutcome`]. The player acts first each
//! round, the enemy answers only while both sides are standing and the battle
//! is still active.

use rand::Rng;
use tracing::debug;

use super::types::Enemy;
use crate::character::{Character, ClassKind};
use crate::constants::*;
use crate::error::{GameError, Result};

/// Battle state machine: `Active` until one of the terminal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleStatus {
    Active,
    PlayerWon,
    EnemyWon,
    Escaped,
}

/// What the player chooses to do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    SpecialAbility,
    Flee,
}

/// Class-specific special abilities, one per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialAbility {
    PowerStrike,
    Fireball,
    CriticalStrike,
    HealingLight,
}

impl SpecialAbility {
    pub fn for_class(class: ClassKind) -> Self {
        match class {
            ClassKind::Warrior => SpecialAbility::PowerStrike,
            ClassKind::Mage => SpecialAbility::Fireball,
            ClassKind::Rogue => SpecialAbility::CriticalStrike,
            ClassKind::Cleric => SpecialAbility::HealingLight,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpecialAbility::PowerStrike => "Power Strike",
            SpecialAbility::Fireball => "Fireball",
            SpecialAbility::CriticalStrike => "Critical Strike",
            SpecialAbility::HealingLight => "Healing Light",
        }
    }
}

/// One thing that happened during a turn, for the display layer to render.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    PlayerAttack { damage: i32 },
    AbilityDamage { ability: SpecialAbility, damage: i32 },
    AbilityMissed { ability: SpecialAbility },
    AbilityHeal { ability: SpecialAbility, amount: i32 },
    EscapeSucceeded,
    EscapeFailed,
    EnemyAttack { damage: i32 },
    EnemyDefeated { xp_reward: u32, gold_reward: u32 },
    PlayerDefeated,
}

/// Result of a finished battle, to be applied to the real character by the
/// caller. Rewards are zero unless the player won.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleOutcome {
    pub status: BattleStatus,
    pub xp_reward: u32,
    pub gold_reward: u32,
    /// Health of the working copy when the battle ended.
    pub final_health: i32,
}

/// Basic attack damage: strength minus a quarter of the defender's strength,
/// never below 1.
pub fn attack_damage(attacker_strength: i32, defender_strength: i32) -> i32 {
    (attacker_strength - defender_strength / DEFENSE_DIVISOR).max(MINIMUM_DAMAGE)
}

/// A single encounter between the character and one enemy.
pub struct Battle {
    character: Character,
    enemy: Enemy,
    status: BattleStatus,
    turn_count: u32,
    ability_cooldown: u32,
}

impl Battle {
    /// Starts a battle over a working copy of `character`.
    /// Fails with [`GameError::CharacterDead`] if the character cannot fight.
    pub fn new(character: &Character, enemy: Enemy) -> Result<Self> {
        if character.is_dead() {
            return Err(GameError::CharacterDead);
        }
        debug!(name = %character.name, enemy = enemy.name(), "battle started");
        Ok(Self {
            character: character.clone(),
            enemy,
            status: BattleStatus::Active,
            turn_count: 0,
            ability_cooldown: 0,
        })
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == BattleStatus::Active
    }

    /// The working copy being fought with (not the persisted character).
    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn ability_ready(&self) -> bool {
        self.ability_cooldown == 0
    }

    /// Runs one full round: the player's action, then (if the battle is
    /// still live) the enemy's answer. End conditions are checked after every
    /// damaging action.
    ///
    /// Fails with [`GameError::CombatNotActive`] once resolved and
    /// [`GameError::AbilityOnCooldown`] when the special is not ready; a
    /// cooldown failure does not consume the turn.
    pub fn take_turn(
        &mut self,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<Vec<BattleEvent>> {
        if !self.is_active() {
            return Err(GameError::CombatNotActive);
        }
        if action == PlayerAction::SpecialAbility && self.ability_cooldown > 0 {
            return Err(GameError::AbilityOnCooldown);
        }

        let mut events = Vec::new();
        match action {
            PlayerAction::Attack => {
                let damage = attack_damage(self.character.strength, self.enemy.strength);
                self.enemy.take_damage(damage);
                events.push(BattleEvent::PlayerAttack { damage });
            }
            PlayerAction::SpecialAbility => {
                events.push(self.use_special_ability(rng));
                // Ready again on the turn after next
                self.ability_cooldown = ABILITY_COOLDOWN_TURNS + 1;
            }
            PlayerAction::Flee => {
                if rng.gen_bool(ESCAPE_CHANCE) {
                    self.status = BattleStatus::Escaped;
                    events.push(BattleEvent::EscapeSucceeded);
                } else {
                    events.push(BattleEvent::EscapeFailed);
                }
            }
        }

        if self.is_active() && !self.enemy.is_alive() {
            self.status = BattleStatus::PlayerWon;
            events.push(BattleEvent::EnemyDefeated {
                xp_reward: self.enemy.xp_reward,
                gold_reward: self.enemy.gold_reward,
            });
        }

        if self.is_active() {
            let damage = attack_damage(self.enemy.strength, self.character.strength);
            self.character.take_damage(damage);
            events.push(BattleEvent::EnemyAttack { damage });

            if self.character.is_dead() {
                self.status = BattleStatus::EnemyWon;
                events.push(BattleEvent::PlayerDefeated);
            }
        }

        self.turn_count += 1;
        self.ability_cooldown = self.ability_cooldown.saturating_sub(1);
        Ok(events)
    }

    fn use_special_ability(&mut self, rng: &mut impl Rng) -> BattleEvent {
        let ability = SpecialAbility::for_class(self.character.class);
        match ability {
            SpecialAbility::PowerStrike => {
                let damage = self.character.strength * POWER_STRIKE_MULTIPLIER;
                self.enemy.take_damage(damage);
                BattleEvent::AbilityDamage { ability, damage }
            }
            SpecialAbility::Fireball => {
                let damage = self.character.magic * FIREBALL_MULTIPLIER;
                self.enemy.take_damage(damage);
                BattleEvent::AbilityDamage { ability, damage }
            }
            SpecialAbility::CriticalStrike => {
                if rng.gen_bool(CRITICAL_STRIKE_CHANCE) {
                    let damage = self.character.strength * CRITICAL_STRIKE_MULTIPLIER;
                    self.enemy.take_damage(damage);
                    BattleEvent::AbilityDamage { ability, damage }
                } else {
                    BattleEvent::AbilityMissed { ability }
                }
            }
            SpecialAbility::HealingLight => {
                let amount = self.character.heal(HEALING_LIGHT_AMOUNT);
                BattleEvent::AbilityHeal { ability, amount }
            }
        }
    }

    /// The resolved outcome; `None` while the battle is still active.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.status {
            BattleStatus::Active => None,
            BattleStatus::PlayerWon => Some(BattleOutcome {
                status: self.status,
                xp_reward: self.enemy.xp_reward,
                gold_reward: self.enemy.gold_reward,
                final_health: self.character.health,
            }),
            BattleStatus::EnemyWon | BattleStatus::Escaped => Some(BattleOutcome {
                status: self.status,
                xp_reward: 0,
                gold_reward: 0,
                final_health: self.character.health,
            }),
        }
    }
}
