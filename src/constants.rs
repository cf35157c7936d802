// Character creation
pub const STARTING_GOLD: u32 = 100;
pub const STARTING_LEVEL: u32 = 1;

// Class base stats: (health, strength, magic)
pub const WARRIOR_BASE_STATS: (i32, i32, i32) = (120, 15, 5);
pub const MAGE_BASE_STATS: (i32, i32, i32) = (80, 8, 20);
pub const ROGUE_BASE_STATS: (i32, i32, i32) = (90, 12, 10);
pub const CLERIC_BASE_STATS: (i32, i32, i32) = (100, 10, 15);

// XP and leveling
pub const XP_PER_LEVEL_STEP: u32 = 100;
pub const LEVEL_UP_MAX_HEALTH_BONUS: i32 = 10;
pub const LEVEL_UP_STRENGTH_BONUS: i32 = 2;
pub const LEVEL_UP_MAGIC_BONUS: i32 = 2;

// Inventory and shop
pub const MAX_INVENTORY_SIZE: usize = 20;
pub const SELL_PRICE_DIVISOR: u32 = 2;

// Death and revival
pub const REVIVE_HEALTH_DIVISOR: i32 = 2;
pub const REVIVE_GOLD_COST: u32 = 50;

// Combat
pub const DEFENSE_DIVISOR: i32 = 4;
pub const MINIMUM_DAMAGE: i32 = 1;
pub const ESCAPE_CHANCE: f64 = 0.5;
pub const CRITICAL_STRIKE_CHANCE: f64 = 0.5;
pub const POWER_STRIKE_MULTIPLIER: i32 = 2;
pub const FIREBALL_MULTIPLIER: i32 = 2;
pub const CRITICAL_STRIKE_MULTIPLIER: i32 = 3;
pub const HEALING_LIGHT_AMOUNT: i32 = 30;
/// Turns a special ability stays unavailable after use.
pub const ABILITY_COOLDOWN_TURNS: u32 = 1;

// Enemy tier thresholds (inclusive upper bounds on character level)
pub const GOBLIN_MAX_LEVEL: u32 = 2;
pub const ORC_MAX_LEVEL: u32 = 5;

// Enemy stats: (health, strength, magic, xp_reward, gold_reward)
pub const GOBLIN_STATS: (i32, i32, i32, u32, u32) = (50, 8, 2, 25, 10);
pub const ORC_STATS: (i32, i32, i32, u32, u32) = (80, 12, 5, 50, 25);
pub const DRAGON_STATS: (i32, i32, i32, u32, u32) = (200, 25, 15, 200, 100);

// Persistence
pub const SAVE_FILE_SUFFIX: &str = "_save.txt";
pub const APP_DIR_NAME: &str = ".chronicles";
pub const SAVE_SUBDIR_NAME: &str = "saves";
pub const DATA_SUBDIR_NAME: &str = "data";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const QUESTS_FILE_NAME: &str = "quests.txt";
pub const ITEMS_FILE_NAME: &str = "items.txt";
