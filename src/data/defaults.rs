//! Starter catalog content, written when no data files exist yet.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::constants::{ITEMS_FILE_NAME, QUESTS_FILE_NAME};
use crate::error::Result;

pub const DEFAULT_QUESTS: &str = "\
QUEST_ID: defeat_goblin
TITLE: Defeat the Goblin
DESCRIPTION: A goblin has been causing trouble in the nearby forest. Defeat it!
REWARD_XP: 50
REWARD_GOLD: 25
REQUIRED_LEVEL: 1
PREREQUISITE: NONE

QUEST_ID: slay_orc
TITLE: Slay the Orc
DESCRIPTION: A powerful orc has been terrorizing the village. Defeat it to save the people!
REWARD_XP: 150
REWARD_GOLD: 75
REQUIRED_LEVEL: 3
PREREQUISITE: defeat_goblin

QUEST_ID: defeat_dragon
TITLE: Defeat the Dragon
DESCRIPTION: The mighty dragon must be stopped before it destroys everything!
REWARD_XP: 500
REWARD_GOLD: 250
REQUIRED_LEVEL: 6
PREREQUISITE: slay_orc
";

pub const DEFAULT_ITEMS: &str = "\
ITEM_ID: iron_sword
NAME: Iron Sword
TYPE: weapon
EFFECT: strength:5
COST: 50
DESCRIPTION: A basic iron sword. Good for beginners.

ITEM_ID: steel_armor
NAME: Steel Armor
TYPE: armor
EFFECT: defense:3
COST: 100
DESCRIPTION: Protective steel armor. Reduces incoming damage.

ITEM_ID: health_potion
NAME: Health Potion
TYPE: consumable
EFFECT: health:50
COST: 25
DESCRIPTION: Restores 50 health points when used.

ITEM_ID: ancient_bow
NAME: Ancient Bow
TYPE: weapon
EFFECT: strength:8
COST: 150
DESCRIPTION: A legendary bow carved from ancient wood.

ITEM_ID: dragon_scale_armor
NAME: Dragon Scale Armor
TYPE: armor
EFFECT: defense:8
COST: 300
DESCRIPTION: Forged from real dragon scales. Extremely protective.
";

/// Ensures both catalog files exist under `data_dir`, writing the starter
/// content for any that are missing. Returns the (quests, items) paths.
pub fn ensure_data_files(data_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(data_dir)?;

    let quests_path = data_dir.join(QUESTS_FILE_NAME);
    if !quests_path.exists() {
        fs::write(&quests_path, DEFAULT_QUESTS)?;
        info!(path = %quests_path.display(), "wrote default quests file");
    }

    let items_path = data_dir.join(ITEMS_FILE_NAME);
    if !items_path.exists() {
        fs::write(&items_path, DEFAULT_ITEMS)?;
        info!(path = %items_path.display(), "wrote default items file");
    }

    Ok((quests_path, items_path))
}
