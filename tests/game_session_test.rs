//! Driver-level flows through a [`GameSession`] with the default catalogs:
//! shop, equipment, combat outcomes, and the death/revive cycle.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use chronicles::character::{Character, ClassKind, SaveManager};
use chronicles::combat::{BattleStatus, PlayerAction};
use chronicles::data::defaults::{DEFAULT_ITEMS, DEFAULT_QUESTS};
use chronicles::data::{parse_item_catalog, parse_quest_catalog};
use chronicles::error::GameError;
use chronicles::items::logic as inventory;
use chronicles::session::GameSession;

fn new_session(character: Character) -> (GameSession, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let save = SaveManager::with_directory(dir.path()).unwrap();
    let session = GameSession::new(
        character,
        parse_quest_catalog(DEFAULT_QUESTS).unwrap(),
        parse_item_catalog(DEFAULT_ITEMS).unwrap(),
        save,
    );
    (session, dir)
}

#[test]
fn test_buy_equip_and_win_a_fight() {
    let (mut session, _dir) = new_session(Character::new("Brom", ClassKind::Warrior));
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let sword = session.items.require("iron_sword").unwrap().clone();
    inventory::purchase(&mut session.character, &sword).unwrap();
    assert_eq!(session.character.gold, 50);

    inventory::equip_weapon(&mut session.character, &sword).unwrap();
    assert_eq!(session.character.strength, 20);

    // Level 1 spawns a goblin; with 20 strength the warrior deals 18 per
    // turn and kills it on the third, taking two 3-damage answers.
    let outcome = session
        .run_encounter(&mut rng, |_| PlayerAction::Attack)
        .unwrap();
    assert_eq!(outcome.status, BattleStatus::PlayerWon);
    assert_eq!(session.character.health, 114);
    assert_eq!(session.character.gold, 60);
    assert_eq!(session.character.experience, 25);
}

#[test]
fn test_unknown_effect_stat_armor_equips_without_stat_change() {
    let (mut session, _dir) = new_session(Character::new("Brom", ClassKind::Warrior));

    let armor = session.items.require("steel_armor").unwrap().clone();
    inventory::purchase(&mut session.character, &armor).unwrap();
    let stats_before = (
        session.character.health,
        session.character.strength,
        session.character.magic,
    );

    inventory::equip_armor(&mut session.character, &armor).unwrap();
    assert_eq!(
        session.character.equipped_armor.as_deref(),
        Some("steel_armor")
    );
    // The default armor's `defense` stat has no matching attribute
    let stats_after = (
        session.character.health,
        session.character.strength,
        session.character.magic,
    );
    assert_eq!(stats_after, stats_before);
}

#[test]
fn test_health_potion_heals_after_a_fight() {
    let (mut session, _dir) = new_session(Character::new("Vera", ClassKind::Cleric));

    let potion = session.items.require("health_potion").unwrap().clone();
    inventory::purchase(&mut session.character, &potion).unwrap();

    session.character.health = 30;
    inventory::use_consumable(&mut session.character, &potion).unwrap();
    assert_eq!(session.character.health, 80);
    assert!(!inventory::has_item(&session.character, "health_potion"));
}

#[test]
fn test_defeat_then_revive_cycle() {
    let mut doomed = Character::new("Icarus", ClassKind::Mage);
    doomed.level = 6; // dragon tier
    doomed.health = 10;
    doomed.strength = 1;
    let (mut session, _dir) = new_session(doomed);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let outcome = session
        .run_encounter(&mut rng, |_| PlayerAction::Attack)
        .unwrap();
    assert_eq!(outcome.status, BattleStatus::EnemyWon);
    assert!(session.character.is_dead());
    assert_eq!(session.character.gold, 100); // defeat pays nothing

    assert!(session.revive_for_gold().unwrap());
    assert_eq!(session.character.gold, 50);
    assert_eq!(session.character.health, session.character.max_health / 2);
}

#[test]
fn test_dead_character_cannot_start_an_encounter() {
    let mut dead = Character::new("Ghost", ClassKind::Rogue);
    dead.health = 0;
    let (session, _dir) = new_session(dead);

    assert!(matches!(
        session.spawn_encounter(),
        Err(GameError::CharacterDead)
    ));
}

#[test]
fn test_session_save_round_trips_through_disk() {
    let (mut session, dir) = new_session(Character::new("Keeper", ClassKind::Warrior));

    let sword = session.items.require("iron_sword").unwrap().clone();
    inventory::purchase(&mut session.character, &sword).unwrap();
    inventory::equip_weapon(&mut session.character, &sword).unwrap();
    session.character.gain_experience(150).unwrap();
    session.save().unwrap();

    let manager = SaveManager::with_directory(dir.path()).unwrap();
    let loaded = manager.load_character("Keeper").unwrap();
    assert_eq!(loaded, session.character);
    assert_eq!(loaded.equipped_weapon.as_deref(), Some("iron_sword"));
    assert_eq!(loaded.level, 2);
}

#[test]
fn test_enemy_tier_follows_character_level() {
    let (session, _dir) = new_session(Character::new("Scout", ClassKind::Rogue));
    assert_eq!(session.spawn_encounter().unwrap().enemy().name(), "Goblin");

    let mut mid = Character::new("Scout", ClassKind::Rogue);
    mid.level = 4;
    let (session, _dir) = new_session(mid);
    assert_eq!(session.spawn_encounter().unwrap().enemy().name(), "Orc");

    let mut high = Character::new("Scout", ClassKind::Rogue);
    high.level = 9;
    let (session, _dir) = new_session(high);
    assert_eq!(session.spawn_encounter().unwrap().enemy().name(), "Dragon");
}
