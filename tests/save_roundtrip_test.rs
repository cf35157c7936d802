//! Persistence round-trips through the flat-text save format.

use chronicles::character::save::{parse_character, serialize_character};
use chronicles::character::{Character, ClassKind, SaveManager};
use chronicles::error::GameError;

fn lived_in_character() -> Character {
    let mut c = Character::new("Ari", ClassKind::Mage);
    c.gain_experience(250).unwrap();
    c.add_gold(-30).unwrap();
    c.inventory = vec![
        "health_potion".to_string(),
        "health_potion".to_string(),
        "iron_sword".to_string(),
    ];
    c.equipped_weapon = Some("ancient_bow".to_string());
    c.active_quests = vec!["slay_orc".to_string()];
    c.completed_quests = vec!["defeat_goblin".to_string()];
    c
}

#[test]
fn test_round_trip_equality_field_for_field() {
    let original = lived_in_character();

    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::with_directory(dir.path()).unwrap();
    manager.save_character(&original).unwrap();
    let loaded = manager.load_character("Ari").unwrap();

    assert_eq!(loaded, original);
}

#[test]
fn test_round_trip_fresh_character_with_empty_lists() {
    let original = Character::new("Blank", ClassKind::Cleric);
    let loaded = parse_character(&serialize_character(&original)).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_save_file_shape_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::with_directory(dir.path()).unwrap();
    manager.save_character(&lived_in_character()).unwrap();

    let path = dir.path().join("Ari_save.txt");
    assert!(path.exists());

    let content = std::fs::read_to_string(path).unwrap();
    let keys: Vec<&str> = content
        .lines()
        .filter_map(|l| l.split(':').next())
        .collect();
    assert_eq!(
        keys,
        vec![
            "NAME",
            "CLASS",
            "LEVEL",
            "HEALTH",
            "MAX_HEALTH",
            "STRENGTH",
            "MAGIC",
            "EXPERIENCE",
            "GOLD",
            "INVENTORY",
            "ACTIVE_QUESTS",
            "COMPLETED_QUESTS",
        ]
    );
}

#[test]
fn test_overwriting_save_keeps_latest_state() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::with_directory(dir.path()).unwrap();

    let mut c = Character::new("Hero", ClassKind::Warrior);
    manager.save_character(&c).unwrap();

    c.gain_experience(150).unwrap();
    c.add_gold(25).unwrap();
    manager.save_character(&c).unwrap();

    let loaded = manager.load_character("Hero").unwrap();
    assert_eq!(loaded.level, 2);
    assert_eq!(loaded.gold, 125);
}

#[test]
fn test_tampered_save_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::with_directory(dir.path()).unwrap();
    manager
        .save_character(&Character::new("Hero", ClassKind::Warrior))
        .unwrap();

    let path = dir.path().join("Hero_save.txt");
    let tampered = std::fs::read_to_string(&path)
        .unwrap()
        .replace("GOLD: 100", "GOLD: plenty");
    std::fs::write(&path, tampered).unwrap();

    let err = manager.load_character("Hero").unwrap_err();
    assert!(matches!(err, GameError::InvalidSaveData(_)));
}

#[test]
fn test_garbage_save_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::with_directory(dir.path()).unwrap();

    std::fs::write(dir.path().join("Mystery_save.txt"), "???\n").unwrap();
    let err = manager.load_character("Mystery").unwrap_err();
    assert!(matches!(err, GameError::InvalidSaveData(_)));
}

#[test]
fn test_list_and_delete_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let manager = SaveManager::with_directory(dir.path()).unwrap();

    manager
        .save_character(&Character::new("Ari", ClassKind::Mage))
        .unwrap();
    manager
        .save_character(&Character::new("Brom", ClassKind::Warrior))
        .unwrap();
    assert_eq!(manager.list_characters().unwrap(), vec!["Ari", "Brom"]);

    manager.delete_character("Ari").unwrap();
    assert_eq!(manager.list_characters().unwrap(), vec!["Brom"]);
    assert!(matches!(
        manager.load_character("Ari"),
        Err(GameError::CharacterNotFound(_))
    ));
}
