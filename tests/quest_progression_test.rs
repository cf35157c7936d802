//! End-to-end quest progression over the default catalog: the three-quest
//! chain gates on levels and prerequisites, pays out rewards, and feeds the
//! leveling loop.

use chronicles::character::{Character, ClassKind};
use chronicles::data::defaults::DEFAULT_QUESTS;
use chronicles::data::parse_quest_catalog;
use chronicles::error::GameError;
use chronicles::quests::logic::{
    abandon_quest, accept_quest, available_quests, complete_quest, prerequisite_chain,
    total_rewards_earned,
};

#[test]
fn test_full_chain_progression() {
    let catalog = parse_quest_catalog(DEFAULT_QUESTS).unwrap();
    let mut hero = Character::new("Chainwalker", ClassKind::Warrior);

    // Only the entry quest is available at level 1
    let available: Vec<&str> = available_quests(&hero, &catalog)
        .iter()
        .map(|q| q.id.as_str())
        .collect();
    assert_eq!(available, vec!["defeat_goblin"]);

    accept_quest(&mut hero, "defeat_goblin", &catalog).unwrap();
    let completion = complete_quest(&mut hero, "defeat_goblin", &catalog).unwrap();
    assert_eq!(completion.title, "Defeat the Goblin");
    assert_eq!(hero.experience, 50);
    assert_eq!(hero.gold, 125);

    // The next link needs level 3
    let err = accept_quest(&mut hero, "slay_orc", &catalog).unwrap_err();
    assert!(matches!(
        err,
        GameError::InsufficientLevel { have: 1, need: 3 }
    ));

    // Grind to level 3 (50 + 350: level 1 costs 100, level 2 costs 200)
    hero.gain_experience(350).unwrap();
    assert_eq!(hero.level, 3);
    assert_eq!(hero.experience, 100);

    accept_quest(&mut hero, "slay_orc", &catalog).unwrap();
    complete_quest(&mut hero, "slay_orc", &catalog).unwrap();
    assert_eq!(hero.gold, 200);

    // Dragon quest still gated on level 6
    assert!(matches!(
        accept_quest(&mut hero, "defeat_dragon", &catalog),
        Err(GameError::InsufficientLevel { .. })
    ));

    hero.gain_experience(2000).unwrap();
    assert!(hero.level >= 6);

    accept_quest(&mut hero, "defeat_dragon", &catalog).unwrap();
    let completion = complete_quest(&mut hero, "defeat_dragon", &catalog).unwrap();
    assert_eq!(completion.reward_xp, 500);
    assert_eq!(completion.reward_gold, 250);

    let totals = total_rewards_earned(&hero, &catalog);
    assert_eq!(totals.xp, 700);
    assert_eq!(totals.gold, 350);
    assert!(available_quests(&hero, &catalog).is_empty());
}

#[test]
fn test_prerequisite_must_be_completed_not_just_accepted() {
    let catalog = parse_quest_catalog(DEFAULT_QUESTS).unwrap();
    let mut hero = Character::new("Eager", ClassKind::Warrior);
    hero.level = 3;

    accept_quest(&mut hero, "defeat_goblin", &catalog).unwrap();
    let err = accept_quest(&mut hero, "slay_orc", &catalog).unwrap_err();
    assert!(matches!(err, GameError::QuestRequirementsNotMet { .. }));
}

#[test]
fn test_accept_complete_accept_again_fails() {
    let catalog = parse_quest_catalog(DEFAULT_QUESTS).unwrap();
    let mut hero = Character::new("Repeat", ClassKind::Rogue);

    accept_quest(&mut hero, "defeat_goblin", &catalog).unwrap();
    complete_quest(&mut hero, "defeat_goblin", &catalog).unwrap();

    let err = accept_quest(&mut hero, "defeat_goblin", &catalog).unwrap_err();
    assert!(matches!(err, GameError::QuestAlreadyCompleted(_)));
}

#[test]
fn test_abandoned_quest_returns_to_pool_without_rewards() {
    let catalog = parse_quest_catalog(DEFAULT_QUESTS).unwrap();
    let mut hero = Character::new("Fickle", ClassKind::Cleric);

    accept_quest(&mut hero, "defeat_goblin", &catalog).unwrap();
    abandon_quest(&mut hero, "defeat_goblin").unwrap();
    assert_eq!(hero.experience, 0);
    assert_eq!(hero.gold, 100);

    // Abandoning returns the quest to the available pool
    let available: Vec<&str> = available_quests(&hero, &catalog)
        .iter()
        .map(|q| q.id.as_str())
        .collect();
    assert_eq!(available, vec!["defeat_goblin"]);

    // And it can be taken up and finished later
    accept_quest(&mut hero, "defeat_goblin", &catalog).unwrap();
    complete_quest(&mut hero, "defeat_goblin", &catalog).unwrap();
    assert_eq!(hero.gold, 125);
}

#[test]
fn test_default_chain_prerequisites() {
    let catalog = parse_quest_catalog(DEFAULT_QUESTS).unwrap();
    let chain = prerequisite_chain("defeat_dragon", &catalog).unwrap();
    assert_eq!(chain, vec!["defeat_goblin", "slay_orc", "defeat_dragon"]);

    let chain = prerequisite_chain("defeat_goblin", &catalog).unwrap();
    assert_eq!(chain, vec!["defeat_goblin"]);
}

#[test]
fn test_quest_rewards_can_level_up_mid_completion() {
    let catalog = parse_quest_catalog(DEFAULT_QUESTS).unwrap();
    let mut hero = Character::new("Almost", ClassKind::Mage);
    hero.experience = 90;
    hero.health = 50;

    accept_quest(&mut hero, "defeat_goblin", &catalog).unwrap();
    complete_quest(&mut hero, "defeat_goblin", &catalog).unwrap();

    // 90 + 50 crosses the 100 XP threshold for level 2
    assert_eq!(hero.level, 2);
    assert_eq!(hero.experience, 40);
    assert_eq!(hero.health, hero.max_health);
}
