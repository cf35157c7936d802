//! Interactive menu-loop driver over the game library.
//!
//! All rules live in the library; this binary reads menu choices from stdin,
//! routes them through a [`GameSession`], and reports each action's outcome
//! without ever aborting the session on a game error.

use std::io::{self, Write};

use tracing::warn;
use tracing_subscriber::EnvFilter;

use chronicles::character::{Character, ClassKind, SaveManager};
use chronicles::combat::{Battle, BattleEvent, BattleStatus, PlayerAction};
use chronicles::data::{self, defaults};
use chronicles::error::{GameError, Result};
use chronicles::items::logic as inventory;
use chronicles::items::EquipmentSlot;
use chronicles::quests::logic as quests;
use chronicles::session::GameSession;
use chronicles::settings::Settings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    println!("==================================================");
    println!("     QUEST CHRONICLES - A MODULAR RPG ADVENTURE");
    println!("==================================================");
    println!();
    println!("Build your character, complete quests, and become a legend!");

    if let Err(e) = run() {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = Settings::load_or_default();

    let data_dir = settings.data_directory()?;
    let (quests_path, items_path) = defaults::ensure_data_files(&data_dir)?;
    let quest_catalog = data::load_quests(&quests_path)?;
    let item_catalog = data::load_items(&items_path)?;
    let save = SaveManager::with_directory(settings.save_directory()?)?;
    println!(
        "Loaded {} quests and {} items.",
        quest_catalog.len(),
        item_catalog.len()
    );

    loop {
        println!();
        println!("=== MAIN MENU ===");
        println!("1. New Game");
        println!("2. Load Game");
        println!("3. Exit");

        match read_choice("Enter your choice (1-3): ", 3)? {
            1 => {
                if let Some(character) = new_character(&save)? {
                    let mut session = GameSession::new(
                        character,
                        quest_catalog.clone(),
                        item_catalog.clone(),
                        SaveManager::with_directory(save.save_dir())?,
                    );
                    session.autosave = settings.autosave;
                    game_loop(&mut session)?;
                }
            }
            2 => {
                if let Some(character) = load_character(&save)? {
                    let mut session = GameSession::new(
                        character,
                        quest_catalog.clone(),
                        item_catalog.clone(),
                        SaveManager::with_directory(save.save_dir())?,
                    );
                    session.autosave = settings.autosave;
                    game_loop(&mut session)?;
                }
            }
            _ => {
                println!("Thanks for playing Quest Chronicles!");
                return Ok(());
            }
        }
    }
}

// ── Input helpers ────────────────────────────────────────────────────────

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Err(GameError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        )));
    }
    Ok(line.trim().to_string())
}

/// Reads a menu choice in `1..=max`, re-prompting on anything else.
fn read_choice(prompt: &str, max: u32) -> Result<u32> {
    loop {
        let line = read_line(prompt)?;
        match line.parse::<u32>() {
            Ok(choice) if (1..=max).contains(&choice) => return Ok(choice),
            _ => println!("Invalid choice. Please enter 1-{}.", max),
        }
    }
}

// ── Character setup ──────────────────────────────────────────────────────

fn new_character(save: &SaveManager) -> Result<Option<Character>> {
    println!();
    println!("=== CREATE NEW CHARACTER ===");

    let mut name = read_line("Enter your character name: ")?;
    if name.is_empty() {
        println!("Invalid name. Using 'Hero'.");
        name = "Hero".to_string();
    }

    println!();
    println!("Available classes:");
    for (i, class) in ClassKind::all().iter().enumerate() {
        let (health, strength, magic) = class.base_stats();
        println!(
            "{}. {} (HP={}, STR={}, MAG={})",
            i + 1,
            class,
            health,
            strength,
            magic
        );
    }
    let class = ClassKind::all()[read_choice("Select class (1-4): ", 4)? as usize - 1];

    let character = Character::new(name, class);
    save.save_character(&character)?;
    println!("Created {} the {}!", character.name, character.class);
    Ok(Some(character))
}

fn load_character(save: &SaveManager) -> Result<Option<Character>> {
    println!();
    println!("=== LOAD GAME ===");

    let names = save.list_characters()?;
    if names.is_empty() {
        println!("No saved characters found.");
        return Ok(None);
    }

    println!("Saved characters:");
    for (i, name) in names.iter().enumerate() {
        println!("{}. {}", i + 1, name);
    }
    let choice = read_choice(
        &format!("Select character (1-{}): ", names.len()),
        names.len() as u32,
    )?;

    match save.load_character(&names[choice as usize - 1]) {
        Ok(character) => {
            println!("Loaded {}!", character.name);
            Ok(Some(character))
        }
        Err(e) => {
            warn!(error = %e, "failed to load character");
            println!("Error: {}", e);
            Ok(None)
        }
    }
}

// ── Game loop ────────────────────────────────────────────────────────────

fn game_loop(session: &mut GameSession) -> Result<()> {
    loop {
        if session.character.is_dead() && !handle_death(session)? {
            return Ok(());
        }

        println!();
        println!("=== GAME MENU - {} ===", session.character.name);
        println!("1. View Character Stats");
        println!("2. View Inventory");
        println!("3. Quest Menu");
        println!("4. Explore (Find Battles)");
        println!("5. Shop");
        println!("6. Save and Quit");

        match read_choice("Enter your choice (1-6): ", 6)? {
            1 => view_stats(session),
            2 => inventory_menu(session)?,
            3 => quest_menu(session)?,
            4 => explore(session)?,
            5 => shop_menu(session)?,
            _ => {
                session.save()?;
                println!("Game saved!");
                return Ok(());
            }
        }

        if let Err(e) = session.autosave() {
            println!("Warning: could not save game: {}", e);
        }
    }
}

fn handle_death(session: &mut GameSession) -> Result<bool> {
    println!();
    println!("=== YOU HAVE DIED! ===");
    println!("1. Revive (costs 50 gold)");
    println!("2. Quit to Main Menu");

    loop {
        match read_choice("Enter your choice (1-2): ", 2)? {
            1 => match session.revive_for_gold() {
                Ok(_) => {
                    println!(
                        "Revived with {}/{} HP!",
                        session.character.health, session.character.max_health
                    );
                    session.autosave()?;
                    return Ok(true);
                }
                Err(e) => println!("Error: {}", e),
            },
            _ => return Ok(false),
        }
    }
}

fn view_stats(session: &GameSession) {
    let c = &session.character;
    println!();
    println!("=== CHARACTER STATS ===");
    println!("Name: {}", c.name);
    println!("Class: {}", c.class);
    println!("Level: {}", c.level);
    println!("Health: {}/{}", c.health, c.max_health);
    println!("Strength: {}", c.strength);
    println!("Magic: {}", c.magic);
    println!("Experience: {}/{}", c.experience, c.xp_to_next_level());
    println!("Gold: {}", c.gold);
    println!("Active quests: {}", c.active_quests.len());
    println!("Completed quests: {}", c.completed_quests.len());
    println!(
        "Quest completion: {:.1}%",
        quests::completion_percentage(c, &session.quests)
    );
}

// ── Inventory ────────────────────────────────────────────────────────────

fn show_inventory(session: &GameSession) {
    let c = &session.character;
    println!();
    println!(
        "--- Inventory ({}/{}) ---",
        c.inventory.len(),
        chronicles::constants::MAX_INVENTORY_SIZE
    );
    if c.inventory.is_empty() {
        println!("  (empty)");
    } else {
        let mut shown: Vec<&String> = Vec::new();
        for item_id in &c.inventory {
            if shown.contains(&item_id) {
                continue;
            }
            shown.push(item_id);
            let count = inventory::count_item(c, item_id);
            let label = session
                .items
                .get(item_id)
                .map(|i| format!("{} ({})", i.name, i.kind))
                .unwrap_or_else(|| item_id.clone());
            if count > 1 {
                println!("  {} x{}", label, count);
            } else {
                println!("  {}", label);
            }
        }
    }
    let slot_name = |slot: &Option<String>| {
        slot.as_deref()
            .map(|id| {
                session
                    .items
                    .get(id)
                    .map(|i| i.name.clone())
                    .unwrap_or_else(|| id.to_string())
            })
            .unwrap_or_else(|| "None".to_string())
    };
    println!("Weapon: {}", slot_name(&c.equipped_weapon));
    println!("Armor: {}", slot_name(&c.equipped_armor));
}

fn inventory_menu(session: &mut GameSession) -> Result<()> {
    loop {
        show_inventory(session);
        println!();
        println!("1. Use Item");
        println!("2. Equip Weapon");
        println!("3. Equip Armor");
        println!("4. Unequip Weapon");
        println!("5. Unequip Armor");
        println!("6. Drop Item");
        println!("7. Back");

        match read_choice("Enter your choice (1-7): ", 7)? {
            1 => {
                let item_id = read_line("Enter item ID to use: ")?;
                report(session.items.require(&item_id).cloned().and_then(|item| {
                    inventory::use_consumable(&mut session.character, &item)?;
                    Ok(format!("Used {}", item.name))
                }));
            }
            2 => {
                let item_id = read_line("Enter weapon ID to equip: ")?;
                report(session.items.require(&item_id).cloned().and_then(|item| {
                    inventory::equip_weapon(&mut session.character, &item)?;
                    Ok(format!("Equipped {}", item.name))
                }));
            }
            3 => {
                let item_id = read_line("Enter armor ID to equip: ")?;
                report(session.items.require(&item_id).cloned().and_then(|item| {
                    inventory::equip_armor(&mut session.character, &item)?;
                    Ok(format!("Equipped {}", item.name))
                }));
            }
            4 => report(
                inventory::unequip(&mut session.character, EquipmentSlot::Weapon).map(|unequipped| {
                    match unequipped {
                        Some(id) => format!("Unequipped {}", id),
                        None => "No weapon equipped.".to_string(),
                    }
                }),
            ),
            5 => report(
                inventory::unequip(&mut session.character, EquipmentSlot::Armor).map(|unequipped| {
                    match unequipped {
                        Some(id) => format!("Unequipped {}", id),
                        None => "No armor equipped.".to_string(),
                    }
                }),
            ),
            6 => {
                let item_id = read_line("Enter item ID to drop: ")?;
                report(
                    inventory::remove_from_inventory(&mut session.character, &item_id)
                        .map(|_| format!("Dropped {}", item_id)),
                );
            }
            _ => return Ok(()),
        }
    }
}

// ── Quests ───────────────────────────────────────────────────────────────

fn print_quest_list(list: &[&chronicles::quests::Quest]) {
    if list.is_empty() {
        println!("  (none)");
        return;
    }
    for quest in list {
        println!(
            "  {} - {} (level {}, {} XP, {} gold)",
            quest.id, quest.title, quest.required_level, quest.reward_xp, quest.reward_gold
        );
    }
}

fn quest_menu(session: &mut GameSession) -> Result<()> {
    loop {
        println!();
        println!("=== QUEST MENU ===");
        println!("1. View Active Quests");
        println!("2. View Available Quests");
        println!("3. View Completed Quests");
        println!("4. Accept Quest");
        println!("5. Abandon Quest");
        println!("6. Complete Quest");
        println!("7. View Prerequisite Chain");
        println!("8. Back");

        match read_choice("Enter your choice (1-8): ", 8)? {
            1 => {
                println!("Active quests:");
                print_quest_list(&quests::active_quests(&session.character, &session.quests));
            }
            2 => {
                println!("Available quests:");
                print_quest_list(&quests::available_quests(
                    &session.character,
                    &session.quests,
                ));
            }
            3 => {
                println!("Completed quests:");
                print_quest_list(&quests::completed_quests(
                    &session.character,
                    &session.quests,
                ));
            }
            4 => {
                let quest_id = read_line("Enter quest ID to accept: ")?;
                report(
                    quests::accept_quest(&mut session.character, &quest_id, &session.quests)
                        .map(|_| format!("Accepted quest: {}", quest_id)),
                );
            }
            5 => {
                let quest_id = read_line("Enter quest ID to abandon: ")?;
                report(
                    quests::abandon_quest(&mut session.character, &quest_id)
                        .map(|_| format!("Abandoned quest: {}", quest_id)),
                );
            }
            6 => {
                let quest_id = read_line("Enter quest ID to complete: ")?;
                report(
                    quests::complete_quest(&mut session.character, &quest_id, &session.quests)
                        .map(|completion| {
                            format!(
                                "Completed: {} ({} XP, {} gold)",
                                completion.title, completion.reward_xp, completion.reward_gold
                            )
                        }),
                );
            }
            7 => {
                let quest_id = read_line("Enter quest ID: ")?;
                report(
                    quests::prerequisite_chain(&quest_id, &session.quests)
                        .map(|chain| format!("Chain: {}", chain.join(" -> "))),
                );
            }
            _ => return Ok(()),
        }
    }
}

// ── Combat ───────────────────────────────────────────────────────────────

fn describe_event(battle: &Battle, event: &BattleEvent) -> String {
    let player = &battle.character().name;
    let enemy = battle.enemy().name();
    match event {
        BattleEvent::PlayerAttack { damage } => {
            format!("{} attacks for {} damage!", player, damage)
        }
        BattleEvent::AbilityDamage { ability, damage } => {
            format!("{}! Deals {} damage!", ability.name(), damage)
        }
        BattleEvent::AbilityMissed { ability } => format!("{} missed!", ability.name()),
        BattleEvent::AbilityHeal { ability, amount } => {
            format!("{}! Restored {} HP!", ability.name(), amount)
        }
        BattleEvent::EscapeSucceeded => "You escaped from battle!".to_string(),
        BattleEvent::EscapeFailed => "Escape failed!".to_string(),
        BattleEvent::EnemyAttack { damage } => {
            format!("{} attacks for {} damage!", enemy, damage)
        }
        BattleEvent::EnemyDefeated { .. } => format!("Victory! {} has been defeated!", enemy),
        BattleEvent::PlayerDefeated => format!("You have been defeated by the {}!", enemy),
    }
}

fn explore(session: &mut GameSession) -> Result<()> {
    println!();
    println!("=== EXPLORING... ===");

    let mut battle = match session.spawn_encounter() {
        Ok(battle) => battle,
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };
    println!("You encountered a {}!", battle.enemy().name());

    let mut rng = rand::thread_rng();
    while battle.is_active() {
        println!();
        println!(
            "{}: HP {}/{}  |  {}: HP {}/{}",
            battle.character().name,
            battle.character().health,
            battle.character().max_health,
            battle.enemy().name(),
            battle.enemy().health,
            battle.enemy().max_health,
        );
        println!("1. Basic Attack");
        println!("2. Special Ability");
        println!("3. Try to Run");

        let action = match read_choice("Enter your choice (1-3): ", 3)? {
            1 => PlayerAction::Attack,
            2 => PlayerAction::SpecialAbility,
            _ => PlayerAction::Flee,
        };

        match battle.take_turn(action, &mut rng) {
            Ok(events) => {
                for event in &events {
                    println!(">>> {}", describe_event(&battle, event));
                }
            }
            Err(e) => println!("Error: {}", e),
        }
    }

    let outcome = battle.outcome().expect("resolved battle has an outcome");
    let levels = session.apply_battle_outcome(&outcome)?;
    match outcome.status {
        BattleStatus::PlayerWon => {
            println!();
            println!("XP gained: {}", outcome.xp_reward);
            println!("Gold gained: {}", outcome.gold_reward);
            if levels > 0 {
                println!("Level up! Now level {}.", session.character.level);
            }
        }
        BattleStatus::EnemyWon => {
            println!();
            println!("You were defeated!");
        }
        BattleStatus::Escaped | BattleStatus::Active => {}
    }
    Ok(())
}

// ── Shop ─────────────────────────────────────────────────────────────────

fn shop_menu(session: &mut GameSession) -> Result<()> {
    loop {
        println!();
        println!("=== SHOP ===");
        println!("Your gold: {}", session.character.gold);
        println!("Shop items:");
        for item in session.items.iter() {
            println!(
                "  {}: {} - {} gold ({})",
                item.id, item.name, item.cost, item.kind
            );
        }
        println!();
        println!("1. Buy Item");
        println!("2. Sell Item");
        println!("3. Back");

        match read_choice("Enter your choice (1-3): ", 3)? {
            1 => {
                let item_id = read_line("Enter item ID to buy: ")?;
                report(session.items.require(&item_id).cloned().and_then(|item| {
                    inventory::purchase(&mut session.character, &item)?;
                    Ok(format!("Purchased {}!", item.name))
                }));
            }
            2 => {
                let item_id = read_line("Enter item ID to sell: ")?;
                report(session.items.require(&item_id).cloned().and_then(|item| {
                    let price = inventory::sell(&mut session.character, &item)?;
                    Ok(format!("Sold {} for {} gold!", item.name, price))
                }));
            }
            _ => return Ok(()),
        }
    }
}

/// Prints an action's result; game errors are reported, never fatal.
fn report(result: Result<String>) {
    match result {
        Ok(message) => println!("{}", message),
        Err(e) => println!("Error: {}", e),
    }
}
