//! Chronicles - a turn-based text RPG engine.
//!
//! This library carries the whole game: character state and leveling, the
//! flat-text save format, item and equipment effects, the quest dependency
//! graph, and turn-based combat. The binary in `main.rs` is only a menu loop
//! over [`session::GameSession`].

pub mod character;
pub mod combat;
pub mod constants;
pub mod data;
pub mod error;
pub mod items;
pub mod quests;
pub mod session;
pub mod settings;
