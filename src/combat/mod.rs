pub mod logic;
pub mod types;

pub use logic::{Battle, BattleEvent, BattleOutcome, BattleStatus, PlayerAction, SpecialAbility};
pub use types::{Enemy, EnemyKind};
