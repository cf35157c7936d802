pub mod logic;
pub mod types;

pub use types::{Quest, QuestCatalog, QuestCompletion};
