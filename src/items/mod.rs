pub mod logic;
pub mod types;

pub use types::{EquipmentSlot, ItemCatalog, ItemDefinition, ItemEffect, ItemKind};
