pub mod config;
pub mod error;
pub mod types;

pub use config::{load_encounter, CombatantConfig, EncounterConfig, InventoryConfig};
pub use error::{Result, WarError};
pub use types::{CombatantId, Turn};
