pub mod archetype;
pub mod combatant;
pub mod inventory;
pub mod stats;

pub use archetype::{
    Archetype, ArchetypeKind, InternState, MechanistState, PriestState, FULL_CAFFEINE,
};
pub use combatant::Combatant;
pub use inventory::{Inventory, ItemKind};
pub use stats::StatBlock;
