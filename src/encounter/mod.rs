//! Encounter orchestration: the turn state machine, its narration and
//! its status snapshots

pub mod narration;
pub mod state;
pub mod status;

pub use narration::{NarrationLog, NarrationSink, Silent};
pub use state::Encounter;
pub use status::{
    format_status_table, CombatantStatus, DeityStatus, EncounterOutcome, EncounterPhase,
    EncounterReport, EncounterStatus,
};
