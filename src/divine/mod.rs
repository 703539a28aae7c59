//! Divine intervention - deities acting on the combatants each turn

pub mod deity;
pub mod pantheon;
pub mod priority;

pub use deity::{Blessing, Candidate, Deity, DeityKind, Intervention};
pub use pantheon::Pantheon;
pub use priority::{first_has_priority, priority_score, WORTHINESS_THRESHOLD};
