pub mod attacks;
pub mod constants;

pub use attacks::{fatigue_multiplier, variable_damage, AttackKind, AttackOutcome, AttackSpec};
