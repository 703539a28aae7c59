//! Cosmic event system

pub mod events;

pub use events::{begin_turn, CosmicEvent};
