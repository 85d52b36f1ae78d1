//! Item system: definitions, equipment slots, and loot rolls.

pub mod drops;
pub mod equipment;
pub mod types;

pub use types::Item;
