//! Damage formulas and group combat helpers.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
