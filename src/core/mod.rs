//! Core game state and logic.

pub mod balance;
pub mod constants;
pub mod engine;
pub mod game_logic;
pub mod game_state;
pub mod offline;
pub mod tick;

pub use engine::{Engine, SaveWorker};
pub use game_state::{Activity, PlayerState};
pub use tick::{game_tick, TickEvent, TickResult};
