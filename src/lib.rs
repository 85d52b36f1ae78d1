//! idlehunt - idle hunting RPG engine
//!
//! This module exposes the game logic for testing and embedding. The binary
//! in `main.rs` is a thin headless driver around [`core::engine`].

pub mod catalog;
pub mod character;
pub mod combat;
pub mod commands;
pub mod config;
pub mod core;
pub mod events;
pub mod items;
pub mod rewards;
