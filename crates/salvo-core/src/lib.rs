//! Core types and definitions for the Salvo artillery game.
//!
//! This crate defines the vocabulary shared across all other crates:
//! players, armories, weapons, input signals, snapshots, events, errors and
//! constants. It has no dependency on any runtime framework.

pub mod armory;
pub mod colors;
pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod player;
pub mod state;
pub mod weapons;

pub use error::{SalvoError, SalvoResult};

#[cfg(test)]
mod tests;
