//! Salvo application layer.
//!
//! Wires the simulation into a runnable program: the loop thread that owns
//! the engine, console play, fast-forwarded computer matches, save slots
//! and logging setup.

pub mod cli;
pub mod console;
pub mod game_loop;
pub mod headless;
pub mod logging;
pub mod persistence;

pub use salvo_core as core;

#[cfg(test)]
mod tests;
