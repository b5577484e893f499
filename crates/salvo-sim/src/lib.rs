//! Simulation engine for Salvo.
//!
//! Owns the turn state machine, shell flight, explosion resolution and the
//! cross-round ledger, and produces `GameSnapshot`s for a renderer.

pub mod battlefield;
pub mod clock;
pub mod cosmos;
pub mod damage;
pub mod engine;
pub mod explosion;
pub mod leaderboard;
pub mod machine;
pub mod projectile;
pub mod record;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{SimConfig, SimulationEngine, Step};
pub use record::SavedGame;
pub use salvo_core as core;

#[cfg(test)]
mod tests;
