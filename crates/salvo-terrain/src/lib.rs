//! Terrain system for Salvo.
//!
//! Height-field queries, crater carving, and procedural generation.

pub use salvo_core as core;

pub mod generate;
pub mod heightfield;

pub use generate::{generate, placement_columns};
pub use heightfield::Terrain;
