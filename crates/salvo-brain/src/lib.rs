//! Shot planning for Salvo.
//!
//! A [`Brain`] decides where a tank shoots. Human brains defer to player
//! input; computer brains search the shot space against an impact oracle
//! supplied by the simulation. No engine dependency; operates on plain data.

pub mod brain;
pub mod computer;
pub mod profiles;

pub use brain::{brain_for, Brain, BrainContext, HumanBrain, ShotPlan};
pub use computer::ComputerBrain;
pub use salvo_core as core;
