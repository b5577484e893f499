//! Input signals delivered by the input layer to the turn machine.
//!
//! Signals are staged by input producers and applied by the simulation loop
//! at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::WeaponKind;

/// Everything the input layer can say.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputSignal {
    // --- Fire control ---
    /// Fire control pressed; power starts charging.
    PressFire,
    /// Fire control released; power is finalized and the shot is taken.
    ReleaseFire,

    // --- Weapon selection ---
    CycleWeaponLeft,
    CycleWeaponRight,

    // --- Aim ---
    /// Set the turret angle in degrees (clamped to 0..=180).
    AimTo { angle_deg: i32 },
    /// Point the turret at a field coordinate (touch aiming).
    AimAt { x: f32, y: f32 },
    /// Set the slider power (clamped to 0..=MAX_POWER).
    SetPower { power: i64 },

    // --- Menus ---
    /// Confirm: fires at slider power during a human move, finishes the buy
    /// phase, or advances past the leaderboard.
    ConfirmOk,
    /// Buy one unit of a weapon during the buy phase.
    Buy { weapon: WeaponKind },
}
