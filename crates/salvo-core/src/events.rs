//! Events emitted by the simulation for UI and audio feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::WeaponKind;

/// Notable things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    RoundStarted { round: u16, total_rounds: u16 },
    /// A player's turn began; `banner` is the text to toast.
    TurnStarted { player: usize, banner: String },
    ShotFired { player: usize, weapon: WeaponKind, power: u32, angle_deg: i32 },
    /// Firing was refused because the selected weapon is empty.
    FireRefused { player: usize, weapon: WeaponKind },
    Detonation { center: Vec2, weapon: WeaponKind },
    PlayerDamaged { player: usize, amount: u32, life: u32 },
    PlayerKilled { player: usize, by: usize },
    PlayerFell { player: usize, from: f32, to: f32 },
    WeaponBought { player: usize, weapon: WeaponKind, cash_left: u32 },
    /// The round ended; `winner` is `None` on a draw.
    RoundOver { winner: Option<usize> },
    MatchOver,
}
