//! Game snapshot: the read-only view the rendering layer pulls each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::armory::Ammo;
use crate::colors::ColorId;
use crate::enums::{GameStateId, WeaponKind};
use crate::events::GameEvent;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub state: GameStateId,
    pub round: u16,
    pub total_rounds: u16,
    pub current_player: Option<usize>,
    pub wind: f32,
    pub terrain: Vec<f32>,
    pub players: Vec<PlayerView>,
    /// Path flown by the shell in flight, launch point first.
    pub trajectory: Vec<Vec2>,
    pub explosion: Option<ExplosionView>,
    /// Power accumulated while the fire control is held.
    pub charging_power: Option<u32>,
    pub match_over: bool,
    pub events: Vec<GameEvent>,
}

/// One tank as drawn on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: usize,
    pub name: String,
    pub color: ColorId,
    pub rgb: u32,
    pub x: usize,
    pub y: f32,
    pub angle_deg: i32,
    pub life: u32,
    pub alive: bool,
    pub weapon: WeaponKind,
    pub ammo: Ammo,
    pub cash: u32,
    pub earnings: i64,
}

/// An active explosion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub center: Vec2,
    pub radius: f32,
    pub weapon: WeaponKind,
}
