//! Per-combatant state for one round.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::colors::ColorId;
use crate::constants::*;
use crate::enums::{Controller, WeaponKind};

/// How a player is configured before the match starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub color: ColorId,
    pub controller: Controller,
    /// Starting life as a percentage of `DEFAULT_STARTING_LIFE`.
    pub starting_life_percent: u32,
}

impl PlayerSetup {
    pub fn new(name: &str, color: ColorId, controller: Controller) -> Self {
        Self {
            name: name.to_string(),
            color,
            controller,
            starting_life_percent: 100,
        }
    }

    /// Life a tank starts each round with.
    pub fn starting_life(&self) -> u32 {
        (DEFAULT_STARTING_LIFE.saturating_mul(self.starting_life_percent) / 100)
            .clamp(MIN_STARTING_LIFE, MAX_LIFE)
    }
}

/// A tank on the field.
///
/// `x` is the column the tank occupies and `y` the terrain height under it.
/// The turret angle is kept in whole degrees with a cached radian value that
/// is refreshed on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: usize,
    pub name: String,
    pub color: ColorId,
    pub controller: Controller,
    life: u32,
    x: usize,
    y: f32,
    angle_deg: i32,
    angle_rad: f32,
    selected_weapon: WeaponKind,
}

impl Player {
    pub fn new(id: usize, setup: &PlayerSetup) -> Self {
        let mut name = setup.name.clone();
        if let Some((cut, _)) = name.char_indices().nth(MAX_NAME_LENGTH) {
            name.truncate(cut);
        }
        let mut player = Self {
            id,
            name,
            color: setup.color,
            controller: setup.controller,
            life: setup.starting_life(),
            x: 0,
            y: 0.0,
            angle_deg: 0,
            angle_rad: 0.0,
            selected_weapon: WeaponKind::default(),
        };
        player.set_angle_deg(DEFAULT_TURRET_ANGLE);
        player
    }

    pub fn life(&self) -> u32 {
        self.life
    }

    pub fn set_life(&mut self, life: u32) {
        self.life = life.min(MAX_LIFE);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y)
    }

    /// Put the tank on `column`, resting on `ground`.
    pub fn place(&mut self, column: usize, ground: f32) {
        self.x = column;
        self.y = ground;
    }

    /// Drop the tank onto lower ground. Returns true if it moved.
    pub fn fall_to(&mut self, ground: f32) -> bool {
        if ground < self.y {
            self.y = ground;
            true
        } else {
            false
        }
    }

    pub fn angle_deg(&self) -> i32 {
        self.angle_deg
    }

    pub fn angle_rad(&self) -> f32 {
        self.angle_rad
    }

    /// Set the turret angle, clamped to `[MIN_TURRET_ANGLE, MAX_TURRET_ANGLE]`.
    pub fn set_angle_deg(&mut self, angle_deg: i32) {
        self.angle_deg = angle_deg.clamp(MIN_TURRET_ANGLE, MAX_TURRET_ANGLE);
        self.angle_rad = (self.angle_deg as f32).to_radians();
    }

    pub fn selected_weapon(&self) -> WeaponKind {
        self.selected_weapon
    }

    pub fn select_weapon(&mut self, kind: WeaponKind) {
        self.selected_weapon = kind;
    }

    /// Center of the turret; the tank's x with a small lift above ground.
    pub fn turret_center(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y + TURRET_CENTER_OFFSET)
    }

    /// Where a shell leaves the barrel.
    pub fn turret_tip(&self) -> Vec2 {
        let (sin, cos) = self.angle_rad.sin_cos();
        self.turret_center() + Vec2::new(cos, sin) * TURRET_LENGTH
    }

    /// Where the barrel tip would be if the turret were at `angle_deg`.
    pub fn turret_tip_at(&self, angle_deg: i32) -> Vec2 {
        let rad = (angle_deg.clamp(MIN_TURRET_ANGLE, MAX_TURRET_ANGLE) as f32).to_radians();
        let (sin, cos) = rad.sin_cos();
        self.turret_center() + Vec2::new(cos, sin) * TURRET_LENGTH
    }

    /// Point the turret at a target point. Targets at or below the turret
    /// snap to horizontal on that side. Returns true if the angle changed.
    pub fn aim_at(&mut self, target: Vec2) -> bool {
        let center = self.turret_center();
        let rise = target.y - center.y;
        let angle = if rise <= 0.0 {
            if target.x >= center.x {
                MIN_TURRET_ANGLE
            } else {
                MAX_TURRET_ANGLE
            }
        } else {
            rise.atan2(target.x - center.x).to_degrees().round() as i32
        };
        let before = self.angle_deg;
        self.set_angle_deg(angle);
        before != self.angle_deg
    }

    /// Apply damage, flooring life at zero. Returns true if this killed the tank.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.life = self.life.saturating_sub(amount);
        was_alive && !self.is_alive()
    }

    /// Banner shown when this player's turn begins.
    pub fn introduction(&self) -> String {
        format!("{}'s turn", self.name)
    }
}
