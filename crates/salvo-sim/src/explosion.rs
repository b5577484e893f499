//! A timed explosion following a collision.

use glam::Vec2;

use salvo_core::enums::WeaponKind;
use salvo_core::weapons::{weapon_spec, WeaponSpec};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub center: Vec2,
    pub weapon: WeaponKind,
    pub started_millis: u64,
}

impl Explosion {
    pub fn new(center: Vec2, weapon: WeaponKind, now_millis: u64) -> Self {
        Self {
            center,
            weapon,
            started_millis: now_millis,
        }
    }

    pub fn spec(&self) -> WeaponSpec {
        weapon_spec(self.weapon)
    }

    pub fn is_finished(&self, now_millis: u64) -> bool {
        now_millis.saturating_sub(self.started_millis) >= self.spec().explosion_millis
    }

    /// Displayed radius: grows linearly to the blast radius over the
    /// explosion's lifetime.
    pub fn radius_at(&self, now_millis: u64) -> f32 {
        let spec = self.spec();
        let elapsed = now_millis.saturating_sub(self.started_millis);
        let t = (elapsed as f32 / spec.explosion_millis.max(1) as f32).min(1.0);
        spec.blast_radius * t
    }
}
