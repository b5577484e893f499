//! Computer-controlled shot planning.
//!
//! The brain picks a target, grid-searches angle and power against the
//! impact oracle, then perturbs the best candidate by the difficulty's aim
//! error. Purchases follow the profile's wishlist within a cash budget.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use salvo_core::armory::Armory;
use salvo_core::constants::*;
use salvo_core::enums::{Difficulty, WeaponKind};
use salvo_core::player::Player;
use salvo_core::weapons::weapon_spec;

use crate::brain::{Brain, BrainContext, ShotPlan};
use crate::profiles::{get_profile, BrainProfile};

/// A seeded computer opponent.
pub struct ComputerBrain {
    pub difficulty: Difficulty,
    profile: BrainProfile,
    rng: ChaCha8Rng,
}

impl ComputerBrain {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            profile: get_profile(difficulty),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn pick_target<'a>(&mut self, shooter: &Player, ctx: &BrainContext<'a>) -> Option<&'a Player> {
        let opponents: Vec<&Player> = ctx.opponents().collect();
        if opponents.is_empty() {
            return None;
        }
        if self.profile.target_nearest {
            opponents
                .into_iter()
                .min_by_key(|p| p.x().abs_diff(shooter.x()))
        } else {
            let i = self.rng.gen_range(0..opponents.len());
            Some(opponents[i])
        }
    }

    /// Best `(angle, power)` on the profile's grid for hitting `target`.
    fn search(&self, ctx: &BrainContext<'_>, target: Vec2) -> (i32, u32) {
        let mut best = (DEFAULT_TURRET_ANGLE, MAX_POWER / 2);
        let mut best_dist = f32::MAX;
        for angle in (MIN_TURRET_ANGLE..=MAX_TURRET_ANGLE).step_by(self.profile.angle_step) {
            for power in (self.profile.power_step as u32..=MAX_POWER).step_by(self.profile.power_step) {
                let dist = (ctx.predict_impact)(angle, power).distance_squared(target);
                if dist < best_dist {
                    best_dist = dist;
                    best = (angle, power);
                }
            }
        }
        best
    }

    /// Heaviest stocked weapon whose blast would not reach the shooter,
    /// falling back to the unlimited baby missile.
    fn pick_weapon(&mut self, ctx: &BrainContext<'_>, range: f32) -> WeaponKind {
        let fallback = WeaponKind::BabyMissile;
        if !self.rng.gen_bool(self.profile.heavy_weapon_chance) {
            return fallback;
        }
        ctx.armory
            .iter()
            .filter(|(kind, ammo)| *kind != WeaponKind::Earthmover && !ammo.is_empty())
            .filter(|(kind, _)| weapon_spec(*kind).blast_radius < range)
            .max_by_key(|(kind, _)| weapon_spec(*kind).max_damage)
            .map(|(kind, _)| kind)
            .unwrap_or(fallback)
    }
}

impl Brain for ComputerBrain {
    fn is_human(&self) -> bool {
        false
    }

    fn plan_shot(&mut self, ctx: &BrainContext<'_>) -> Option<ShotPlan> {
        let shooter = ctx.shooter()?;
        let Some(target) = self.pick_target(shooter, ctx) else {
            // Nobody left to shoot at; lob one straight up.
            return Some(ShotPlan::new(DEFAULT_TURRET_ANGLE, MIN_POWER as i64, WeaponKind::BabyMissile));
        };

        let aim_point = target.turret_center();
        let (angle, power) = self.search(ctx, aim_point);
        let angle_err = self.rng.gen_range(-self.profile.angle_noise..=self.profile.angle_noise);
        let power_err = self.rng.gen_range(-self.profile.power_noise..=self.profile.power_noise);
        let weapon = self.pick_weapon(ctx, shooter.position().distance(target.position()));

        let plan = ShotPlan::new(
            angle + angle_err,
            (power as f32 * (1.0 + power_err)).round() as i64,
            weapon,
        );
        tracing::debug!(
            shooter = shooter.id,
            target = target.id,
            angle = plan.angle_deg,
            power = plan.power,
            weapon = ?plan.weapon,
            "computer shot planned"
        );
        Some(plan)
    }

    fn shopping_list(&mut self, cash: u32, _armory: &Armory) -> Vec<WeaponKind> {
        let mut budget = (cash as f32 * self.profile.spend_fraction) as u32;
        let mut list = Vec::new();
        for kind in self.profile.wishlist {
            let cost = weapon_spec(*kind).cost;
            let mut copies = 0;
            while copies < self.profile.max_copies && cost > 0 && cost <= budget {
                budget -= cost;
                copies += 1;
                list.push(*kind);
            }
        }
        list
    }
}
