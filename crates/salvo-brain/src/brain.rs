//! The brain seam: who decides the next shot.

use glam::Vec2;

use salvo_core::armory::Armory;
use salvo_core::constants::*;
use salvo_core::enums::{Controller, WeaponKind};
use salvo_core::player::Player;
use salvo_terrain::Terrain;

use crate::computer::ComputerBrain;

/// A committed shot: where to point, how hard, and with what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotPlan {
    pub angle_deg: i32,
    pub power: u32,
    pub weapon: WeaponKind,
}

impl ShotPlan {
    /// Build a plan from unchecked values, clamping angle and power into the
    /// legal ranges. Human and computer shots both pass through here.
    pub fn new(angle_deg: i32, power: i64, weapon: WeaponKind) -> Self {
        Self {
            angle_deg: angle_deg.clamp(MIN_TURRET_ANGLE, MAX_TURRET_ANGLE),
            power: power.clamp(MIN_POWER as i64, MAX_POWER as i64) as u32,
            weapon,
        }
    }

    /// Re-apply the range contract to a plan built elsewhere.
    pub fn clamped(self) -> Self {
        Self::new(self.angle_deg, self.power as i64, self.weapon)
    }
}

/// Read-only view of the round handed to a brain.
pub struct BrainContext<'a> {
    /// Index of the player being planned for.
    pub me: usize,
    pub players: &'a [Player],
    pub terrain: &'a Terrain,
    pub wind: f32,
    pub armory: &'a Armory,
    /// Where a shell fired by `me` at `(angle_deg, power)` would land.
    pub predict_impact: &'a dyn Fn(i32, u32) -> Vec2,
}

impl<'a> BrainContext<'a> {
    pub fn shooter(&self) -> Option<&'a Player> {
        self.players.get(self.me)
    }

    /// Living players other than the shooter.
    pub fn opponents(&self) -> impl Iterator<Item = &'a Player> + '_ {
        let me = self.me;
        self.players.iter().filter(move |p| p.id != me && p.is_alive())
    }
}

/// Decides shots and purchases for one player.
pub trait Brain: Send {
    /// Human brains wait for input instead of planning.
    fn is_human(&self) -> bool;

    /// Produce a shot, or `None` if no decision is ready yet.
    fn plan_shot(&mut self, ctx: &BrainContext<'_>) -> Option<ShotPlan>;

    /// Weapons to buy, in order, between rounds.
    fn shopping_list(&mut self, _cash: u32, _armory: &Armory) -> Vec<WeaponKind> {
        Vec::new()
    }
}

/// Placeholder brain for a seat driven by input signals.
#[derive(Debug, Default)]
pub struct HumanBrain;

impl Brain for HumanBrain {
    fn is_human(&self) -> bool {
        true
    }

    fn plan_shot(&mut self, _ctx: &BrainContext<'_>) -> Option<ShotPlan> {
        None
    }
}

/// Construct the brain matching a controller.
pub fn brain_for(controller: Controller, seed: u64) -> Box<dyn Brain> {
    match controller {
        Controller::Human => Box::new(HumanBrain),
        Controller::Computer(difficulty) => Box::new(ComputerBrain::new(difficulty, seed)),
    }
}
