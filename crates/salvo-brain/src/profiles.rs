//! Difficulty-specific planning profiles.

use salvo_core::enums::{Difficulty, WeaponKind};

/// Tuning for a computer player at one difficulty.
pub struct BrainProfile {
    /// Angle grid spacing for the shot search (degrees).
    pub angle_step: usize,
    /// Power grid spacing for the shot search.
    pub power_step: usize,
    /// Uniform aim error applied after the search (degrees, +/-).
    pub angle_noise: i32,
    /// Uniform power error as a fraction of the chosen power (+/-).
    pub power_noise: f32,
    /// Aim at the nearest opponent rather than a random one.
    pub target_nearest: bool,
    /// Chance of reaching for the heaviest weapon in stock.
    pub heavy_weapon_chance: f64,
    /// Share of cash spent between rounds.
    pub spend_fraction: f32,
    /// Copies of each wishlist item bought per round at most.
    pub max_copies: u32,
    /// Purchase preference, most wanted first.
    pub wishlist: &'static [WeaponKind],
}

/// Get the planning profile for a difficulty.
pub fn get_profile(difficulty: Difficulty) -> BrainProfile {
    match difficulty {
        Difficulty::Easy => BrainProfile {
            angle_step: 15,
            power_step: 200,
            angle_noise: 12,
            power_noise: 0.25,
            target_nearest: false,
            heavy_weapon_chance: 0.0,
            spend_fraction: 0.3,
            max_copies: 1,
            wishlist: &[WeaponKind::Missile],
        },
        Difficulty::Medium => BrainProfile {
            angle_step: 6,
            power_step: 100,
            angle_noise: 5,
            power_noise: 0.1,
            target_nearest: true,
            heavy_weapon_chance: 0.5,
            spend_fraction: 0.6,
            max_copies: 2,
            wishlist: &[WeaponKind::BabyNuke, WeaponKind::Missile],
        },
        Difficulty::Hard => BrainProfile {
            angle_step: 3,
            power_step: 50,
            angle_noise: 1,
            power_noise: 0.02,
            target_nearest: true,
            heavy_weapon_chance: 1.0,
            spend_fraction: 0.9,
            max_copies: 3,
            wishlist: &[WeaponKind::Nuke, WeaponKind::BabyNuke, WeaponKind::Missile],
        },
    }
}
