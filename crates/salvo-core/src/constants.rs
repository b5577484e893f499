//! Simulation constants and tuning parameters.

// --- Field ---

/// Default number of terrain columns (field width).
pub const DEFAULT_FIELD_WIDTH: usize = 480;

/// Highest terrain height a column may hold.
pub const MAX_Y: f32 = 320.0;

/// Projectiles that climb this far above `MAX_Y` have left the field.
pub const SKY_CEILING: f32 = MAX_Y * 4.0;

// --- Players ---

/// Maximum number of players in one match.
pub const MAX_PLAYERS: usize = 8;

pub const MIN_STARTING_LIFE: u32 = 25;
pub const DEFAULT_STARTING_LIFE: u32 = 100;
pub const MAX_LIFE: u32 = 300;

/// Player names are truncated to this many characters.
pub const MAX_NAME_LENGTH: usize = 14;

pub const MIN_TURRET_ANGLE: i32 = 0;
pub const MAX_TURRET_ANGLE: i32 = 180;

/// Angle a freshly placed tank points at (straight up).
pub const DEFAULT_TURRET_ANGLE: i32 = 90;

/// Distance from turret center to turret tip.
pub const TURRET_LENGTH: f32 = 20.0;

/// Height of the turret center above the tank's ground position.
pub const TURRET_CENTER_OFFSET: f32 = 5.0;

// --- Power ---

pub const MIN_POWER: u32 = 0;
pub const MAX_POWER: u32 = 1000;

/// Hold time after which the fire control reaches `MAX_POWER`.
pub const MAX_CHARGE_MILLIS: u64 = 2400;

/// Launch speed per tick is `power / POWER_DIVISOR`.
pub const POWER_DIVISOR: f32 = 120.0;

// --- Ballistics ---

/// Hard cap on flight samples; reaching it forces a timeout collision.
pub const MAX_NUM_SAMPLES: u32 = 10_000;

/// Squared distance a sample must travel from the last waypoint to be stored.
pub const MIN_WAYPOINT_DIST_SQUARED: f32 = 4.0;

/// Vertical axis weight used by the waypoint distance metric.
/// Heights and columns share a unit, so the scale is neutral.
pub const TRAJECTORY_Y_SCALE: f32 = 1.0;

/// Default upper bound on wind magnitude (added to `dx` each tick).
pub const DEFAULT_MAX_WIND: f32 = 1.0;

// --- Loop cadence (milliseconds; 0 = block until input) ---

pub const DELAY_BLOCK: u64 = 0;
pub const DELAY_ANIMATE: u64 = 1;

// --- Economy ---

pub const DEFAULT_STARTING_CASH: u32 = 2000;

/// Reward for the player whose shot kills an opponent.
pub const KILL_REWARD: u32 = 500;

/// Reward for the last tank standing.
pub const ROUND_WIN_REWARD: u32 = 1000;

pub const DEFAULT_NUM_ROUNDS: u16 = 3;

/// Packed ARGB white, used for tied leaderboards.
pub const WHITE: u32 = 0xffff_ffff;
