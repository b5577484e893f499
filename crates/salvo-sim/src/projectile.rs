//! Shell flight: constant-velocity integration, collision and path compaction.
//!
//! A shell moves by the same `(dx, dy)` every sample. The velocity is fixed at
//! launch from power, turret angle and wind. Collision compares the shell's
//! height against the ground at its rounded column.

use glam::Vec2;

use salvo_core::constants::*;
use salvo_terrain::Terrain;

/// The path actually flown, compacted.
///
/// Consecutive committed waypoints are at least `MIN_WAYPOINT_DIST_SQUARED`
/// apart (vertical axis scaled by `TRAJECTORY_Y_SCALE`). Samples closer than
/// that to the last waypoint only move the head, which is reported as the
/// final point of the path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    waypoints: Vec<Vec2>,
    head: Option<Vec2>,
}

impl Trajectory {
    pub fn starting_at(origin: Vec2) -> Self {
        Self {
            waypoints: vec![origin],
            head: None,
        }
    }

    /// Add a sample, committing it only when far enough from the last waypoint.
    pub fn record(&mut self, point: Vec2) {
        let Some(last) = self.waypoints.last() else {
            self.waypoints.push(point);
            return;
        };
        let d = point - *last;
        let dist_sq = d.x * d.x + (d.y * TRAJECTORY_Y_SCALE) * (d.y * TRAJECTORY_Y_SCALE);
        if dist_sq >= MIN_WAYPOINT_DIST_SQUARED {
            self.waypoints.push(point);
            self.head = None;
        } else {
            self.head = Some(point);
        }
    }

    /// Committed waypoints, launch point first.
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Full path to draw: waypoints followed by the uncommitted head.
    pub fn points(&self) -> Vec<Vec2> {
        let mut points = self.waypoints.clone();
        points.extend(self.head);
        points
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

/// Outcome of advancing a shell by one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Flight {
    Flying,
    /// The shell hit something (or left the field, or ran out of samples)
    /// at `at`.
    Collided { at: Vec2, timed_out: bool },
}

/// Per-sample velocity for a shot.
pub fn launch_velocity(angle_rad: f32, power: u32, wind: f32) -> Vec2 {
    let speed = power as f32 / POWER_DIVISOR;
    let (sin, cos) = angle_rad.sin_cos();
    Vec2::new(cos * speed + wind, sin * speed)
}

/// One shell in flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    position: Vec2,
    velocity: Vec2,
    samples: u32,
    trajectory: Trajectory,
}

impl Projectile {
    pub fn launch(origin: Vec2, angle_rad: f32, power: u32, wind: f32) -> Self {
        Self {
            position: origin,
            velocity: launch_velocity(angle_rad, power, wind),
            samples: 0,
            trajectory: Trajectory::starting_at(origin),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Advance one sample and test for collision.
    ///
    /// Leaving the field sideways or through the sky ceiling collides at the
    /// last in-field position. A shell with no velocity collides where it is.
    pub fn step(&mut self, terrain: &Terrain) -> Flight {
        if self.samples >= MAX_NUM_SAMPLES {
            return Flight::Collided {
                at: self.position,
                timed_out: true,
            };
        }
        if self.velocity == Vec2::ZERO {
            return Flight::Collided {
                at: self.position,
                timed_out: false,
            };
        }

        let next = self.position + self.velocity;
        self.samples += 1;
        let Some(ground) = terrain.ground_under(next.x) else {
            return Flight::Collided {
                at: self.position,
                timed_out: false,
            };
        };
        if next.y > SKY_CEILING {
            return Flight::Collided {
                at: self.position,
                timed_out: false,
            };
        }

        self.position = next;
        self.trajectory.record(next);
        if next.y <= ground {
            Flight::Collided {
                at: next,
                timed_out: false,
            }
        } else {
            Flight::Flying
        }
    }

    /// Fly until collision and return the impact point.
    pub fn fly_to_impact(&mut self, terrain: &Terrain) -> Vec2 {
        loop {
            if let Flight::Collided { at, .. } = self.step(terrain) {
                return at;
            }
        }
    }
}
