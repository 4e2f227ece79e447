use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxelstream_core::Occupancy;

use crate::collision::{resolve_motion, Aabb, BoxExtents, Motion};

/// Tunables for a walking body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Downward acceleration (negative).
    pub gravity: f32,
    /// Vertical speed applied by [`PlayerBody::jump`].
    pub jump_speed: f32,
    /// Most negative vertical speed.
    pub terminal_velocity: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: -20.0,
            jump_speed: 8.0,
            terminal_velocity: -50.0,
        }
    }
}

/// A player-sized box moved through the world with gravity and collision.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBody {
    /// Feet position.
    pub position: Vec3,
    /// Current velocity in voxels per second.
    pub velocity: Vec3,
    /// Box relative to `position`.
    pub extents: BoxExtents,
    /// Set by the last [`PlayerBody::step`].
    pub grounded: bool,
    /// Movement tunables.
    pub params: PhysicsParams,
}

impl PlayerBody {
    /// Standard 0.6 x 1.8 x 0.6 body standing at `position`.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            extents: BoxExtents::player(0.6, 1.8),
            grounded: false,
            params: PhysicsParams::default(),
        }
    }

    /// World-space box at the current position.
    pub fn aabb(&self) -> Aabb {
        self.extents.at(self.position)
    }

    /// Accelerate downward, clamped at terminal velocity.
    pub fn apply_gravity(&mut self, dt: f32) {
        self.velocity.y += self.params.gravity * dt;
        if self.velocity.y < self.params.terminal_velocity {
            self.velocity.y = self.params.terminal_velocity;
        }
    }

    /// Start a jump if standing on something. Returns whether it jumped.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity.y = self.params.jump_speed;
        self.grounded = false;
        true
    }

    /// Move by `velocity * dt`, resolving collisions axis by axis.
    ///
    /// Velocity on every blocked axis is zeroed.
    pub fn step<O>(&mut self, dt: f32, occupancy: &O) -> Motion
    where
        O: Occupancy + ?Sized,
    {
        let target = self.position + self.velocity * dt;
        let motion = resolve_motion(self.position, target, &self.extents, occupancy);

        self.position = motion.position;
        self.grounded = motion.grounded;
        for (i, blocked) in motion.blocked.iter().enumerate() {
            if *blocked {
                self.velocity[i] = 0.0;
            }
        }
        motion
    }
}
