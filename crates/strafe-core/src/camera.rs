//! First-person camera.
//!
//! The camera is the player's body: its position is the player's eye and its
//! yaw is the direction the player faces and fires. Pitch only tilts the view.
//!
//! Movement uses yaw-only local axes so looking up or down never lifts the
//! player off the floor plane:
//!
//! - local `-Z` is forward: `(-sin yaw, 0, -cos yaw)`
//! - local `+X` is right: `(cos yaw, 0, -sin yaw)`

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation of the player's eye.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World position of the eye.
    pub position: Vec3,
    /// Rotation about the world Y axis, in radians. Zero faces `-Z`.
    pub yaw: f32,
    /// Rotation about the local X axis, in radians, within `[-π/2, π/2]`.
    pub pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::at_position(Vec3::ZERO)
    }
}

impl Camera {
    /// Creates a level camera facing `-Z` at `position`.
    #[must_use]
    pub const fn at_position(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Sets the orientation, clamping pitch to straight up/down.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Unit vector the player faces on the floor plane.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Unit vector to the player's right on the floor plane.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Full view rotation (yaw, then pitch) for renderers.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Moves the camera along its yaw-local axes.
    ///
    /// `local.x` moves right, `local.z` moves backward (so negative `z` is
    /// forward); `local.y` is ignored.
    pub fn translate_local(&mut self, local: Vec3) {
        self.position += self.right() * local.x - self.forward() * local.z;
    }
}
