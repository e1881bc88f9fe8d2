//! Fundamental geometric and frame-timing types.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position + orientation. World space unless the owner says otherwise.
/// y is up; "forward" is -Z, as in the headset's reference space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Unit vector the pose is facing (-Z rotated by the orientation).
    pub fn forward(&self) -> Vec3 {
        (self.orientation * Vec3::NEG_Z).normalize_or_zero()
    }

    /// Transform a point expressed in this pose's local frame.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.orientation * local
    }

    /// Compose a child pose expressed relative to this one.
    pub fn compose(&self, child: &Pose) -> Pose {
        Pose {
            position: self.transform_point(child.position),
            orientation: self.orientation * child.orientation,
        }
    }

    /// False if any component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.orientation.is_finite()
    }

    /// Same pose translated by `offset` (parent frames without rotation).
    pub fn translated(&self, offset: Vec3) -> Pose {
        Pose::new(self.position + offset, self.orientation)
    }
}

/// Collision sphere in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}

/// Render-clock bookkeeping for the running level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameTime {
    /// Frames ticked since the level started.
    pub frame: u64,
    /// Render timestamp of the latest frame (milliseconds).
    pub now_ms: f64,
    /// Seconds since the previous frame (0 on the first frame).
    pub delta_secs: f32,
}

impl FrameTime {
    /// Advance to the frame stamped `now_ms`.
    pub fn advance(&mut self, now_ms: f64) {
        self.delta_secs = if self.frame == 0 {
            0.0
        } else {
            ((now_ms - self.now_ms).max(0.0) / 1000.0) as f32
        };
        self.now_ms = now_ms;
        self.frame += 1;
    }
}
