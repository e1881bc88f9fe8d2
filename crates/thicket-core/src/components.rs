//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in systems, not here.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Pose, Sphere};

/// World-space position of a free-standing entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// Per-frame displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

/// Handle to the renderer-side geometry/material of one scene object.
/// Released exactly once, either on removal or at level teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenderHandle(pub u64);

/// Monotonic creation order, used for oldest-first eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpawnSerial(pub u64);

/// How a target moves each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetMotion {
    /// Added once per frame, independent of delta time.
    PerFrame { velocity: Vec3 },
    /// `direction * speed * delta_secs` each frame. Fixed at spawn.
    Heading { direction: Vec3, speed: f32 },
}

/// Collision sphere rigidly attached to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    /// Offset from the owner's position.
    pub offset: Vec3,
    pub radius: f32,
}

impl Hitbox {
    pub fn at(&self, owner: Vec3) -> Sphere {
        Sphere::new(owner + self.offset, self.radius)
    }
}

/// Looping animation playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationState {
    pub clip: usize,
    pub time_secs: f32,
}

/// A mobile target (bird or rabbit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub kind: TargetKind,
    pub motion: TargetMotion,
    pub hitbox: Hitbox,
    /// Facing around +Y (radians).
    pub yaw: f32,
    pub animation: AnimationState,
}

/// A fired projectile. Position lives in `Position`, displacement per
/// frame in `Velocity`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Projectile;

/// Cosmetic debris. No collision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment;

/// Fixed local transform applied when a controller holds the object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GripOffset {
    pub offset: Vec3,
    /// Replaces the object's rotation while held; `None` keeps it.
    pub rotation: Option<Quat>,
}

/// Who owns a grabbable's transform. Exactly one of the two at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Placement {
    /// In the scene; the pose is authoritative.
    World(Pose),
    /// Parented to a controller; the local pose is authoritative.
    Held { hand: Hand, local: Pose },
}

impl Placement {
    pub fn holder(&self) -> Option<Hand> {
        match self {
            Placement::World(_) => None,
            Placement::Held { hand, .. } => Some(*hand),
        }
    }
}

/// A world object a controller can pick up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grabbable {
    pub kind: GrabbableKind,
    pub grip: GripOffset,
    pub placement: Placement,
}

/// Switchable light carried by the flashlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightSource {
    pub on: bool,
}

/// Pointable UI button; activating it switches to `mode`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UiButton {
    pub mode: Mode,
    pub hitbox: Sphere,
}

/// Root transform of the player. Controllers and camera are its children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerRig {
    /// Camera pose relative to the rig.
    pub camera: Pose,
}
