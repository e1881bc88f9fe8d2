//! Frame snapshot: the complete visible state handed to the renderer
//! after each tick.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{FrameTime, Pose, Sphere};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: FrameTime,
    pub mode: Mode,
    /// World position of the player rig.
    pub player_root: Vec3,
    pub camera: Pose,
    pub targets: Vec<TargetView>,
    pub projectiles: Vec<ProjectileView>,
    pub fragments: Vec<Vec3>,
    pub grabbables: Vec<GrabbableView>,
    pub controllers: Vec<ControllerView>,
    pub panel: Vec<PanelButtonView>,
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub kind: TargetKind,
    pub position: Vec3,
    pub yaw: f32,
    pub hitbox: Sphere,
    pub animation_clip: usize,
    pub animation_time: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec3,
    pub velocity: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrabbableView {
    pub kind: GrabbableKind,
    pub position: Vec3,
    pub rotation: Quat,
    pub held_by: Option<Hand>,
    /// Light state for light sources.
    pub light_on: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerView {
    pub hand: Hand,
    /// World pose.
    pub pose: Pose,
    pub holding: Option<GrabbableKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelButtonView {
    pub mode: Mode,
    pub hitbox: Sphere,
}
