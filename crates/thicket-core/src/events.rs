//! Events emitted by the simulation for audio and UI feedback.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Collected during a frame and carried by that frame's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    TargetSpawned { kind: TargetKind, position: Vec3 },
    /// A projectile hit; fragments burst from `position`.
    TargetDestroyed { kind: TargetKind, position: Vec3 },
    ShotFired { hand: Hand, origin: Vec3 },
    Grabbed { hand: Hand, kind: GrabbableKind },
    Dropped { hand: Hand, kind: GrabbableKind },
    LightToggled { on: bool },
    ModeChanged { from: Mode, to: Mode },
}
