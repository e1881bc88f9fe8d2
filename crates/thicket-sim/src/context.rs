//! Session context: what a freshly built level hands to the interaction
//! layer.

use hecs::Entity;

use thicket_core::enums::{GrabbableKind, Mode};

/// Handles into the level's world. Projectiles, targets and fragments
/// live in the same `SimulationWorld` and need no handle here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub mode: Mode,
    /// Player rig; carries the camera pose.
    pub player_root: Entity,
    pub weapon: Option<Entity>,
    pub light: Option<Entity>,
    pub prop: Option<Entity>,
    /// Pointable UI buttons, each carrying a mode identifier.
    pub panel: Vec<Entity>,
}

impl SessionContext {
    pub fn grabbable(&self, kind: GrabbableKind) -> Option<Entity> {
        match kind {
            GrabbableKind::Weapon => self.weapon,
            GrabbableKind::LightSource => self.light,
            GrabbableKind::Prop => self.prop,
        }
    }

    /// Grab candidates in priority order, skipping absent ones.
    pub fn grab_candidates(&self) -> impl Iterator<Item = (GrabbableKind, Entity)> + '_ {
        GrabbableKind::PRIORITY
            .into_iter()
            .filter_map(|kind| self.grabbable(kind).map(|entity| (kind, entity)))
    }
}
