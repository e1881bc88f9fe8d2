//! Snapshot system: queries the world and builds a complete FrameSnapshot.
//!
//! Read-only; never modifies the world. Lists are ordered by spawn serial
//! so consecutive frames line up.

use glam::Vec3;
use hecs::World;

use thicket_core::components::*;
use thicket_core::enums::Mode;
use thicket_core::events::SimEvent;
use thicket_core::state::*;
use thicket_core::types::{FrameTime, Pose};

use crate::context::SessionContext;
use crate::interaction::{self, Controllers};

/// Build a complete FrameSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    ctx: &SessionContext,
    controllers: &Controllers,
    time: &FrameTime,
    mode: Mode,
    events: Vec<SimEvent>,
) -> FrameSnapshot {
    let (player_root, camera) = find_rig(world, ctx);

    FrameSnapshot {
        time: *time,
        mode,
        player_root,
        camera,
        targets: build_targets(world),
        projectiles: build_projectiles(world),
        fragments: build_fragments(world),
        grabbables: build_grabbables(world, controllers, player_root),
        controllers: build_controllers(world, controllers, player_root),
        panel: build_panel(world),
        events,
    }
}

/// Rig position and the camera's world pose.
fn find_rig(world: &World, ctx: &SessionContext) -> (Vec3, Pose) {
    let Ok(mut query) = world.query_one::<(&Position, &PlayerRig)>(ctx.player_root) else {
        return (Vec3::ZERO, Pose::IDENTITY);
    };
    match query.get() {
        Some((pos, rig)) => (pos.0, rig.camera.translated(pos.0)),
        None => (Vec3::ZERO, Pose::IDENTITY),
    }
}

fn build_targets(world: &World) -> Vec<TargetView> {
    let mut targets: Vec<(u64, TargetView)> = world
        .query::<(&Position, &Target, &SpawnSerial)>()
        .iter()
        .map(|(_, (pos, target, serial))| {
            (
                serial.0,
                TargetView {
                    kind: target.kind,
                    position: pos.0,
                    yaw: target.yaw,
                    hitbox: target.hitbox.at(pos.0),
                    animation_clip: target.animation.clip,
                    animation_time: target.animation.time_secs,
                },
            )
        })
        .collect();
    targets.sort_by_key(|(serial, _)| *serial);
    targets.into_iter().map(|(_, view)| view).collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(u64, ProjectileView)> = world
        .query::<(&Position, &Velocity, &SpawnSerial)>()
        .with::<&Projectile>()
        .iter()
        .map(|(_, (pos, vel, serial))| {
            (
                serial.0,
                ProjectileView {
                    position: pos.0,
                    velocity: vel.0,
                },
            )
        })
        .collect();
    projectiles.sort_by_key(|(serial, _)| *serial);
    projectiles.into_iter().map(|(_, view)| view).collect()
}

fn build_fragments(world: &World) -> Vec<Vec3> {
    let mut fragments: Vec<(u64, Vec3)> = world
        .query::<(&Position, &SpawnSerial)>()
        .with::<&Fragment>()
        .iter()
        .map(|(_, (pos, serial))| (serial.0, pos.0))
        .collect();
    fragments.sort_by_key(|(serial, _)| *serial);
    fragments.into_iter().map(|(_, pos)| pos).collect()
}

fn build_grabbables(world: &World, controllers: &Controllers, rig: Vec3) -> Vec<GrabbableView> {
    let mut grabbables: Vec<(u64, GrabbableView)> = world
        .query::<(&Grabbable, Option<&LightSource>, &SpawnSerial)>()
        .iter()
        .map(|(_, (grabbable, light, serial))| {
            let pose = interaction::grabbable_pose(grabbable, controllers, rig);
            (
                serial.0,
                GrabbableView {
                    kind: grabbable.kind,
                    position: pose.position,
                    rotation: pose.orientation,
                    held_by: grabbable.placement.holder(),
                    light_on: light.map(|l| l.on),
                },
            )
        })
        .collect();
    grabbables.sort_by_key(|(serial, _)| *serial);
    grabbables.into_iter().map(|(_, view)| view).collect()
}

fn build_controllers(world: &World, controllers: &Controllers, rig: Vec3) -> Vec<ControllerView> {
    controllers
        .iter()
        .map(|controller| ControllerView {
            hand: controller.hand,
            pose: controller.world_pose(rig),
            holding: controller
                .held()
                .and_then(|item| world.get::<&Grabbable>(item).ok().map(|g| g.kind)),
        })
        .collect()
}

fn build_panel(world: &World) -> Vec<PanelButtonView> {
    let mut panel: Vec<(u64, PanelButtonView)> = world
        .query::<(&UiButton, &SpawnSerial)>()
        .iter()
        .map(|(_, (button, serial))| {
            (
                serial.0,
                PanelButtonView {
                    mode: button.mode,
                    hitbox: button.hitbox,
                },
            )
        })
        .collect();
    panel.sort_by_key(|(serial, _)| *serial);
    panel.into_iter().map(|(_, view)| view).collect()
}
