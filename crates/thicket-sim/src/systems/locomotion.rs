//! Thumbstick locomotion: unconstrained planar translation of the
//! player rig, relative to where the camera looks.

use glam::{Vec2, Vec3};
use hecs::Entity;

use thicket_core::components::{PlayerRig, Position};

use crate::world::SimulationWorld;

/// Translate the rig by one frame of stick input. Stick y is negative
/// when pushed forward.
pub fn run(world: &mut SimulationWorld, player_root: Entity, stick: Vec2, move_speed: f32) {
    if stick == Vec2::ZERO {
        return;
    }
    let Ok(mut query) = world.ecs.query_one::<(&mut Position, &PlayerRig)>(player_root) else {
        return;
    };
    let Some((pos, rig)) = query.get() else {
        return;
    };

    let mut forward = rig.camera.forward();
    forward.y = 0.0;
    let forward = forward.normalize_or_zero();
    let right = forward.cross(Vec3::Y);

    pos.0 += forward * (-stick.y * move_speed) + right * (stick.x * move_speed);
}
