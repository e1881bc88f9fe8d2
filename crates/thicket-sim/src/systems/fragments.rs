//! Cosmetic debris emitted when a target is destroyed.
//!
//! Integration is per frame (not delta-scaled): position += velocity,
//! then vertical velocity -= gravity.

use glam::Vec3;
use rand::Rng;

use thicket_core::components::{Fragment, Position, Velocity};
use thicket_core::config::{cap, SimConfig};

use crate::systems::population;
use crate::world::SimulationWorld;

/// Spawn `count` fragments at `position`, each with an independent
/// random velocity: lateral in ±spread/2, vertical in [0, spread).
pub fn spawn_burst(world: &mut SimulationWorld, position: Vec3, count: usize, config: &SimConfig) {
    let spread = config.fragment_spread;
    for _ in 0..count {
        let velocity = Vec3::new(
            (world.rng.gen::<f32>() - 0.5) * spread,
            world.rng.gen::<f32>() * spread,
            (world.rng.gen::<f32>() - 0.5) * spread,
        );
        world.spawn_object((Fragment, Position(position), Velocity(velocity)));
    }
    population::enforce_cap::<Fragment>(world, cap(config.max_fragments));
}

/// Advance every fragment by one frame.
pub fn run(world: &mut SimulationWorld, gravity: f32) {
    for (_entity, (_fragment, pos, vel)) in world
        .ecs
        .query_mut::<(&Fragment, &mut Position, &mut Velocity)>()
    {
        pos.0 += vel.0;
        vel.0.y -= gravity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_spawns_requested_count_at_origin() {
        let mut world = SimulationWorld::new(Some(11));
        let origin = Vec3::new(1.0, 2.0, 3.0);
        spawn_burst(&mut world, origin, 20, &SimConfig::default());

        let mut q = world.ecs.query::<(&Fragment, &Position, &Velocity)>();
        let mut n = 0;
        for (_e, (_f, pos, vel)) in q.iter() {
            n += 1;
            assert_eq!(pos.0, origin);
            assert!(vel.0.x.abs() <= 0.075 && vel.0.z.abs() <= 0.075);
            assert!((0.0..0.15).contains(&vel.0.y));
        }
        assert_eq!(n, 20);
    }

    #[test]
    fn integration_applies_gravity_per_frame() {
        let mut world = SimulationWorld::new(Some(11));
        let e = world.spawn_object((
            Fragment,
            Position(Vec3::ZERO),
            Velocity(Vec3::new(0.1, 0.1, 0.0)),
        ));

        run(&mut world, 0.006);
        run(&mut world, 0.006);

        let pos = world.ecs.get::<&Position>(e).unwrap().0;
        let vel = world.ecs.get::<&Velocity>(e).unwrap().0;
        assert!((pos.x - 0.2).abs() < 1e-6);
        // 0.1 + (0.1 - 0.006)
        assert!((pos.y - 0.194).abs() < 1e-6);
        assert!((vel.y - 0.088).abs() < 1e-6);
    }
}
