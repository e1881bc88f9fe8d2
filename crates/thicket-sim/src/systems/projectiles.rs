//! Projectile flight and swept hit resolution against target hitboxes.

use glam::Vec3;
use hecs::Entity;

use thicket_core::components::{Position, Projectile, SpawnSerial, Target, Velocity};
use thicket_core::config::{cap, SimConfig};
use thicket_core::types::Sphere;

use crate::hit_test;
use crate::systems::{population, targets};
use crate::world::SimulationWorld;

/// Create one projectile at `origin` moving `direction * speed` per frame.
pub fn fire(world: &mut SimulationWorld, origin: Vec3, direction: Vec3, config: &SimConfig) -> Entity {
    let velocity = direction.normalize_or_zero() * config.projectile_speed;
    let projectile = world.spawn_object((Projectile, Position(origin), Velocity(velocity)));
    population::enforce_cap::<Projectile>(world, cap(config.max_projectiles));
    projectile
}

/// Sweep every projectile over this frame's displacement. A hit destroys
/// the nearest target and removes the projectile; a miss moves the
/// projectile by its full velocity. Returns the number of hits.
pub fn run(world: &mut SimulationWorld, config: &SimConfig) -> usize {
    // Firing order.
    let mut flights: Vec<(SpawnSerial, Entity, Vec3, Vec3)> = world
        .ecs
        .query::<(&Projectile, &Position, &Velocity, &SpawnSerial)>()
        .iter()
        .map(|(entity, (_, pos, vel, serial))| (*serial, entity, pos.0, vel.0))
        .collect();
    flights.sort_unstable_by_key(|(serial, ..)| *serial);

    let mut live_hitboxes: Vec<(Sphere, Entity)> = world
        .ecs
        .query::<(&Target, &Position)>()
        .iter()
        .map(|(entity, (target, pos))| (target.hitbox.at(pos.0), entity))
        .collect();

    let mut spent: Vec<Entity> = Vec::new();
    let mut hits = 0;

    for (_, projectile, origin, velocity) in flights {
        let step = velocity.length();
        let hit = if step > 0.0 {
            hit_test::nearest_hit(origin, velocity / step, step, live_hitboxes.iter().copied())
        } else {
            None
        };

        match hit {
            Some(hit) => {
                targets::destroy(world, hit.owner, config);
                live_hitboxes.retain(|(_, target)| *target != hit.owner);
                spent.push(projectile);
                hits += 1;
            }
            None => {
                if let Ok(mut pos) = world.ecs.get::<&mut Position>(projectile) {
                    pos.0 += velocity;
                }
            }
        }
    }

    // Compact after the sweep; order does not matter.
    for projectile in spent.into_iter().rev() {
        world.despawn_object(projectile);
    }

    hits
}
