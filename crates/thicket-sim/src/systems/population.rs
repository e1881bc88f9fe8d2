//! Population caps with oldest-first eviction.

use hecs::Entity;

use thicket_core::components::SpawnSerial;

use crate::world::SimulationWorld;

/// Despawn the oldest entities carrying `T` until at most `cap` remain.
/// Returns how many were evicted.
pub fn enforce_cap<T: hecs::Component>(world: &mut SimulationWorld, cap: Option<usize>) -> usize {
    let Some(cap) = cap else {
        return 0;
    };

    let mut members: Vec<(SpawnSerial, Entity)> = world
        .ecs
        .query::<(&T, &SpawnSerial)>()
        .iter()
        .map(|(entity, (_, serial))| (*serial, entity))
        .collect();
    if members.len() <= cap {
        return 0;
    }

    members.sort_unstable_by_key(|(serial, _)| *serial);
    let excess = members.len() - cap;
    for &(_, entity) in &members[..excess] {
        world.despawn_object(entity);
    }
    log::debug!(
        "evicted {excess} oldest {} (cap {cap})",
        std::any::type_name::<T>().rsplit("::").next().unwrap_or("entities")
    );
    excess
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use thicket_core::components::{Fragment, Position, Projectile};

    #[test]
    fn evicts_oldest_first() {
        let mut world = SimulationWorld::new(Some(5));
        let spawned: Vec<Entity> = (0..5)
            .map(|i| world.spawn_object((Fragment, Position(Vec3::splat(i as f32)))))
            .collect();

        assert_eq!(enforce_cap::<Fragment>(&mut world, Some(3)), 2);
        assert!(!world.ecs.contains(spawned[0]));
        assert!(!world.ecs.contains(spawned[1]));
        assert!(world.ecs.contains(spawned[2]));
        assert_eq!(world.count::<Fragment>(), 3);
        assert_eq!(world.drain_released().len(), 2);
    }

    #[test]
    fn cap_only_counts_its_category() {
        let mut world = SimulationWorld::new(Some(5));
        for _ in 0..4 {
            world.spawn_object((Projectile,));
        }
        world.spawn_object((Fragment,));
        assert_eq!(enforce_cap::<Fragment>(&mut world, Some(1)), 0);
        assert_eq!(enforce_cap::<Projectile>(&mut world, None), 0);
        assert_eq!(world.count::<Projectile>(), 4);
    }
}
