//! Target population: interval-paced spawning, per-frame motion and
//! destruction into a fragment burst.

use std::f32::consts::TAU;

use glam::Vec3;
use hecs::Entity;
use rand::Rng;

use thicket_core::components::*;
use thicket_core::config::{cap, SimConfig};
use thicket_core::constants::*;
use thicket_core::enums::TargetKind;
use thicket_core::events::SimEvent;
use thicket_core::types::FrameTime;

use crate::level::LevelParams;
use crate::systems::{fragments, population};
use crate::world::SimulationWorld;

/// Spawn clock for the running level, measured on the render clock.
#[derive(Debug, Clone)]
pub struct TargetSpawner {
    pub params: LevelParams,
    last_spawn_ms: f64,
}

impl TargetSpawner {
    pub fn new(params: LevelParams) -> Self {
        Self {
            params,
            last_spawn_ms: 0.0,
        }
    }

    /// Strictly more than one interval since the last spawn.
    pub fn is_due(&self, now_ms: f64) -> bool {
        now_ms - self.last_spawn_ms > self.params.spawn_interval_ms
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.last_spawn_ms
    }
}

/// Spawn check, animation and motion for one frame.
pub fn run(
    world: &mut SimulationWorld,
    spawner: &mut TargetSpawner,
    time: &FrameTime,
    config: &SimConfig,
) {
    if spawner.is_due(time.now_ms) {
        spawn(world, &spawner.params);
        spawner.last_spawn_ms = time.now_ms;
        population::enforce_cap::<Target>(world, cap(config.max_targets));
    }

    advance(world, time.delta_secs);
}

/// Spawn one target of the level's kind.
pub fn spawn(world: &mut SimulationWorld, params: &LevelParams) -> Entity {
    let (position, motion, yaw) = match params.target_kind {
        TargetKind::Bird => bird_placement(world),
        TargetKind::Rabbit => rabbit_placement(world),
    };
    let target = Target {
        kind: params.target_kind,
        motion,
        hitbox: params.hitbox,
        yaw,
        animation: AnimationState {
            clip: params.animation_clip,
            time_secs: 0.0,
        },
    };
    world.emit(SimEvent::TargetSpawned {
        kind: target.kind,
        position,
    });
    world.spawn_object((target, Position(position)))
}

/// Random lateral offset, height in the bird band, fixed depth; small
/// lateral drift plus constant forward speed.
fn bird_placement(world: &mut SimulationWorld) -> (Vec3, TargetMotion, f32) {
    let rng = &mut world.rng;
    let position = Vec3::new(
        (rng.gen::<f32>() - 0.5) * BIRD_SPAWN_WIDTH,
        BIRD_HEIGHT_MIN + (BIRD_HEIGHT_MAX - BIRD_HEIGHT_MIN) * rng.gen::<f32>(),
        BIRD_SPAWN_Z,
    );
    let velocity = Vec3::new((rng.gen::<f32>() - 0.5) * BIRD_DRIFT, 0.0, BIRD_SPEED);
    (position, TargetMotion::PerFrame { velocity }, 0.0)
}

/// Random point on the spawn annulus, heading for a random point near
/// the origin. The heading never changes after spawn.
fn rabbit_placement(world: &mut SimulationWorld) -> (Vec3, TargetMotion, f32) {
    let rng = &mut world.rng;
    let angle = rng.gen::<f32>() * TAU;
    let distance =
        RABBIT_MIN_DISTANCE + (RABBIT_MAX_DISTANCE - RABBIT_MIN_DISTANCE) * rng.gen::<f32>();
    let position = Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance);

    let goal_angle = rng.gen::<f32>() * TAU;
    let goal_distance = rng.gen::<f32>() * RABBIT_TARGET_RADIUS;
    let goal = Vec3::new(
        goal_angle.cos() * goal_distance,
        0.0,
        goal_angle.sin() * goal_distance,
    );

    let direction = (goal - position).normalize_or_zero();
    let yaw = direction.x.atan2(direction.z);
    (
        position,
        TargetMotion::Heading {
            direction,
            speed: RABBIT_SPEED,
        },
        yaw,
    )
}

/// Animate and move every live target. Hitboxes follow implicitly.
pub fn advance(world: &mut SimulationWorld, delta_secs: f32) {
    for (_entity, (target, pos)) in world.ecs.query_mut::<(&mut Target, &mut Position)>() {
        target.animation.time_secs += delta_secs;
        pos.0 += match target.motion {
            TargetMotion::PerFrame { velocity } => velocity,
            TargetMotion::Heading { direction, speed } => direction * speed * delta_secs,
        };
    }
}

/// Remove a target and burst fragments at its last position.
/// Returns that position, or `None` if the target was already gone.
pub fn destroy(world: &mut SimulationWorld, entity: Entity, config: &SimConfig) -> Option<Vec3> {
    let (kind, position) = {
        let mut query = world.ecs.query_one::<(&Target, &Position)>(entity).ok()?;
        let (target, pos) = query.get()?;
        (target.kind, pos.0)
    };

    world.despawn_object(entity);
    world.emit(SimEvent::TargetDestroyed { kind, position });
    fragments::spawn_burst(world, position, config.fragment_count, config);
    log::debug!("{kind:?} destroyed at {position}");
    Some(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thicket_core::enums::Mode;

    fn frame(now_ms: f64, delta_secs: f32) -> FrameTime {
        FrameTime {
            frame: 1,
            now_ms,
            delta_secs,
        }
    }

    #[test]
    fn spawns_only_after_a_full_interval() {
        let mut world = SimulationWorld::new(Some(2));
        let mut spawner = TargetSpawner::new(LevelParams::for_mode(Mode::Day));
        let config = SimConfig::default();

        run(&mut world, &mut spawner, &frame(3000.0, 0.0), &config);
        assert_eq!(world.count::<Target>(), 0, "exactly one interval is not enough");

        run(&mut world, &mut spawner, &frame(3001.0, 0.0), &config);
        assert_eq!(world.count::<Target>(), 1);
        assert_eq!(spawner.last_spawn_ms(), 3001.0);

        run(&mut world, &mut spawner, &frame(6000.0, 0.0), &config);
        assert_eq!(world.count::<Target>(), 1);

        run(&mut world, &mut spawner, &frame(6002.0, 0.0), &config);
        assert_eq!(world.count::<Target>(), 2);
    }

    #[test]
    fn spawn_pacing_holds_for_any_frame_rate() {
        let mut world = SimulationWorld::new(Some(2));
        let mut spawner = TargetSpawner::new(LevelParams::for_mode(Mode::Night));
        let config = SimConfig {
            max_targets: 0,
            ..SimConfig::default()
        };

        let mut spawn_times = Vec::new();
        let mut now = 0.0;
        for step in 0..2000 {
            // Irregular frame spacing between 7 and 40 ms.
            now += 7.0 + (step % 5) as f64 * 8.25;
            let before = world.count::<Target>();
            run(&mut world, &mut spawner, &frame(now, 0.0), &config);
            if world.count::<Target>() > before {
                spawn_times.push(now);
            }
        }

        assert!(spawn_times.len() > 10);
        for pair in spawn_times.windows(2) {
            assert!(
                pair[1] - pair[0] >= RABBIT_SPAWN_INTERVAL_MS,
                "spawns {} ms apart",
                pair[1] - pair[0]
            );
        }
    }

    #[test]
    fn bird_spawns_in_band_and_moves_per_frame() {
        let mut world = SimulationWorld::new(Some(8));
        let e = spawn(&mut world, &LevelParams::for_mode(Mode::Day));
        let start = world.ecs.get::<&Position>(e).unwrap().0;
        assert!(start.x.abs() <= 3.0);
        assert!((3.0..=5.0).contains(&start.y));
        assert_eq!(start.z, BIRD_SPAWN_Z);

        // Delta time does not scale bird motion.
        advance(&mut world, 0.5);
        advance(&mut world, 0.001);
        let end = world.ecs.get::<&Position>(e).unwrap().0;
        assert!((end.z - start.z - 2.0 * BIRD_SPEED).abs() < 1e-5);
        assert!((end.x - start.x).abs() <= BIRD_DRIFT + 1e-6);
    }

    #[test]
    fn rabbit_heads_toward_the_origin_area() {
        let mut world = SimulationWorld::new(Some(8));
        for _ in 0..50 {
            let e = spawn(&mut world, &LevelParams::for_mode(Mode::Night));
            let target = *world.ecs.get::<&Target>(e).unwrap();
            let pos = world.ecs.get::<&Position>(e).unwrap().0;

            let radius = pos.length();
            assert!((10.0..=20.0).contains(&radius), "radius {radius}");
            assert_eq!(pos.y, 0.0);

            let TargetMotion::Heading { direction, speed } = target.motion else {
                panic!("rabbits are delta-scaled");
            };
            assert_eq!(speed, RABBIT_SPEED);
            assert!((direction.length() - 1.0).abs() < 1e-5);
            // Aimed at a point within 4 units of the origin.
            let closest = pos + direction * (-pos).dot(direction);
            assert!(closest.length() <= RABBIT_TARGET_RADIUS + 1e-3);
            assert!((target.yaw - direction.x.atan2(direction.z)).abs() < 1e-6);
        }
    }

    #[test]
    fn rabbit_motion_scales_with_delta() {
        let mut world = SimulationWorld::new(Some(8));
        let e = spawn(&mut world, &LevelParams::for_mode(Mode::Night));
        let start = world.ecs.get::<&Position>(e).unwrap().0;
        advance(&mut world, 0.1);
        let end = world.ecs.get::<&Position>(e).unwrap().0;
        assert!(((end - start).length() - RABBIT_SPEED * 0.1).abs() < 1e-4);

        let anim = world.ecs.get::<&Target>(e).unwrap().animation;
        assert_eq!(anim.clip, RABBIT_ANIMATION_CLIP);
        assert!((anim.time_secs - 0.1).abs() < 1e-6);
    }

    #[test]
    fn destroy_bursts_fragments_at_last_position() {
        let mut world = SimulationWorld::new(Some(8));
        let e = spawn(&mut world, &LevelParams::for_mode(Mode::Day));
        let pos = world.ecs.get::<&Position>(e).unwrap().0;

        assert_eq!(destroy(&mut world, e, &SimConfig::default()), Some(pos));
        assert_eq!(world.count::<Target>(), 0);
        assert_eq!(world.count::<Fragment>(), FRAGMENT_BURST);
        assert!(destroy(&mut world, e, &SimConfig::default()).is_none());
    }

    #[test]
    fn target_cap_evicts_oldest() {
        let mut world = SimulationWorld::new(Some(8));
        let mut spawner = TargetSpawner::new(LevelParams::for_mode(Mode::Night));
        let config = SimConfig {
            max_targets: 2,
            ..SimConfig::default()
        };
        for i in 1..=4 {
            run(&mut world, &mut spawner, &frame(i as f64 * 1001.0, 0.0), &config);
        }
        assert_eq!(world.count::<Target>(), 2);
        assert_eq!(world.count::<Fragment>(), 0, "eviction is not a kill");
    }
}
