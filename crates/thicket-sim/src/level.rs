//! Level construction: asset manifest, player rig, grabbables and the
//! day/night panel for each mode.

use glam::{Quat, Vec3};

use thicket_core::components::*;
use thicket_core::constants::*;
use thicket_core::enums::*;
use thicket_core::error::LevelError;
use thicket_core::types::{Pose, Sphere};

use crate::backend::{AssetLoader, AssetRef};
use crate::context::SessionContext;
use crate::world::SimulationWorld;

/// Spawn and motion parameters for a level's targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    pub target_kind: TargetKind,
    pub spawn_interval_ms: f64,
    pub hitbox: Hitbox,
    pub animation_clip: usize,
}

impl LevelParams {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Day => Self {
                target_kind: mode.target_kind(),
                spawn_interval_ms: BIRD_SPAWN_INTERVAL_MS,
                hitbox: Hitbox {
                    offset: BIRD_HITBOX_OFFSET,
                    radius: BIRD_HITBOX_RADIUS,
                },
                animation_clip: BIRD_ANIMATION_CLIP,
            },
            Mode::Night => Self {
                target_kind: mode.target_kind(),
                spawn_interval_ms: RABBIT_SPAWN_INTERVAL_MS,
                hitbox: Hitbox {
                    offset: RABBIT_HITBOX_OFFSET,
                    radius: RABBIT_HITBOX_RADIUS,
                },
                animation_clip: RABBIT_ANIMATION_CLIP,
            },
        }
    }
}

const DAY_ASSETS: &[AssetRef] = &[
    AssetRef::Model("models/remington1100.glb"),
    AssetRef::Model("models/bird_with_animation.glb"),
    AssetRef::Model("models/soda_can.glb"),
    AssetRef::Model("models/tree1.glb"),
    AssetRef::Model("models/bigRock.glb"),
    AssetRef::Model("models/grass1.glb"),
    AssetRef::Texture("textures/sky.jpg"),
    AssetRef::Texture("textures/forest_floor.jpg"),
];

const NIGHT_ASSETS: &[AssetRef] = &[
    AssetRef::Model("models/remington1100.glb"),
    AssetRef::Model("models/bunny.glb"),
    AssetRef::Model("models/soda_can.glb"),
    AssetRef::Model("models/tree1.glb"),
    AssetRef::Model("models/grass1.glb"),
    AssetRef::Model("models/flashlight.glb"),
    AssetRef::Texture("textures/sky_night.jpg"),
    AssetRef::Texture("textures/forest_floor.jpg"),
    AssetRef::Texture("textures/moon_textures.jpeg"),
];

/// Assets a mode needs, in load order.
pub fn asset_manifest(mode: Mode) -> &'static [AssetRef] {
    match mode {
        Mode::Day => DAY_ASSETS,
        Mode::Night => NIGHT_ASSETS,
    }
}

/// Load the mode's assets and populate `world`. On error nothing is
/// spawned.
pub fn build_level(
    world: &mut SimulationWorld,
    mode: Mode,
    assets: &mut dyn AssetLoader,
) -> Result<SessionContext, LevelError> {
    for asset in asset_manifest(mode) {
        assets.load(asset)?;
    }

    let player_root = spawn_player_rig(world);

    let weapon = spawn_grabbable(
        world,
        GrabbableKind::Weapon,
        Pose::new(WEAPON_POSITION, Quat::from_rotation_y(WEAPON_YAW)),
        GripOffset {
            offset: WEAPON_GRIP_OFFSET,
            rotation: Some(Quat::from_rotation_y(WEAPON_YAW)),
        },
    );

    let light = match mode {
        Mode::Day => None,
        Mode::Night => {
            let flashlight = Grabbable {
                kind: GrabbableKind::LightSource,
                grip: GripOffset {
                    offset: FLASHLIGHT_GRIP_OFFSET,
                    rotation: None,
                },
                placement: Placement::World(Pose::new(
                    FLASHLIGHT_POSITION,
                    Quat::from_rotation_y(FLASHLIGHT_YAW),
                )),
            };
            Some(world.spawn_object((flashlight, LightSource { on: true })))
        }
    };

    let can_position = match mode {
        Mode::Day => DAY_CAN_POSITION,
        Mode::Night => NIGHT_CAN_POSITION,
    };
    let prop = spawn_grabbable(
        world,
        GrabbableKind::Prop,
        Pose::at(can_position),
        GripOffset {
            offset: CAN_GRIP_OFFSET,
            rotation: None,
        },
    );

    let panel = spawn_panel(world);

    log::info!(
        "built {mode} level: {} assets, {} panel buttons",
        asset_manifest(mode).len(),
        panel.len()
    );

    Ok(SessionContext {
        mode,
        player_root,
        weapon: Some(weapon),
        light,
        prop: Some(prop),
        panel,
    })
}

/// Spawn the player rig at the origin with the default camera offset.
pub fn spawn_player_rig(world: &mut SimulationWorld) -> hecs::Entity {
    world.spawn_object((
        Position(Vec3::ZERO),
        PlayerRig {
            camera: Pose::at(CAMERA_OFFSET),
        },
    ))
}

/// Spawn a world-owned grabbable.
pub fn spawn_grabbable(
    world: &mut SimulationWorld,
    kind: GrabbableKind,
    pose: Pose,
    grip: GripOffset,
) -> hecs::Entity {
    world.spawn_object((Grabbable {
        kind,
        grip,
        placement: Placement::World(pose),
    },))
}

/// Spawn the two mode buttons. The panel faces the player, so the local
/// button layout is mirrored by the panel's yaw.
pub fn spawn_panel(world: &mut SimulationWorld) -> Vec<hecs::Entity> {
    let panel = Pose::new(PANEL_POSITION, Quat::from_rotation_y(PANEL_YAW));
    [(Mode::Day, PANEL_DAY_BUTTON), (Mode::Night, PANEL_NIGHT_BUTTON)]
        .into_iter()
        .map(|(mode, local)| {
            world.spawn_object((UiButton {
                mode,
                hitbox: Sphere::new(panel.transform_point(local), PANEL_BUTTON_RADIUS),
            },))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PreloadedAssets;

    struct FailingAssets {
        fail_on: &'static str,
    }

    impl AssetLoader for FailingAssets {
        fn load(&mut self, asset: &AssetRef) -> Result<(), LevelError> {
            if asset.path() == self.fail_on {
                Err(LevelError::AssetUnavailable {
                    path: asset.path().to_string(),
                    reason: "404".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn day_level_has_no_light_source() {
        let mut world = SimulationWorld::new(Some(3));
        let ctx = build_level(&mut world, Mode::Day, &mut PreloadedAssets).unwrap();
        assert!(ctx.weapon.is_some());
        assert!(ctx.light.is_none());
        assert!(ctx.prop.is_some());
        assert_eq!(ctx.panel.len(), 2);
        assert_eq!(world.count::<Grabbable>(), 2);
    }

    #[test]
    fn night_level_flashlight_starts_on() {
        let mut world = SimulationWorld::new(Some(3));
        let ctx = build_level(&mut world, Mode::Night, &mut PreloadedAssets).unwrap();
        let light = ctx.light.unwrap();
        assert!(world.ecs.get::<&LightSource>(light).unwrap().on);
        assert_eq!(world.count::<Grabbable>(), 3);
    }

    #[test]
    fn panel_buttons_face_the_player() {
        let mut world = SimulationWorld::new(Some(3));
        let buttons = spawn_panel(&mut world);
        let day = *world.ecs.get::<&UiButton>(buttons[0]).unwrap();
        let night = *world.ecs.get::<&UiButton>(buttons[1]).unwrap();
        assert_eq!(day.mode, Mode::Day);
        assert!((day.hitbox.center - Vec3::new(0.3, 1.3, -1.45)).length() < 1e-5);
        assert!((night.hitbox.center - Vec3::new(-0.3, 1.3, -1.45)).length() < 1e-5);
    }

    #[test]
    fn missing_asset_aborts_before_spawning() {
        let mut world = SimulationWorld::new(Some(3));
        let mut assets = FailingAssets {
            fail_on: "models/bunny.glb",
        };
        let err = build_level(&mut world, Mode::Night, &mut assets).unwrap_err();
        assert!(err.to_string().contains("models/bunny.glb"));
        assert_eq!(world.ecs.len(), 0);

        // The day level does not need the rabbit model.
        assert!(build_level(&mut world, Mode::Day, &mut assets).is_ok());
    }
}
