//! Controller interaction state machine.
//!
//! Each hand is either `Idle` or `Holding` exactly one grabbable. Squeeze
//! grabs or drops; select (trigger release) points at UI buttons when
//! idle, otherwise uses whatever the hand holds.

use glam::{Vec2, Vec3};
use hecs::Entity;

use thicket_core::components::{Grabbable, LightSource, Placement, Position, UiButton};
use thicket_core::config::SimConfig;
use thicket_core::enums::{Capability, GrabbableKind, Hand, Mode};
use thicket_core::events::SimEvent;
use thicket_core::types::{Pose, Sphere};

use crate::context::SessionContext;
use crate::hit_test;
use crate::systems::projectiles;
use crate::world::SimulationWorld;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ControllerState {
    #[default]
    Idle,
    Holding {
        item: Entity,
        capability: Capability,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    pub hand: Hand,
    /// Pose relative to the player rig.
    pub pose: Pose,
    pub stick: Vec2,
    pub state: ControllerState,
}

impl Controller {
    pub fn new(hand: Hand) -> Self {
        Self {
            hand,
            pose: Pose::IDENTITY,
            stick: Vec2::ZERO,
            state: ControllerState::Idle,
        }
    }

    /// The rig only translates, so world = local shifted by the rig.
    pub fn world_pose(&self, rig: Vec3) -> Pose {
        self.pose.translated(rig)
    }

    pub fn held(&self) -> Option<Entity> {
        match self.state {
            ControllerState::Idle => None,
            ControllerState::Holding { item, .. } => Some(item),
        }
    }
}

/// Both hands, indexed by `Hand::index`. Lives for the whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct Controllers {
    slots: [Controller; 2],
}

impl Default for Controllers {
    fn default() -> Self {
        Self {
            slots: Hand::ALL.map(Controller::new),
        }
    }
}

impl Controllers {
    pub fn get(&self, hand: Hand) -> &Controller {
        &self.slots[hand.index()]
    }

    pub fn get_mut(&mut self, hand: Hand) -> &mut Controller {
        &mut self.slots[hand.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Controller> {
        self.slots.iter()
    }

    /// Which hand holds `item`, if any.
    pub fn holder_of(&self, item: Entity) -> Option<Hand> {
        self.slots
            .iter()
            .find(|c| c.held() == Some(item))
            .map(|c| c.hand)
    }

    /// Return both hands to `Idle`. Called when the level they held
    /// objects from is torn down.
    pub fn reset(&mut self) {
        for controller in &mut self.slots {
            controller.state = ControllerState::Idle;
        }
    }
}

/// Result of a squeeze event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqueezeOutcome {
    Grabbed(GrabbableKind),
    Dropped(GrabbableKind),
    Nothing,
}

/// Result of a select event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseOutcome {
    /// A UI button was hit; the caller performs the switch.
    SwitchMode(Mode),
    LightToggled { on: bool },
    Fired(Entity),
    Nothing,
}

fn rig_position(world: &SimulationWorld, ctx: &SessionContext) -> Vec3 {
    world
        .ecs
        .get::<&Position>(ctx.player_root)
        .map(|p| p.0)
        .unwrap_or(Vec3::ZERO)
}

/// Squeeze: drop when holding, otherwise grab the first free candidate
/// in range.
pub fn squeeze(
    controllers: &mut Controllers,
    hand: Hand,
    world: &mut SimulationWorld,
    ctx: &SessionContext,
    config: &SimConfig,
) -> SqueezeOutcome {
    let rig = rig_position(world, ctx);
    let controller = controllers.get_mut(hand);
    match controller.state {
        ControllerState::Holding { item, .. } => drop_held(controller, item, rig, world),
        ControllerState::Idle => try_grab(controller, rig, world, ctx, config.grab_distance),
    }
}

fn try_grab(
    controller: &mut Controller,
    rig: Vec3,
    world: &mut SimulationWorld,
    ctx: &SessionContext,
    grab_distance: f32,
) -> SqueezeOutcome {
    let hand_position = controller.world_pose(rig).position;

    for (kind, entity) in ctx.grab_candidates() {
        let Ok(mut grabbable) = world.ecs.get::<&mut Grabbable>(entity) else {
            continue;
        };
        // Held objects are never candidates.
        let Placement::World(pose) = grabbable.placement else {
            continue;
        };
        if pose.position.distance(hand_position) > grab_distance {
            continue;
        }

        let orientation = grabbable.grip.rotation.unwrap_or(pose.orientation);
        grabbable.placement = Placement::Held {
            hand: controller.hand,
            local: Pose::new(grabbable.grip.offset, orientation),
        };
        drop(grabbable);

        controller.state = ControllerState::Holding {
            item: entity,
            capability: kind.capability(),
        };
        world.emit(SimEvent::Grabbed {
            hand: controller.hand,
            kind,
        });
        log::debug!("{:?} hand grabbed {kind:?}", controller.hand);
        return SqueezeOutcome::Grabbed(kind);
    }

    SqueezeOutcome::Nothing
}

fn drop_held(
    controller: &mut Controller,
    item: Entity,
    rig: Vec3,
    world: &mut SimulationWorld,
) -> SqueezeOutcome {
    controller.state = ControllerState::Idle;
    let hand_position = controller.world_pose(rig).position;

    let Ok(mut grabbable) = world.ecs.get::<&mut Grabbable>(item) else {
        return SqueezeOutcome::Nothing;
    };
    let orientation = match grabbable.placement {
        Placement::Held { local, .. } => local.orientation,
        Placement::World(pose) => pose.orientation,
    };
    grabbable.placement = Placement::World(Pose::new(hand_position, orientation));
    let kind = grabbable.kind;
    drop(grabbable);

    world.emit(SimEvent::Dropped {
        hand: controller.hand,
        kind,
    });
    log::debug!("{:?} hand dropped {kind:?} at {hand_position}", controller.hand);
    SqueezeOutcome::Dropped(kind)
}

/// Select: UI pointing (idle hands only), then light toggle, then fire.
pub fn select(
    controllers: &Controllers,
    hand: Hand,
    world: &mut SimulationWorld,
    ctx: &SessionContext,
    config: &SimConfig,
) -> UseOutcome {
    let rig = rig_position(world, ctx);
    let controller = controllers.get(hand);
    let pose = controller.world_pose(rig);

    if controller.state == ControllerState::Idle && !ctx.panel.is_empty() {
        if let Some(mode) = point_at_panel(world, ctx, &pose, config.pointer_range) {
            log::debug!("{hand:?} hand pointed at the {mode} button");
            return UseOutcome::SwitchMode(mode);
        }
    }

    match controller.state {
        ControllerState::Holding {
            item,
            capability: Capability::LightSource,
        } => toggle_light(world, item),
        ControllerState::Holding {
            capability: Capability::Weapon,
            ..
        } => {
            let direction = pose.forward();
            let projectile = projectiles::fire(world, pose.position, direction, config);
            world.emit(SimEvent::ShotFired {
                hand,
                origin: pose.position,
            });
            log::debug!("{hand:?} hand fired from {}", pose.position);
            UseOutcome::Fired(projectile)
        }
        _ => UseOutcome::Nothing,
    }
}

fn point_at_panel(
    world: &SimulationWorld,
    ctx: &SessionContext,
    pose: &Pose,
    range: f32,
) -> Option<Mode> {
    let buttons: Vec<(Sphere, Mode)> = ctx
        .panel
        .iter()
        .filter_map(|&e| world.ecs.get::<&UiButton>(e).ok().map(|b| (b.hitbox, b.mode)))
        .collect();
    hit_test::nearest_hit(pose.position, pose.forward(), range, buttons).map(|hit| hit.owner)
}

/// Flip a light source. Twice in a row restores the previous state.
pub fn toggle_light(world: &mut SimulationWorld, item: Entity) -> UseOutcome {
    let Ok(mut light) = world.ecs.get::<&mut LightSource>(item) else {
        return UseOutcome::Nothing;
    };
    light.on = !light.on;
    let on = light.on;
    drop(light);

    world.emit(SimEvent::LightToggled { on });
    UseOutcome::LightToggled { on }
}

/// World pose of a grabbable, following its holder when held.
pub fn grabbable_pose(grabbable: &Grabbable, controllers: &Controllers, rig: Vec3) -> Pose {
    match grabbable.placement {
        Placement::World(pose) => pose,
        Placement::Held { hand, local } => controllers.get(hand).world_pose(rig).compose(&local),
    }
}
