//! `SimulationWorld`: the per-level entity store plus the state every
//! system shares (RNG, spawn serials, render-resource ledger, frame
//! events).

use std::collections::HashSet;

use hecs::{DynamicBundle, Entity, EntityBuilder, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use thicket_core::components::{RenderHandle, SpawnSerial};
use thicket_core::events::SimEvent;

/// Tracks which render handles are live. Handles are released at most
/// once; the released ones queue up until the session forwards them to
/// the backend.
#[derive(Debug, Default)]
pub struct ResourceLedger {
    next: u64,
    live: HashSet<RenderHandle>,
    released: Vec<RenderHandle>,
}

impl ResourceLedger {
    pub fn allocate(&mut self) -> RenderHandle {
        let handle = RenderHandle(self.next);
        self.next += 1;
        self.live.insert(handle);
        handle
    }

    /// Returns false if the handle was not live (already released).
    pub fn release(&mut self, handle: RenderHandle) -> bool {
        if self.live.remove(&handle) {
            self.released.push(handle);
            true
        } else {
            log::warn!("render handle {} released twice; ignoring", handle.0);
            false
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn drain_released(&mut self) -> Vec<RenderHandle> {
        std::mem::take(&mut self.released)
    }
}

pub struct SimulationWorld {
    pub ecs: World,
    pub rng: ChaCha8Rng,
    pub events: Vec<SimEvent>,
    resources: ResourceLedger,
    next_serial: u64,
}

impl SimulationWorld {
    /// `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            ecs: World::new(),
            rng,
            events: Vec::new(),
            resources: ResourceLedger::default(),
            next_serial: 0,
        }
    }

    /// Spawn a scene object: the given components plus a fresh render
    /// handle and spawn serial.
    pub fn spawn_object(&mut self, components: impl DynamicBundle) -> Entity {
        let handle = self.resources.allocate();
        let serial = SpawnSerial(self.next_serial);
        self.next_serial += 1;

        let mut builder = EntityBuilder::new();
        builder.add_bundle(components).add(handle).add(serial);
        self.ecs.spawn(builder.build())
    }

    /// Remove a scene object and release its render handle.
    /// Returns false if the entity was already gone.
    pub fn despawn_object(&mut self, entity: Entity) -> bool {
        let handle = self.ecs.get::<&RenderHandle>(entity).ok().map(|h| *h);
        if self.ecs.despawn(entity).is_err() {
            return false;
        }
        if let Some(handle) = handle {
            self.resources.release(handle);
        }
        true
    }

    /// Release every live object's render handle and empty the world.
    pub fn teardown(&mut self) {
        let handles: Vec<RenderHandle> = self
            .ecs
            .query_mut::<&RenderHandle>()
            .into_iter()
            .map(|(_entity, handle)| *handle)
            .collect();
        for handle in handles {
            self.resources.release(handle);
        }
        self.ecs.clear();
        self.events.clear();
    }

    pub fn live_resources(&self) -> usize {
        self.resources.live_count()
    }

    pub fn drain_released(&mut self) -> Vec<RenderHandle> {
        self.resources.drain_released()
    }

    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Count entities carrying component `T`.
    pub fn count<T: hecs::Component>(&self) -> usize {
        self.ecs.query::<&T>().iter().count()
    }
}
