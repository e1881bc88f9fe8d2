//! Session orchestrator.
//!
//! `Session` owns the `SimulationWorld` for the loaded level, the two
//! controllers and the level lifecycle. Input arrives as queued
//! `SessionCommand`s which `frame` drains strictly before the tick, so
//! no interaction ever lands mid-tick. Completely headless; the renderer
//! sits behind `SceneBackend`.

use std::collections::VecDeque;

use glam::Vec2;

use thicket_core::commands::{InputEvent, SessionCommand};
use thicket_core::components::PlayerRig;
use thicket_core::config::SimConfig;
use thicket_core::enums::{Hand, Mode};
use thicket_core::error::LevelError;
use thicket_core::events::SimEvent;
use thicket_core::state::FrameSnapshot;
use thicket_core::types::FrameTime;

use crate::backend::{AssetLoader, SceneBackend};
use crate::context::SessionContext;
use crate::interaction::{self, Controllers, UseOutcome};
use crate::level::{self, LevelParams};
use crate::systems;
use crate::systems::targets::TargetSpawner;
use crate::world::SimulationWorld;

/// One play session: a sequence of levels sharing the same controllers.
pub struct Session<B: SceneBackend, A: AssetLoader> {
    config: SimConfig,
    world: SimulationWorld,
    controllers: Controllers,
    ctx: Option<SessionContext>,
    spawner: TargetSpawner,
    time: FrameTime,
    mode: Mode,
    running: bool,
    /// Set by `stop`, cleared only by `start`.
    stopped: bool,
    command_queue: VecDeque<SessionCommand>,
    backend: B,
    assets: A,
}

impl<B: SceneBackend, A: AssetLoader> Session<B, A> {
    /// Create a stopped session. Call `start` to build the first level.
    pub fn new(config: SimConfig, backend: B, assets: A) -> Self {
        let mode = config.initial_mode;
        Self {
            world: SimulationWorld::new(config.seed),
            controllers: Controllers::default(),
            ctx: None,
            spawner: TargetSpawner::new(LevelParams::for_mode(mode)),
            time: FrameTime::default(),
            mode,
            running: false,
            stopped: false,
            command_queue: VecDeque::new(),
            backend,
            assets,
            config,
        }
    }

    /// Build the level for the current mode and start ticking.
    pub fn start(&mut self) -> Result<(), LevelError> {
        self.stopped = false;
        if self.running {
            return Ok(());
        }
        self.load_level(self.mode)
    }

    /// Stop ticking and tear the level down. Only `start` resumes a
    /// stopped session; mode changes in the meantime are just recorded.
    pub fn stop(&mut self) {
        self.stopped = true;
        if self.ctx.is_some() {
            self.teardown_level();
            log::info!("session stopped");
        }
    }

    /// Queue a command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: SessionCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_input(&mut self, event: InputEvent) {
        self.queue_command(event.into());
    }

    /// Switch levels. Returns `Ok(false)` without touching anything when
    /// `mode` is already loaded. On a construction error the old level
    /// is already gone and the session stays stopped.
    pub fn set_mode(&mut self, mode: Mode) -> Result<bool, LevelError> {
        if self.stopped {
            log::debug!("session stopped; {mode} mode applies on the next start");
            self.mode = mode;
            return Ok(false);
        }
        if mode == self.mode && self.ctx.is_some() {
            log::debug!("already in {mode} mode");
            return Ok(false);
        }

        let from = self.mode;
        self.teardown_level();
        self.load_level(mode)?;
        self.world.emit(SimEvent::ModeChanged { from, to: mode });
        log::info!("mode switched from {from} to {mode}");
        Ok(true)
    }

    /// Run one frame stamped `now_ms` (render clock, monotonic).
    ///
    /// Queued commands are handled first, then the tick runs in fixed
    /// order: spawn check and target motion, projectile sweep, fragment
    /// integration, locomotion, render. Returns `None` while stopped.
    pub fn frame(&mut self, now_ms: f64) -> Option<FrameSnapshot> {
        self.process_commands();

        if !self.running {
            return None;
        }
        let ctx = self.ctx.as_ref()?;

        self.time.advance(now_ms);
        systems::targets::run(&mut self.world, &mut self.spawner, &self.time, &self.config);
        systems::projectiles::run(&mut self.world, &self.config);
        systems::fragments::run(&mut self.world, self.config.fragment_gravity);
        systems::locomotion::run(
            &mut self.world,
            ctx.player_root,
            self.controllers.get(Hand::Left).stick,
            self.config.move_speed,
        );

        let events = std::mem::take(&mut self.world.events);
        let snapshot = systems::snapshot::build_snapshot(
            &self.world.ecs,
            ctx,
            &self.controllers,
            &self.time,
            self.mode,
            events,
        );
        self.backend.present(&snapshot);
        self.flush_releases();
        Some(snapshot)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn time(&self) -> FrameTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Read-only view of the loaded level.
    pub fn world(&self) -> &SimulationWorld {
        &self.world
    }

    pub fn context(&self) -> Option<&SessionContext> {
        self.ctx.as_ref()
    }

    pub fn controllers(&self) -> &Controllers {
        &self.controllers
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable world access for test setup.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut SimulationWorld {
        &mut self.world
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Input { event } => self.handle_input(event),
            SessionCommand::SetMode { mode } => self.request_mode(mode),
            SessionCommand::ToggleMode => self.request_mode(self.mode.toggled()),
        }
    }

    fn request_mode(&mut self, mode: Mode) {
        match self.set_mode(mode) {
            Ok(_) => {}
            Err(err) => log::warn!("queued switch to {mode} dropped, session stopped: {err}"),
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::ControllerPose { hand, pose } => {
                if !pose.is_finite() {
                    log::warn!("ignoring non-finite {hand:?} controller pose");
                    return;
                }
                self.controllers.get_mut(hand).pose = pose;
            }
            InputEvent::Thumbstick { hand, x, y } => {
                if !(x.is_finite() && y.is_finite()) {
                    log::warn!("ignoring non-finite {hand:?} thumbstick ({x}, {y})");
                    return;
                }
                self.controllers.get_mut(hand).stick =
                    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
            }
            InputEvent::HeadPose { pose } => {
                if !pose.is_finite() {
                    log::warn!("ignoring non-finite head pose");
                    return;
                }
                let Some(ctx) = self.ctx.as_ref() else {
                    return;
                };
                if let Ok(mut rig) = self.world.ecs.get::<&mut PlayerRig>(ctx.player_root) {
                    rig.camera = pose;
                }
            }
            InputEvent::Squeeze { hand } => {
                let Some(ctx) = self.ctx.as_ref() else {
                    return;
                };
                interaction::squeeze(&mut self.controllers, hand, &mut self.world, ctx, &self.config);
            }
            InputEvent::Select { hand } => {
                let Some(ctx) = self.ctx.as_ref() else {
                    return;
                };
                let outcome =
                    interaction::select(&self.controllers, hand, &mut self.world, ctx, &self.config);
                // The switch runs after the select handler has returned.
                if let UseOutcome::SwitchMode(mode) = outcome {
                    self.request_mode(mode);
                }
            }
        }
    }

    fn load_level(&mut self, mode: Mode) -> Result<(), LevelError> {
        self.mode = mode;
        match level::build_level(&mut self.world, mode, &mut self.assets) {
            Ok(ctx) => {
                self.ctx = Some(ctx);
                self.spawner = TargetSpawner::new(LevelParams::for_mode(mode));
                self.time = FrameTime::default();
                self.running = true;
                log::info!("{mode} level running");
                Ok(())
            }
            Err(err) => {
                self.ctx = None;
                self.running = false;
                log::error!("failed to build {mode} level: {err}");
                Err(err)
            }
        }
    }

    fn teardown_level(&mut self) {
        self.running = false;
        self.ctx = None;
        self.world.teardown();
        self.controllers.reset();
        self.flush_releases();
    }

    fn flush_releases(&mut self) {
        for handle in self.world.drain_released() {
            self.backend.release(handle);
        }
    }
}
