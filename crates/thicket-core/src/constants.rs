//! Simulation constants and tuning parameters.
//!
//! Per-frame quantities are applied once per rendered frame, not scaled
//! by delta time. Rabbit speed is the exception (units per second).

use std::f32::consts::PI;

use glam::Vec3;

// --- Frame pacing ---

/// Frame rate of the headless frame driver (typical headset refresh).
pub const FRAME_RATE: u32 = 72;

// --- Controllers ---

/// Radius of the grab sphere around a controller.
pub const GRAB_DISTANCE: f32 = 0.25;

/// Player translation per frame at full stick deflection.
pub const MOVE_SPEED: f32 = 0.05;

/// Maximum distance a UI pointing ray is tested.
pub const POINTER_RANGE: f32 = 20.0;

// --- Player rig ---

/// Camera offset inside the player rig.
pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 1.6, 3.0);

// --- Projectiles ---

/// Projectile displacement per frame.
pub const PROJECTILE_SPEED: f32 = 0.6;

// --- Fragments ---

/// Fragments emitted per destroyed target.
pub const FRAGMENT_BURST: usize = 20;

/// Downward velocity change per frame.
pub const FRAGMENT_GRAVITY: f32 = 0.006;

/// Lateral velocity range is ±spread/2; vertical is [0, spread).
pub const FRAGMENT_SPREAD: f32 = 0.15;

// --- Population caps (0 disables a cap) ---

pub const MAX_TARGETS: usize = 64;
pub const MAX_PROJECTILES: usize = 256;
pub const MAX_FRAGMENTS: usize = 2000;

// --- Birds (day) ---

pub const BIRD_SPAWN_INTERVAL_MS: f64 = 3000.0;
/// Forward (+Z) speed per frame.
pub const BIRD_SPEED: f32 = 0.2;
pub const BIRD_SPAWN_Z: f32 = -20.0;
pub const BIRD_SPAWN_WIDTH: f32 = 6.0;
pub const BIRD_HEIGHT_MIN: f32 = 3.0;
pub const BIRD_HEIGHT_MAX: f32 = 5.0;
/// Total width of the random lateral drift per frame.
pub const BIRD_DRIFT: f32 = 0.01;
pub const BIRD_HITBOX_RADIUS: f32 = 0.6;
pub const BIRD_HITBOX_OFFSET: Vec3 = Vec3::new(0.0, 0.4, 0.0);
pub const BIRD_ANIMATION_CLIP: usize = 0;

// --- Rabbits (night) ---

pub const RABBIT_SPAWN_INTERVAL_MS: f64 = 1000.0;
/// Units per second.
pub const RABBIT_SPEED: f32 = 5.0;
pub const RABBIT_MIN_DISTANCE: f32 = 10.0;
pub const RABBIT_MAX_DISTANCE: f32 = 20.0;
pub const RABBIT_TARGET_RADIUS: f32 = 4.0;
pub const RABBIT_HITBOX_RADIUS: f32 = 0.52;
pub const RABBIT_HITBOX_OFFSET: Vec3 = Vec3::new(0.0, 0.3, 0.0);
pub const RABBIT_ANIMATION_CLIP: usize = 2;

// --- Grabbables ---

pub const WEAPON_POSITION: Vec3 = Vec3::new(0.0, 0.85, -1.0);
pub const WEAPON_YAW: f32 = PI * 2.5;
pub const WEAPON_GRIP_OFFSET: Vec3 = Vec3::new(0.0, -0.05, -0.3);

pub const FLASHLIGHT_POSITION: Vec3 = Vec3::new(-0.5, 0.85, -1.0);
pub const FLASHLIGHT_YAW: f32 = PI * 1.5;
pub const FLASHLIGHT_GRIP_OFFSET: Vec3 = Vec3::new(0.0, -0.05, -0.25);

pub const DAY_CAN_POSITION: Vec3 = Vec3::new(0.5, 1.05, -1.0);
pub const NIGHT_CAN_POSITION: Vec3 = Vec3::new(0.5, 1.1, -1.0);
pub const CAN_GRIP_OFFSET: Vec3 = Vec3::new(0.05, -0.05, -0.25);

// --- Day/night panel ---

pub const PANEL_POSITION: Vec3 = Vec3::new(0.0, 1.15, -1.55);
/// Panel yaw; the buttons face the player.
pub const PANEL_YAW: f32 = PI;
pub const PANEL_DAY_BUTTON: Vec3 = Vec3::new(-0.3, 0.15, -0.1);
pub const PANEL_NIGHT_BUTTON: Vec3 = Vec3::new(0.3, 0.15, -0.1);
pub const PANEL_BUTTON_RADIUS: f32 = 0.15;
