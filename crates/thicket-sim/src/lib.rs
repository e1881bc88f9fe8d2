//! Simulation engine for THICKET.
//!
//! Owns the hecs world for the loaded level, runs the per-frame systems
//! in a fixed order, mediates the two hand controllers and produces
//! `FrameSnapshot`s for the renderer.

pub mod backend;
pub mod context;
pub mod engine;
pub mod interaction;
pub mod level;
pub mod systems;
pub mod world;

pub use engine::Session;
pub use thicket_core as core;
pub use world::SimulationWorld;
