//! Per-frame systems operating on the `SimulationWorld`.
//!
//! Systems are plain functions over `&mut SimulationWorld`. They own no
//! state beyond what is passed in; everything else lives in components.

pub mod fragments;
pub mod locomotion;
pub mod population;
pub mod projectiles;
pub mod snapshot;
pub mod targets;
