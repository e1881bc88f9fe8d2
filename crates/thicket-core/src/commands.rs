//! Input events and session commands.
//!
//! Commands are queued and processed at the next frame boundary, strictly
//! before that frame's tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Pose;

/// Events delivered by the tracked-input devices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    /// Squeeze pressed: grab when idle, drop when holding.
    Squeeze { hand: Hand },
    /// Trigger released: primary use (UI point, light toggle, fire).
    Select { hand: Hand },
    /// Controller pose relative to the player rig.
    ControllerPose { hand: Hand, pose: Pose },
    /// Two-axis thumbstick, each axis in [-1, 1].
    Thumbstick { hand: Hand, x: f32, y: f32 },
    /// Headset pose relative to the player rig.
    HeadPose { pose: Pose },
}

/// Everything that can be queued on a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    Input { event: InputEvent },
    /// Switch level; no-op if already in `mode`.
    SetMode { mode: Mode },
    /// Keyboard shortcut: switch to the other mode.
    ToggleMode,
}

impl From<InputEvent> for SessionCommand {
    fn from(event: InputEvent) -> Self {
        SessionCommand::Input { event }
    }
}
