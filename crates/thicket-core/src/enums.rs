//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModeParseError;

/// Level mode. Each mode has its own scene, target kind and props.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Day,
    #[default]
    Night,
}

impl Mode {
    /// Identifier carried by UI buttons and the mode-switch command.
    pub fn identifier(self) -> &'static str {
        match self {
            Mode::Day => "day",
            Mode::Night => "night",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Day => Mode::Night,
            Mode::Night => Mode::Day,
        }
    }

    pub fn target_kind(self) -> TargetKind {
        match self {
            Mode::Day => TargetKind::Bird,
            Mode::Night => TargetKind::Rabbit,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for Mode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Mode::Day),
            "night" => Ok(Mode::Night),
            other => Err(ModeParseError(other.to_string())),
        }
    }
}

/// Tracked hand controller. Index 0 is the left hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const ALL: [Hand; 2] = [Hand::Left, Hand::Right];

    pub fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }
}

/// What primary-use does with a held object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    #[default]
    None,
    Weapon,
    LightSource,
}

/// The three grab candidates a level can offer, in grab priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrabbableKind {
    Weapon,
    LightSource,
    Prop,
}

impl GrabbableKind {
    pub const PRIORITY: [GrabbableKind; 3] = [
        GrabbableKind::Weapon,
        GrabbableKind::LightSource,
        GrabbableKind::Prop,
    ];

    pub fn capability(self) -> Capability {
        match self {
            GrabbableKind::Weapon => Capability::Weapon,
            GrabbableKind::LightSource => Capability::LightSource,
            GrabbableKind::Prop => Capability::None,
        }
    }
}

/// Mobile target archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// Flies toward the player at a fixed per-frame velocity.
    Bird,
    /// Runs across the ground toward a point near the origin.
    Rabbit,
}
