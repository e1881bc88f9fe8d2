//! Boundaries to the excluded collaborators: asset loading and the
//! renderer.

use thicket_core::components::RenderHandle;
use thicket_core::error::LevelError;
use thicket_core::state::FrameSnapshot;

/// Model or texture a level needs before it can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetRef {
    Model(&'static str),
    Texture(&'static str),
}

impl AssetRef {
    pub fn path(&self) -> &'static str {
        match self {
            AssetRef::Model(path) | AssetRef::Texture(path) => path,
        }
    }
}

pub trait AssetLoader {
    fn load(&mut self, asset: &AssetRef) -> Result<(), LevelError>;
}

/// Loader for assets that are already resident.
#[derive(Debug, Default)]
pub struct PreloadedAssets;

impl AssetLoader for PreloadedAssets {
    fn load(&mut self, _asset: &AssetRef) -> Result<(), LevelError> {
        Ok(())
    }
}

pub trait SceneBackend {
    /// Render step of the frame tick.
    fn present(&mut self, snapshot: &FrameSnapshot);
    /// Free renderer-side geometry/material. Called once per handle.
    fn release(&mut self, handle: RenderHandle);
}

/// Backend without a display; keeps counters for diagnostics.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    pub frames_presented: u64,
    pub handles_released: u64,
}

impl SceneBackend for HeadlessBackend {
    fn present(&mut self, snapshot: &FrameSnapshot) {
        self.frames_presented += 1;
        log::trace!(
            "frame {}: {} targets, {} projectiles, {} fragments",
            snapshot.time.frame,
            snapshot.targets.len(),
            snapshot.projectiles.len(),
            snapshot.fragments.len()
        );
    }

    fn release(&mut self, _handle: RenderHandle) {
        self.handles_released += 1;
    }
}
