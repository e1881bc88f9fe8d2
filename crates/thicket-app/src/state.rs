//! Application state shared between callers and the frame-loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use thicket_core::commands::SessionCommand;
use thicket_core::state::FrameSnapshot;

/// Commands sent to the frame-loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// Forwarded to the session queue; handled before the next frame.
    Session(SessionCommand),
    /// Stop the session and end the thread.
    Shutdown,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("session already running")]
    AlreadyRunning,
    #[error("session not started")]
    NotStarted,
    #[error("frame loop has exited")]
    Disconnected,
    #[error("application state lock poisoned")]
    Poisoned,
    #[error("failed to spawn frame loop: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Shared application state.
///
/// The sender sits behind a `Mutex` because `mpsc::Sender` is not `Sync`.
/// The latest snapshot is shared with the frame-loop thread, which
/// overwrites it after every frame.
pub struct AppState {
    /// `None` until a session is started.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
