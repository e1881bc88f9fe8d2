//! Entry points for driving a running session from outside the loop.
//!
//! They bridge callers to the frame-loop thread via the channel held in
//! `AppState`.

use std::thread::JoinHandle;

use thicket_core::commands::SessionCommand;
use thicket_core::state::FrameSnapshot;
use thicket_sim::backend::{AssetLoader, SceneBackend};
use thicket_sim::Session;

use crate::game_loop;
use crate::state::{AppError, AppState, LoopCommand};

/// Start the frame loop for `session`, unless one is already running.
pub fn start_session<B, A>(
    state: &AppState,
    session: Session<B, A>,
    target_hz: u32,
) -> Result<JoinHandle<Session<B, A>>, AppError>
where
    B: SceneBackend + Send + 'static,
    A: AssetLoader + Send + 'static,
{
    let mut running = state.running.lock().map_err(|_| AppError::Poisoned)?;
    if *running {
        return Err(AppError::AlreadyRunning);
    }

    let (cmd_tx, handle) =
        game_loop::spawn_frame_loop(session, target_hz, state.latest_snapshot.clone())?;

    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    *tx_lock = Some(cmd_tx);
    *running = true;

    Ok(handle)
}

/// Forward a command to the running session.
pub fn send_command(state: &AppState, command: SessionCommand) -> Result<(), AppError> {
    let tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(LoopCommand::Session(command))
            .map_err(|_| AppError::Disconnected),
        None => Err(AppError::NotStarted),
    }
}

/// Latest published snapshot, if any frame has run yet.
pub fn get_snapshot(state: &AppState) -> Result<Option<FrameSnapshot>, AppError> {
    let lock = state.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
    Ok(lock.clone())
}

/// Ask the frame loop to stop. The thread tears the level down and
/// exits after its current frame.
pub fn stop_session(state: &AppState) -> Result<(), AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::Poisoned)?;
    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    let tx = tx_lock.take().ok_or(AppError::NotStarted)?;
    *running = false;
    // A loop that already exited has nothing left to stop.
    let _ = tx.send(LoopCommand::Shutdown);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use thicket_core::config::SimConfig;
    use thicket_core::enums::Mode;
    use thicket_sim::backend::{HeadlessBackend, PreloadedAssets};

    fn session() -> Session<HeadlessBackend, PreloadedAssets> {
        let config = SimConfig {
            initial_mode: Mode::Day,
            ..SimConfig::seeded(6)
        };
        let mut session = Session::new(config, HeadlessBackend::default(), PreloadedAssets);
        session.start().unwrap();
        session
    }

    #[test]
    fn test_commands_before_start_are_rejected() {
        let state = AppState::new();
        assert!(matches!(
            send_command(&state, SessionCommand::ToggleMode),
            Err(AppError::NotStarted)
        ));
        assert!(matches!(stop_session(&state), Err(AppError::NotStarted)));
        assert!(get_snapshot(&state).unwrap().is_none());
    }

    #[test]
    fn test_start_send_stop() {
        let state = AppState::new();
        let handle = start_session(&state, session(), 240).unwrap();
        assert!(matches!(
            start_session(&state, session(), 240),
            Err(AppError::AlreadyRunning)
        ));

        send_command(&state, SessionCommand::SetMode { mode: Mode::Night }).unwrap();
        let deadline = Instant::now() + Duration::from_secs(2);
        let mut switched = false;
        while Instant::now() < deadline && !switched {
            switched = get_snapshot(&state)
                .unwrap()
                .is_some_and(|snap| snap.mode == Mode::Night);
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(switched, "mode switch never reached a snapshot");

        stop_session(&state).unwrap();
        let session = handle.join().unwrap();
        assert!(!session.is_running());
        assert!(!*state.running.lock().unwrap());
    }
}
