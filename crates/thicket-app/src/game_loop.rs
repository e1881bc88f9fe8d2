//! Frame-loop thread: owns the `Session`, drains commands between frames
//! and publishes every snapshot.
//!
//! Commands only ever reach the session between two frames, so input
//! never interleaves with a tick.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use thicket_core::state::FrameSnapshot;
use thicket_sim::backend::{AssetLoader, SceneBackend};
use thicket_sim::Session;

use crate::state::LoopCommand;

/// Duration of one frame at `target_hz` (at least 1 Hz).
pub fn frame_duration(target_hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(target_hz.max(1)))
}

/// Move `session` onto a new thread and start pacing frames.
///
/// Returns the command sender and the thread handle, which yields the
/// stopped session once the loop ends.
pub fn spawn_frame_loop<B, A>(
    session: Session<B, A>,
    target_hz: u32,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<Session<B, A>>)>
where
    B: SceneBackend + Send + 'static,
    A: AssetLoader + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("thicket-frame-loop".into())
        .spawn(move || run_frame_loop(session, target_hz, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// Runs until `Shutdown` or channel disconnect.
fn run_frame_loop<B: SceneBackend, A: AssetLoader>(
    mut session: Session<B, A>,
    target_hz: u32,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
) -> Session<B, A> {
    let frame_time = frame_duration(target_hz);
    let clock = Instant::now();
    let mut next_frame_time = clock;

    log::info!("frame loop running at {target_hz} Hz");

    loop {
        // 1. Drain pending commands into the session queue
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Session(cmd)) => session.queue_command(cmd),
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    session.stop();
                    log::info!("frame loop shut down");
                    return session;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. One frame stamped with the monotonic clock
        let now_ms = clock.elapsed().as_secs_f64() * 1000.0;
        if let Some(snapshot) = session.frame(now_ms) {
            // 3. Publish for polling
            if let Ok(mut lock) = latest_snapshot.lock() {
                *lock = Some(snapshot);
            }
        }

        // 4. Sleep until the next frame
        next_frame_time += frame_time;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame_time * 2 {
            // Too far behind; reset rather than catch up
            log::debug!("frame loop fell behind; resetting schedule");
            next_frame_time = now;
        }
    }
}
