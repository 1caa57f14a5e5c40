#![forbid(unsafe_code)]

//! Real-time playback driver.
//!
//! The engine itself is a passive state machine; this module gives it a
//! heartbeat. [`EngineDriver::spawn`] moves the engine onto a dedicated
//! thread that ticks at a fixed frame cadence and hands each painted
//! surface to a present callback. Input changes arrive over a channel, so
//! every mutation — input application, cycle swaps, frame rendering —
//! happens on the one thread that owns the engine. No locks.
//!
//! A queued input change is always fully applied (grid and sweep reset)
//! before the next frame renders; the channel wait doubles as the frame
//! timer, so neither path can interleave partially with the other.
//!
//! [`DriverHandle::stop`] cancels the loop and joins the thread; dropping
//! the handle cancels without joining.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use glyphsweep_render::Surface;
use tracing::debug;

use crate::engine::{DecodeEngine, EngineInput};

enum Command {
    Update(EngineInput),
    Stop,
}

/// Spawns driver threads. See [`EngineDriver::spawn`].
pub struct EngineDriver;

/// Control handle for a running driver thread.
pub struct DriverHandle {
    tx: mpsc::Sender<Command>,
    thread: Option<thread::JoinHandle<()>>,
}

impl EngineDriver {
    /// Move `engine` onto a background thread ticking every
    /// `frame_interval`, calling `present` with the freshly painted surface
    /// after each tick.
    pub fn spawn(
        mut engine: DecodeEngine,
        frame_interval: Duration,
        mut present: impl FnMut(&Surface) + Send + 'static,
    ) -> DriverHandle {
        let (tx, rx) = mpsc::channel::<Command>();
        let thread = thread::spawn(move || {
            debug!(?frame_interval, "driver started");
            let mut last = Instant::now();
            let mut frames: u64 = 0;
            loop {
                match rx.recv_timeout(frame_interval) {
                    Ok(Command::Update(input)) => {
                        engine.on_input_changed(&input);
                        // Collapse any backlog so only the newest input
                        // pays for a full sweep reset.
                        loop {
                            match rx.try_recv() {
                                Ok(Command::Update(input)) => engine.on_input_changed(&input),
                                Ok(Command::Stop) | Err(mpsc::TryRecvError::Disconnected) => {
                                    debug!(frames, "driver stopped");
                                    return;
                                }
                                Err(mpsc::TryRecvError::Empty) => break,
                            }
                        }
                    }
                    Ok(Command::Stop) | Err(RecvTimeoutError::Disconnected) => {
                        debug!(frames, "driver stopped");
                        return;
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                }

                let now = Instant::now();
                engine.tick(now.duration_since(last));
                last = now;
                frames += 1;
                present(engine.surface());
            }
        });
        DriverHandle {
            tx,
            thread: Some(thread),
        }
    }
}

impl DriverHandle {
    /// Queue an input change. Applied on the driver thread before its next
    /// frame. Ignored if the driver has already stopped.
    pub fn update(&self, input: EngineInput) {
        let _ = self.tx.send(Command::Update(input));
    }

    /// Stop the driver and join its thread.
    pub fn stop(mut self) {
        let _ = self.tx.send(Command::Stop);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        // Cancel without joining; stop() is the blocking path.
        let _ = self.tx.send(Command::Stop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Phase;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn small_engine() -> DecodeEngine {
        use crate::engine::EngineConfig;
        DecodeEngine::with_seed(180, 140, EngineConfig::default(), 7)
    }

    #[test]
    fn driver_presents_frames_until_stopped() {
        let frames = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&frames);
        let handle = EngineDriver::spawn(small_engine(), Duration::from_millis(2), move |s| {
            assert_eq!(s.width(), 180);
            counter.fetch_add(1, Ordering::SeqCst);
        });
        thread::sleep(Duration::from_millis(60));
        handle.stop();
        let seen = frames.load(Ordering::SeqCst);
        assert!(seen > 0, "expected frames, saw {seen}");
        // Stopped: the count settles.
        thread::sleep(Duration::from_millis(20));
        assert_eq!(frames.load(Ordering::SeqCst), seen);
    }

    #[test]
    fn updates_are_applied_between_frames() {
        let frames = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&frames);
        let handle = EngineDriver::spawn(small_engine(), Duration::from_millis(2), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        handle.update(EngineInput {
            phase: Phase::Extracting,
            ..Default::default()
        });
        thread::sleep(Duration::from_millis(40));
        handle.stop();
        assert!(frames.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn drop_cancels_without_blocking() {
        let handle = EngineDriver::spawn(small_engine(), Duration::from_millis(2), |_| {});
        drop(handle);
        // Nothing to assert beyond "this returns promptly".
    }
}
