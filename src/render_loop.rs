//! The per-frame driver.
//!
//! Each tick advances the camera controls, draws whatever point cloud the
//! scene currently holds and asks the host for the next frame. The loop
//! never waits on regeneration: a swap runs between ticks on the same
//! thread, so a tick sees either the old cloud or the new one.
//!
//! ```text
//!   start()          tick()            schedule
//! Idle ------> Scheduled ------> Idle ---------> Scheduled ...
//!                  |
//!                  +-- fatal frame error / shutdown() --> Terminated
//! ```

use crate::error::FrameError;
use crate::time::FrameClock;

/// Host primitive that delivers the next frame (e.g. a redraw request).
pub trait FrameScheduler {
    fn schedule_frame(&mut self);
}

/// Interactive camera state advanced once per frame.
pub trait CameraControls {
    fn update(&mut self);
}

/// Draws one frame from the camera `C`.
pub trait FrameRenderer<C> {
    fn render_frame(&mut self, camera: &C) -> Result<(), FrameError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No frame requested.
    Idle,
    /// A frame has been requested from the host.
    Scheduled,
    /// The loop has stopped for good.
    Terminated,
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A frame was presented.
    Rendered,
    /// No frame was presented this tick, but the loop continues.
    Dropped(FrameError),
    /// The loop terminated; the host should shut down.
    Exit,
}

/// Self-rescheduling frame loop.
pub struct RenderLoop {
    state: LoopState,
    clock: FrameClock,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            clock: FrameClock::new(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Request the first frame.
    pub fn start<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        if self.state == LoopState::Idle {
            self.schedule(scheduler);
        }
    }

    /// Run one frame: update controls, render, schedule the next frame.
    ///
    /// A tick while idle (an unrequested redraw from the host) is handled
    /// the same way. Once terminated, ticks do nothing.
    pub fn tick<C, R, S>(
        &mut self,
        controls: &mut C,
        renderer: &mut R,
        scheduler: &mut S,
    ) -> TickOutcome
    where
        C: CameraControls,
        R: FrameRenderer<C>,
        S: FrameScheduler,
    {
        if self.state == LoopState::Terminated {
            return TickOutcome::Exit;
        }
        self.state = LoopState::Idle;
        self.clock.tick();

        controls.update();
        let outcome = match renderer.render_frame(controls) {
            Ok(()) => TickOutcome::Rendered,
            Err(FrameError::Fatal(msg)) => {
                log::error!("render loop stopping: {}", msg);
                self.state = LoopState::Terminated;
                return TickOutcome::Exit;
            }
            Err(e) => {
                log::warn!("{}", e);
                TickOutcome::Dropped(e)
            }
        };

        self.schedule(scheduler);
        outcome
    }

    /// Stop the loop. Further ticks are ignored.
    pub fn shutdown(&mut self) {
        self.state = LoopState::Terminated;
    }

    fn schedule<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        scheduler.schedule_frame();
        self.state = LoopState::Scheduled;
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}
