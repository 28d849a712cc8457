//! Fixed frame-rate pacing.

use std::time::{Duration, Instant};

use crate::RenderingError;

/// Monotonic time source the pacer measures frames with.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;

    /// Blocks the calling thread for `duration`.
    fn delay(&mut self, duration: Duration);
}

/// Wall clock backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose origin is the moment of the call.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Sleeps away whatever is left of each frame's time budget.
///
/// Frames that overrun the budget are never skipped or batched; the next
/// frame simply starts late.
#[derive(Debug)]
pub struct FramePacer<C> {
    clock: C,
    interval: Duration,
    frame_start: Duration,
}

impl<C: Clock> FramePacer<C> {
    /// Creates a pacer targeting `frame_rate` frames per second.
    pub fn new(clock: C, frame_rate: u32) -> Result<Self, RenderingError> {
        if frame_rate == 0 {
            return Err(RenderingError::ZeroFrameRate);
        }

        let frame_start = clock.now();
        Ok(Self {
            clock,
            interval: Duration::from_secs(1) / frame_rate,
            frame_start,
        })
    }

    /// Time budget of a single frame.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ends the current frame, sleeping out the remainder of its budget.
    ///
    /// Returns the full duration of the frame that just ended, including the
    /// sleep, which is the delta the next simulation step should consume.
    pub fn finish_frame(&mut self) -> Duration {
        let spent = self.clock.now().saturating_sub(self.frame_start);
        if let Some(remaining) = self.interval.checked_sub(spent) {
            if !remaining.is_zero() {
                self.clock.delay(remaining);
            }
        }

        let now = self.clock.now();
        let frame = now.saturating_sub(self.frame_start);
        self.frame_start = now;
        frame
    }
}
