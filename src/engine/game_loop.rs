// Fixed-timestep loop timing
//
// The host reports how long each frame took; the loop turns that into a
// whole number of fixed simulation steps. No wall clock is read, so the same
// code runs natively and in the browser.

use std::collections::VecDeque;
use std::time::Duration;

/// Simulation rate in steps per second
pub const STEPS_PER_SECOND: u32 = 60;
/// Length of one simulation step in seconds
pub const FIXED_TIMESTEP: f32 = 1.0 / STEPS_PER_SECOND as f32;
const STEP: Duration = Duration::from_nanos(1_000_000_000 / STEPS_PER_SECOND as u64);

/// Most steps a single frame may run; anything beyond is dropped
pub const MAX_PHYSICS_STEPS: u32 = 5;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;
/// Frames between FPS refreshes
const FPS_REFRESH: u64 = 10;

/// Host deltas arrive as float milliseconds. Anything that is not a finite
/// positive number counts as no time at all; deltas too large for a
/// `Duration` saturate.
pub fn duration_from_millis(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

pub struct GameLoop {
    /// Time owed to the simulation, always below one step after `advance`
    accumulator: Duration,
    elapsed: Duration,
    paused: bool,
    recent_frames: VecDeque<Duration>,
    frame_count: u64,
    update_count: u64,
    fps: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            elapsed: Duration::ZERO,
            paused: false,
            recent_frames: VecDeque::with_capacity(FPS_WINDOW + 1),
            frame_count: 0,
            update_count: 0,
            fps: 0.0,
        }
    }

    /// Account for a frame that took `frame_time` and return how many fixed
    /// steps the caller should run now
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;
        self.elapsed = self.elapsed.saturating_add(frame_time);
        self.track_frame(frame_time);

        if self.paused {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(frame_time);
        let owed =
            u32::try_from(self.accumulator.as_nanos() / STEP.as_nanos()).unwrap_or(u32::MAX);
        let steps = owed.min(MAX_PHYSICS_STEPS);

        if owed > MAX_PHYSICS_STEPS {
            log::debug!("Dropping {} simulation steps", owed - steps);
            self.accumulator = Duration::ZERO;
        } else {
            self.accumulator -= STEP * steps;
        }

        self.update_count += u64::from(steps);
        steps
    }

    fn track_frame(&mut self, frame_time: Duration) {
        self.recent_frames.push_back(frame_time);
        if self.recent_frames.len() > FPS_WINDOW {
            self.recent_frames.pop_front();
        }

        if self.frame_count % FPS_REFRESH == 0 {
            let total = self
                .recent_frames
                .iter()
                .fold(Duration::ZERO, |sum, frame| sum.saturating_add(*frame));
            let average = total.as_secs_f32() / self.recent_frames.len() as f32;
            self.fps = if average > 0.0 { 1.0 / average } else { 0.0 };
        }
    }

    /// Fraction of a step left in the accumulator, for interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FIXED_TIMESTEP
    }

    /// Average frames per second, refreshed every few frames
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Sum of every frame time reported so far, paused or not
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop handing out steps. Frames are still counted.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Hand out steps again, starting from an empty accumulator
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.accumulator = Duration::ZERO;
            log::info!("Simulation resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
