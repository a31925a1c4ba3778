//! Accumulator loop that turns wall-clock time into fixed simulation ticks.
//!
//! The simulation always advances in whole ticks of `1000 / ticks_per_second`
//! milliseconds no matter how often the host repaints. Leftover time is
//! reported as `alpha` so the renderer can draw between ticks.

pub const DEFAULT_TICKS_PER_SECOND: u32 = 20;

/// Upper bound on catch-up ticks in a single frame.
pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 20;

/// Something that can be stepped at a fixed rate.
pub trait Simulation {
    fn tick(&mut self);
    fn is_running(&self) -> bool;
}

/// Outcome of one scheduler frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameReport {
    pub ticks: u32,
    pub alpha: f32,
}

#[derive(Debug, Clone)]
pub struct FrameScheduler {
    ms_per_tick: f64,
    max_ticks_per_frame: u32,
    accumulator: f64,
    last_tick: f64,
    alpha: f32,
}

impl FrameScheduler {
    pub fn new(ticks_per_second: u32, now_ms: f64) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_second.max(1) as f64,
            max_ticks_per_frame: DEFAULT_MAX_TICKS_PER_FRAME,
            accumulator: 0.0,
            last_tick: now_ms,
            alpha: 0.0,
        }
    }

    pub fn with_max_ticks_per_frame(mut self, max: u32) -> Self {
        self.max_ticks_per_frame = max.max(1);
        self
    }

    pub fn ms_per_tick(&self) -> f64 {
        self.ms_per_tick
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Last interpolation factor handed to the renderer.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Forgets elapsed time so the next frame starts from `now_ms`.
    ///
    /// Called on resume and restart; without it the time spent paused would
    /// be replayed as a burst of ticks.
    pub fn resync(&mut self, now_ms: f64) {
        self.last_tick = now_ms;
        self.accumulator = 0.0;
    }

    /// Runs as many ticks as the elapsed time covers, then updates alpha.
    pub fn frame<S: Simulation + ?Sized>(&mut self, now_ms: f64, sim: &mut S) -> FrameReport {
        let delta = (now_ms - self.last_tick).max(0.0);
        self.last_tick = now_ms;

        if !sim.is_running() {
            // Alpha stays where it was so the paused picture does not drift.
            self.accumulator = 0.0;
            return FrameReport { ticks: 0, alpha: self.alpha };
        }

        self.accumulator += delta;
        let mut ticks = 0;
        while self.accumulator >= self.ms_per_tick {
            if ticks == self.max_ticks_per_frame {
                log::warn!(
                    "frame fell {:.0}ms behind, skipping backlog",
                    self.accumulator
                );
                self.accumulator %= self.ms_per_tick;
                break;
            }
            sim.tick();
            self.accumulator -= self.ms_per_tick;
            ticks += 1;
            if !sim.is_running() {
                self.accumulator = 0.0;
                return FrameReport { ticks, alpha: self.alpha };
            }
        }

        self.alpha = (self.accumulator / self.ms_per_tick) as f32;
        FrameReport { ticks, alpha: self.alpha }
    }
}
