//! Frame timing: where "now" comes from, and what each tick does with it.

use std::cell::Cell;
use std::rc::Rc;

/// Length of the FPS averaging window, in seconds.
pub const FPS_WINDOW_SECS: f64 = 1.0;

/// Number of ticks the frame cost is averaged over.
pub const COST_WINDOW_TICKS: u32 = 10;

/// Wall clock in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// What one tick of the clock produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Seconds since the previous tick.
    pub dt: f64,
    /// Seconds accumulated over every tick so far.
    pub time: f64,
    /// Set when the FPS window closed on this tick.
    pub fps: Option<u32>,
    /// Set when the cost window closed on this tick, in milliseconds.
    pub frame_cost_ms: Option<u32>,
}

/// Per-frame time state owned by the render loop.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: f64,
    time: f64,

    fps_frames: u32,
    fps_elapsed: f64,

    cost_ticks: u32,
    cost_start_ms: f64,
}

impl FrameClock {
    /// `now_ms` seeds the previous-frame timestamp so the first `dt` is the
    /// time since construction.
    pub fn new(now_ms: f64) -> Self {
        Self {
            last_ms: now_ms,
            time: 0.0,
            fps_frames: 0,
            fps_elapsed: 0.0,
            cost_ticks: 0,
            cost_start_ms: 0.0,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn advance(&mut self, now_ms: f64) -> FrameTiming {
        let dt = (now_ms - self.last_ms) / 1000.0;
        self.last_ms = now_ms;

        self.fps_frames += 1;
        self.fps_elapsed += dt;
        let fps = if self.fps_elapsed >= FPS_WINDOW_SECS {
            let fps = (f64::from(self.fps_frames) / self.fps_elapsed).round() as u32;
            self.fps_frames = 0;
            self.fps_elapsed = 0.0;
            Some(fps)
        } else {
            None
        };

        // 0 opens the window, 1..=9 count, 10 closes it on the following tick.
        let frame_cost_ms = if self.cost_ticks >= COST_WINDOW_TICKS {
            let cost = ((now_ms - self.cost_start_ms) / f64::from(self.cost_ticks)).round();
            self.cost_ticks = 0;
            Some(cost.max(0.0) as u32)
        } else {
            if self.cost_ticks == 0 {
                self.cost_start_ms = now_ms;
            }
            self.cost_ticks += 1;
            None
        };

        self.time += dt;

        FrameTiming {
            dt,
            time: self.time,
            fps,
            frame_cost_ms,
        }
    }
}
