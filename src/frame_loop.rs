//! The per-frame state machine.
//!
//! `RenderLoop` owns everything that changes between frames. Drawing and
//! metric display sit behind the `Renderer` and `MetricsSink` traits, time
//! behind `Clock`, and re-arming behind `FrameScheduler`, so the whole cycle
//! can be stepped deterministically off the browser.

use crate::clock::{Clock, FrameClock};
use crate::config::CanvasConfig;
use crate::error::Result;
use crate::input::{EventQueue, InputEvent, InputState, Rotation};
use crate::scheduler::FrameScheduler;

pub const FPS_LABEL_INITIAL: &str = "00FPS";
pub const FRAME_COST_LABEL_INITIAL: &str = "000MS";

pub fn fps_label(fps: u32) -> String {
    format!("{fps}FPS")
}

pub fn frame_cost_label(ms: u32) -> String {
    format!("{ms}MS")
}

/// Values uploaded before each draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Surface size in device pixels.
    pub resolution: [f32; 2],
    pub time: f32,
    pub time_delta: f32,
    /// `[pitch, yaw]` in radians.
    pub rotation: [f32; 2],
}

/// Owns the drawing surface and the compiled program.
pub trait Renderer {
    /// Resizes the surface and its viewport.
    fn resize(&mut self, width: u32, height: u32);

    /// Uploads `uniforms`, clears, and draws the quad.
    fn draw(&mut self, uniforms: &FrameUniforms);
}

/// Receives the periodic performance counters.
pub trait MetricsSink {
    fn publish_fps(&mut self, fps: u32);
    fn publish_frame_cost(&mut self, ms: u32);
}

pub struct RenderLoop<R, M, C> {
    renderer: R,
    metrics: M,
    clock: C,
    frame_clock: FrameClock,
    input: InputState,
    events: EventQueue,
    config: CanvasConfig,
    surface: (u32, u32),
}

impl<R, M, C> RenderLoop<R, M, C>
where
    R: Renderer,
    M: MetricsSink,
    C: Clock,
{
    /// Sizes the surface for a `window_size` window and seeds the frame
    /// clock, so the first tick measures time since construction.
    pub fn new(
        mut renderer: R,
        metrics: M,
        clock: C,
        events: EventQueue,
        config: CanvasConfig,
        window_size: (f64, f64),
    ) -> Self {
        let surface = config.surface_size(window_size.0, window_size.1);
        renderer.resize(surface.0, surface.1);
        let frame_clock = FrameClock::new(clock.now_ms());

        Self {
            renderer,
            metrics,
            clock,
            frame_clock,
            input: InputState::new(),
            events,
            config,
            surface,
        }
    }

    pub fn surface_size(&self) -> (u32, u32) {
        self.surface
    }

    pub fn rotation(&self) -> Rotation {
        self.input.rotation()
    }

    pub fn time(&self) -> f64 {
        self.frame_clock.time()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Runs one frame and asks `scheduler` for the next.
    pub fn tick<S>(&mut self, scheduler: &S) -> Result<FrameUniforms>
    where
        S: FrameScheduler + ?Sized,
    {
        for event in self.events.drain() {
            self.handle_event(event);
        }

        let timing = self.frame_clock.advance(self.clock.now_ms());
        if let Some(fps) = timing.fps {
            log::debug!("fps {fps}");
            self.metrics.publish_fps(fps);
        }
        if let Some(ms) = timing.frame_cost_ms {
            log::debug!("frame cost {ms}ms");
            self.metrics.publish_frame_cost(ms);
        }

        let rotation = self.input.integrate(timing.dt);

        let uniforms = FrameUniforms {
            resolution: [self.surface.0 as f32, self.surface.1 as f32],
            time: timing.time as f32,
            time_delta: timing.dt as f32,
            rotation: rotation.as_uniform(),
        };
        self.renderer.draw(&uniforms);

        scheduler.request_frame()?;
        Ok(uniforms)
    }

    fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resize { width, height } => {
                let (w, h) = self.config.surface_size(width, height);
                if (w, h) != self.surface {
                    log::debug!("surface resized to {w}x{h}");
                }
                self.surface = (w, h);
                self.renderer.resize(w, h);
            }
            pointer => self.input.apply(pointer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_carry_their_suffix() {
        assert_eq!(fps_label(60), "60FPS");
        assert_eq!(frame_cost_label(5), "5MS");
        assert!(FPS_LABEL_INITIAL.ends_with("FPS"));
        assert!(FRAME_COST_LABEL_INITIAL.ends_with("MS"));
    }
}
