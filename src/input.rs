//! Pointer drag and resize input.
//!
//! Host event handlers never touch loop state directly. They push an
//! `InputEvent` onto the shared `EventQueue`, and the render loop drains it
//! at the start of every tick.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

/// Lowest pitch: looking straight down.
pub const PITCH_MIN: f64 = -FRAC_PI_2;

/// Highest pitch: a shallow lean back past level.
pub const PITCH_MAX: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at client coordinates.
    Press { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Release,
    /// Window resized to the given size in window pixels.
    Resize { width: f64, height: f64 },
}

/// Single-threaded FIFO shared between event handlers and the render loop.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    inner: Rc<RefCell<VecDeque<InputEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: InputEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    pub fn drain(&self) -> Vec<InputEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// Accumulated scene rotation in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    /// Vertical tilt, kept within `[PITCH_MIN, PITCH_MAX]`.
    pub pitch: f64,
    /// Horizontal spin, unbounded.
    pub yaw: f64,
}

impl Rotation {
    pub fn as_uniform(&self) -> [f32; 2] {
        [self.pitch as f32, self.yaw as f32]
    }
}

/// Drag state and the rotation it drives.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    dragging: bool,
    /// Last pointer position seen while dragging, as (y, x).
    anchor: (f64, f64),
    /// Pixel delta of the most recent drag move, as (rows, columns).
    velocity: (f64, f64),
    rotation: Rotation,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn velocity(&self) -> (f64, f64) {
        self.velocity
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Applies a pointer event. Resize events are not pointer input and are
    /// ignored here.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press { x, y } => {
                self.anchor = (y, x);
                self.dragging = true;
            }
            InputEvent::Move { x, y } => {
                if self.dragging {
                    self.velocity = (y - self.anchor.0, x - self.anchor.1);
                    self.anchor = (y, x);
                }
            }
            InputEvent::Release => {
                self.velocity = (0.0, 0.0);
                self.dragging = false;
            }
            InputEvent::Resize { .. } => {}
        }
    }

    /// Advances the rotation by the current velocity over `dt` seconds.
    ///
    /// The velocity persists until release, so holding the pointer still
    /// after a drag keeps the scene turning at the last drag speed.
    pub fn integrate(&mut self, dt: f64) -> Rotation {
        let pitch = self.rotation.pitch - self.velocity.0 * dt;
        self.rotation.pitch = pitch.clamp(PITCH_MIN, PITCH_MAX);
        self.rotation.yaw -= self.velocity.1 * dt;
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(state: &mut InputState, from: (f64, f64), to: (f64, f64)) {
        state.apply(InputEvent::Press { x: from.0, y: from.1 });
        state.apply(InputEvent::Move { x: to.0, y: to.1 });
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut state = InputState::new();
        state.apply(InputEvent::Move { x: 50.0, y: 50.0 });
        assert_eq!(state.velocity(), (0.0, 0.0));
        assert!(!state.is_dragging());
    }

    #[test]
    fn move_while_dragging_records_delta_and_reanchors() {
        let mut state = InputState::new();
        drag(&mut state, (10.0, 20.0), (13.0, 24.0));
        assert_eq!(state.velocity(), (4.0, 3.0));

        state.apply(InputEvent::Move { x: 13.0, y: 30.0 });
        assert_eq!(state.velocity(), (6.0, 0.0));
    }

    #[test]
    fn release_zeroes_velocity() {
        let mut state = InputState::new();
        drag(&mut state, (0.0, 0.0), (5.0, 5.0));
        state.apply(InputEvent::Release);
        assert_eq!(state.velocity(), (0.0, 0.0));
        assert!(!state.is_dragging());

        let before = state.rotation();
        assert_eq!(state.integrate(0.5), before);
    }

    #[test]
    fn pitch_is_clamped_in_both_directions() {
        let mut state = InputState::new();
        // Dragging down turns pitch negative.
        drag(&mut state, (0.0, 0.0), (0.0, 10_000.0));
        for _ in 0..100 {
            let r = state.integrate(0.1);
            assert!(r.pitch >= PITCH_MIN && r.pitch <= PITCH_MAX);
        }
        assert_eq!(state.rotation().pitch, PITCH_MIN);

        state.apply(InputEvent::Release);
        drag(&mut state, (0.0, 10_000.0), (0.0, 0.0));
        for _ in 0..100 {
            let r = state.integrate(0.1);
            assert!(r.pitch >= PITCH_MIN && r.pitch <= PITCH_MAX);
        }
        assert_eq!(state.rotation().pitch, PITCH_MAX);
    }

    #[test]
    fn yaw_accumulates_without_bound() {
        let mut state = InputState::new();
        drag(&mut state, (0.0, 0.0), (100.0, 0.0));
        let dts = [0.016, 0.02, 0.5, 1.0, 3.0];
        for dt in dts {
            state.integrate(dt);
        }
        let expected = -100.0 * dts.iter().sum::<f64>();
        assert!((state.rotation().yaw - expected).abs() < 1e-9);
        assert!(state.rotation().yaw < -2.0 * std::f64::consts::PI);
    }

    #[test]
    fn resize_does_not_touch_drag_state() {
        let mut state = InputState::new();
        drag(&mut state, (0.0, 0.0), (2.0, 1.0));
        state.apply(InputEvent::Resize { width: 10.0, height: 10.0 });
        assert_eq!(state.velocity(), (1.0, 2.0));
        assert!(state.is_dragging());
    }

    #[test]
    fn queue_drains_in_arrival_order() {
        let queue = EventQueue::new();
        let producer = queue.clone();
        producer.push(InputEvent::Press { x: 1.0, y: 2.0 });
        producer.push(InputEvent::Release);
        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.drain(),
            vec![InputEvent::Press { x: 1.0, y: 2.0 }, InputEvent::Release]
        );
        assert!(queue.is_empty());
    }
}
