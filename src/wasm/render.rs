use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, EventTarget, MouseEvent, Window};

use super::context::{acquire_context, compile_program, GlRenderer};
use super::overlay::{build_page, Overlay};
use crate::clock::Clock;
use crate::config::CanvasConfig;
use crate::error::{CanvasError, Result};
use crate::frame_loop::RenderLoop;
use crate::input::{EventQueue, InputEvent};
use crate::scheduler::FrameScheduler;

/// `Date.now()` in milliseconds.
struct DateClock;

impl Clock for DateClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Re-arms the loop through `requestAnimationFrame`.
///
/// `callback` holds the animation-frame closure so that it can keep asking
/// for itself. It sits in an `Option` so the closure can be created first and
/// then stored where the scheduler it captures can reach it.
#[derive(Clone)]
struct AnimationFrameScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self) -> Result<()> {
        let callback = self.callback.borrow();
        let callback = callback
            .as_ref()
            .ok_or_else(|| CanvasError::Dom("animation frame callback not installed".to_string()))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())?;
        Ok(())
    }
}

fn window_size(window: &Window) -> Result<(f64, f64)> {
    let width = window.inner_width()?.as_f64();
    let height = window.inner_height()?.as_f64();
    match (width, height) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(CanvasError::Dom("window size is not a number".to_string())),
    }
}

fn shader_source(document: &Document, id: &str) -> Result<String> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.text_content())
        .ok_or_else(|| CanvasError::Dom(format!("shader element #{id} not found")))
}

fn on_mouse(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(MouseEvent) + 'static,
) -> Result<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Forwards pointer and resize events into `events`.
fn register_listeners(window: &Window, document: &Document, events: &EventQueue) -> Result<()> {
    let queue = events.clone();
    on_mouse(document, "mousedown", move |event| {
        queue.push(InputEvent::Press {
            x: f64::from(event.client_x()),
            y: f64::from(event.client_y()),
        });
    })?;

    let queue = events.clone();
    on_mouse(document, "mousemove", move |event| {
        queue.push(InputEvent::Move {
            x: f64::from(event.client_x()),
            y: f64::from(event.client_y()),
        });
    })?;

    let queue = events.clone();
    on_mouse(document, "mouseup", move |_| queue.push(InputEvent::Release))?;

    let resize_closure = {
        let window = window.clone();
        let queue = events.clone();
        Closure::wrap(Box::new(move || match window_size(&window) {
            Ok((width, height)) => queue.push(InputEvent::Resize { width, height }),
            Err(err) => log::warn!("resize: {err}"),
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    Ok(())
}

/// Builds the page, compiles the shaders and starts the render loop.
///
/// Any error is returned before the first frame is requested.
pub fn start(window: &Window, config: CanvasConfig) -> Result<()> {
    let document = window
        .document()
        .ok_or_else(|| CanvasError::Dom("no document".to_string()))?;
    let (canvas, overlay) = build_page(&document)?;

    let surface = acquire_context(&canvas)?;
    let vertex_source = shader_source(&document, &config.vertex_shader_id)?;
    let fragment_source = shader_source(&document, &config.fragment_shader_id)?;
    let program = compile_program(surface.gl(), &vertex_source, &fragment_source)?;
    let renderer = GlRenderer::new(surface, program)?;

    let events = EventQueue::new();
    register_listeners(window, &document, &events)?;

    let size = window_size(window)?;
    let mut render_loop: RenderLoop<GlRenderer, Overlay, DateClock> =
        RenderLoop::new(renderer, overlay, DateClock, events, config, size);
    let (width, height) = render_loop.surface_size();
    log::info!("render loop starting at {width}x{height}");

    let scheduler = AnimationFrameScheduler {
        window: window.clone(),
        callback: Rc::new(RefCell::new(None)),
    };
    let next = scheduler.clone();
    *scheduler.callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let Err(err) = render_loop.tick(&next) {
            log::error!("frame: {err}");
        }
    }) as Box<dyn FnMut()>));

    // Each tick requests the one after it; this requests the first.
    scheduler.request_frame()
}
