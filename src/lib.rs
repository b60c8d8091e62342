//! Fullscreen WebGL2 shader canvas.
//!
//! The frame state machine and its inputs are plain Rust and build on every
//! target; everything that touches the browser lives in the `wasm` module.

pub mod clock;
pub mod config;
pub mod error;
pub mod frame_loop;
pub mod input;
pub mod scheduler;
pub mod shader;

pub use config::CanvasConfig;
pub use error::{CanvasError, ShaderStage};
pub use frame_loop::{FrameUniforms, MetricsSink, RenderLoop, Renderer};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod logging;

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    use crate::config::CanvasConfig;

    pub mod context;
    mod overlay;
    mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let search = window.location().search().unwrap_or_default();
        let config = CanvasConfig::from_query(&search);

        crate::logging::init_logging(config.log_level);
        log::info!("starting shader canvas (scale {})", config.resolution_scale);

        if let Err(err) = render::start(&window, config) {
            log::error!("{err}");
            // The alert blocks until dismissed; nothing else runs after it.
            window.alert_with_message(&err.to_string()).ok();
            return Err(err.into());
        }
        Ok(())
    }
}
