//! Canvas configuration.
//!
//! Defaults reproduce the stock page: full resolution, shaders read from the
//! `vshader` / `fshader` elements, `info` logging. A page can override the
//! scale and log level from its query string, e.g. `?scale=0.5&log=debug`.

use std::str::FromStr;

/// Surface pixels per window pixel. `0.5` renders at half resolution.
pub const RESOLUTION_SCALE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub resolution_scale: f64,
    pub vertex_shader_id: String,
    pub fragment_shader_id: String,
    pub log_level: log::Level,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            resolution_scale: RESOLUTION_SCALE,
            vertex_shader_id: "vshader".to_string(),
            fragment_shader_id: "fshader".to_string(),
            log_level: log::Level::Info,
        }
    }
}

impl CanvasConfig {
    /// Applies overrides from a URL query string (with or without the `?`).
    ///
    /// Unknown keys are ignored. Invalid values are logged and the default
    /// is kept.
    pub fn from_query(search: &str) -> Self {
        let mut config = Self::default();
        let search = search.strip_prefix('?').unwrap_or(search);

        for pair in search.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "scale" => match value.parse::<f64>() {
                    Ok(scale) if scale.is_finite() && scale > 0.0 => {
                        config.resolution_scale = scale;
                    }
                    _ => log::warn!("ignoring invalid scale {value:?}"),
                },
                "log" => match log::Level::from_str(value) {
                    Ok(level) => config.log_level = level,
                    Err(_) => log::warn!("ignoring invalid log level {value:?}"),
                },
                "vshader" if !value.is_empty() => config.vertex_shader_id = value.to_string(),
                "fshader" if !value.is_empty() => config.fragment_shader_id = value.to_string(),
                _ => {}
            }
        }

        config
    }

    /// Surface size in device pixels for a window of `width` x `height`.
    ///
    /// Fractional results are truncated, matching what a canvas does when
    /// its `width`/`height` is assigned a non-integer.
    pub fn surface_size(&self, width: f64, height: f64) -> (u32, u32) {
        (
            (width * self.resolution_scale) as u32,
            (height * self.resolution_scale) as u32,
        )
    }
}
