use std::fmt;

use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, CanvasError>;

/// Which half of the program a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Everything that can stop the canvas from starting.
///
/// The first three variants are fatal and are reported to the user once;
/// `Dom` covers host API failures around them.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("WebGL2 not supported")]
    ContextUnavailable,

    #[error("{stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program: {log}")]
    ShaderLink { log: String },

    #[error("dom: {0}")]
    Dom(String),
}

impl From<JsValue> for CanvasError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(message) => CanvasError::Dom(message),
            None => CanvasError::Dom(format!("{value:?}")),
        }
    }
}

impl From<CanvasError> for JsValue {
    fn from(err: CanvasError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_the_stage() {
        let err = CanvasError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "ERROR: 0:3: 'x' : undeclared identifier".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "fragment shader: ERROR: 0:3: 'x' : undeclared identifier"
        );
    }

    #[test]
    fn context_error_matches_user_message() {
        assert_eq!(CanvasError::ContextUnavailable.to_string(), "WebGL2 not supported");
    }
}
