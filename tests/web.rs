#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use shader_canvas::shader::UniformSlot;
use shader_canvas::wasm::context::{acquire_context, compile_program, RenderSurface};
use shader_canvas::{CanvasError, ShaderStage};

wasm_bindgen_test_configure!(run_in_browser);

const VERTEX: &str = "#version 300 es
in vec2 a_vertices;
out vec2 v_uv;
void main() {
    v_uv = a_vertices * 0.5 + 0.5;
    gl_Position = vec4(a_vertices, 0.0, 1.0);
}
";

const FRAGMENT: &str = "#version 300 es
precision highp float;
uniform vec2 iResolution;
uniform float iTime;
in vec2 v_uv;
out vec4 fragColor;
void main() {
    fragColor = vec4(v_uv, sin(iTime) * 0.5 + 0.5, iResolution.x > 0.0 ? 1.0 : 0.0);
}
";

fn surface() -> RenderSurface {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    acquire_context(&canvas).expect("WebGL2 context")
}

#[wasm_bindgen_test]
fn resize_sets_surface_pixels() {
    let surface = surface();
    surface.resize(800, 600);
    assert_eq!(surface.size(), (800, 600));
}

#[wasm_bindgen_test]
fn valid_pair_links_and_resolves_used_locations() {
    let surface = surface();
    let program = compile_program(surface.gl(), VERTEX, FRAGMENT).expect("program links");

    assert!(program.vertices_location().is_some());
    assert!(program.uniform(UniformSlot::Resolution).is_some());
    assert!(program.uniform(UniformSlot::Time).is_some());
    // Not declared by this shader: unbound, not an error.
    assert!(program.uniform(UniformSlot::RotateScene).is_none());
    assert!(program.uniform(UniformSlot::Mouse).is_none());
}

#[wasm_bindgen_test]
fn invalid_fragment_reports_compile_error_then_valid_pair_succeeds() {
    let surface = surface();
    let broken = "#version 300 es
precision highp float;
out vec4 fragColor;
void main() { fragColor = undefined_value; }
";
    match compile_program(surface.gl(), VERTEX, broken) {
        Err(CanvasError::ShaderCompile { stage, log }) => {
            assert_eq!(stage, ShaderStage::Fragment);
            assert!(!log.is_empty());
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("broken fragment shader compiled"),
    }

    assert!(compile_program(surface.gl(), VERTEX, FRAGMENT).is_ok());
}

#[wasm_bindgen_test]
fn invalid_vertex_reports_vertex_stage() {
    let surface = surface();
    let broken = "#version 300 es
void main() { gl_Position = 1; }
";
    match compile_program(surface.gl(), broken, FRAGMENT) {
        Err(CanvasError::ShaderCompile { stage, .. }) => assert_eq!(stage, ShaderStage::Vertex),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("broken vertex shader compiled"),
    }
}

#[wasm_bindgen_test]
fn mismatched_varying_reports_link_error() {
    let surface = surface();
    let fragment = "#version 300 es
precision highp float;
in vec3 v_uv;
out vec4 fragColor;
void main() { fragColor = vec4(v_uv, 1.0); }
";
    match compile_program(surface.gl(), VERTEX, fragment) {
        Err(CanvasError::ShaderLink { .. }) => {}
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("mismatched varyings linked"),
    }
}
