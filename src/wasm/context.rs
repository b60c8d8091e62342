//! WebGL2 context acquisition, shader compilation and the quad geometry.

use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::error::{CanvasError, Result, ShaderStage};
use crate::frame_loop::{FrameUniforms, Renderer};
use crate::shader::{UniformSlot, ATTRIBUTE_VERTICES, QUAD_INDICES, QUAD_VERTICES};

/// A canvas and the WebGL2 context drawn into it.
pub struct RenderSurface {
    canvas: HtmlCanvasElement,
    gl: GL,
}

impl RenderSurface {
    pub fn gl(&self) -> &GL {
        &self.gl
    }

    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.gl.viewport(0, 0, width as i32, height as i32);
    }
}

/// Requests a WebGL2 context from `canvas`.
pub fn acquire_context(canvas: &HtmlCanvasElement) -> Result<RenderSurface> {
    let gl: GL = canvas
        .get_context("webgl2")
        .map_err(|_| CanvasError::ContextUnavailable)?
        .ok_or(CanvasError::ContextUnavailable)?
        .dyn_into()
        .map_err(|_| CanvasError::ContextUnavailable)?;

    Ok(RenderSurface {
        canvas: canvas.clone(),
        gl,
    })
}

/// A linked program and the locations it exposes.
///
/// Locations the shader does not use are `None`; WebGL treats uploads to a
/// null location as a no-op, so they can be passed straight through.
pub struct ShaderProgram {
    program: WebGlProgram,
    uniforms: [Option<WebGlUniformLocation>; UniformSlot::COUNT],
    vertices: Option<u32>,
}

impl ShaderProgram {
    pub fn program(&self) -> &WebGlProgram {
        &self.program
    }

    pub fn uniform(&self, slot: UniformSlot) -> Option<&WebGlUniformLocation> {
        self.uniforms[slot.index()].as_ref()
    }

    pub fn vertices_location(&self) -> Option<u32> {
        self.vertices
    }
}

fn compile_stage(gl: &GL, stage: ShaderStage, source: &str) -> Result<WebGlShader> {
    let kind = match stage {
        ShaderStage::Vertex => GL::VERTEX_SHADER,
        ShaderStage::Fragment => GL::FRAGMENT_SHADER,
    };
    let shader = gl.create_shader(kind).ok_or_else(|| CanvasError::ShaderCompile {
        stage,
        log: "unable to create shader object".to_string(),
    })?;

    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let compiled = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if compiled {
        return Ok(shader);
    }

    let log = gl.get_shader_info_log(&shader).unwrap_or_default();
    gl.delete_shader(Some(&shader));
    Err(CanvasError::ShaderCompile { stage, log })
}

/// Compiles and links a vertex/fragment pair.
///
/// On any failure every object created along the way is deleted, so a
/// failed attempt leaves nothing behind.
pub fn compile_program(gl: &GL, vertex_source: &str, fragment_source: &str) -> Result<ShaderProgram> {
    let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_source)?;
    let fragment = match compile_stage(gl, ShaderStage::Fragment, fragment_source) {
        Ok(shader) => shader,
        Err(err) => {
            gl.delete_shader(Some(&vertex));
            return Err(err);
        }
    };

    let release = |program: Option<&WebGlProgram>| {
        gl.delete_program(program);
        gl.delete_shader(Some(&vertex));
        gl.delete_shader(Some(&fragment));
    };

    let Some(program) = gl.create_program() else {
        release(None);
        return Err(CanvasError::ShaderLink {
            log: "unable to create program object".to_string(),
        });
    };

    gl.attach_shader(&program, &vertex);
    gl.attach_shader(&program, &fragment);
    gl.link_program(&program);

    let linked = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if !linked {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        release(Some(&program));
        return Err(CanvasError::ShaderLink { log });
    }

    let uniforms = UniformSlot::ALL.map(|slot| {
        let location = gl.get_uniform_location(&program, slot.name());
        if location.is_none() {
            log::debug!("uniform {} is not used by the program", slot.name());
        }
        location
    });
    let vertices = u32::try_from(gl.get_attrib_location(&program, ATTRIBUTE_VERTICES)).ok();
    if vertices.is_none() {
        log::warn!("attribute {ATTRIBUTE_VERTICES} is not used by the program");
    }

    Ok(ShaderProgram {
        program,
        uniforms,
        vertices,
    })
}

/// The fullscreen quad and its vertex array.
pub struct GeometryBuffers {
    vao: WebGlVertexArrayObject,
    _vertex_buffer: WebGlBuffer,
    _index_buffer: WebGlBuffer,
    index_count: i32,
}

impl GeometryBuffers {
    pub fn new(gl: &GL, program: &ShaderProgram) -> Result<Self> {
        let vertex_buffer = gl
            .create_buffer()
            .ok_or_else(|| CanvasError::Dom("unable to create vertex buffer".to_string()))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertex_buffer));
        gl.buffer_data_with_array_buffer_view(
            GL::ARRAY_BUFFER,
            &js_sys::Float32Array::from(&QUAD_VERTICES[..]),
            GL::STATIC_DRAW,
        );

        let index_buffer = gl
            .create_buffer()
            .ok_or_else(|| CanvasError::Dom("unable to create index buffer".to_string()))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
        gl.buffer_data_with_array_buffer_view(
            GL::ELEMENT_ARRAY_BUFFER,
            &js_sys::Uint16Array::from(&QUAD_INDICES[..]),
            GL::STATIC_DRAW,
        );

        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| CanvasError::Dom("unable to create vertex array".to_string()))?;
        gl.bind_vertex_array(Some(&vao));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertex_buffer));
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&index_buffer));
        if let Some(location) = program.vertices_location() {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, 2, GL::FLOAT, false, 0, 0);
        }
        gl.bind_vertex_array(None);

        Ok(Self {
            vao,
            _vertex_buffer: vertex_buffer,
            _index_buffer: index_buffer,
            index_count: QUAD_INDICES.len() as i32,
        })
    }
}

/// Draws the program over the quad into the surface.
pub struct GlRenderer {
    surface: RenderSurface,
    program: ShaderProgram,
    geometry: GeometryBuffers,
}

impl GlRenderer {
    pub fn new(surface: RenderSurface, program: ShaderProgram) -> Result<Self> {
        let gl = surface.gl();
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear_depth(1.0);
        gl.enable(GL::DEPTH_TEST);
        gl.depth_func(GL::LEQUAL);
        gl.enable(GL::CULL_FACE);
        gl.cull_face(GL::BACK);
        gl.use_program(Some(program.program()));

        let geometry = GeometryBuffers::new(gl, &program)?;
        Ok(Self {
            surface,
            program,
            geometry,
        })
    }
}

impl Renderer for GlRenderer {
    fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
    }

    fn draw(&mut self, uniforms: &FrameUniforms) {
        let gl = self.surface.gl();
        let program = &self.program;

        let [width, height] = uniforms.resolution;
        gl.uniform2f(program.uniform(UniformSlot::Resolution), width, height);
        gl.uniform1f(program.uniform(UniformSlot::Time), uniforms.time);
        gl.uniform1f(program.uniform(UniformSlot::TimeDelta), uniforms.time_delta);
        gl.uniform2fv_with_f32_array(program.uniform(UniformSlot::RotateScene), &uniforms.rotation);

        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.bind_vertex_array(Some(&self.geometry.vao));
        gl.draw_elements_with_i32(GL::TRIANGLES, self.geometry.index_count, GL::UNSIGNED_SHORT, 0);
        gl.bind_vertex_array(None);
    }
}
