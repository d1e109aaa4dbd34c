//! Full-screen post-processing passes.

use glow::HasContext;

use crate::error::{PostError, PostResult};
use crate::post::shader::compile_program;
use crate::post::target::RenderTarget;
use crate::post::uniform::{UniformTable, UniformValue};

/// Vertex attribute name the quad positions bind to, when the program
/// declares it.
pub const POSITION_ATTRIBUTE: &str = "aVertexPosition";

/// Two clip-space triangles covering the square, as a 4-vertex strip.
const QUAD_VERTICES: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

/// Where a pass draws.
///
/// The default framebuffer's size is not queryable through the GL handle
/// types, so the screen destination carries its drawable dimensions
/// explicitly; [`PostPipeline`](crate::post::PostPipeline) tracks them.
#[derive(Debug, Clone, Copy)]
pub enum Destination<'a> {
    /// Draw into an offscreen render target.
    Target(&'a RenderTarget),
    /// Draw to the default framebuffer at the given drawable size.
    Screen { width: i32, height: i32 },
}

/// One shader program plus its full-screen draw invocation.
///
/// Owns the program, a quad vertex buffer and vertex array, and the uniform
/// table reflected from the program at construction. A pass keeps no state
/// across frames beyond the uniform values the caller sets before rendering.
pub struct PostPass {
    program: glow::Program,
    vertex_buffer: glow::Buffer,
    vertex_array: glow::VertexArray,
    position_location: Option<u32>,
    uniforms: UniformTable,
}

impl PostPass {
    /// Wrap a linked program in a pass, building the quad geometry and
    /// reflecting the program's uniforms.
    pub fn new(gl: &glow::Context, program: glow::Program) -> PostResult<Self> {
        let vertex_array =
            unsafe { gl.create_vertex_array() }.map_err(PostError::ObjectCreation)?;
        let vertex_buffer = match unsafe { gl.create_buffer() } {
            Ok(buffer) => buffer,
            Err(err) => {
                unsafe { gl.delete_vertex_array(vertex_array) };
                return Err(PostError::ObjectCreation(err));
            }
        };

        let position_location = unsafe { gl.get_attrib_location(program, POSITION_ATTRIBUTE) };

        unsafe {
            gl.bind_vertex_array(Some(vertex_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD_VERTICES),
                glow::STATIC_DRAW,
            );

            // A pass without a declared position attribute samples an
            // implicit quad; the vertex array is still valid to draw with.
            if let Some(location) = position_location {
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(location, 2, glow::FLOAT, false, 0, 0);
            }

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }

        let uniforms = UniformTable::reflect(gl, program);

        Ok(Self {
            program,
            vertex_buffer,
            vertex_array,
            position_location,
            uniforms,
        })
    }

    /// Compile a vertex/fragment source pair and wrap it in a pass.
    pub fn from_sources(
        gl: &glow::Context,
        vertex_source: &str,
        fragment_source: &str,
    ) -> PostResult<Self> {
        let program = compile_program(gl, vertex_source, fragment_source)?;
        Self::new(gl, program)
    }

    pub fn program(&self) -> glow::Program {
        self.program
    }

    /// Whether the program declares the uniform (after `[0]` stripping).
    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains(name)
    }

    /// The reflected uniform table.
    pub fn uniforms(&self) -> &UniformTable {
        &self.uniforms
    }

    /// Set a uniform by name.
    ///
    /// Uniform state is program-scoped in GL, so the pass's program is made
    /// current before the write; this is safe to call outside a render call.
    /// Unknown names are logged and ignored.
    pub fn set_uniform(&self, gl: &glow::Context, name: &str, value: UniformValue<'_>) {
        unsafe {
            gl.use_program(Some(self.program));
        }
        self.uniforms.set(gl, name, value);
    }

    /// Draw the full-screen quad into the destination.
    ///
    /// Clears the destination to transparent black first, then issues one
    /// 4-vertex triangle-strip draw with the pass's program.
    pub fn render(&self, gl: &glow::Context, destination: Destination<'_>) {
        match destination {
            Destination::Target(target) => target.bind(gl),
            Destination::Screen { width, height } => unsafe {
                gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                gl.viewport(0, 0, width, height);
            },
        }

        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 0.0);
            gl.clear(glow::COLOR_BUFFER_BIT);

            gl.use_program(Some(self.program));
            gl.bind_vertex_array(Some(self.vertex_array));
            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4);
            gl.bind_vertex_array(None);
        }
    }

    /// Location of the position attribute, when the program declares one.
    pub fn position_location(&self) -> Option<u32> {
        self.position_location
    }

    /// The quad buffer backing this pass's vertex array.
    pub fn vertex_buffer(&self) -> glow::Buffer {
        self.vertex_buffer
    }
}
