//! Shader program compilation.

use glow::HasContext;

use crate::error::{PostError, PostResult};

/// Compile and link a vertex/fragment source pair into a GL program.
///
/// Each stage is compiled independently; a rejected stage surfaces its driver
/// info log in the returned error and the transient shader objects are always
/// released before this function returns. A link failure is fatal too: a
/// program that failed to link cannot be reflected or rendered with, so the
/// half-built program object is deleted and the link log is propagated.
pub fn compile_program(
    gl: &glow::Context,
    vertex_source: &str,
    fragment_source: &str,
) -> PostResult<glow::Program> {
    let vertex = compile_stage(gl, glow::VERTEX_SHADER, vertex_source)?;
    let fragment = match compile_stage(gl, glow::FRAGMENT_SHADER, fragment_source) {
        Ok(shader) => shader,
        Err(err) => {
            unsafe { gl.delete_shader(vertex) };
            return Err(err);
        }
    };

    let program = match unsafe { gl.create_program() } {
        Ok(program) => program,
        Err(err) => {
            unsafe {
                gl.delete_shader(vertex);
                gl.delete_shader(fragment);
            }
            return Err(PostError::ObjectCreation(err));
        }
    };

    unsafe {
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);

        // The shader objects are only needed for the link.
        gl.detach_shader(program, vertex);
        gl.detach_shader(program, fragment);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(PostError::Link(log));
        }
    }

    Ok(program)
}

/// Compile a single shader stage, releasing the object on failure.
fn compile_stage(gl: &glow::Context, stage: u32, source: &str) -> PostResult<glow::Shader> {
    let shader = unsafe { gl.create_shader(stage) }.map_err(PostError::ObjectCreation)?;

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(match stage {
                glow::VERTEX_SHADER => PostError::VertexCompilation(log),
                _ => PostError::FragmentCompilation(log),
            });
        }
    }

    Ok(shader)
}
