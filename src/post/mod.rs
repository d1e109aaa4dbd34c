//! The post-processing framework: shader compilation, offscreen targets,
//! uniform reflection, full-screen passes and pass chaining.
//!
//! # Overview
//!
//! - [`compile_program`] turns a vertex/fragment source pair into a linked
//!   GL program, failing hard on compile and link errors.
//! - [`RenderTarget`] is an offscreen color buffer (texture + framebuffer)
//!   a pass can draw into instead of the screen.
//! - [`UniformTable`] reflects a program's active uniforms once into
//!   immutable descriptors so values are set by name, without per-frame
//!   type dispatch.
//! - [`PostPass`] wraps one program with a full-screen quad and its uniform
//!   table; [`PostPipeline`] chains passes so each one's output texture
//!   feeds the next.
//!
//! # Example
//!
//! ```ignore
//! use postfx::post::{PostPass, PostPipeline, UniformValue};
//!
//! let mut pipeline = PostPipeline::new(width, height);
//! let gradient = PostPass::from_sources(&gl, vs, fs_gradient)?;
//! let present = PostPass::from_sources(&gl, vs, fs_present)?;
//! pipeline.add_pass(&gl, gradient, width, height)?;
//! pipeline.add_pass(&gl, present, width, height)?;
//!
//! // each frame:
//! pipeline.set_uniform(&gl, "u_time", UniformValue::Float(t));
//! pipeline.render(&gl);
//! ```

pub mod pass;
pub mod pipeline;
pub mod shader;
pub mod target;
pub mod uniform;

pub use pass::{Destination, PostPass, POSITION_ATTRIBUTE};
pub use pipeline::{PostPipeline, DEFAULT_INPUT_UNIFORM};
pub use shader::compile_program;
pub use target::RenderTarget;
pub use uniform::{UniformDescriptor, UniformKind, UniformTable, UniformValue};
