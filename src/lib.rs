//! postfx - a multi-pass GL post-processing pipeline for full-screen shader
//! effects.
//!
//! The crate chains fragment-shader passes over a full-screen quad: each
//! pass draws into its own offscreen render target and feeds the next pass
//! through a sampler uniform, with the final pass presenting to the screen.
//! Programs are reflected at construction so uniforms are set by name with
//! no per-frame type dispatch.
//!
//! # Features
//! - Shader compilation with hard compile/link errors carrying driver logs
//! - Offscreen render targets with in-place resize
//! - Runtime uniform reflection into an immutable typed descriptor table
//! - Linear feed-forward pass chaining with per-pipeline input uniform name
//! - A shipped animated backdrop (gradient → noise → warp → present)
//! - WebGL2 canvas bindings for driving the effect from JavaScript
//!
//! The caller owns the GL context and the frame loop; on the web the host
//! page constructs a [`WebBackdrop`] and calls it from
//! `requestAnimationFrame`.

pub mod effects;
pub mod error;
pub mod post;

// Web-specific modules
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
mod web_backdrop;

pub use effects::{Backdrop, BackdropConfig};
pub use error::{PostError, PostResult};
pub use post::{
    compile_program, Destination, PostPass, PostPipeline, RenderTarget, UniformKind,
    UniformTable, UniformValue, DEFAULT_INPUT_UNIFORM,
};

#[cfg(target_arch = "wasm32")]
pub use web_backdrop::WebBackdrop;
