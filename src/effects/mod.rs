//! The shipped decorative effects built on the post-processing framework.
//!
//! [`shaders`] holds the embedded GLSL sources; [`Backdrop`] wires them into
//! the gradient → noise → warp → present chain and animates it.

pub mod backdrop;
pub mod shaders;

pub use backdrop::{Backdrop, BackdropConfig};
pub use shaders::{
    gradient_fragment, present_fragment, NOISE_FRAGMENT_SHADER, PRESENT_TEXTURE_UNIFORM,
    QUAD_VERTEX_SHADER, TEXCOORD_VERTEX_SHADER, WARP_FRAGMENT_SHADER,
};
