//! Integration tests for the public pipeline API.
//!
//! These tests cover everything observable without a live GL context:
//! uniform classification, generated effect sources and pipeline
//! configuration. Rendering behavior itself is exercised in a browser by
//! the wasm bindings.

use rstest::rstest;

use postfx::effects::{gradient_fragment, present_fragment, PRESENT_TEXTURE_UNIFORM};
use postfx::{BackdropConfig, PostPipeline, UniformKind, DEFAULT_INPUT_UNIFORM};

// ============================================================================
// Uniform classification
// ============================================================================

#[rstest]
#[case::float(glow::FLOAT, UniformKind::Float, 1)]
#[case::vec2(glow::FLOAT_VEC2, UniformKind::Vec2, 2)]
#[case::vec3(glow::FLOAT_VEC3, UniformKind::Vec3, 3)]
#[case::vec4(glow::FLOAT_VEC4, UniformKind::Vec4, 4)]
#[case::int(glow::INT, UniformKind::Int, 1)]
#[case::ivec2(glow::INT_VEC2, UniformKind::IVec2, 2)]
#[case::ivec3(glow::INT_VEC3, UniformKind::IVec3, 3)]
#[case::ivec4(glow::INT_VEC4, UniformKind::IVec4, 4)]
#[case::mat4(glow::FLOAT_MAT4, UniformKind::Mat4, 16)]
#[case::boolean(glow::BOOL, UniformKind::Bool, 1)]
#[case::sampler(glow::SAMPLER_2D, UniformKind::Sampler2D, 1)]
fn classify_supported_type(
    #[case] gl_type: u32,
    #[case] expected: UniformKind,
    #[case] components: usize,
) {
    let kind = UniformKind::classify(gl_type);
    assert_eq!(kind, expected);
    assert_eq!(kind.components(), components);
}

#[rstest]
#[case::mat2(glow::FLOAT_MAT2)]
#[case::mat3(glow::FLOAT_MAT3)]
#[case::sampler_cube(glow::SAMPLER_CUBE)]
fn classify_unknown_type(#[case] gl_type: u32) {
    assert_eq!(
        UniformKind::classify(gl_type),
        UniformKind::Unsupported(gl_type)
    );
}

#[test]
fn only_samplers_are_samplers() {
    assert!(UniformKind::Sampler2D.is_sampler());
    assert!(!UniformKind::Float.is_sampler());
    assert!(!UniformKind::Mat4.is_sampler());
}

// ============================================================================
// Generated effect sources
// ============================================================================

#[rstest]
#[case(1)]
#[case(5)]
#[case(12)]
fn gradient_source_scales_with_point_count(#[case] point_count: usize) {
    let source = gradient_fragment(point_count);
    assert!(source.starts_with(&format!("#define NUM_POINTS {point_count}\n")));
    assert!(source.contains("uniform vec2 u_points[NUM_POINTS];"));
    assert!(source.contains("uniform float u_alphas[NUM_POINTS];"));
}

#[rstest]
#[case::standalone(PRESENT_TEXTURE_UNIFORM)]
#[case::chained(DEFAULT_INPUT_UNIFORM)]
fn present_source_samples_requested_uniform(#[case] sampler: &str) {
    let source = present_fragment(sampler);
    assert!(source.contains(&format!("uniform sampler2D {sampler};")));
    assert!(source.contains(&format!("texture2D({sampler}, v_texCoord)")));
}

// ============================================================================
// Pipeline configuration
// ============================================================================

#[test]
fn pipeline_defaults() {
    let pipeline = PostPipeline::new(800, 600);
    assert_eq!(pipeline.input_uniform(), DEFAULT_INPUT_UNIFORM);
    assert_eq!(pipeline.screen_size(), (800, 600));
    assert_eq!(pipeline.pass_count(), 0);
    assert!(pipeline.targets().is_empty());
}

#[test]
fn pipeline_input_uniform_is_configurable() {
    let pipeline = PostPipeline::new(8, 8).with_input_uniform(PRESENT_TEXTURE_UNIFORM);
    assert_eq!(pipeline.input_uniform(), "u_texture");
}

#[test]
fn backdrop_config_defaults() {
    let config = BackdropConfig::default();
    assert_eq!(config.point_count, 5);
    assert_eq!(config.noise_strength, 0.025);
    assert!(!config.palette.is_empty());
}
