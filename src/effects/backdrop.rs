//! The animated backdrop: a gradient → noise → warp → present chain driven
//! by time and pointer position.

use glam::Vec2;

use crate::error::PostResult;
use crate::post::{PostPass, PostPipeline, UniformValue, DEFAULT_INPUT_UNIFORM};

use super::shaders::{
    gradient_fragment, present_fragment, NOISE_FRAGMENT_SHADER, QUAD_VERTEX_SHADER,
    TEXCOORD_VERTEX_SHADER, WARP_FRAGMENT_SHADER,
};

/// Configuration for building a [`Backdrop`].
#[derive(Debug, Clone)]
pub struct BackdropConfig {
    /// Number of gradient source points.
    pub point_count: usize,
    /// Scatter magnitude of the noise pass; 0.0 disables it.
    pub noise_strength: f32,
    /// RGBA per point, cycled when there are more points than entries.
    pub palette: Vec<[f32; 4]>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            point_count: 5,
            noise_strength: 0.025,
            palette: vec![
                [0.98, 0.45, 0.32, 1.0],
                [0.30, 0.42, 0.90, 1.0],
                [0.95, 0.76, 0.30, 1.0],
                [0.42, 0.84, 0.62, 1.0],
                [0.75, 0.36, 0.82, 1.0],
            ],
        }
    }
}

impl BackdropConfig {
    pub fn with_point_count(mut self, point_count: usize) -> Self {
        self.point_count = point_count;
        self
    }

    pub fn with_noise_strength(mut self, noise_strength: f32) -> Self {
        self.noise_strength = noise_strength;
        self
    }

    pub fn with_palette(mut self, palette: Vec<[f32; 4]>) -> Self {
        self.palette = palette;
        self
    }
}

/// Owns the 4-pass pipeline and the animated point state, and pushes the
/// frame uniforms before each render.
///
/// The host drives it once per animation frame with the elapsed time in
/// seconds; pointer position arrives normalized to [-1, 1]² with +Y up.
pub struct Backdrop {
    pipeline: PostPipeline,
    noise_strength: f32,
    points: Vec<Vec2>,
    phases: Vec<f32>,
    reds: Vec<f32>,
    greens: Vec<f32>,
    blues: Vec<f32>,
    alphas: Vec<f32>,
    mouse: Vec2,
}

impl Backdrop {
    /// Compile the effect chain and build its pipeline at the given
    /// drawable size.
    pub fn new(
        gl: &glow::Context,
        config: BackdropConfig,
        width: i32,
        height: i32,
    ) -> PostResult<Self> {
        let point_count = config.point_count.max(1);

        let gradient =
            PostPass::from_sources(gl, QUAD_VERTEX_SHADER, &gradient_fragment(point_count))?;
        let noise = PostPass::from_sources(gl, TEXCOORD_VERTEX_SHADER, NOISE_FRAGMENT_SHADER)?;
        let warp = PostPass::from_sources(gl, TEXCOORD_VERTEX_SHADER, WARP_FRAGMENT_SHADER)?;
        let present = PostPass::from_sources(
            gl,
            TEXCOORD_VERTEX_SHADER,
            &present_fragment(DEFAULT_INPUT_UNIFORM),
        )?;

        let mut pipeline = PostPipeline::new(width, height);
        pipeline.add_pass(gl, gradient, width, height)?;
        pipeline.add_pass(gl, noise, width, height)?;
        pipeline.add_pass(gl, warp, width, height)?;
        pipeline.add_pass(gl, present, width, height)?;

        let (reds, greens, blues, alphas) = split_palette(&config.palette, point_count);
        let phases = (0..point_count)
            .map(|i| i as f32 / point_count as f32 * std::f32::consts::TAU)
            .collect();

        Ok(Self {
            pipeline,
            noise_strength: config.noise_strength,
            points: vec![Vec2::ZERO; point_count],
            phases,
            reds,
            greens,
            blues,
            alphas,
            mouse: Vec2::ZERO,
        })
    }

    /// Update the pointer position, normalized to [-1, 1]² with +Y up.
    pub fn set_pointer(&mut self, position: Vec2) {
        self.mouse = position;
    }

    /// Propagate a new drawable size to the pipeline.
    pub fn resize(&mut self, gl: &glow::Context, width: i32, height: i32) {
        self.pipeline.resize(gl, width, height);
    }

    /// Advance the animation to `time` (seconds) and render one frame.
    pub fn render(&mut self, gl: &glow::Context, time: f32) {
        self.advance(time);

        let flat_points: Vec<f32> = self.points.iter().flat_map(|p| [p.x, p.y]).collect();
        let (width, height) = self.pipeline.screen_size();

        let pipeline = &self.pipeline;
        pipeline.set_uniform(gl, "u_points", UniformValue::Floats(&flat_points));
        pipeline.set_uniform(gl, "u_reds", UniformValue::Floats(&self.reds));
        pipeline.set_uniform(gl, "u_greens", UniformValue::Floats(&self.greens));
        pipeline.set_uniform(gl, "u_blues", UniformValue::Floats(&self.blues));
        pipeline.set_uniform(gl, "u_alphas", UniformValue::Floats(&self.alphas));
        pipeline.set_uniform(
            gl,
            "u_resolution",
            UniformValue::Vec2([width as f32, height as f32]),
        );
        pipeline.set_uniform(gl, "u_time", UniformValue::Float(time));
        pipeline.set_uniform(gl, "u_mouse", UniformValue::Vec2(self.mouse.to_array()));
        pipeline.set_uniform(gl, "u_strength", UniformValue::Float(self.noise_strength));

        pipeline.render(gl);
    }

    /// The underlying pipeline, for callers that drive extra uniforms.
    pub fn pipeline(&self) -> &PostPipeline {
        &self.pipeline
    }

    /// Move the points along their slow drift orbits; the first point
    /// follows the pointer instead.
    fn advance(&mut self, time: f32) {
        for (point, phase) in self.points.iter_mut().zip(&self.phases) {
            *point = Vec2::new(
                (time * 0.11 + phase).sin() * 0.6,
                (time * 0.17 + phase * 1.3).cos() * 0.6,
            );
        }
        if let Some(first) = self.points.first_mut() {
            *first = self.mouse;
        }
    }
}

/// Cycle a palette into the parallel per-channel arrays the gradient shader
/// expects.
fn split_palette(palette: &[[f32; 4]], point_count: usize) -> (Vec<f32>, Vec<f32>, Vec<f32>, Vec<f32>) {
    let mut reds = Vec::with_capacity(point_count);
    let mut greens = Vec::with_capacity(point_count);
    let mut blues = Vec::with_capacity(point_count);
    let mut alphas = Vec::with_capacity(point_count);

    for index in 0..point_count {
        let [r, g, b, a] = if palette.is_empty() {
            [1.0, 1.0, 1.0, 1.0]
        } else {
            palette[index % palette.len()]
        };
        reds.push(r);
        greens.push(g);
        blues.push(b);
        alphas.push(a);
    }

    (reds, greens, blues, alphas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BackdropConfig::default();
        assert_eq!(config.point_count, 5);
        assert_eq!(config.noise_strength, 0.025);
        assert_eq!(config.palette.len(), 5);
    }

    #[test]
    fn test_config_builders() {
        let config = BackdropConfig::default()
            .with_point_count(3)
            .with_noise_strength(0.0);
        assert_eq!(config.point_count, 3);
        assert_eq!(config.noise_strength, 0.0);
    }

    #[test]
    fn test_split_palette_cycles() {
        let palette = [[1.0, 0.5, 0.25, 1.0], [0.0, 0.1, 0.2, 0.3]];
        let (reds, greens, blues, alphas) = split_palette(&palette, 5);

        assert_eq!(reds, vec![1.0, 0.0, 1.0, 0.0, 1.0]);
        assert_eq!(greens, vec![0.5, 0.1, 0.5, 0.1, 0.5]);
        assert_eq!(blues, vec![0.25, 0.2, 0.25, 0.2, 0.25]);
        assert_eq!(alphas, vec![1.0, 0.3, 1.0, 0.3, 1.0]);
    }

    #[test]
    fn test_split_palette_empty_falls_back_to_white() {
        let (reds, greens, blues, alphas) = split_palette(&[], 2);
        assert_eq!(reds, vec![1.0, 1.0]);
        assert_eq!(greens, vec![1.0, 1.0]);
        assert_eq!(blues, vec![1.0, 1.0]);
        assert_eq!(alphas, vec![1.0, 1.0]);
    }
}
