//! Ordered pass chains with feed-forward texture wiring.

use crate::error::PostResult;
use crate::post::pass::{Destination, PostPass};
use crate::post::target::RenderTarget;
use crate::post::uniform::UniformValue;

/// Uniform name through which a pass receives the previous pass's output,
/// unless the pipeline is configured with another.
pub const DEFAULT_INPUT_UNIFORM: &str = "u_firstPassTexture";

/// An ordered list of passes, each rendering into its own target except the
/// final one, which renders to the screen.
///
/// Pass *i*'s target texture feeds pass *i+1* through the configured input
/// uniform whenever that pass declares it — a strict linear feed-forward
/// chain. There is no double-buffering: a pass never reads and writes the
/// same target within one render call.
pub struct PostPipeline {
    passes: Vec<PostPass>,
    targets: Vec<RenderTarget>,
    /// Requested size per pass; consulted when a pass's target is allocated.
    sizes: Vec<(i32, i32)>,
    input_uniform: String,
    screen_width: i32,
    screen_height: i32,
}

impl PostPipeline {
    /// Create an empty pipeline tracking the given drawable size for the
    /// final pass's viewport.
    pub fn new(screen_width: i32, screen_height: i32) -> Self {
        Self {
            passes: Vec::new(),
            targets: Vec::new(),
            sizes: Vec::new(),
            input_uniform: DEFAULT_INPUT_UNIFORM.to_string(),
            screen_width,
            screen_height,
        }
    }

    /// Use a different input-texture uniform name for inter-pass feeding.
    pub fn with_input_uniform(mut self, name: impl Into<String>) -> Self {
        self.input_uniform = name.into();
        self
    }

    /// Append a pass, recording the target size to use for its output.
    ///
    /// Targets exist only for non-terminal passes: the previous pass stops
    /// being terminal when this one is appended, so its target is allocated
    /// now, at its recorded size. The final pass never owns a target — it
    /// renders to the screen.
    pub fn add_pass(
        &mut self,
        gl: &glow::Context,
        pass: PostPass,
        width: i32,
        height: i32,
    ) -> PostResult<()> {
        if let Some(&(prev_width, prev_height)) = self.sizes.last() {
            self.targets.push(RenderTarget::new(gl, prev_width, prev_height)?);
        }
        self.passes.push(pass);
        self.sizes.push((width, height));
        Ok(())
    }

    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    pub fn pass(&self, index: usize) -> Option<&PostPass> {
        self.passes.get(index)
    }

    pub fn passes(&self) -> &[PostPass] {
        &self.passes
    }

    /// The offscreen targets owned by the pipeline; one per non-terminal
    /// pass, in pass order.
    pub fn targets(&self) -> &[RenderTarget] {
        &self.targets
    }

    pub fn input_uniform(&self) -> &str {
        &self.input_uniform
    }

    /// Drawable size used for the final pass's viewport.
    pub fn screen_size(&self) -> (i32, i32) {
        (self.screen_width, self.screen_height)
    }

    /// Apply a uniform value to every pass that declares the name.
    ///
    /// Passes have different uniform surfaces on purpose; this is the shared
    /// code path for frame-wide values such as time or pointer position.
    pub fn set_uniform(&self, gl: &glow::Context, name: &str, value: UniformValue<'_>) {
        for pass in &self.passes {
            if pass.has_uniform(name) {
                pass.set_uniform(gl, name, value);
            }
        }
    }

    /// Resize every owned target and the tracked drawable size.
    ///
    /// The canvas or window itself belongs to the surrounding application;
    /// this only reshapes the offscreen storage and the final viewport.
    pub fn resize(&mut self, gl: &glow::Context, width: i32, height: i32) {
        self.screen_width = width;
        self.screen_height = height;
        for target in &mut self.targets {
            target.resize(gl, width, height);
        }
        for size in &mut self.sizes {
            *size = (width, height);
        }
    }

    /// Render all passes in insertion order.
    ///
    /// Pass *i* < N−1 draws into `targets[i]`; the final pass draws to the
    /// screen. Every pass after the first is fed the previous target's
    /// texture through the input uniform when it declares it.
    pub fn render(&self, gl: &glow::Context) {
        let count = self.passes.len();

        for (index, pass) in self.passes.iter().enumerate() {
            if let Some(feed) = feed_index(index) {
                if pass.has_uniform(&self.input_uniform) {
                    pass.set_uniform(
                        gl,
                        &self.input_uniform,
                        UniformValue::Texture(self.targets[feed].texture()),
                    );
                }
            }

            match destination_index(index, count) {
                Some(target) => pass.render(gl, Destination::Target(&self.targets[target])),
                None => pass.render(
                    gl,
                    Destination::Screen {
                        width: self.screen_width,
                        height: self.screen_height,
                    },
                ),
            }
        }
    }
}

/// Target index a pass draws into, or `None` for the screen.
fn destination_index(pass_index: usize, pass_count: usize) -> Option<usize> {
    (pass_index + 1 < pass_count).then_some(pass_index)
}

/// Target index that feeds a pass, or `None` for the first pass.
fn feed_index(pass_index: usize) -> Option<usize> {
    pass_index.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pass_targets_screen() {
        assert_eq!(destination_index(0, 1), None);
        assert_eq!(feed_index(0), None);
    }

    #[test]
    fn test_three_pass_routing() {
        // Passes [A, B, C]: A and B render offscreen, C to the screen.
        assert_eq!(destination_index(0, 3), Some(0));
        assert_eq!(destination_index(1, 3), Some(1));
        assert_eq!(destination_index(2, 3), None);

        // B consumes A's target, C consumes B's.
        assert_eq!(feed_index(1), Some(0));
        assert_eq!(feed_index(2), Some(1));
    }

    #[test]
    fn test_feed_is_strictly_previous() {
        for index in 1..8 {
            assert_eq!(feed_index(index), Some(index - 1));
        }
    }

    #[test]
    fn test_default_input_uniform() {
        let pipeline = PostPipeline::new(640, 480);
        assert_eq!(pipeline.input_uniform(), "u_firstPassTexture");
        assert_eq!(pipeline.screen_size(), (640, 480));
        assert_eq!(pipeline.pass_count(), 0);
        assert!(pipeline.targets().is_empty());
    }

    #[test]
    fn test_custom_input_uniform() {
        let pipeline = PostPipeline::new(8, 8).with_input_uniform("u_texture");
        assert_eq!(pipeline.input_uniform(), "u_texture");
    }
}
