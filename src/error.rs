//! Error types for pipeline construction.

use thiserror::Error;

/// Errors raised while building GPU resources for the pipeline.
///
/// Every variant is a setup-time failure: once a pipeline is built, rendering
/// itself does not fail (soft conditions such as unknown uniform names are
/// logged and ignored, see the `post::uniform` module).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostError {
    /// The driver refused to create a GL object (shader, program, buffer,
    /// texture or framebuffer).
    #[error("failed to create GL object: {0}")]
    ObjectCreation(String),

    /// The vertex stage was rejected by the driver; carries the info log.
    #[error("vertex shader compilation failed: {0}")]
    VertexCompilation(String),

    /// The fragment stage was rejected by the driver; carries the info log.
    #[error("fragment shader compilation failed: {0}")]
    FragmentCompilation(String),

    /// The compiled stages could not be linked into a program.
    #[error("shader program link failed: {0}")]
    Link(String),

    /// A render target's framebuffer was incomplete after attaching its
    /// color texture; carries the raw GL status code.
    #[error("framebuffer incomplete: status {0:#06x}")]
    FramebufferIncomplete(u32),
}

/// Convenience alias used by the constructors in this crate.
pub type PostResult<T> = Result<T, PostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PostError::Link("unresolved varying".to_string());
        assert_eq!(
            err.to_string(),
            "shader program link failed: unresolved varying"
        );

        let err = PostError::FramebufferIncomplete(0x8CD6);
        assert_eq!(err.to_string(), "framebuffer incomplete: status 0x8cd6");
    }
}
