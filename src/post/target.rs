//! Offscreen render targets.

use glow::HasContext;

use crate::error::{PostError, PostResult};

/// An offscreen color buffer a pass can draw into instead of the screen.
///
/// Owns an RGBA8 texture (linear filtering, clamp-to-edge wrap) and a
/// framebuffer binding that texture as color attachment 0. Both objects live
/// until the GL context is dropped; there is no explicit teardown.
#[derive(Debug)]
pub struct RenderTarget {
    framebuffer: glow::Framebuffer,
    texture: glow::Texture,
    width: i32,
    height: i32,
}

impl RenderTarget {
    /// Allocate a target of the given size with zeroed contents.
    ///
    /// Fails if the driver refuses to create the objects or if the
    /// framebuffer is incomplete after attachment; incompleteness is a
    /// configuration error, not a runtime condition to retry, so the
    /// partially built objects are deleted before the error propagates.
    pub fn new(gl: &glow::Context, width: i32, height: i32) -> PostResult<Self> {
        let width = width.max(1);
        let height = height.max(1);

        let texture = unsafe { gl.create_texture() }.map_err(PostError::ObjectCreation)?;
        let framebuffer = match unsafe { gl.create_framebuffer() } {
            Ok(framebuffer) => framebuffer,
            Err(err) => {
                unsafe { gl.delete_texture(texture) };
                return Err(PostError::ObjectCreation(err));
            }
        };

        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width,
                height,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                None,
            );

            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(framebuffer));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(texture),
                0,
            );
            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);

            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            gl.bind_texture(glow::TEXTURE_2D, None);

            if status != glow::FRAMEBUFFER_COMPLETE {
                gl.delete_framebuffer(framebuffer);
                gl.delete_texture(texture);
                return Err(PostError::FramebufferIncomplete(status));
            }
        }

        Ok(Self {
            framebuffer,
            texture,
            width,
            height,
        })
    }

    /// Redirect subsequent draw calls into this target and set the viewport
    /// to its dimensions.
    pub fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer));
            gl.viewport(0, 0, self.width, self.height);
        }
    }

    /// Redirect draw calls back to the default (screen) surface.
    pub fn unbind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
    }

    /// Reallocate the texture storage at a new size with zeroed contents.
    ///
    /// A no-op when the dimensions are unchanged. The framebuffer keeps
    /// pointing at the same texture object, whose storage has simply changed
    /// shape, so neither object identity changes.
    pub fn resize(&mut self, gl: &glow::Context, width: i32, height: i32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }

        self.width = width;
        self.height = height;

        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width,
                height,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                None,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    /// The color texture this target renders into.
    pub fn texture(&self) -> glow::Texture {
        self.texture
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}
