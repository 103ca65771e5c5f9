use crate::{
    compositor::kernel::shade_pixel,
    foundation::{
        core::Canvas,
        error::{WipeError, WipeResult},
    },
    gfx::{
        context::GraphicsContext,
        effect::{BlendEffect, BlendParams},
    },
};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Executes blend draws of a [`BlendEffect`].
///
/// Implementations bind `params` to the effect's uniforms and draw a full-target sprite of
/// `width x height` once per pass of `technique`.
pub trait BlendBackend: GraphicsContext {
    /// Draw one blended sprite.
    fn draw_blend(
        &mut self,
        effect: &BlendEffect,
        technique: &str,
        params: &BlendParams<'_>,
        width: u32,
        height: u32,
    ) -> WipeResult<()>;
}

/// Reference backend evaluating the blend technique on the CPU.
#[derive(Debug, Default)]
pub struct CpuBackend {
    frame: Option<FrameRGBA>,
    graphics_depth: u32,
    draw_count: u64,
}

impl CpuBackend {
    /// Backend with no rendered frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last frame produced by a blend draw.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }

    /// Take the last frame, leaving the backend empty.
    pub fn take_frame(&mut self) -> Option<FrameRGBA> {
        self.frame.take()
    }

    /// Number of blend sprites drawn so far.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    /// `true` while a graphics scope is open.
    pub fn in_graphics(&self) -> bool {
        self.graphics_depth > 0
    }
}

impl GraphicsContext for CpuBackend {
    fn enter_graphics(&mut self) {
        self.graphics_depth += 1;
    }

    fn leave_graphics(&mut self) {
        debug_assert!(self.graphics_depth > 0, "unbalanced leave_graphics");
        self.graphics_depth = self.graphics_depth.saturating_sub(1);
    }
}

impl BlendBackend for CpuBackend {
    fn draw_blend(
        &mut self,
        effect: &BlendEffect,
        technique: &str,
        params: &BlendParams<'_>,
        width: u32,
        height: u32,
    ) -> WipeResult<()> {
        let tech = effect.program().technique(technique).ok_or_else(|| {
            WipeError::effect(format!("effect has no technique '{technique}'"))
        })?;
        let len = Canvas::new(width, height)
            .rgba8_len()
            .ok_or_else(|| WipeError::validation("blend target size overflow"))?;

        let mut data = vec![0u8; len];
        for _pass in &tech.passes {
            for y in 0..height {
                let v = (y as f32 + 0.5) / height as f32;
                for x in 0..width {
                    let u = (x as f32 + 0.5) / width as f32;
                    let px = shade_pixel(
                        params.a_tex.sample_nearest(u, v),
                        params.b_tex.sample_nearest(u, v),
                        params.c_tex.sample_nearest(u, v),
                        params.invert,
                        params.color_target_a,
                        params.color_target_b,
                    );
                    let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
                    data[idx..idx + 4].copy_from_slice(&px);
                }
            }
            self.draw_count += 1;
        }

        self.frame = Some(FrameRGBA {
            width,
            height,
            data,
            premultiplied: true,
        });
        Ok(())
    }
}
