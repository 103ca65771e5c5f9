use std::sync::Arc;

use crate::{
    foundation::{
        core::{Affine, Canvas, Point},
        math::over,
    },
    gfx::texture::Texture,
};

/// Off-screen render target reused across frames.
///
/// A target accepts exactly one pass between two [`TexRender::reset`] calls. The backing buffer
/// is (re)allocated lazily whenever a pass begins with different dimensions.
#[derive(Debug, Default)]
pub struct TexRender {
    size: Canvas,
    pixels: Arc<Vec<u8>>,
    rendered: bool,
}

impl TexRender {
    /// Empty target with no backing storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow the next [`TexRender::begin`] to render again.
    pub fn reset(&mut self) {
        self.rendered = false;
    }

    /// Current backing size.
    pub fn size(&self) -> Canvas {
        self.size
    }

    /// Open a render pass sized `width x height`.
    ///
    /// Returns `None` for a zero-sized request or when the target was already rendered since the
    /// last reset. The pass ends when the returned guard is dropped, on every exit path.
    pub fn begin(&mut self, width: u32, height: u32) -> Option<TexRenderPass<'_>> {
        let size = Canvas::new(width, height);
        if self.rendered || size.is_empty() {
            return None;
        }
        if self.size != size {
            let len = size.rgba8_len()?;
            self.size = size;
            self.pixels = Arc::new(vec![0; len]);
        }
        Some(TexRenderPass {
            target: self,
            transform: Affine::IDENTITY,
        })
    }

    /// Color attachment of the last completed pass.
    pub fn texture(&self) -> Option<Texture> {
        if !self.rendered || self.size.is_empty() {
            return None;
        }
        Texture::from_shared(self.size.width, self.size.height, Arc::clone(&self.pixels)).ok()
    }
}

/// Scoped render pass into a [`TexRender`]. Dropping the pass ends it.
pub struct TexRenderPass<'a> {
    target: &'a mut TexRender,
    transform: Affine,
}

impl TexRenderPass<'_> {
    /// Target dimensions.
    pub fn size(&self) -> Canvas {
        self.target.size
    }

    /// Fill the whole target with a premultiplied color.
    pub fn clear(&mut self, rgba8_premul: [u8; 4]) {
        let pixels = Arc::make_mut(&mut self.target.pixels);
        for px in pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba8_premul);
        }
    }

    /// Replace the transform applied to subsequent draws.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Draw `tex` with its top-left at the origin, through the current transform.
    pub fn draw_texture(&mut self, tex: &Texture) {
        if tex.is_empty() || self.transform.determinant().abs() <= f64::EPSILON {
            return;
        }
        let inv = self.transform.inverse();
        let Canvas { width, height } = self.target.size;
        let pixels = Arc::make_mut(&mut self.target.pixels);
        let (tw, th) = (f64::from(tex.width), f64::from(tex.height));

        for y in 0..height {
            for x in 0..width {
                let src = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if src.x < 0.0 || src.y < 0.0 || src.x >= tw || src.y >= th {
                    continue;
                }
                let s = tex.pixel(src.x as u32, src.y as u32);
                let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
                let d = [
                    pixels[idx],
                    pixels[idx + 1],
                    pixels[idx + 2],
                    pixels[idx + 3],
                ];
                pixels[idx..idx + 4].copy_from_slice(&over(d, s));
            }
        }
    }
}

impl Drop for TexRenderPass<'_> {
    fn drop(&mut self) {
        self.target.rendered = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gfx/texrender.rs"]
mod tests;
