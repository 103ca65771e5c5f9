use std::sync::Arc;

use crate::foundation::{
    core::Canvas,
    error::{WipeError, WipeResult},
    math::PremulRgba8,
};

/// Immutable premultiplied RGBA8 image shared between the mask providers and the compositor.
///
/// Pixels are reference counted, so handing a texture to the blend pass never copies them.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Texture {
    /// Wrap an already premultiplied RGBA8 buffer, validating its length.
    pub fn from_rgba8_premul(width: u32, height: u32, data: Vec<u8>) -> WipeResult<Self> {
        Self::from_shared(width, height, Arc::new(data))
    }

    pub(crate) fn from_shared(width: u32, height: u32, data: Arc<Vec<u8>>) -> WipeResult<Self> {
        let expected = Canvas::new(width, height)
            .rgba8_len()
            .ok_or_else(|| WipeError::validation("texture size overflow"))?;
        if data.len() != expected {
            return Err(WipeError::validation(format!(
                "texture expects {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: data,
        })
    }

    /// Texture filled with a single premultiplied color.
    pub fn solid(width: u32, height: u32, rgba8_premul: [u8; 4]) -> Self {
        let px = (width as usize) * (height as usize);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul.repeat(px)),
        }
    }

    /// Texture dimensions.
    pub fn size(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// `true` when the texture has no pixels.
    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    /// Pixel at integer coordinates. Out-of-bounds reads are transparent.
    pub fn pixel(&self, x: u32, y: u32) -> PremulRgba8 {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let d = &self.rgba8_premul;
        [d[idx], d[idx + 1], d[idx + 2], d[idx + 3]]
    }

    /// Nearest-neighbour sample at normalized coordinates, clamped to the edge.
    pub fn sample_nearest(&self, u: f32, v: f32) -> PremulRgba8 {
        if self.is_empty() {
            return [0; 4];
        }
        let x = axis_texel(u, self.width);
        let y = axis_texel(v, self.height);
        self.pixel(x, y)
    }
}

fn axis_texel(coord: f32, len: u32) -> u32 {
    let c = if coord.is_nan() { 0.0 } else { coord };
    let max = len.saturating_sub(1);
    ((c * len as f32).floor().max(0.0) as u32).min(max)
}

#[cfg(test)]
#[path = "../../tests/unit/gfx/texture.rs"]
mod tests;
