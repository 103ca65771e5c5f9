pub use kurbo::{Affine, Point, Vec2};

/// Pixel dimensions of a render target, texture or clip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas from explicit dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Per-axis factor mapping `self` onto `target` (`target / self`).
    ///
    /// Returns `None` for an empty source so callers never divide by zero.
    pub fn scale_to(self, target: Canvas) -> Option<Vec2> {
        if self.is_empty() {
            return None;
        }
        Some(Vec2::new(
            f64::from(target.width) / f64::from(self.width),
            f64::from(target.height) / f64::from(self.height),
        ))
    }

    /// Number of bytes of a tightly packed RGBA8 buffer with these dimensions.
    pub fn rgba8_len(self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
    }
}

/// Straight-alpha color with `0.0..=1.0` channels, the shader-side view of a packed host color.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorVec4 {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl ColorVec4 {
    /// Opaque white, the default "target A" color.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Opaque black, the default "target B" color.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Unpack a host color value. Red lives in the low byte, alpha in the high byte.
    pub fn from_packed_rgba(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_le_bytes();
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Inverse of [`ColorVec4::from_packed_rgba`], rounding each channel to 8 bits.
    pub fn to_packed_rgba(self) -> u32 {
        fn q(c: f32) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        u32::from_le_bytes([q(self.r), q(self.g), q(self.b), q(self.a)])
    }

    /// Color channels without alpha.
    pub fn rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Clamp a progress sample into `[0, 1]`. NaN maps to `0`.
pub fn clamp_progress(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
