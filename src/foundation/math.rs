pub(crate) type PremulRgba8 = [u8; 4];

pub(crate) fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// Source-over with premultiplied inputs.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Linear interpolation between two premultiplied pixels, `w` in `[0, 1]`.
pub(crate) fn lerp_premul(a: PremulRgba8, b: PremulRgba8, w: f32) -> PremulRgba8 {
    let w = if w.is_nan() { 0.0 } else { w.clamp(0.0, 1.0) };
    let mut out = [0u8; 4];
    for i in 0..4 {
        let av = f32::from(a[i]);
        let bv = f32::from(b[i]);
        out[i] = (av + (bv - av) * w).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Straight-alpha RGB in `0..=1` from a premultiplied pixel. Fully transparent pixels are black.
pub(crate) fn unpremultiply_rgb(px: PremulRgba8) -> [f32; 3] {
    if px[3] == 0 {
        return [0.0; 3];
    }
    let a = f32::from(px[3]);
    [
        (f32::from(px[0]) / a).min(1.0),
        (f32::from(px[1]) / a).min(1.0),
        (f32::from(px[2]) / a).min(1.0),
    ]
}

/// Rec.601 luma of straight RGB.
pub(crate) fn luma601(rgb: [f32; 3]) -> f32 {
    0.299 * rgb[0] + 0.587 * rgb[1] + 0.114 * rgb[2]
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255(u16::from(px[0]), a);
        px[1] = mul_div255(u16::from(px[1]), a);
        px[2] = mul_div255(u16::from(px[2]), a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
