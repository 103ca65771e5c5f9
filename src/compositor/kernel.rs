//! CPU evaluation of the `AnimatedWipe` technique.

use crate::foundation::{
    core::ColorVec4,
    math::{PremulRgba8, lerp_premul, luma601, unpremultiply_rgb},
};

/// How far a mask color sits from `color_target_a` (0) towards `color_target_b` (1).
///
/// The mask color is projected onto the segment between the two targets and clamped. When the
/// targets coincide the projection is undefined and the mask's luma is used instead.
pub fn mask_weight(
    mask_rgb: [f32; 3],
    invert: bool,
    color_target_a: ColorVec4,
    color_target_b: ColorVec4,
) -> f32 {
    let ca = color_target_a.rgb();
    let cb = color_target_b.rgb();
    let span = [cb[0] - ca[0], cb[1] - ca[1], cb[2] - ca[2]];
    let len2 = dot(span, span);

    let w = if len2 > 0.0 {
        let rel = [mask_rgb[0] - ca[0], mask_rgb[1] - ca[1], mask_rgb[2] - ca[2]];
        dot(rel, span) / len2
    } else {
        luma601(mask_rgb)
    };
    let w = w.clamp(0.0, 1.0);
    if invert { 1.0 - w } else { w }
}

pub(crate) fn shade_pixel(
    a: PremulRgba8,
    b: PremulRgba8,
    mask: PremulRgba8,
    invert: bool,
    color_target_a: ColorVec4,
    color_target_b: ColorVec4,
) -> PremulRgba8 {
    let w = mask_weight(
        unpremultiply_rgb(mask),
        invert,
        color_target_a,
        color_target_b,
    );
    lerp_premul(a, b, w)
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/kernel.rs"]
mod tests;
