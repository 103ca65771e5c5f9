use crate::{
    foundation::{core::ColorVec4, error::WipeResult},
    gfx::{
        backend::BlendBackend,
        effect::{BLEND_TECHNIQUE, BlendEffect, BlendParams},
        texture::Texture,
    },
};

/// Inputs of one composited frame.
#[derive(Clone, Copy, Debug)]
pub struct CompositeRequest<'a> {
    /// Outgoing source.
    pub a: &'a Texture,
    /// Incoming source.
    pub b: &'a Texture,
    /// Mask for this frame. `None` when no mask is configured or it produced nothing.
    pub mask: Option<&'a Texture>,
    /// Swap which mask color reveals which source.
    pub invert: bool,
    /// Mask color that shows source A.
    pub color_target_a: ColorVec4,
    /// Mask color that shows source B.
    pub color_target_b: ColorVec4,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

/// Draw A and B blended through the mask.
///
/// Returns `Ok(false)` without issuing a draw when there is no usable mask or the output is
/// empty; the caller simply skips this frame's blend. Inputs are never mutated.
pub fn composite<B: BlendBackend + ?Sized>(
    backend: &mut B,
    effect: &BlendEffect,
    req: &CompositeRequest<'_>,
) -> WipeResult<bool> {
    let Some(mask) = req.mask.filter(|m| !m.is_empty()) else {
        tracing::trace!("no mask texture, skipping blend");
        return Ok(false);
    };
    if req.width == 0 || req.height == 0 {
        tracing::trace!("empty output, skipping blend");
        return Ok(false);
    }

    let params = BlendParams {
        a_tex: req.a,
        b_tex: req.b,
        c_tex: mask,
        invert: req.invert,
        color_target_a: req.color_target_a,
        color_target_b: req.color_target_b,
    };
    backend.draw_blend(effect, BLEND_TECHNIQUE, &params, req.width, req.height)?;
    Ok(true)
}

#[cfg(test)]
#[path = "../../tests/unit/compositor/blend.rs"]
mod tests;
