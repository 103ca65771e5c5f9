use std::{io::Cursor, path::Path};

use anyhow::Context;
use image::{AnimationDecoder, ImageFormat, codecs::gif::GifDecoder};

use crate::{
    foundation::{
        error::{WipeError, WipeResult},
        math::premultiply_rgba8_in_place,
    },
    gfx::texture::Texture,
};

/// Fully decoded multi-frame mask image.
#[derive(Clone, Debug)]
pub struct AnimatedImage {
    /// Frames in display order, each composited to the full logical canvas.
    pub frames: Vec<Texture>,
    /// Repeat count from the file. `0` means loop forever.
    pub loop_count: u32,
}

impl AnimatedImage {
    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// Read and decode a mask image from disk.
pub fn open_animated_image(path: &Path) -> WipeResult<AnimatedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read mask image '{}'", path.display()))?;
    decode_animated_image(&bytes)
}

/// Decode mask image bytes. GIFs yield every frame; other formats a single still frame.
pub fn decode_animated_image(bytes: &[u8]) -> WipeResult<AnimatedImage> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Gif) => decode_gif(bytes),
        _ => decode_still(bytes),
    }
}

fn decode_gif(bytes: &[u8]) -> WipeResult<AnimatedImage> {
    let decoder = GifDecoder::new(Cursor::new(bytes)).context("open gif decoder")?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .context("decode gif frames")?;

    let frames = frames
        .into_iter()
        .map(|frame| rgba_to_texture(frame.into_buffer()))
        .collect::<WipeResult<Vec<_>>>()?;
    if frames.is_empty() {
        return Err(WipeError::decode("gif contains no frames"));
    }

    Ok(AnimatedImage {
        frames,
        loop_count: gif_loop_count(bytes),
    })
}

fn decode_still(bytes: &[u8]) -> WipeResult<AnimatedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(AnimatedImage {
        frames: vec![rgba_to_texture(dyn_img.to_rgba8())?],
        loop_count: 0,
    })
}

fn rgba_to_texture(rgba: image::RgbaImage) -> WipeResult<Texture> {
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(WipeError::decode("mask image has zero size"));
    }
    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    Texture::from_rgba8_premul(width, height, rgba8_premul)
}

/// Repeat count of the GIF's NETSCAPE2.0 application extension.
///
/// `0` when the GIF loops forever, carries no repeat count, or cannot be read.
pub fn gif_loop_count(bytes: &[u8]) -> u32 {
    let decoder = match gif::DecodeOptions::new().read_info(Cursor::new(bytes)) {
        Ok(decoder) => decoder,
        Err(e) => {
            tracing::debug!(error = %e, "gif header unreadable, assuming infinite loop");
            return 0;
        }
    };
    match decoder.repeat() {
        gif::Repeat::Infinite => 0,
        gif::Repeat::Finite(n) => u32::from(n),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/decode.rs"]
mod tests;
