pub(crate) mod clip;
pub(crate) mod decode;
pub(crate) mod image;
pub(crate) mod video;

use crate::gfx::texture::Texture;

use self::{image::ImageMask, video::VideoMask};

/// The configured wipe mask. A transition owns at most one.
#[derive(Debug)]
pub enum MaskSource {
    /// Secondary video clip played alongside the transition.
    Video(VideoMask),
    /// Animated image stepped by progress.
    Image(ImageMask),
}

impl MaskSource {
    /// Mask texture for progress `t`, or `None` when there is nothing to sample this frame.
    ///
    /// Video masks follow their own clock and ignore `t` and `invert`; the blend pass applies
    /// `invert` to the weights instead.
    pub fn resolve_mask_texture(&mut self, t: f64, invert: bool) -> Option<Texture> {
        match self {
            Self::Video(video) => video.render(),
            Self::Image(image) => image.resolve(t, invert),
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video(_))
    }

    pub fn as_video(&self) -> Option<&VideoMask> {
        match self {
            Self::Video(video) => Some(video),
            Self::Image(_) => None,
        }
    }

    pub fn as_video_mut(&mut self) -> Option<&mut VideoMask> {
        match self {
            Self::Video(video) => Some(video),
            Self::Image(_) => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageMask> {
        match self {
            Self::Image(image) => Some(image),
            Self::Video(_) => None,
        }
    }
}
