use std::path::{Path, PathBuf};

use crate::{
    assets::library::MaskLibrary,
    audio::mix::{self, AudioCycle, AudioMix},
    compositor::blend::{CompositeRequest, composite},
    foundation::{
        core::{Canvas, Vec2},
        error::{WipeError, WipeResult},
    },
    gfx::{
        backend::BlendBackend,
        context::{GraphicsContext, GraphicsScope},
        effect::BlendEffect,
        texture::Texture,
    },
    mask::{
        MaskSource,
        clip::{ClipId, MediaFactory, is_video_file},
        decode::open_animated_image,
        image::ImageMask,
        video::VideoMask,
    },
    transition::{
        lifecycle::{self, StartKind, TransitionHost},
        settings::{MaskSettings, TransitionSettings, TransitionState},
    },
};

/// Where the blend effect program comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EffectSource {
    /// The effect compiled into the crate.
    #[default]
    Builtin,
    /// An effect file on disk.
    File(PathBuf),
}

/// Construction options that do not change with the user settings.
#[derive(Clone, Debug, Default)]
pub struct WipeOptions {
    pub effect: EffectSource,
    /// Named masks available to image-mode settings.
    pub library: MaskLibrary,
}

/// Result of one composited video frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WipeFrame {
    /// Size of the mask texture that was sampled.
    pub mask_size: Canvas,
    /// Factor from mask size to output size, applied when sampling the mask.
    pub mask_scale: Vec2,
}

/// Animated color wipe transition.
///
/// Owns the blend effect, the configured mask and the transition state. Every entry point takes
/// `&mut self`, so render, audio and configuration calls never overlap.
#[derive(Debug)]
pub struct AnimatedWipe {
    effect: BlendEffect,
    state: TransitionState,
    mask: Option<MaskSource>,
    library: MaskLibrary,
}

impl AnimatedWipe {
    /// Build a transition. Fails only when the blend effect cannot be loaded.
    pub fn create<G, M>(
        gfx: &mut G,
        media: &mut M,
        options: WipeOptions,
        settings: &TransitionSettings,
    ) -> WipeResult<Self>
    where
        G: GraphicsContext + ?Sized,
        M: MediaFactory + ?Sized,
    {
        let effect = {
            let _scope = GraphicsScope::enter(gfx);
            match &options.effect {
                EffectSource::Builtin => BlendEffect::builtin(),
                EffectSource::File(path) => BlendEffect::load(path),
            }
        }?;

        let mut wipe = Self {
            effect,
            state: TransitionState::default(),
            mask: None,
            library: options.library,
        };
        wipe.configure(settings, media);
        Ok(wipe)
    }

    /// Apply new settings.
    ///
    /// The previous mask is released before the new one is built. When a run is in progress
    /// the old mask child is unregistered and the new mask is started in its place.
    #[tracing::instrument(skip_all, fields(transitioning = self.state.transitioning))]
    pub fn update<M, H>(&mut self, settings: &TransitionSettings, media: &mut M, host: &mut H)
    where
        M: MediaFactory + ?Sized,
        H: TransitionHost + ?Sized,
    {
        let running = self.state.transitioning;
        if running && let Some(child) = lifecycle::configured_child(self.mask.as_ref()) {
            host.remove_active_child(child);
        }

        self.configure(settings, media);

        if running {
            self.state.transitioning = false;
            lifecycle::start(&mut self.state, self.mask.as_mut(), host);
        }
    }

    fn configure<M>(&mut self, settings: &TransitionSettings, media: &mut M)
    where
        M: MediaFactory + ?Sized,
    {
        if self.mask.take().is_some() {
            tracing::debug!("released previous mask");
        }
        self.state.apply(settings);

        self.mask = match build_mask(settings.mask.as_ref(), media, &self.library) {
            Ok(mask) => mask,
            Err(e) => {
                tracing::warn!(error = %e, "mask unavailable, transition will not blend");
                None
            }
        };
    }

    /// Composite `a` and `b` through the mask at progress `t`.
    ///
    /// Returns `Ok(None)` when there is no mask texture this frame; nothing is drawn then.
    pub fn video_render<B>(
        &mut self,
        backend: &mut B,
        a: &Texture,
        b: &Texture,
        t: f32,
        width: u32,
        height: u32,
    ) -> WipeResult<Option<WipeFrame>>
    where
        B: BlendBackend + ?Sized,
    {
        let invert = self.state.invert;
        let Some(mask_tex) = self
            .mask
            .as_mut()
            .and_then(|m| m.resolve_mask_texture(f64::from(t), invert))
        else {
            tracing::trace!(t, "no mask texture this frame");
            return Ok(None);
        };

        let output = Canvas::new(width, height);
        let Some(mask_scale) = mask_tex.size().scale_to(output) else {
            return Ok(None);
        };

        let req = CompositeRequest {
            a,
            b,
            mask: Some(&mask_tex),
            invert,
            color_target_a: self.state.color_target_a,
            color_target_b: self.state.color_target_b,
            width,
            height,
        };
        let drawn = {
            let mut scope = GraphicsScope::enter(backend);
            composite(&mut *scope, &self.effect, &req)?
        };

        Ok(drawn.then_some(WipeFrame {
            mask_size: mask_tex.size(),
            mask_scale,
        }))
    }

    /// Mix one audio cycle. `false` means there is no output this cycle.
    pub fn audio_render(
        &self,
        ts_out: &mut u64,
        out: &mut AudioMix,
        cycle: &AudioCycle<'_>,
    ) -> bool {
        let clip = self
            .mask
            .as_ref()
            .and_then(MaskSource::as_video)
            .map(VideoMask::clip);
        mix::mix(ts_out, out, cycle, clip)
    }

    #[tracing::instrument(skip_all)]
    pub fn start<H: TransitionHost + ?Sized>(&mut self, host: &mut H) -> StartKind {
        lifecycle::start(&mut self.state, self.mask.as_mut(), host)
    }

    #[tracing::instrument(skip_all)]
    pub fn stop<H: TransitionHost + ?Sized>(&mut self, host: &mut H) {
        lifecycle::stop(&mut self.state, self.mask.as_ref(), host);
    }

    /// Visit the mask child while a run is in progress.
    pub fn enum_active_sources(&self, mut visit: impl FnMut(ClipId)) {
        if let Some(child) = lifecycle::active_child(&self.state, self.mask.as_ref()) {
            visit(child);
        }
    }

    /// Visit the mask child whenever one is configured.
    pub fn enum_all_sources(&self, mut visit: impl FnMut(ClipId)) {
        if let Some(child) = lifecycle::configured_child(self.mask.as_ref()) {
            visit(child);
        }
    }

    /// Mask factor for `output`, `None` while the mask has no size.
    pub fn mask_scale<H: TransitionHost + ?Sized>(&self, host: &H) -> Option<Vec2> {
        let video = self.mask.as_ref().and_then(MaskSource::as_video)?;
        video.scale_to(host.output_size())
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn mask(&self) -> Option<&MaskSource> {
        self.mask.as_ref()
    }

    pub fn mask_mut(&mut self) -> Option<&mut MaskSource> {
        self.mask.as_mut()
    }

    pub fn effect(&self) -> &BlendEffect {
        &self.effect
    }

    pub fn library(&self) -> &MaskLibrary {
        &self.library
    }
}

fn build_mask<M>(
    settings: Option<&MaskSettings>,
    media: &mut M,
    library: &MaskLibrary,
) -> WipeResult<Option<MaskSource>>
where
    M: MediaFactory + ?Sized,
{
    match settings {
        None => Ok(None),
        Some(MaskSettings::Video {
            path,
            audio_monitoring,
        }) => {
            if path.as_os_str().is_empty() {
                return Ok(None);
            }
            if !is_video_file(path) {
                tracing::debug!(path = %path.display(), "mask path has no known video extension");
            }
            let clip = media.open_clip(path)?;
            tracing::debug!(path = %path.display(), "opened video mask");
            Ok(Some(MaskSource::Video(VideoMask::new(
                clip,
                *audio_monitoring,
            ))))
        }
        Some(MaskSettings::Image { name, path }) => {
            let path = match (name, path) {
                (Some(name), _) => library.resolve(name).ok_or_else(|| {
                    WipeError::validation(format!("no mask image named '{name}'"))
                })?,
                (None, Some(path)) if !path.as_os_str().is_empty() => path.clone(),
                (None, _) => return Ok(None),
            };
            load_image_mask(&path).map(|m| Some(MaskSource::Image(m)))
        }
    }
}

fn load_image_mask(path: &Path) -> WipeResult<ImageMask> {
    let image = open_animated_image(path)?;
    tracing::debug!(
        path = %path.display(),
        frames = image.frame_count(),
        loops = image.loop_count,
        "loaded image mask"
    );
    ImageMask::new(image)
}

#[cfg(test)]
#[path = "../../tests/unit/transition/wipe.rs"]
mod tests;
