use crate::{
    foundation::core::{Affine, Canvas, Vec2},
    gfx::{texrender::TexRender, texture::Texture},
    mask::clip::{ClipId, MaskClip, MonitoringType},
};

/// Timing reported by a mask clip when a transition starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClipTiming {
    pub duration_ns: u64,
    pub frame_count: u64,
}

impl ClipTiming {
    /// Transition duration in whole milliseconds.
    pub fn duration_ms(self) -> u32 {
        u32::try_from(self.duration_ns / 1_000_000).unwrap_or(u32::MAX)
    }
}

/// Secondary video clip rendered off-screen as the wipe mask.
pub struct VideoMask {
    clip: Box<dyn MaskClip>,
    canvas: TexRender,
    timing: Option<ClipTiming>,
}

impl std::fmt::Debug for VideoMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoMask")
            .field("clip", &self.clip.id())
            .field("canvas", &self.canvas.size())
            .field("timing", &self.timing)
            .finish()
    }
}

impl VideoMask {
    /// Wrap a freshly opened clip and route its audio as requested.
    pub fn new(mut clip: Box<dyn MaskClip>, monitoring: MonitoringType) -> Self {
        clip.set_monitoring_type(monitoring);
        Self {
            clip,
            canvas: TexRender::new(),
            timing: None,
        }
    }

    pub fn clip(&self) -> &dyn MaskClip {
        self.clip.as_ref()
    }

    pub fn clip_mut(&mut self) -> &mut dyn MaskClip {
        self.clip.as_mut()
    }

    pub fn child_id(&self) -> ClipId {
        self.clip.id()
    }

    /// Native clip resolution.
    pub fn native_size(&self) -> Canvas {
        self.clip.size()
    }

    /// Factor mapping the mask's native size onto `target`. `None` while the clip has no size.
    pub fn scale_to(&self, target: Canvas) -> Option<Vec2> {
        self.native_size().scale_to(target)
    }

    /// Timing captured by the last [`VideoMask::query_timing`].
    pub fn timing(&self) -> Option<ClipTiming> {
        self.timing
    }

    /// Ask the clip for its duration and frame count and remember them.
    pub fn query_timing(&mut self) -> ClipTiming {
        let timing = ClipTiming {
            duration_ns: self.clip.duration_ns(),
            frame_count: self.clip.frame_count(),
        };
        self.timing = Some(timing);
        timing
    }

    pub fn restart(&mut self) {
        self.clip.restart();
    }

    /// Render the clip's current frame into the scratch canvas.
    ///
    /// The canvas is reset on every call and sized to the clip's native resolution. Returns
    /// `None` while the clip reports a zero size; nothing is drawn in that case.
    pub fn render(&mut self) -> Option<Texture> {
        self.canvas.reset();
        let size = self.clip.size();
        if size.is_empty() {
            tracing::trace!(clip = self.clip.id().0, "mask clip has no size yet");
            return None;
        }

        let frame = self.clip.current_frame().filter(|f| !f.is_empty());
        {
            let mut pass = self.canvas.begin(size.width, size.height)?;
            pass.clear([0; 4]);
            if let Some(frame) = &frame {
                pass.set_transform(Affine::scale_non_uniform(
                    f64::from(size.width) / f64::from(frame.width),
                    f64::from(size.height) / f64::from(frame.height),
                ));
                pass.draw_texture(frame);
            }
        }
        self.canvas.texture()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/video.rs"]
mod tests;
