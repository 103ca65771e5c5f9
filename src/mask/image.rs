use crate::{
    foundation::{
        core::clamp_progress,
        error::{WipeError, WipeResult},
    },
    gfx::texture::Texture,
    mask::decode::AnimatedImage,
};

/// Loop counts at or above this value mean "loop forever".
pub const INFINITE_LOOP_SENTINEL: u32 = u16::MAX as u32;

/// Map a raw loop count to its effective value, `0` meaning infinite.
pub fn normalize_loop_count(loops: u32) -> u32 {
    if loops >= INFINITE_LOOP_SENTINEL { 0 } else { loops }
}

/// Number of discrete steps the progress range is divided into.
///
/// Every play-through advances `frame_count - 1` steps; finite loop counts add one more
/// play-through per repeat.
pub fn total_steps(frame_count: usize, loops: u32) -> u64 {
    let per_pass = frame_count.saturating_sub(1) as u64;
    match normalize_loop_count(loops) {
        0 => per_pass,
        n => per_pass.saturating_mul(u64::from(n) + 1),
    }
}

/// Frame and completed-repeat position of an image mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepPosition {
    /// Index into the frame list.
    pub frame: usize,
    /// Number of completed repeats.
    pub loop_index: u32,
}

/// Position reached at effective progress `t_eff`.
pub fn step_position(t_eff: f64, frame_count: usize, loops: u32) -> StepPosition {
    let total = total_steps(frame_count, loops);
    if total == 0 {
        return StepPosition::default();
    }
    let per_pass = (frame_count - 1) as u64;

    let step = ((clamp_progress(t_eff) * total as f64).floor() as u64).min(total);
    if step == 0 {
        return StepPosition::default();
    }

    let frame = ((step - 1) % per_pass + 1) as usize;
    let loop_index = (step / per_pass).saturating_sub(1);
    StepPosition {
        frame,
        loop_index: u32::try_from(loop_index).unwrap_or(u32::MAX),
    }
}

/// Stepped animated image used as the wipe mask.
///
/// Frame selection and texture upload are separate: [`ImageMask::select_frame`] only moves the
/// position, [`ImageMask::update_texture`] publishes the pixels of the current frame.
#[derive(Debug)]
pub struct ImageMask {
    frames: Vec<Texture>,
    loop_count: u32,
    position: StepPosition,
    /// Direction of the current run; inverted runs travel from the last step to the first.
    inverted: bool,
    dirty: bool,
    texture: Option<Texture>,
}

impl ImageMask {
    pub fn new(image: AnimatedImage) -> WipeResult<Self> {
        if image.frames.is_empty() {
            return Err(WipeError::validation("mask image has no frames"));
        }
        Ok(Self {
            frames: image.frames,
            loop_count: normalize_loop_count(image.loop_count),
            position: StepPosition::default(),
            inverted: false,
            dirty: true,
            texture: None,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Effective loop count, `0` for infinite.
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    pub fn current_frame(&self) -> usize {
        self.position.frame
    }

    pub fn current_loop(&self) -> u32 {
        self.position.loop_index
    }

    /// `true` when the selected frame has not been uploaded yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// `true` once a finite loop count has been fully played in the run's direction.
    ///
    /// A forward run ends on the last step of the final repeat, an inverted run on the first step.
    pub fn loops_exhausted(&self) -> bool {
        if self.loop_count == 0 || self.frames.len() < 2 {
            return false;
        }
        if self.inverted {
            self.position == StepPosition::default()
        } else {
            self.position.loop_index >= self.loop_count
        }
    }

    /// Move to the frame for progress `t`. Returns `true` when the position changed.
    ///
    /// Once a finite loop count is exhausted the position stays put until [`ImageMask::restart`].
    pub fn select_frame(&mut self, t: f64, invert: bool) -> bool {
        if self.inverted == invert && self.loops_exhausted() {
            return false;
        }
        self.inverted = invert;
        let t_eff = if invert { 1.0 - t } else { t };
        let target = step_position(t_eff, self.frames.len(), self.loop_count);
        if target == self.position {
            return false;
        }
        self.position = target;
        self.dirty = true;
        true
    }

    /// Publish the current frame if it changed since the last upload.
    pub fn update_texture(&mut self) -> Option<&Texture> {
        if self.dirty {
            self.texture = self.frames.get(self.position.frame).cloned();
            self.dirty = false;
        }
        self.texture.as_ref()
    }

    /// Last uploaded texture.
    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Rewind to the first frame of the first play-through.
    pub fn restart(&mut self) {
        self.inverted = false;
        if self.position != StepPosition::default() {
            self.position = StepPosition::default();
            self.dirty = true;
        }
    }

    /// Select, upload and return the mask for progress `t`.
    pub fn resolve(&mut self, t: f64, invert: bool) -> Option<Texture> {
        self.select_frame(t, invert);
        self.update_texture().filter(|tex| !tex.is_empty()).cloned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/image.rs"]
mod tests;
