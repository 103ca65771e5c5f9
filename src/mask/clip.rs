use std::path::Path;

use crate::{
    audio::mix::AudioMix,
    foundation::{core::Canvas, error::WipeResult},
    gfx::texture::Texture,
};

/// Video files accepted as mask clips.
pub const VIDEO_FILE_EXTENSIONS: [&str; 9] =
    ["mp4", "ts", "mov", "wmv", "flv", "mkv", "avi", "gif", "webm"];

/// Host-assigned identity of a clip in the source graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClipId(pub u64);

/// Where a mask clip's own audio is routed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitoringType {
    /// Not monitored.
    #[default]
    None,
    /// Heard on the monitoring device only.
    MonitorOnly,
    /// Heard on the monitoring device and mixed into the output.
    MonitorAndOutput,
}

/// Private playback of a media clip owned by the host's media service.
///
/// The clip advances on its own clock once started; the transition only samples its current
/// frame and audio, and rewinds it on restart.
pub trait MaskClip {
    /// Identity used when registering the clip as an active child.
    fn id(&self) -> ClipId;

    /// Native resolution. Zero while nothing has been decoded yet.
    fn size(&self) -> Canvas;

    /// Most recently decoded video frame.
    fn current_frame(&self) -> Option<Texture>;

    /// Rewind and replay from the start.
    fn restart(&mut self);

    /// Reported clip duration in nanoseconds.
    fn duration_ns(&self) -> u64;

    /// Reported number of video frames.
    fn frame_count(&self) -> u64;

    /// `true` while the clip's audio for this cycle is still being produced.
    fn audio_pending(&self) -> bool;

    /// Timestamp of the clip's buffered audio, `0` when none is available.
    fn audio_timestamp(&self) -> u64;

    /// The clip's audio for the current cycle.
    fn audio_mix(&self) -> &AudioMix;

    /// Apply the audio monitoring mode.
    fn set_monitoring_type(&mut self, monitoring: MonitoringType);
}

/// Host media service creating private clips.
pub trait MediaFactory {
    /// Open `path` as a private, not yet playing clip.
    fn open_clip(&mut self, path: &Path) -> WipeResult<Box<dyn MaskClip>>;
}

/// `true` when `path` has one of [`VIDEO_FILE_EXTENSIONS`] (case-insensitive).
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| VIDEO_FILE_EXTENSIONS.contains(&e.as_str()))
}

#[cfg(test)]
#[path = "../../tests/unit/mask/clip.rs"]
mod tests;
