use std::path::PathBuf;

use crate::{
    foundation::{
        core::ColorVec4,
        error::{WipeError, WipeResult},
    },
    mask::clip::MonitoringType,
};

/// Packed default for the color that keys source A (opaque white).
pub const DEFAULT_COLOR_TARGET_A: u32 = 0xffff_ffff;
/// Packed default for the color that keys source B (opaque black).
pub const DEFAULT_COLOR_TARGET_B: u32 = 0xff00_0000;

/// User configuration of an animated wipe.
///
/// Colors are packed host colors with red in the low byte and alpha in the high byte.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<MaskSettings>,
    pub invert: bool,
    pub color_target_a: u32,
    pub color_target_b: u32,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            mask: None,
            invert: false,
            color_target_a: DEFAULT_COLOR_TARGET_A,
            color_target_b: DEFAULT_COLOR_TARGET_B,
        }
    }
}

/// Which asset drives the wipe.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MaskSettings {
    /// Play a video clip as the mask.
    Video {
        path: PathBuf,
        #[serde(default)]
        audio_monitoring: MonitoringType,
    },
    /// Step an animated image, picked by library name or by path.
    Image {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
    },
}

impl TransitionSettings {
    pub fn from_json(json: &str) -> WipeResult<Self> {
        serde_json::from_str(json).map_err(|e| WipeError::serde(e.to_string()))
    }

    pub fn to_json(&self) -> WipeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WipeError::serde(e.to_string()))
    }

    /// Video-mode settings for `path`, everything else default.
    pub fn video(path: impl Into<PathBuf>) -> Self {
        Self {
            mask: Some(MaskSettings::Video {
                path: path.into(),
                audio_monitoring: MonitoringType::None,
            }),
            ..Self::default()
        }
    }

    /// Image-mode settings for a direct image path.
    pub fn image_path(path: impl Into<PathBuf>) -> Self {
        Self {
            mask: Some(MaskSettings::Image {
                name: None,
                path: Some(path.into()),
            }),
            ..Self::default()
        }
    }

    /// Image-mode settings for a mask library entry.
    pub fn image_named(name: impl Into<String>) -> Self {
        Self {
            mask: Some(MaskSettings::Image {
                name: Some(name.into()),
                path: None,
            }),
            ..Self::default()
        }
    }
}

/// Runtime state owned by a transition instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionState {
    pub invert: bool,
    pub color_target_a: ColorVec4,
    pub color_target_b: ColorVec4,
    pub transitioning: bool,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self {
            invert: false,
            color_target_a: ColorVec4::from_packed_rgba(DEFAULT_COLOR_TARGET_A),
            color_target_b: ColorVec4::from_packed_rgba(DEFAULT_COLOR_TARGET_B),
            transitioning: false,
        }
    }
}

impl TransitionState {
    /// Take the visual parameters from `settings`, keeping the lifecycle flag.
    pub fn apply(&mut self, settings: &TransitionSettings) {
        self.invert = settings.invert;
        self.color_target_a = ColorVec4::from_packed_rgba(settings.color_target_a);
        self.color_target_b = ColorVec4::from_packed_rgba(settings.color_target_b);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/settings.rs"]
mod tests;
