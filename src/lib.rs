//! colorwipe is an animated color wipe transition engine.
//!
//! Two sources are blended through a traveling mask, either a secondary video clip or a stepped
//! animated image, while their audio is crossfaded. The entry point is [`AnimatedWipe`]:
//!
//! - Create it with a [`GraphicsContext`], a [`MediaFactory`] and [`TransitionSettings`]
//! - Drive runs with [`AnimatedWipe::start`] / [`AnimatedWipe::stop`] against a [`TransitionHost`]
//! - Call [`AnimatedWipe::video_render`] per frame and [`AnimatedWipe::audio_render`] per audio
//!   cycle
//!
//! Media decoding of video clips and the real GPU are host services behind traits; the crate
//! ships [`CpuBackend`] as the reference blend backend.
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod audio;
pub(crate) mod compositor;
pub(crate) mod gfx;
pub(crate) mod mask;
pub(crate) mod transition;

pub use crate::foundation::core::{Affine, Canvas, ColorVec4, Point, Vec2, clamp_progress};
pub use crate::foundation::error::{WipeError, WipeResult};

pub use crate::assets::library::MaskLibrary;
pub use crate::audio::mix::{
    AUDIO_OUTPUT_FRAMES, AudioBus, AudioCycle, AudioMix, MAX_AUDIO_CHANNELS, MAX_AUDIO_MIXES,
    SourceAudio, accumulate, crossfade, earliest_timestamp, gain_a, gain_b, mix as mix_audio,
    silence,
};
pub use crate::compositor::blend::{CompositeRequest, composite};
pub use crate::compositor::kernel::mask_weight;
pub use crate::gfx::backend::{BlendBackend, CpuBackend, FrameRGBA};
pub use crate::gfx::context::{GraphicsContext, GraphicsScope};
pub use crate::gfx::effect::{
    BLEND_TECHNIQUE, BlendEffect, BlendParams, EFFECT_FILE_NAME, EffectParam, EffectParseError,
    EffectProgram, ParamType, Technique,
};
pub use crate::gfx::texrender::{TexRender, TexRenderPass};
pub use crate::gfx::texture::Texture;
pub use crate::mask::MaskSource;
pub use crate::mask::clip::{
    ClipId, MaskClip, MediaFactory, MonitoringType, VIDEO_FILE_EXTENSIONS, is_video_file,
};
pub use crate::mask::decode::{
    AnimatedImage, decode_animated_image, gif_loop_count, open_animated_image,
};
pub use crate::mask::image::{
    INFINITE_LOOP_SENTINEL, ImageMask, StepPosition, normalize_loop_count, step_position,
    total_steps,
};
pub use crate::mask::video::{ClipTiming, VideoMask};
pub use crate::transition::lifecycle::{StartKind, TransitionHost};
pub use crate::transition::settings::{
    DEFAULT_COLOR_TARGET_A, DEFAULT_COLOR_TARGET_B, MaskSettings, TransitionSettings,
    TransitionState,
};
pub use crate::transition::wipe::{AnimatedWipe, EffectSource, WipeFrame, WipeOptions};
