use crate::mask::clip::MaskClip;

/// Number of mixer buses a transition can write.
pub const MAX_AUDIO_MIXES: usize = 6;

/// Maximum channel count of a bus.
pub const MAX_AUDIO_CHANNELS: usize = 8;

/// Samples per channel in one audio cycle.
pub const AUDIO_OUTPUT_FRAMES: usize = 1024;

/// Planar audio for one mixer bus: `data[channel][frame]`.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioBus {
    /// One buffer of [`AUDIO_OUTPUT_FRAMES`] samples per channel.
    pub data: Vec<Vec<f32>>,
}

impl AudioBus {
    /// Bus of `channels` silent channels.
    pub fn silent(channels: usize) -> Self {
        Self::filled(channels, 0.0)
    }

    /// Bus of `channels` channels holding a constant sample value.
    pub fn filled(channels: usize, value: f32) -> Self {
        let channels = channels.min(MAX_AUDIO_CHANNELS);
        Self {
            data: vec![vec![value; AUDIO_OUTPUT_FRAMES]; channels],
        }
    }

    fn channel(&self, ch: usize) -> &[f32] {
        self.data.get(ch).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Audio for every mixer bus in one cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioMix {
    /// Exactly [`MAX_AUDIO_MIXES`] buses.
    pub output: Vec<AudioBus>,
}

impl AudioMix {
    /// Silent buses with `channels` channels each.
    pub fn silent(channels: usize) -> Self {
        Self::filled(channels, 0.0)
    }

    /// Buses holding a constant sample value on every channel.
    pub fn filled(channels: usize, value: f32) -> Self {
        Self {
            output: vec![AudioBus::filled(channels, value); MAX_AUDIO_MIXES],
        }
    }

    fn bus(&self, mix: usize) -> Option<&AudioBus> {
        self.output.get(mix)
    }
}

/// One independently clocked audio producer.
#[derive(Clone, Copy, Debug)]
pub struct SourceAudio<'a> {
    /// Timestamp of `mix` in nanoseconds, `0` when the source has no audio this cycle.
    pub timestamp: u64,
    /// The source's audio.
    pub mix: &'a AudioMix,
}

/// Everything the crossfade needs for one audio cycle.
#[derive(Clone, Copy, Debug)]
pub struct AudioCycle<'a> {
    /// Transition progress.
    pub t: f32,
    /// Outgoing source, if it produced audio.
    pub a: Option<SourceAudio<'a>>,
    /// Incoming source, if it produced audio.
    pub b: Option<SourceAudio<'a>>,
    /// Bitmask of enabled mixer buses.
    pub mixers: u32,
    /// Channels to write per bus.
    pub channels: usize,
    /// Output sample rate in Hz. Gains are evaluated once per cycle from `t`, so this is only
    /// reported alongside the mixed cycle.
    pub sample_rate: u32,
}

/// Gain applied to the outgoing source.
pub fn gain_a(t: f32) -> f32 {
    1.0 - clamp_unit(t)
}

/// Gain applied to the incoming source.
pub fn gain_b(t: f32) -> f32 {
    clamp_unit(t)
}

fn clamp_unit(t: f32) -> f32 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Earliest of two timestamps, ignoring zero ("not available").
pub fn earliest_timestamp(a: u64, b: u64) -> u64 {
    match (a, b) {
        (0, x) | (x, 0) => x,
        (a, b) => a.min(b),
    }
}

fn mixer_enabled(mixers: u32, mix: usize) -> bool {
    mix < 32 && mixers & (1u32 << mix) != 0
}

/// Crossfade A into B, writing every enabled bus.
///
/// `ts_out` becomes the earliest timestamp reported by A or B. Returns `false`, leaving the
/// output untouched, when neither source has audio this cycle.
pub fn crossfade(ts_out: &mut u64, out: &mut AudioMix, cycle: &AudioCycle<'_>) -> bool {
    let ts_a = cycle.a.map_or(0, |s| s.timestamp);
    let ts_b = cycle.b.map_or(0, |s| s.timestamp);
    let ts = earliest_timestamp(ts_a, ts_b);
    if ts == 0 {
        return false;
    }

    let ga = gain_a(cycle.t);
    let gb = gain_b(cycle.t);
    let a = cycle.a.filter(|s| s.timestamp != 0);
    let b = cycle.b.filter(|s| s.timestamp != 0);
    let channels = cycle.channels.min(MAX_AUDIO_CHANNELS);

    for (mix, bus) in out.output.iter_mut().enumerate().take(MAX_AUDIO_MIXES) {
        if !mixer_enabled(cycle.mixers, mix) {
            continue;
        }
        let a_bus = a.and_then(|s| s.mix.bus(mix));
        let b_bus = b.and_then(|s| s.mix.bus(mix));

        for (ch, dst) in bus.data.iter_mut().enumerate().take(channels) {
            let a_ch = a_bus.map_or(&[][..], |bus| bus.channel(ch));
            let b_ch = b_bus.map_or(&[][..], |bus| bus.channel(ch));
            for (i, sample) in dst.iter_mut().enumerate().take(AUDIO_OUTPUT_FRAMES) {
                let av = a_ch.get(i).copied().unwrap_or(0.0);
                let bv = b_ch.get(i).copied().unwrap_or(0.0);
                *sample = av * ga + bv * gb;
            }
        }
    }

    *ts_out = ts;
    true
}

/// Zero every enabled bus and channel of `out`.
pub fn silence(out: &mut AudioMix, mixers: u32, channels: usize) {
    let channels = channels.min(MAX_AUDIO_CHANNELS);
    for (mix, bus) in out.output.iter_mut().enumerate().take(MAX_AUDIO_MIXES) {
        if !mixer_enabled(mixers, mix) {
            continue;
        }
        for dst in bus.data.iter_mut().take(channels) {
            dst.fill(0.0);
        }
    }
}

/// Add `child` into `out` at unit gain for every enabled bus and channel.
pub fn accumulate(out: &mut AudioMix, child: &AudioMix, mixers: u32, channels: usize) {
    let channels = channels.min(MAX_AUDIO_CHANNELS);
    for (mix, bus) in out.output.iter_mut().enumerate().take(MAX_AUDIO_MIXES) {
        if !mixer_enabled(mixers, mix) {
            continue;
        }
        let Some(child_bus) = child.bus(mix) else {
            continue;
        };
        for (ch, dst) in bus.data.iter_mut().enumerate().take(channels) {
            let src = child_bus.channel(ch);
            for (d, s) in dst.iter_mut().zip(src).take(AUDIO_OUTPUT_FRAMES) {
                *d += *s;
            }
        }
    }
}

/// Mix one audio cycle of the transition.
///
/// Without a mask clip this is the plain crossfade. With one, the clip's own audio is summed on
/// top and `ts_out` is the earliest of the crossfade and clip timestamps. When neither source has
/// audio the clip's audio is output alone at its own timestamp. Returns `false` when there is
/// nothing to output this cycle; the caller retries on the next one.
pub fn mix(
    ts_out: &mut u64,
    out: &mut AudioMix,
    cycle: &AudioCycle<'_>,
    mask: Option<&dyn MaskClip>,
) -> bool {
    let mut mask_ts = 0u64;
    if let Some(clip) = mask
        && !clip.audio_pending()
    {
        mask_ts = clip.audio_timestamp();
        if mask_ts == 0 {
            tracing::trace!("mask clip has no audio timestamp yet");
            return false;
        }
    }

    let mixed = crossfade(ts_out, out, cycle);
    let Some(clip) = mask.filter(|_| mask_ts != 0) else {
        return mixed;
    };

    if mixed {
        *ts_out = earliest_timestamp(*ts_out, mask_ts);
    } else {
        silence(out, cycle.mixers, cycle.channels);
        *ts_out = mask_ts;
    }
    accumulate(out, clip.audio_mix(), cycle.mixers, cycle.channels);
    tracing::trace!(
        ts_out = *ts_out,
        mask_ts,
        sample_rate = cycle.sample_rate,
        "mixed mask clip audio"
    );
    true
}

#[cfg(test)]
#[path = "../../tests/unit/audio/mix.rs"]
mod tests;
