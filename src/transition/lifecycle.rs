use crate::{
    foundation::core::Canvas,
    mask::{MaskSource, clip::ClipId},
    transition::settings::TransitionState,
};

/// Services the owning host exposes to a transition.
pub trait TransitionHost {
    /// Size of the transition's output, used to report the mask scale.
    fn output_size(&self) -> Canvas;

    /// Switch the transition to a fixed duration in milliseconds.
    fn enable_fixed_duration(&mut self, enabled: bool, duration_ms: u32);

    /// Register `child` so the host renders and mixes it with the transition.
    fn add_active_child(&mut self, child: ClipId);

    /// Undo [`TransitionHost::add_active_child`].
    fn remove_active_child(&mut self, child: ClipId);
}

/// What a `start` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartKind {
    /// Fresh run. Carries the fixed duration set on the host in video mode.
    Fresh { duration_ms: Option<u32> },
    /// Already running: the mask clip was rewound and nothing else changed.
    Restart,
}

/// Begin (or restart) a transition run.
pub fn start<H>(
    state: &mut TransitionState,
    mask: Option<&mut MaskSource>,
    host: &mut H,
) -> StartKind
where
    H: TransitionHost + ?Sized,
{
    let kind = match mask {
        Some(MaskSource::Video(video)) => {
            if state.transitioning && video.timing().is_some() {
                video.restart();
                tracing::debug!(clip = video.child_id().0, "restart mask clip");
                return StartKind::Restart;
            }
            let timing = video.query_timing();
            let duration_ms = timing.duration_ms();
            host.enable_fixed_duration(true, duration_ms);
            host.add_active_child(video.child_id());
            tracing::debug!(
                clip = video.child_id().0,
                duration_ms,
                frame_count = timing.frame_count,
                "start video mask"
            );
            StartKind::Fresh {
                duration_ms: Some(duration_ms),
            }
        }
        Some(MaskSource::Image(image)) => {
            image.restart();
            tracing::debug!(frames = image.frame_count(), "start image mask");
            StartKind::Fresh { duration_ms: None }
        }
        None => StartKind::Fresh { duration_ms: None },
    };
    state.transitioning = true;
    kind
}

/// End the current run.
pub fn stop<H>(state: &mut TransitionState, mask: Option<&MaskSource>, host: &mut H)
where
    H: TransitionHost + ?Sized,
{
    if let Some(video) = mask.and_then(MaskSource::as_video) {
        host.remove_active_child(video.child_id());
    }
    state.transitioning = false;
    tracing::debug!("stop transition");
}

/// Mask child the host should traverse while rendering.
pub fn active_child(state: &TransitionState, mask: Option<&MaskSource>) -> Option<ClipId> {
    if !state.transitioning {
        return None;
    }
    configured_child(mask)
}

/// Mask child owned by the transition, running or not.
pub fn configured_child(mask: Option<&MaskSource>) -> Option<ClipId> {
    mask.and_then(MaskSource::as_video).map(|v| v.child_id())
}

#[cfg(test)]
#[path = "../../tests/unit/transition/lifecycle.rs"]
mod tests;
