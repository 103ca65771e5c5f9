use std::{cell::Cell, rc::Rc};

use super::*;
use crate::audio::mix::AudioMix;

struct FakeClip {
    size: Canvas,
    frame: Option<Texture>,
    restarts: Rc<Cell<u32>>,
    monitoring: Rc<Cell<MonitoringType>>,
    audio: AudioMix,
}

impl FakeClip {
    fn new(size: Canvas, frame: Option<Texture>) -> Self {
        Self {
            size,
            frame,
            restarts: Rc::default(),
            monitoring: Rc::default(),
            audio: AudioMix::silent(2),
        }
    }
}

impl MaskClip for FakeClip {
    fn id(&self) -> ClipId {
        ClipId(11)
    }
    fn size(&self) -> Canvas {
        self.size
    }
    fn current_frame(&self) -> Option<Texture> {
        self.frame.clone()
    }
    fn restart(&mut self) {
        self.restarts.set(self.restarts.get() + 1);
    }
    fn duration_ns(&self) -> u64 {
        2_500_000_000
    }
    fn frame_count(&self) -> u64 {
        75
    }
    fn audio_pending(&self) -> bool {
        true
    }
    fn audio_timestamp(&self) -> u64 {
        0
    }
    fn audio_mix(&self) -> &AudioMix {
        &self.audio
    }
    fn set_monitoring_type(&mut self, monitoring: MonitoringType) {
        self.monitoring.set(monitoring);
    }
}

#[test]
fn zero_sized_clip_yields_no_texture() {
    let clip = FakeClip::new(Canvas::new(0, 0), Some(Texture::solid(2, 2, [255; 4])));
    let mut mask = VideoMask::new(Box::new(clip), MonitoringType::None);
    assert!(mask.render().is_none());
    assert!(mask.scale_to(Canvas::new(1920, 1080)).is_none());
}

#[test]
fn renders_frame_at_native_size() {
    // Decoded frame is half the native size; it is stretched to fill the canvas.
    let frame = Texture::from_rgba8_premul(
        2,
        1,
        vec![
            255, 255, 255, 255, //
            0, 0, 0, 255,
        ],
    )
    .unwrap();
    let clip = FakeClip::new(Canvas::new(4, 2), Some(frame));
    let mut mask = VideoMask::new(Box::new(clip), MonitoringType::None);

    let tex = mask.render().unwrap();
    assert_eq!(tex.size(), Canvas::new(4, 2));
    assert_eq!(tex.pixel(1, 1), [255, 255, 255, 255]);
    assert_eq!(tex.pixel(2, 0), [0, 0, 0, 255]);

    // The canvas is reset every frame, so a second render succeeds.
    assert!(mask.render().is_some());
}

#[test]
fn missing_frame_renders_transparent_canvas() {
    let clip = FakeClip::new(Canvas::new(3, 3), None);
    let mut mask = VideoMask::new(Box::new(clip), MonitoringType::None);
    let tex = mask.render().unwrap();
    assert!(tex.rgba8_premul.iter().all(|b| *b == 0));
}

#[test]
fn timing_and_restart_go_through_the_clip() {
    let clip = FakeClip::new(Canvas::new(8, 8), None);
    let restarts = Rc::clone(&clip.restarts);
    let monitoring = Rc::clone(&clip.monitoring);
    let mut mask = VideoMask::new(Box::new(clip), MonitoringType::MonitorAndOutput);
    assert_eq!(monitoring.get(), MonitoringType::MonitorAndOutput);

    assert!(mask.timing().is_none());
    let timing = mask.query_timing();
    assert_eq!(timing.frame_count, 75);
    assert_eq!(timing.duration_ms(), 2_500);
    assert_eq!(mask.timing(), Some(timing));

    mask.restart();
    assert_eq!(restarts.get(), 1);
    assert_eq!(mask.child_id(), ClipId(11));
    assert_eq!(
        mask.scale_to(Canvas::new(16, 4)),
        Some(Vec2::new(2.0, 0.5))
    );
}
