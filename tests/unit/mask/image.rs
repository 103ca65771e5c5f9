use super::*;

fn mask(frames: usize, loops: u32) -> ImageMask {
    let frames = (0..frames)
        .map(|i| Texture::solid(2, 2, [i as u8, i as u8, i as u8, 255]))
        .collect();
    ImageMask::new(AnimatedImage {
        frames,
        loop_count: loops,
    })
    .unwrap()
}

#[test]
fn total_steps_counts_every_play_through() {
    assert_eq!(total_steps(10, 0), 9);
    assert_eq!(total_steps(5, 2), 12);
    assert_eq!(total_steps(1, 3), 0);
    assert_eq!(total_steps(0, 0), 0);
    assert_eq!(total_steps(4, u32::MAX), 3);
    assert_eq!(total_steps(4, INFINITE_LOOP_SENTINEL), 3);
}

#[test]
fn ten_frames_at_half_progress_selects_frame_four() {
    assert_eq!(step_position(0.5, 10, 0).frame, 4);

    let mut m = mask(10, 0);
    assert!(m.select_frame(0.5, false));
    assert_eq!(m.current_frame(), 4);
    assert_eq!(m.update_texture().unwrap().pixel(0, 0), [4, 4, 4, 255]);
}

#[test]
fn inverted_start_lands_on_last_frame_of_final_loop() {
    let mut m = mask(5, 2);
    m.select_frame(0.0, true);
    assert_eq!(m.current_frame(), 4);
    assert_eq!(m.current_loop(), 2);
    assert!(!m.loops_exhausted());
}

#[test]
fn inverted_finite_loops_play_backwards_then_freeze() {
    let mut m = mask(5, 1);
    let frames: Vec<_> = (0..=10)
        .map(|i| {
            m.select_frame(f64::from(i) / 10.0, true);
            m.current_frame()
        })
        .collect();
    assert_eq!(frames, vec![4, 3, 2, 1, 4, 4, 3, 2, 1, 0, 0]);
    assert!(m.loops_exhausted());

    assert!(!m.select_frame(0.5, true));
    assert_eq!(m.current_frame(), 0);

    m.restart();
    assert!(m.select_frame(0.0, true));
    assert_eq!((m.current_frame(), m.current_loop()), (4, 1));
}

#[test]
fn frames_are_monotonic_within_a_single_play_through() {
    let mut last = 0;
    for i in 0..=100 {
        let frame = step_position(f64::from(i) / 100.0, 8, 0).frame;
        assert!(frame >= last, "frame went backwards at t={i}/100");
        last = frame;
    }
    assert_eq!(last, 7);
}

#[test]
fn every_play_through_ends_on_the_last_frame() {
    // 4 frames, 1 repeat: steps 0..=6.
    let frames: Vec<_> = (0..=6)
        .map(|s| step_position((f64::from(s) + 0.5) / 6.0, 4, 1))
        .map(|p| (p.frame, p.loop_index))
        .collect();
    assert_eq!(
        frames,
        vec![(0, 0), (1, 0), (2, 0), (3, 0), (1, 0), (2, 0), (3, 1)]
    );
}

#[test]
fn invert_mirrors_progress() {
    for i in 0..=20 {
        let t = f64::from(i) / 20.0;
        let mut inverted = mask(6, 1);
        let mut mirrored = mask(6, 1);
        inverted.select_frame(t, true);
        mirrored.select_frame(1.0 - t, false);
        assert_eq!(inverted.current_frame(), mirrored.current_frame());
        assert_eq!(inverted.current_loop(), mirrored.current_loop());
    }
}

#[test]
fn single_frame_is_static() {
    let mut m = mask(1, 0);
    for t in [0.0, 0.3, 1.0, f64::NAN, -4.0, 9.0] {
        m.select_frame(t, false);
        assert_eq!(m.current_frame(), 0);
    }
    assert!(m.resolve(0.7, true).is_some());
}

#[test]
fn out_of_range_progress_is_clamped() {
    assert_eq!(step_position(-1.0, 10, 0).frame, 0);
    assert_eq!(step_position(f64::NAN, 10, 0).frame, 0);
    assert_eq!(step_position(7.0, 10, 0).frame, 9);
}

#[test]
fn exhausted_loops_freeze_the_position() {
    let mut m = mask(3, 1);
    m.select_frame(1.0, false);
    assert_eq!((m.current_frame(), m.current_loop()), (2, 1));
    assert!(!m.select_frame(0.2, false));
    assert_eq!(m.current_frame(), 2);

    m.restart();
    assert_eq!((m.current_frame(), m.current_loop()), (0, 0));
    assert!(m.select_frame(0.3, false));
    assert_eq!(m.current_frame(), 1);
}

#[test]
fn infinite_loops_never_exhaust() {
    let mut m = mask(3, 0);
    m.select_frame(1.0, false);
    assert!(!m.loops_exhausted());
    assert!(m.select_frame(0.0, false));
    assert_eq!(m.current_frame(), 0);
}

#[test]
fn selection_is_separate_from_upload() {
    let mut m = mask(4, 0);
    assert_eq!(m.update_texture().unwrap().pixel(0, 0)[0], 0);
    assert!(!m.is_dirty());

    assert!(m.select_frame(1.0, false));
    assert!(m.is_dirty());
    assert_eq!(m.texture().unwrap().pixel(0, 0)[0], 0);

    assert_eq!(m.update_texture().unwrap().pixel(0, 0)[0], 3);
    assert!(!m.is_dirty());
    assert!(!m.select_frame(1.0, false));
    assert!(!m.is_dirty());
}

#[test]
fn empty_images_are_rejected() {
    let err = ImageMask::new(AnimatedImage {
        frames: Vec::new(),
        loop_count: 0,
    })
    .unwrap_err();
    assert!(err.to_string().contains("no frames"));
}
