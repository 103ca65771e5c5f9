use super::*;
use crate::gfx::{backend::CpuBackend, context::GraphicsContext};

#[derive(Default)]
struct MockBackend {
    calls: Vec<(String, u32, u32, bool)>,
}

impl GraphicsContext for MockBackend {
    fn enter_graphics(&mut self) {}
    fn leave_graphics(&mut self) {}
}

impl BlendBackend for MockBackend {
    fn draw_blend(
        &mut self,
        _effect: &BlendEffect,
        technique: &str,
        params: &BlendParams<'_>,
        width: u32,
        height: u32,
    ) -> WipeResult<()> {
        self.calls
            .push((technique.to_string(), width, height, params.invert));
        Ok(())
    }
}

fn request<'a>(a: &'a Texture, b: &'a Texture, mask: Option<&'a Texture>) -> CompositeRequest<'a> {
    CompositeRequest {
        a,
        b,
        mask,
        invert: false,
        color_target_a: ColorVec4::WHITE,
        color_target_b: ColorVec4::BLACK,
        width: 4,
        height: 2,
    }
}

#[test]
fn missing_or_empty_mask_issues_no_draw() {
    let effect = BlendEffect::builtin().unwrap();
    let a = Texture::solid(4, 2, [255, 0, 0, 255]);
    let b = Texture::solid(4, 2, [0, 0, 255, 255]);
    let empty = Texture::solid(0, 0, [0; 4]);

    let mut backend = MockBackend::default();
    assert!(!composite(&mut backend, &effect, &request(&a, &b, None)).unwrap());
    assert!(!composite(&mut backend, &effect, &request(&a, &b, Some(&empty))).unwrap());
    assert!(backend.calls.is_empty());
}

#[test]
fn draws_blend_technique_at_output_size() {
    let effect = BlendEffect::builtin().unwrap();
    let a = Texture::solid(4, 2, [255, 0, 0, 255]);
    let b = Texture::solid(4, 2, [0, 0, 255, 255]);
    let mask = Texture::solid(1, 1, [0, 0, 0, 255]);

    let mut backend = MockBackend::default();
    let mut req = request(&a, &b, Some(&mask));
    req.invert = true;
    assert!(composite(&mut backend, &effect, &req).unwrap());
    assert_eq!(
        backend.calls,
        vec![(BLEND_TECHNIQUE.to_string(), 4, 2, true)]
    );
}

#[test]
fn cpu_backend_splits_on_mask_colors() {
    let effect = BlendEffect::builtin().unwrap();
    let a = Texture::solid(4, 2, [255, 0, 0, 255]);
    let b = Texture::solid(4, 2, [0, 0, 255, 255]);
    // Left half white (shows A), right half black (shows B).
    let mask = Texture::from_rgba8_premul(
        2,
        1,
        vec![
            255, 255, 255, 255, //
            0, 0, 0, 255,
        ],
    )
    .unwrap();

    let mut backend = CpuBackend::new();
    assert!(composite(&mut backend, &effect, &request(&a, &b, Some(&mask))).unwrap());
    let frame = backend.frame().unwrap();
    assert_eq!((frame.width, frame.height), (4, 2));
    assert!(frame.premultiplied);
    for y in 0..2usize {
        for x in 0..4usize {
            let idx = (y * 4 + x) * 4;
            let expected = if x < 2 { [255, 0, 0, 255] } else { [0, 0, 255, 255] };
            assert_eq!(&frame.data[idx..idx + 4], &expected);
        }
    }
    assert_eq!(backend.draw_count(), 1);
}

#[test]
fn compositing_is_deterministic() {
    let effect = BlendEffect::builtin().unwrap();
    let a = Texture::solid(3, 3, [200, 10, 10, 255]);
    let b = Texture::solid(3, 3, [10, 10, 200, 255]);
    let mask = Texture::solid(3, 3, [90, 90, 90, 255]);

    let mut first = CpuBackend::new();
    let mut second = CpuBackend::new();
    let mut req = request(&a, &b, Some(&mask));
    req.width = 3;
    req.height = 3;
    composite(&mut first, &effect, &req).unwrap();
    composite(&mut second, &effect, &req).unwrap();
    assert_eq!(first.frame(), second.frame());
    assert_eq!(mask.pixel(1, 1), [90, 90, 90, 255]);
}
