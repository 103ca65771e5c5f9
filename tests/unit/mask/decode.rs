use std::io::Cursor;

use image::{
    Delay, Frame, RgbaImage,
    codecs::gif::{GifEncoder, Repeat},
};

use super::*;

fn encode_gif(colors: &[[u8; 4]], repeat: Option<Repeat>) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        if let Some(repeat) = repeat {
            encoder.set_repeat(repeat).unwrap();
        }
        let frames = colors.iter().map(|c| {
            let img = RgbaImage::from_pixel(4, 3, image::Rgba(*c));
            Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(40, 1))
        });
        encoder.encode_frames(frames).unwrap();
    }
    buf
}

fn minimal_gif(extensions: &[u8]) -> Vec<u8> {
    let mut bytes = b"GIF89a".to_vec();
    // 1x1 screen, global color table with two entries.
    bytes.extend_from_slice(&[0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00]);
    bytes.extend_from_slice(&[0, 0, 0, 255, 255, 255]);
    bytes.extend_from_slice(extensions);
    bytes.extend_from_slice(&[0x2C, 0, 0, 0, 0, 0x01, 0x00, 0x01, 0x00, 0x00]);
    bytes.extend_from_slice(&[0x02, 0x02, 0x44, 0x01, 0x00]);
    bytes.push(0x3B);
    bytes
}

fn netscape_block(loops: u16) -> Vec<u8> {
    let mut block = vec![0x21, 0xFF, 0x0B];
    block.extend_from_slice(b"NETSCAPE2.0");
    let [lo, hi] = loops.to_le_bytes();
    block.extend_from_slice(&[0x03, 0x01, lo, hi, 0x00]);
    block
}

#[test]
fn loop_count_from_netscape_extension() {
    assert_eq!(gif_loop_count(&minimal_gif(&netscape_block(5))), 5);
    assert_eq!(gif_loop_count(&minimal_gif(&netscape_block(0))), 0);
}

#[test]
fn loop_count_is_infinite_without_extension() {
    assert_eq!(gif_loop_count(&minimal_gif(&[])), 0);
    assert_eq!(gif_loop_count(b"\x89PNG\r\n\x1a\n"), 0);
    assert_eq!(gif_loop_count(b"GIF89a"), 0);
}

#[test]
fn loop_count_ignores_signature_inside_comments() {
    let mut comment = vec![0x21, 0xFE, 0x0B];
    comment.extend_from_slice(b"NETSCAPE2.0");
    comment.push(0x00);
    assert_eq!(gif_loop_count(&minimal_gif(&comment)), 0);

    comment.extend_from_slice(&netscape_block(3));
    assert_eq!(gif_loop_count(&minimal_gif(&comment)), 3);
}

#[test]
fn decodes_gif_frames_and_repeat_count() {
    let bytes = encode_gif(
        &[[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]],
        Some(Repeat::Finite(2)),
    );
    let image = decode_animated_image(&bytes).unwrap();
    assert_eq!(image.frame_count(), 3);
    assert_eq!(image.loop_count, 2);
    for frame in &image.frames {
        assert_eq!((frame.width, frame.height), (4, 3));
    }
    assert!(image.frames[0].pixel(0, 0)[0] > 200);
    assert!(image.frames[2].pixel(3, 2)[2] > 200);
}

#[test]
fn infinite_gif_reports_zero_loops() {
    let bytes = encode_gif(&[[0, 0, 0, 255], [255, 255, 255, 255]], Some(Repeat::Infinite));
    let image = decode_animated_image(&bytes).unwrap();
    assert_eq!(image.frame_count(), 2);
    assert_eq!(image.loop_count, 0);
}

#[test]
fn still_images_decode_to_one_premultiplied_frame() {
    let img = RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();

    let image = decode_animated_image(&buf).unwrap();
    assert_eq!(image.frame_count(), 1);
    assert_eq!(image.loop_count, 0);
    assert_eq!(
        image.frames[0].rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_and_missing_files_fail() {
    assert!(decode_animated_image(b"not an image").is_err());
    let missing = std::env::temp_dir().join("colorwipe-missing-mask.gif");
    assert!(open_animated_image(&missing).is_err());
}
