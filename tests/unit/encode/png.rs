use super::*;
use crate::foundation::color::Color;
use crate::surface::context::RenderContext;

fn chunk_types(png: &[u8]) -> Vec<[u8; 4]> {
    let mut out = Vec::new();
    let mut i = PNG_SIGNATURE.len();
    while i + 8 <= png.len() {
        let len = u32::from_be_bytes(png[i..i + 4].try_into().unwrap()) as usize;
        out.push(png[i + 4..i + 8].try_into().unwrap());
        i += 12 + len;
    }
    out
}

fn decode_rgba(png: &[u8]) -> image::RgbaImage {
    image::load_from_memory_with_format(png, image::ImageFormat::Png)
        .unwrap()
        .to_rgba8()
}

#[test]
fn one_pixel_white_starts_with_signature() {
    let buf = PixelBuffer::new(1, 1, vec![255, 255, 255, 255]);
    let png = encode_png(&buf).unwrap();
    assert_eq!(&png[..8], &PNG_SIGNATURE);
}

#[test]
fn header_is_8bit_rgba() {
    let buf = PixelBuffer::new(3, 2, vec![0; 24]);
    let png = encode_png(&buf).unwrap();
    // IHDR data: width(4) height(4) depth(1) color_type(1)
    assert_eq!(&png[12..16], b"IHDR");
    assert_eq!(u32::from_be_bytes(png[16..20].try_into().unwrap()), 3);
    assert_eq!(u32::from_be_bytes(png[20..24].try_into().unwrap()), 2);
    assert_eq!(png[24], 8);
    assert_eq!(png[25], 6);
}

#[test]
fn output_has_no_ancillary_chunks() {
    let buf = PixelBuffer::new(4, 4, (0..64u8).collect());
    let png = encode_png(&buf).unwrap();
    for ty in chunk_types(&png) {
        assert!(
            matches!(&ty, b"IHDR" | b"IDAT" | b"IEND"),
            "unexpected chunk {}",
            String::from_utf8_lossy(&ty)
        );
    }
}

#[test]
fn encoding_is_deterministic() {
    let data: Vec<u8> = (0..16 * 16 * 4).map(|i| (i * 31 % 251) as u8).collect();
    let a = encode_png(&PixelBuffer::new(16, 16, data.clone())).unwrap();
    let b = encode_png(&PixelBuffer::new(16, 16, data.clone())).unwrap();
    assert_eq!(a, b);

    let fast = PngOptions::fast();
    let fa = encode_png_with(&PixelBuffer::new(16, 16, data.clone()), fast).unwrap();
    let fb = encode_png_with(&PixelBuffer::new(16, 16, data), fast).unwrap();
    assert_eq!(fa, fb);
}

#[test]
fn two_by_two_roundtrips_positions() {
    let red = [255, 0, 0, 255];
    let blue = [0, 0, 255, 255];
    let data = [red, blue, blue, red].concat();
    let png = encode_png(&PixelBuffer::new(2, 2, data)).unwrap();

    let img = decode_rgba(&png);
    assert_eq!(img.dimensions(), (2, 2));
    assert_eq!(img.get_pixel(0, 0).0, red);
    assert_eq!(img.get_pixel(1, 0).0, blue);
    assert_eq!(img.get_pixel(0, 1).0, blue);
    assert_eq!(img.get_pixel(1, 1).0, red);
}

#[test]
fn alpha_is_preserved_without_premultiplication() {
    let data = vec![200, 100, 50, 1, 10, 20, 30, 0, 255, 255, 255, 128];
    let png = encode_png(&PixelBuffer::new(3, 1, data.clone())).unwrap();
    assert_eq!(decode_rgba(&png).into_raw(), data);
}

#[test]
fn length_mismatch_is_an_encode_error() {
    for len in [0usize, 3, 15, 17, 64] {
        let err = encode_png(&PixelBuffer::new(2, 2, vec![0; len])).unwrap_err();
        assert!(matches!(err, OtfbmError::Encode(_)), "len {len}: {err}");
    }
}

#[test]
fn zero_dimensions_are_an_encode_error() {
    for (w, h) in [(0, 1), (1, 0), (0, 0)] {
        let err = encode_png(&PixelBuffer::new(w, h, Vec::new())).unwrap_err();
        assert!(matches!(err, OtfbmError::Encode(_)), "{w}x{h}: {err}");
    }
}

#[test]
fn encode_canvas_releases_and_encodes() {
    let ctx = RenderContext::default();
    let mut canvas = ctx.create_canvas(2, 2, Color::WHITE).unwrap();
    canvas.put_pixel(1, 1, Color::rgba(1, 2, 3, 4));

    let png = encode_canvas(canvas).unwrap();
    assert_eq!(ctx.stats().live_canvases, 0);

    let img = decode_rgba(&png);
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(1, 1).0, [1, 2, 3, 4]);
}
