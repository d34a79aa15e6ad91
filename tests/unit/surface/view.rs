use super::*;
use crate::foundation::color::Color;
use crate::surface::context::RenderContext;

#[test]
fn view_validates_length_before_reading() {
    let bytes = [0u8; 16];
    let view = PixelView::new(2, 2, &bytes).unwrap();
    assert_eq!((view.width(), view.height()), (2, 2));
    assert_eq!(view.as_bytes().len(), 16);

    for (w, h, len) in [(2, 2, 15usize), (2, 2, 17), (1, 1, 0), (3, 1, 8)] {
        let data = vec![0u8; len];
        let err = PixelView::new(w, h, &data).unwrap_err();
        assert!(matches!(err, OtfbmError::Resource(_)), "{w}x{h}/{len}: {err}");
    }
}

#[test]
fn view_rejects_empty_dimensions() {
    assert!(PixelView::new(0, 4, &[]).is_err());
}

#[test]
fn extracted_buffer_outlives_canvas() {
    let ctx = RenderContext::default();
    let mut canvas = ctx.create_canvas(2, 1, Color::BLACK).unwrap();
    canvas.put_pixel(1, 0, Color::rgba(10, 20, 30, 40));
    let buf = extract_pixels(&canvas).unwrap();
    drop(canvas);

    assert_eq!(ctx.stats().live_canvases, 0);
    assert_eq!(buf.width, 2);
    assert_eq!(buf.height, 1);
    assert_eq!(buf.data, vec![0, 0, 0, 255, 10, 20, 30, 40]);
}
