use super::*;

#[test]
fn create_and_drop_balances_ledger() {
    let ctx = RenderContext::default();
    {
        let a = ctx.create_canvas(4, 2, Color::WHITE).unwrap();
        let b = ctx.create_canvas(1, 1, Color::BLACK).unwrap();
        let st = ctx.stats();
        assert_eq!(st.live_canvases, 2);
        assert_eq!(st.live_bytes, 4 * 2 * 4 + 4);
        drop(a);
        drop(b);
    }
    let st = ctx.stats();
    assert_eq!(st.live_canvases, 0);
    assert_eq!(st.live_bytes, 0);
    assert_eq!(st.alloc_canvases, 2);
    assert_eq!(st.released_canvases, 2);
    assert_eq!(st.alloc_bytes, 36);
}

#[test]
fn create_rejects_zero_dimensions() {
    let ctx = RenderContext::default();
    for (w, h) in [(0, 1), (1, 0), (0, 0)] {
        let err = ctx.create_canvas(w, h, Color::WHITE).unwrap_err();
        assert!(matches!(err, OtfbmError::Resource(_)), "{w}x{h}: {err}");
    }
    assert_eq!(ctx.stats().alloc_canvases, 0);
}

#[test]
fn per_canvas_limit_is_enforced() {
    let ctx = RenderContext::new(RenderContextOpts {
        max_canvas_bytes: 16,
        max_live_bytes: 1 << 20,
    });
    ctx.create_canvas(2, 2, Color::WHITE).unwrap();
    let err = ctx.create_canvas(3, 2, Color::WHITE).unwrap_err();
    assert!(matches!(err, OtfbmError::Resource(_)));
    assert_eq!(ctx.stats().live_canvases, 0);
}

#[test]
fn live_budget_is_enforced_and_freed_on_release() {
    let ctx = RenderContext::new(RenderContextOpts {
        max_canvas_bytes: 1 << 20,
        max_live_bytes: 32,
    });
    let a = ctx.create_canvas(2, 2, Color::WHITE).unwrap();
    let b = ctx.create_canvas(2, 2, Color::WHITE).unwrap();
    assert!(ctx.create_canvas(1, 1, Color::WHITE).is_err());
    drop(a);
    let c = ctx.create_canvas(1, 1, Color::WHITE).unwrap();
    assert_eq!(ctx.stats().live_canvases, 2);
    drop((b, c));
    assert_eq!(ctx.stats().live_bytes, 0);
}

#[test]
fn adopt_validates_length() {
    let ctx = RenderContext::default();
    let err = ctx.adopt_rgba8(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, OtfbmError::Resource(_)));
    assert_eq!(ctx.stats().alloc_canvases, 0);

    let canvas = ctx.adopt_rgba8(2, 2, vec![7; 16]).unwrap();
    assert_eq!(canvas.as_raw(), &[7u8; 16][..]);
    assert_eq!(ctx.stats().live_canvases, 1);
}

#[test]
fn byte_len_overflow_is_a_resource_error() {
    // u32::MAX * u32::MAX * 4 does not fit in 64 bits.
    let err = canvas_byte_len(u32::MAX, u32::MAX).unwrap_err();
    assert!(matches!(err, OtfbmError::Resource(_)));
    assert_eq!(canvas_byte_len(3, 5).unwrap(), 60);
}

#[test]
fn context_is_shareable_across_threads() {
    let ctx = RenderContext::default();
    std::thread::scope(|s| {
        for i in 0..8u32 {
            let ctx = &ctx;
            s.spawn(move || {
                for _ in 0..50 {
                    let c = ctx.create_canvas(i + 1, 3, Color::BLACK).unwrap();
                    assert_eq!(c.width(), i + 1);
                }
            });
        }
    });
    let st = ctx.stats();
    assert_eq!(st.live_canvases, 0);
    assert_eq!(st.alloc_canvases, 400);
    assert_eq!(st.released_canvases, 400);
}
