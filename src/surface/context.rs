use std::sync::{Mutex, MutexGuard};

use crate::foundation::color::Color;
use crate::foundation::error::{OtfbmError, OtfbmResult};
use crate::surface::canvas::Canvas;

/// Bytes per RGBA8 pixel.
pub(crate) const RGBA8_CHANNELS: usize = 4;

/// Allocation limits for a [`RenderContext`].
#[derive(Debug, Clone, Copy)]
pub struct RenderContextOpts {
    /// Maximum bytes a single canvas may occupy.
    pub max_canvas_bytes: usize,
    /// Maximum bytes held by all live canvases together.
    pub max_live_bytes: usize,
}

impl Default for RenderContextOpts {
    fn default() -> Self {
        Self {
            // 8192x8192 RGBA8.
            max_canvas_bytes: 256 * 1024 * 1024,
            max_live_bytes: 1024 * 1024 * 1024,
        }
    }
}

/// Allocation ledger counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContextStats {
    /// Canvases currently alive.
    pub live_canvases: usize,
    /// Bytes held by live canvases.
    pub live_bytes: usize,
    /// Canvases allocated since the context was created.
    pub alloc_canvases: u64,
    /// Bytes allocated since the context was created.
    pub alloc_bytes: u64,
    /// Canvases released since the context was created.
    pub released_canvases: u64,
}

/// Shared surface context.
///
/// Construct one at startup and pass it by reference to every operation that creates canvases.
/// Canvas allocation and release are serialized through a single lock; pixel work on a canvas
/// that is already owned does not touch the context.
#[derive(Debug)]
pub struct RenderContext {
    opts: RenderContextOpts,
    ledger: Mutex<ContextStats>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(RenderContextOpts::default())
    }
}

impl RenderContext {
    pub fn new(opts: RenderContextOpts) -> Self {
        tracing::debug!(
            max_canvas_bytes = opts.max_canvas_bytes,
            max_live_bytes = opts.max_live_bytes,
            "render context initialized"
        );
        Self {
            opts,
            ledger: Mutex::new(ContextStats::default()),
        }
    }

    pub fn opts(&self) -> RenderContextOpts {
        self.opts
    }

    pub fn stats(&self) -> ContextStats {
        self.ledger().clone()
    }

    /// Allocate a `width x height` canvas filled with `fill`.
    pub fn create_canvas(&self, width: u32, height: u32, fill: Color) -> OtfbmResult<Canvas<'_>> {
        let len = canvas_byte_len(width, height)?;
        let mut ledger = self.ledger();
        self.reserve(&mut ledger, len)?;

        let data = fill.to_array().repeat(len / RGBA8_CHANNELS);
        tracing::debug!(width, height, bytes = len, "canvas allocated");
        Ok(Canvas::from_parts(self, width, height, data))
    }

    /// Take ownership of decoder output as a canvas bound to this context.
    ///
    /// Fails with a resource error when `data` is not exactly `width * height * 4` bytes.
    pub fn adopt_rgba8(
        &self,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> OtfbmResult<Canvas<'_>> {
        let len = canvas_byte_len(width, height)?;
        if data.len() != len {
            return Err(OtfbmError::resource(format!(
                "rgba8 buffer for {width}x{height} must be {len} bytes, got {}",
                data.len()
            )));
        }
        let mut ledger = self.ledger();
        self.reserve(&mut ledger, len)?;

        tracing::debug!(width, height, bytes = len, "canvas adopted");
        Ok(Canvas::from_parts(self, width, height, data))
    }

    /// Return a canvas's storage to the context. Called from `Canvas::drop`.
    pub(crate) fn release(&self, data: Vec<u8>) {
        let mut ledger = self.ledger();
        let len = data.len();
        ledger.live_canvases = ledger.live_canvases.saturating_sub(1);
        ledger.live_bytes = ledger.live_bytes.saturating_sub(len);
        ledger.released_canvases = ledger.released_canvases.saturating_add(1);
        drop(data);
        tracing::debug!(bytes = len, "canvas released");
    }

    fn reserve(&self, ledger: &mut ContextStats, len: usize) -> OtfbmResult<()> {
        if len > self.opts.max_canvas_bytes {
            return Err(OtfbmError::resource(format!(
                "canvas of {len} bytes exceeds per-canvas limit of {} bytes",
                self.opts.max_canvas_bytes
            )));
        }
        if ledger.live_bytes.saturating_add(len) > self.opts.max_live_bytes {
            return Err(OtfbmError::resource(format!(
                "canvas of {len} bytes exceeds live budget ({} of {} bytes in use)",
                ledger.live_bytes, self.opts.max_live_bytes
            )));
        }
        ledger.live_canvases = ledger.live_canvases.saturating_add(1);
        ledger.live_bytes = ledger.live_bytes.saturating_add(len);
        ledger.alloc_canvases = ledger.alloc_canvases.saturating_add(1);
        ledger.alloc_bytes = ledger.alloc_bytes.saturating_add(len as u64);
        Ok(())
    }

    // Counters stay consistent even if a holder panicked, so poisoning is ignored.
    fn ledger(&self) -> MutexGuard<'_, ContextStats> {
        self.ledger
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Byte length of a tightly packed RGBA8 surface, rejecting empty or overflowing dimensions.
pub(crate) fn canvas_byte_len(width: u32, height: u32) -> OtfbmResult<usize> {
    if width == 0 || height == 0 {
        return Err(OtfbmError::resource(format!(
            "canvas dimensions must be non-zero, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(RGBA8_CHANNELS))
        .ok_or_else(|| {
            OtfbmError::resource(format!("canvas dimensions {width}x{height} overflow"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/surface/context.rs"]
mod tests;
