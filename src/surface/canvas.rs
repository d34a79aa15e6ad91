use std::fmt;

use crate::foundation::color::Color;
use crate::surface::context::{RGBA8_CHANNELS, RenderContext};

/// Straight-alpha RGBA8 surface owned by exactly one operation.
///
/// Canvases are created through a [`RenderContext`] and hand their storage back to it when
/// dropped, so release happens on every exit path. They are deliberately not `Clone`.
pub struct Canvas<'ctx> {
    ctx: &'ctx RenderContext,
    width: u32,
    height: u32,
    /// RGBA8, row-major, top row first, tightly packed.
    data: Vec<u8>,
}

impl<'ctx> Canvas<'ctx> {
    /// Callers have already reserved `data.len()` bytes in the context ledger.
    pub(crate) fn from_parts(
        ctx: &'ctx RenderContext,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Self {
        Self {
            ctx,
            width,
            height,
            data,
        }
    }

    pub fn context(&self) -> &'ctx RenderContext {
        self.ctx
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Raw RGBA8 bytes, mutable. The length is fixed.
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let i = self.index_of(x, y)?;
        let px = &self.data[i..i + RGBA8_CHANNELS];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }

    /// Overwrite one pixel. Out-of-bounds coordinates are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(i) = self.index_of(x, y) {
            self.data[i..i + RGBA8_CHANNELS].copy_from_slice(&color.to_array());
        }
    }

    pub fn fill(&mut self, color: Color) {
        let c = color.to_array();
        for px in self.data.chunks_exact_mut(RGBA8_CHANNELS) {
            px.copy_from_slice(&c);
        }
    }

    /// Mutable rows, top to bottom, each `width * 4` bytes.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        let stride = self.width as usize * RGBA8_CHANNELS;
        self.data.chunks_exact_mut(stride)
    }

    /// Rows, top to bottom, each `width * 4` bytes.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let stride = self.width as usize * RGBA8_CHANNELS;
        self.data.chunks_exact(stride)
    }

    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * RGBA8_CHANNELS)
    }
}

impl fmt::Debug for Canvas<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Drop for Canvas<'_> {
    fn drop(&mut self) {
        self.ctx.release(std::mem::take(&mut self.data));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/canvas.rs"]
mod tests;
