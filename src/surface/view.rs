use crate::foundation::error::{OtfbmError, OtfbmResult};
use crate::surface::canvas::Canvas;
use crate::surface::context::canvas_byte_len;

/// Owned, dimension-tagged RGBA8 bytes ready for encoding.
///
/// Produced by [`extract_pixels`] with `data.len() == width * height * 4`. The fields are public
/// so callers can hand over buffers from elsewhere; the encoder re-validates the shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, top row first.
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }
}

/// Bounds-checked borrowed view over RGBA8 bytes.
///
/// The byte length is checked against `width * height * 4` before any pixel is read.
#[derive(Clone, Copy, Debug)]
pub struct PixelView<'a> {
    width: u32,
    height: u32,
    data: &'a [u8],
}

impl<'a> PixelView<'a> {
    pub fn new(width: u32, height: u32, data: &'a [u8]) -> OtfbmResult<Self> {
        let expected = canvas_byte_len(width, height)?;
        if data.len() != expected {
            return Err(OtfbmError::resource(format!(
                "{width}x{height} rgba8 surface declares {expected} bytes but holds {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Copy the viewed bytes into an owned buffer.
    pub fn to_buffer(&self) -> PixelBuffer {
        PixelBuffer::new(self.width, self.height, self.data.to_vec())
    }
}

/// Copy a canvas's pixels into an owned [`PixelBuffer`].
///
/// The result does not borrow the canvas, so the canvas can be released right after.
pub fn extract_pixels(canvas: &Canvas<'_>) -> OtfbmResult<PixelBuffer> {
    let view = PixelView::new(canvas.width(), canvas.height(), canvas.as_raw())?;
    Ok(view.to_buffer())
}

#[cfg(test)]
#[path = "../../tests/unit/surface/view.rs"]
mod tests;
