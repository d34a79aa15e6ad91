use image::ImageEncoder as _;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::foundation::error::{OtfbmError, OtfbmResult};
use crate::surface::canvas::Canvas;
use crate::surface::context::RGBA8_CHANNELS;
use crate::surface::view::{PixelBuffer, extract_pixels};

/// PNG signature bytes.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// zlib/filter settings for PNG output.
///
/// Any fixed choice is deterministic; the options only trade speed for size.
#[derive(Debug, Clone, Copy)]
pub struct PngOptions {
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }
}

impl PngOptions {
    /// Fast compression, no filtering. Larger files.
    pub fn fast() -> Self {
        Self {
            compression: CompressionType::Fast,
            filter: FilterType::NoFilter,
        }
    }
}

/// Encode a straight-alpha RGBA8 buffer as an 8-bit RGBA PNG with default options.
pub fn encode_png(buffer: &PixelBuffer) -> OtfbmResult<Vec<u8>> {
    encode_png_with(buffer, PngOptions::default())
}

/// Encode a straight-alpha RGBA8 buffer as an 8-bit RGBA PNG.
///
/// Output carries only IHDR, IDAT and IEND chunks: no timestamp, gamma or text metadata, so
/// identical pixels always produce identical bytes. Alpha is written as-is.
#[tracing::instrument(skip(buffer), fields(width = buffer.width, height = buffer.height))]
pub fn encode_png_with(buffer: &PixelBuffer, opts: PngOptions) -> OtfbmResult<Vec<u8>> {
    validate_shape(buffer)?;

    let mut out = Vec::new();
    PngEncoder::new_with_quality(&mut out, opts.compression, opts.filter)
        .write_image(
            &buffer.data,
            buffer.width,
            buffer.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| OtfbmError::encode(format!("png encoder failed: {e}")))?;

    tracing::debug!(bytes = out.len(), "png encoded");
    Ok(out)
}

/// Extract a canvas's pixels, release the canvas, then encode the pixels as PNG.
pub fn encode_canvas(canvas: Canvas<'_>) -> OtfbmResult<Vec<u8>> {
    encode_canvas_with(canvas, PngOptions::default())
}

/// [`encode_canvas`] with explicit PNG options.
pub fn encode_canvas_with(canvas: Canvas<'_>, opts: PngOptions) -> OtfbmResult<Vec<u8>> {
    let buffer = extract_pixels(&canvas)?;
    drop(canvas);
    encode_png_with(&buffer, opts)
}

fn validate_shape(buffer: &PixelBuffer) -> OtfbmResult<()> {
    let (w, h) = (buffer.width, buffer.height);
    if w == 0 || h == 0 {
        return Err(OtfbmError::encode(format!(
            "png dimensions must be non-zero, got {w}x{h}"
        )));
    }
    let expected = (w as usize)
        .checked_mul(h as usize)
        .and_then(|px| px.checked_mul(RGBA8_CHANNELS))
        .ok_or_else(|| OtfbmError::encode(format!("png dimensions {w}x{h} overflow")))?;
    if buffer.data.len() != expected {
        return Err(OtfbmError::encode(format!(
            "{w}x{h} rgba8 buffer must be {expected} bytes, got {}",
            buffer.data.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
