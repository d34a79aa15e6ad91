use crate::decode::sniff::{FormatTag, SourceBlob, sniff};
use crate::foundation::color::Color;
use crate::foundation::error::{OtfbmError, OtfbmResult};
use crate::surface::canvas::Canvas;
use crate::surface::context::RenderContext;

/// Sniff, decode and normalize encoded image bytes into a canvas ready for encoding.
///
/// Unknown formats are rejected before anything is allocated. Non-PNG sources are flattened
/// onto an opaque white canvas; PNG sources pass through untouched.
#[tracing::instrument(skip(ctx, bytes), fields(len = bytes.len()))]
pub fn load_and_normalize<'ctx>(
    ctx: &'ctx RenderContext,
    bytes: &[u8],
) -> OtfbmResult<Canvas<'ctx>> {
    load_tagged(ctx, bytes, sniff(bytes))
}

impl SourceBlob {
    /// Decode and normalize this blob using its sniffed format.
    pub fn load<'ctx>(&self, ctx: &'ctx RenderContext) -> OtfbmResult<Canvas<'ctx>> {
        load_tagged(ctx, self.bytes(), self.format())
    }
}

fn load_tagged<'ctx>(
    ctx: &'ctx RenderContext,
    bytes: &[u8],
    tag: FormatTag,
) -> OtfbmResult<Canvas<'ctx>> {
    tracing::debug!(format = %tag, "source sniffed");
    if tag == FormatTag::Unknown {
        return Err(OtfbmError::unsupported_format(
            "expected PNG, JPEG or BMP magic bytes",
        ));
    }
    let canvas = decode_canvas(ctx, bytes, tag)?;
    normalize(canvas, tag)
}

/// Decode `bytes` as `tag` into a straight-alpha RGBA8 canvas.
pub fn decode_canvas<'ctx>(
    ctx: &'ctx RenderContext,
    bytes: &[u8],
    tag: FormatTag,
) -> OtfbmResult<Canvas<'ctx>> {
    let format = tag.image_format().ok_or_else(|| {
        OtfbmError::unsupported_format(format!("no decoder for {tag} input"))
    })?;
    let rgba = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| OtfbmError::decode(format!("decode {tag} image: {e}")))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(width, height, format = %tag, "source decoded");

    ctx.adopt_rgba8(width, height, rgba.into_raw())
}

/// Bring a decoded canvas into canonical form.
///
/// PNG input is returned unchanged. Anything else is copied over a fresh opaque white canvas of
/// the same size, and the original is released.
// TODO: the white-background copy compensates for decoders that mishandle transparency in
// non-PNG input; revisit once JPEG/BMP decode is verified to match PNG alpha handling.
pub fn normalize<'ctx>(canvas: Canvas<'ctx>, tag: FormatTag) -> OtfbmResult<Canvas<'ctx>> {
    if tag == FormatTag::Png {
        tracing::debug!("png passthrough");
        return Ok(canvas);
    }

    let (width, height) = canvas.dimensions();
    let mut flat = canvas.context().create_canvas(width, height, Color::WHITE)?;
    overwrite_in_place(flat.as_raw_mut(), canvas.as_raw())?;
    drop(canvas);

    tracing::debug!(width, height, format = %tag, "source flattened onto white");
    Ok(flat)
}

/// Copy `src` over `dst` at full opacity with no blending.
pub fn overwrite_in_place(dst: &mut [u8], src: &[u8]) -> OtfbmResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(OtfbmError::resource(
            "overwrite_in_place expects equal-length rgba8 buffers",
        ));
    }
    dst.copy_from_slice(src);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/decode/normalize.rs"]
mod tests;
