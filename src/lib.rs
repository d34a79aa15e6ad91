//! otfbm renders simple procedural images and re-encodes fetched images as PNG bytes.
//!
//! The crate is the binary-data core behind an on-the-fly bitmap service: HTTP routing and
//! network fetching live elsewhere and talk to it through three calls.
//!
//! - [`encode_canvas`]: a rendered [`Canvas`] becomes deterministic 8-bit RGBA PNG bytes.
//! - [`load_and_normalize`]: encoded bytes of unknown format become a [`Canvas`] ready to encode.
//! - [`parse_color`]: a strict `RRGGBBAA` hex string becomes a [`Color`].
//!
//! # Pipeline overview
//!
//! 1. **Sniff**: leading magic bytes classify the source as PNG, JPEG, BMP or unknown
//! 2. **Decode**: the `image` crate produces straight-alpha RGBA8 pixels
//! 3. **Normalize**: non-PNG sources are copied onto an opaque white canvas; PNG passes through
//! 4. **Encode**: pixels are copied out of the canvas, the canvas is released, PNG is written
//!
//! All canvases are allocated through one [`RenderContext`], created at startup and passed by
//! reference. Allocation and release are serialized by the context; release happens on drop.
#![forbid(unsafe_code)]

mod decode;
mod draw;
mod encode;
mod foundation;
mod surface;

pub use decode::normalize::{decode_canvas, load_and_normalize, normalize, overwrite_in_place};
pub use decode::sniff::{FormatTag, SourceBlob, sniff};
pub use draw::noise::perlin;
pub use draw::primitives::{checkered, circle, solid};
pub use encode::png::{
    PNG_SIGNATURE, PngOptions, encode_canvas, encode_canvas_with, encode_png, encode_png_with,
};
pub use foundation::color::{Color, parse_color};
pub use foundation::error::{OtfbmError, OtfbmResult};
pub use surface::canvas::Canvas;
pub use surface::context::{ContextStats, RenderContext, RenderContextOpts};
pub use surface::view::{PixelBuffer, PixelView, extract_pixels};
