//! Procedural image producers.
//!
//! Every primitive allocates its canvas through the caller's [`crate::RenderContext`] and returns
//! it ready for [`crate::encode_canvas`].

/// Fractal Perlin noise.
pub mod noise;
/// Solid fills, checkerboards and circles.
pub mod primitives;
