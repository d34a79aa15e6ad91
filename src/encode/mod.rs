//! PNG serialization of pixel buffers and canvases.

/// Deterministic 8-bit RGBA PNG encoder.
pub mod png;
