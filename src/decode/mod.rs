//! Source image intake: magic-byte sniffing, decoding and normalization.

/// Decode and flatten source images into canonical canvases.
pub mod normalize;
/// Container format detection by magic bytes.
pub mod sniff;
