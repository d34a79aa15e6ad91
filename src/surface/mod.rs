//! Pixel surfaces: the shared render context, owned canvases and byte-level views.

/// Owned RGBA8 canvases.
pub mod canvas;
/// Render context serializing canvas allocation and release.
pub mod context;
/// Bounds-checked pixel views and owned pixel buffers.
pub mod view;
