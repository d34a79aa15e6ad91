//! Shared value types and the error taxonomy.

/// Strict hex color parsing.
pub mod color;
/// Error type used across the crate.
pub mod error;
