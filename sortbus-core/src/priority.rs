//! Conventional priority levels.
//!
//! Lower numbers are dispatched first. Any `i32` is a valid priority; these
//! constants only name the usual levels.

/// Dispatched before [`MEDIUM`] and [`LOW`].
pub const HIGH: i32 = 100;

/// The middle level.
pub const MEDIUM: i32 = 500;

/// Dispatched after [`HIGH`] and [`MEDIUM`].
pub const LOW: i32 = 1000;
