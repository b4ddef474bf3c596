//! # Utilities Module
//!
//! Numeric helpers for interpolation and reachability queries over tile grids.

pub mod math;
pub mod reach;

pub use math::*;
pub use reach::*;
