//! # Utilities Module
//!
//! Screen-space geometry and graph reachability helpers.

pub mod math;
pub mod pathfinding;

pub use math::*;
pub use pathfinding::*;
