//! Absgrid Core
//!
//! This crate contains the shared functionality for the absgrid crates:
//! math re-exports, plain geometry types, hash collections, logging and profiling.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
